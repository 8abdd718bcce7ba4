//! Plain-text report of a simulation history
//!
//! One header, then one line per sampled tick per object:
//!
//! ```text
//! Time: 3s
//!   - probe (Mass: 2) | Velocity: (15, 0, 0) | Position: (30, 0, 0)
//! ```

use crate::error::SimError;
use crate::simulation::snapshot::History;
use crate::simulation::states::{MassPoint, NVec3};

/// Which ticks of a history to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: u64,
    pub end: Option<u64>, // `None`: last tick of the history
    pub interval: u64,
}

impl Default for ReportWindow {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            interval: 1,
        }
    }
}

fn fmt_vec(v: &NVec3) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}

/// Render `objects` at every sampled tick of `history`.
///
/// Objects are listed by name, ignoring case. Fails if the interval is 0 or
/// the window ends past the last tick; a window that starts after it ends
/// renders the header only.
pub fn render_report<'a>(
    history: &History,
    objects: impl IntoIterator<Item = &'a MassPoint>,
    window: ReportWindow,
) -> Result<String, SimError> {
    if window.interval == 0 {
        return Err(SimError::InvalidArgument("report interval must be positive".to_string()));
    }
    let last = history
        .last_tick()
        .ok_or_else(|| SimError::InvalidArgument("history is empty".to_string()))?;
    let end = window.end.unwrap_or(last);
    if end > last {
        return Err(SimError::InvalidArgument(format!(
            "report end {end} is past the last tick {last}"
        )));
    }

    let mut objects: Vec<&MassPoint> = objects.into_iter().collect();
    objects.sort_by_cached_key(|o| (o.name().to_lowercase(), o.id()));

    let mut out = String::new();
    out.push_str("Displaying simulation:\n");
    out.push_str(&format!("  - Start time: {}\n", window.start));
    out.push_str(&format!("  - End time: {}\n", end));
    out.push_str(&format!("  - Interval: {}\n", window.interval));

    for snapshot in history.sample(window.start, end, window.interval) {
        out.push_str(&format!("Time: {}s\n", snapshot.tick()));
        for o in &objects {
            out.push_str(&format!(
                "  - {} | Velocity: {} | Position: {}\n",
                o,
                fmt_vec(&snapshot.velocity(o)),
                fmt_vec(&snapshot.position(o)),
            ));
        }
    }

    Ok(out)
}

/// [`render_report`] straight to stdout
pub fn print_report<'a>(
    history: &History,
    objects: impl IntoIterator<Item = &'a MassPoint>,
    window: ReportWindow,
) -> Result<(), SimError> {
    print!("{}", render_report(history, objects, window)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::SimulationEngine;
    use crate::simulation::states::ForceVector;

    fn pushed_probe() -> (SimulationEngine, MassPoint) {
        let probe = MassPoint::new("probe", 2.0);
        probe.apply(&ForceVector::new("thrust", 10.0, 0.0, 0.0));
        let mut engine = SimulationEngine::new();
        engine.add_object(&probe);
        (engine, probe)
    }

    #[test]
    fn renders_header_and_lines() {
        let (engine, probe) = pushed_probe();
        let history = engine.run(2).unwrap();
        let text = render_report(&history, [&probe], ReportWindow::default()).unwrap();

        let expected = "\
Displaying simulation:
  - Start time: 0
  - End time: 2
  - Interval: 1
Time: 0s
  - probe (Mass: 2) | Velocity: (0, 0, 0) | Position: (0, 0, 0)
Time: 1s
  - probe (Mass: 2) | Velocity: (5, 0, 0) | Position: (5, 0, 0)
Time: 2s
  - probe (Mass: 2) | Velocity: (10, 0, 0) | Position: (15, 0, 0)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn objects_are_listed_by_name_ignoring_case() {
        let (mut engine, probe) = pushed_probe();
        let alpha = MassPoint::new("Alpha", 1.0);
        engine.add_object(&alpha);
        let history = engine.run(0).unwrap();
        let text = render_report(&history, engine.objects(), ReportWindow::default()).unwrap();

        let a = text.find("Alpha").unwrap();
        let p = text.find(&probe.name()).unwrap();
        assert!(a < p);
    }

    #[test]
    fn rejects_bad_windows() {
        let (engine, probe) = pushed_probe();
        let history = engine.run(3).unwrap();

        let zero = ReportWindow { interval: 0, ..Default::default() };
        assert!(render_report(&history, [&probe], zero).is_err());

        let too_far = ReportWindow { end: Some(4), ..Default::default() };
        assert!(render_report(&history, [&probe], too_far).is_err());

        let inverted = ReportWindow { start: 3, end: Some(1), interval: 1 };
        let text = render_report(&history, [&probe], inverted).unwrap();
        assert!(!text.contains("Time:"));
    }
}
