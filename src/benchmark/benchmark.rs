use std::time::Instant;

use crate::simulation::engine::SimulationEngine;
use crate::simulation::forces::{ForceSet, ForceTerm, GravityLaw, PerAxisGravity, RadialGravity, GRAVITATIONAL_CONSTANT};
use crate::simulation::states::{Body, MassPoint, NVec3, System};

/// Objects of size `n` on a deterministic scatter, no rand needed
pub fn make_objects(n: usize) -> Vec<MassPoint> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            MassPoint::at(
                format!("body-{i}"),
                1.0e6,
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            )
        })
        .collect()
}

fn make_system(objects: &[MassPoint]) -> System {
    let bodies = objects
        .iter()
        .map(|o| Body {
            id: o.id(),
            x: o.initial_position(),
            v: o.initial_velocity(),
            m: o.mass(),
            applied: NVec3::zeros(),
        })
        .collect();

    System { bodies, tick: 0 }
}

/// Time one force evaluation per gravity law for growing N
pub fn bench_gravity() {
    let ns = [100, 200, 400, 800, 1600, 3200];

    for n in ns {
        let sys = scattered_system(n);
        let mut out = vec![NVec3::zeros(); n];

        let per_axis = PerAxisGravity { G: GRAVITATIONAL_CONSTANT };
        let radial = RadialGravity { G: GRAVITATIONAL_CONSTANT };

        // Warm up
        per_axis.force(&sys, &mut out);
        radial.force(&sys, &mut out);

        let t0 = Instant::now();
        per_axis.force(&sys, &mut out);
        let dt_axis = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        radial.force(&sys, &mut out);
        let dt_radial = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, per-axis = {:8.6} s, radial = {:8.6} s", dt_axis, dt_radial);
    }
}

/// Time full `run` calls (materialized history) against streaming `ticks`
/// for growing N. Output is CSV so it can be pasted into a spreadsheet
pub fn bench_run() {
    let ticks = 50;

    println!("N,run_ms,stream_ms");

    for n in (50..=400).step_by(50) {
        let objects = make_objects(n);
        let mut engine = SimulationEngine::new();
        engine.set_gravity_law(GravityLaw::PerAxis);
        for o in &objects {
            engine.add_object(o);
        }

        let t0 = Instant::now();
        let _history = engine.run(ticks);
        let ms_run = t0.elapsed().as_secs_f64() * 1000.0;

        // streaming keeps one snapshot alive; walk it to the end
        let t1 = Instant::now();
        let _last = engine.ticks(ticks).ok().and_then(|it| it.last());
        let ms_stream = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, ms_run, ms_stream);
    }
}

/// Net force on every body of `sys` for one tick; shared with the criterion bench
pub fn one_tick_forces(sys: &System, law: GravityLaw) -> Vec<NVec3> {
    let mut out = vec![NVec3::zeros(); sys.bodies.len()];
    ForceSet::for_tick(Some(law)).accumulate_forces(sys, &mut out);
    out
}

/// Frozen system for `n` scattered bodies; shared with the criterion bench
pub fn scattered_system(n: usize) -> System {
    make_system(&make_objects(n))
}
