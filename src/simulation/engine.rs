//! The simulation engine
//!
//! Holds the participating objects and the gravity options, and turns them
//! into a [`History`] (or a lazy stream of snapshots) one tick at a time.

use std::collections::BTreeMap;

use log::debug;

use crate::error::SimError;
use crate::simulation::forces::{ForceSet, GravityLaw};
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::snapshot::{History, Snapshot};
use crate::simulation::states::{Body, MassPoint, ObjectId, System};

#[derive(Debug, Clone)]
pub struct SimulationEngine {
    objects: BTreeMap<ObjectId, MassPoint>, // keyed by identity
    gravity_enabled: bool,
    gravity_law: GravityLaw,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine {
    /// Empty engine, gravity on, per-axis law
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            gravity_enabled: true,
            gravity_law: GravityLaw::default(),
        }
    }

    /// Register `object`. Returns `false` (and does nothing) if it is already
    /// registered
    pub fn add_object(&mut self, object: &MassPoint) -> bool {
        if self.objects.contains_key(&object.id()) {
            return false;
        }
        debug!("engine: add {} ({:?})", object, object.id());
        self.objects.insert(object.id(), object.clone());
        true
    }

    /// Unregister `object`. Returns `false` if it was not registered
    pub fn remove_object(&mut self, object: &MassPoint) -> bool {
        let removed = self.objects.remove(&object.id()).is_some();
        if removed {
            debug!("engine: remove {} ({:?})", object, object.id());
        }
        removed
    }

    pub fn contains(&self, object: &MassPoint) -> bool {
        self.objects.contains_key(&object.id())
    }

    /// First registered object whose name matches, ignoring case
    pub fn find(&self, name: &str) -> Option<&MassPoint> {
        let wanted = name.to_lowercase();
        self.objects().find(|o| o.name().to_lowercase() == wanted)
    }

    /// Registered objects in case-insensitive name order, ties broken by
    /// identity. Every tick visits the bodies in this order.
    pub fn objects(&self) -> impl Iterator<Item = &MassPoint> {
        self.name_ordered().into_iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Affects ticks computed after the call only
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn set_gravity_law(&mut self, law: GravityLaw) {
        self.gravity_law = law;
    }

    pub fn gravity_law(&self) -> GravityLaw {
        self.gravity_law
    }

    /// Simulate ticks `0..=duration` and keep every snapshot.
    ///
    /// Fails with [`SimError::InvalidArgument`] for a negative duration.
    pub fn run(&self, duration: i64) -> Result<History, SimError> {
        let ticks = self.ticks(duration)?;
        debug!(
            "run: {} objects, {} ticks, gravity {}",
            self.objects.len(),
            duration,
            if self.gravity_enabled { format!("{:?}", self.gravity_law) } else { "off".to_string() },
        );
        Ok(ticks.collect())
    }

    /// Same recurrence as [`run`](Self::run), produced lazily. Only the
    /// previous snapshot is kept alive between items.
    pub fn ticks(&self, duration: i64) -> Result<Ticks<'_>, SimError> {
        let last = u64::try_from(duration)
            .map_err(|_| SimError::InvalidArgument(format!("illegal duration: {duration}")))?;

        Ok(Ticks {
            engine: self,
            forces: ForceSet::for_tick(self.gravity_enabled.then_some(self.gravity_law)),
            last,
            prev: None,
        })
    }

    // helpers ==============================================================================

    /// Names can change between runs, so the order is rebuilt on every call
    fn name_ordered(&self) -> Vec<&MassPoint> {
        let mut keyed: Vec<(String, &MassPoint)> = self
            .objects
            .values()
            .map(|o| (o.name().to_lowercase(), o))
            .collect();
        keyed.sort_by(|(a, oa), (b, ob)| a.cmp(b).then(oa.id().cmp(&ob.id())));
        keyed.into_iter().map(|(_, o)| o).collect()
    }

    /// Frozen view for the step after `prev`: state from `prev`, mass and
    /// applied forces read from the objects right now. Bodies are laid out
    /// in [`objects`](Self::objects) order, which fixes the order gravity
    /// contributions are summed in
    fn system_after(&self, prev: &Snapshot) -> System {
        let bodies = self
            .objects()
            .map(|o| Body {
                id: o.id(),
                x: prev.position(o),
                v: prev.velocity(o),
                m: o.mass(),
                applied: o.net_applied_force(),
            })
            .collect();

        System { bodies, tick: prev.tick() }
    }
}

/// Forward-only stream of snapshots for ticks `0..=last`.
/// See [`SimulationEngine::ticks`]
pub struct Ticks<'a> {
    engine: &'a SimulationEngine,
    forces: ForceSet,
    last: u64,
    prev: Option<Snapshot>,
}

impl Iterator for Ticks<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let next = match &self.prev {
            None => Snapshot::initial(self.engine.objects()),
            Some(prev) if prev.tick() < self.last => {
                let mut sys = self.engine.system_after(prev);
                semi_implicit_euler(&mut sys, &self.forces);
                Snapshot::from_system(&sys)
            }
            Some(_) => return None,
        };

        self.prev = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.prev {
            None => self.last.checked_add(1),
            Some(prev) => Some(self.last - prev.tick()),
        };
        match remaining.and_then(|r| usize::try_from(r).ok()) {
            Some(r) => (r, Some(r)),
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut engine = SimulationEngine::new();
        let a = MassPoint::new("a", 1.0);

        assert!(engine.add_object(&a));
        assert!(!engine.add_object(&a.clone()));
        assert_eq!(engine.len(), 1);

        assert!(engine.remove_object(&a));
        assert!(!engine.remove_object(&a));
        assert!(engine.is_empty());
    }

    #[test]
    fn same_name_does_not_collapse_objects() {
        let mut engine = SimulationEngine::new();
        let a = MassPoint::new("Moon", 1.0);
        let b = MassPoint::new("moon", 2.0);
        engine.add_object(&a);
        engine.add_object(&b);

        assert_eq!(engine.len(), 2);
        assert_eq!(engine.find("MOON"), Some(&a));
        assert!(engine.find("sun").is_none());
    }

    #[test]
    fn negative_duration_is_rejected() {
        let engine = SimulationEngine::new();
        assert!(matches!(engine.run(-1), Err(SimError::InvalidArgument(_))));
        assert!(engine.ticks(i64::MIN).is_err());
    }

    #[test]
    fn ticks_reports_its_exact_length() {
        let engine = SimulationEngine::new();
        let mut ticks = engine.ticks(4).unwrap();
        assert_eq!(ticks.size_hint(), (5, Some(5)));
        ticks.next();
        ticks.next();
        assert_eq!(ticks.size_hint(), (3, Some(3)));
        assert_eq!(ticks.count(), 3);
    }

    #[test]
    fn objects_are_visited_in_name_order() {
        let mut engine = SimulationEngine::new();
        let zeta = MassPoint::new("zeta", 1.0);
        let alpha = MassPoint::new("Alpha", 1.0);
        let beta = MassPoint::new("beta", 1.0);
        let beta_too = MassPoint::new("BETA", 1.0);
        for o in [&zeta, &beta_too, &alpha, &beta] {
            engine.add_object(o);
        }

        let names: Vec<String> = engine.objects().map(MassPoint::name).collect();
        assert_eq!(names, vec!["Alpha", "beta", "BETA", "zeta"]);

        let sys = engine.system_after(&Snapshot::initial(engine.objects()));
        let ids: Vec<ObjectId> = sys.bodies.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![alpha.id(), beta.id(), beta_too.id(), zeta.id()]);

        // renaming reorders the next tick
        zeta.set_name("aardvark");
        assert_eq!(engine.objects().next(), Some(&zeta));
    }
}
