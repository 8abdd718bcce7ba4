//! Per-tick records produced by the engine
//!
//! A [`Snapshot`] freezes the position and velocity of every object the engine
//! held when the tick was built. A [`History`] is the contiguous run of
//! snapshots from tick 0 to the requested duration.

use std::collections::BTreeMap;

use crate::simulation::states::{MassPoint, NVec3, ObjectId, System};

/// Position and velocity of one object at one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: NVec3,
    pub velocity: NVec3,
}

/// Immutable state of every tracked object at one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    tick: u64,
    states: BTreeMap<ObjectId, Kinematics>,
}

impl Snapshot {
    /// Tick 0: every object's initial position and velocity, verbatim
    pub(crate) fn initial<'a>(objects: impl IntoIterator<Item = &'a MassPoint>) -> Self {
        let states = objects
            .into_iter()
            .map(|o| {
                let k = Kinematics {
                    position: o.initial_position(),
                    velocity: o.initial_velocity(),
                };
                (o.id(), k)
            })
            .collect();

        Self { tick: 0, states }
    }

    /// Freeze an advanced system
    pub(crate) fn from_system(sys: &System) -> Self {
        let states = sys
            .bodies
            .iter()
            .map(|b| (b.id, Kinematics { position: b.x, velocity: b.v }))
            .collect();

        Self { tick: sys.tick, states }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Position of `object` at this tick, or its initial position if this
    /// snapshot does not track it
    pub fn position(&self, object: &MassPoint) -> NVec3 {
        self.states
            .get(&object.id())
            .map(|k| k.position)
            .unwrap_or_else(|| object.initial_position())
    }

    /// Velocity of `object` at this tick, or its initial velocity if this
    /// snapshot does not track it
    pub fn velocity(&self, object: &MassPoint) -> NVec3 {
        self.states
            .get(&object.id())
            .map(|k| k.velocity)
            .unwrap_or_else(|| object.initial_velocity())
    }

    pub fn tracks(&self, object: &MassPoint) -> bool {
        self.states.contains_key(&object.id())
    }

    pub fn get(&self, id: ObjectId) -> Option<&Kinematics> {
        self.states.get(&id)
    }

    /// Tracked objects in identity order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Kinematics)> {
        self.states.iter().map(|(id, k)| (*id, k))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Every snapshot of one run, keyed by tick. Keys are contiguous from 0
#[derive(Debug, Clone, PartialEq, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn get(&self, tick: u64) -> Option<&Snapshot> {
        usize::try_from(tick).ok().and_then(|i| self.snapshots.get(i))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Highest tick held, `None` for an empty history
    pub fn last_tick(&self) -> Option<u64> {
        self.snapshots.last().map(Snapshot::tick)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Snapshots at `start, start + interval, ...` up to and including `end`.
    /// Ticks past the end of the history are skipped; an `interval` of 0 is
    /// treated as 1
    pub fn sample(&self, start: u64, end: u64, interval: u64) -> impl Iterator<Item = &Snapshot> {
        let step = usize::try_from(interval.max(1)).unwrap_or(usize::MAX);
        let end = end.min(self.last_tick().unwrap_or(0));
        self.snapshots
            .iter()
            .skip(usize::try_from(start).unwrap_or(usize::MAX))
            .step_by(step)
            .take_while(move |s| s.tick <= end)
    }
}

impl FromIterator<Snapshot> for History {
    fn from_iter<I: IntoIterator<Item = Snapshot>>(iter: I) -> Self {
        Self {
            snapshots: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: u64) -> History {
        (0..n)
            .map(|tick| Snapshot { tick, states: BTreeMap::new() })
            .collect()
    }

    #[test]
    fn untracked_objects_fall_back_to_initial_state() {
        let tracked = MassPoint::at("tracked", 1.0, 1.0, 2.0, 3.0);
        let stranger = MassPoint::at("stranger", 1.0, -4.0, 5.0, 6.0).with_velocity(0.5, 0.0, 0.0);
        let snap = Snapshot::initial([&tracked]);

        assert!(snap.tracks(&tracked));
        assert!(!snap.tracks(&stranger));
        assert_eq!(snap.position(&stranger), NVec3::new(-4.0, 5.0, 6.0));
        assert_eq!(snap.velocity(&stranger), NVec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn tracked_states_are_listed_by_identity() {
        let first = MassPoint::at("zz", 1.0, 1.0, 0.0, 0.0);
        let second = MassPoint::at("aa", 1.0, 2.0, 0.0, 0.0).with_velocity(0.0, 3.0, 0.0);
        assert!(first.id().get() < second.id().get());

        let snap = Snapshot::initial([&second, &first]);
        let ids: Vec<ObjectId> = snap.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);

        let k = snap.get(second.id()).unwrap();
        assert_eq!(k.position, NVec3::new(2.0, 0.0, 0.0));
        assert_eq!(k.velocity, NVec3::new(0.0, 3.0, 0.0));
        assert!(snap.get(MassPoint::new("other", 1.0).id()).is_none());
    }

    #[test]
    fn sample_walks_the_requested_window() {
        let h = history(11);
        let ticks: Vec<u64> = h.sample(2, 9, 3).map(Snapshot::tick).collect();
        assert_eq!(ticks, vec![2, 5, 8]);

        let all: Vec<u64> = h.sample(0, 10, 1).map(Snapshot::tick).collect();
        assert_eq!(all.len(), 11);

        assert_eq!(h.sample(7, 3, 1).count(), 0);
        assert_eq!(h.sample(20, 30, 1).count(), 0);
    }

    #[test]
    fn get_is_keyed_by_tick() {
        let h = history(3);
        assert_eq!(h.get(2).map(Snapshot::tick), Some(2));
        assert!(h.get(3).is_none());
        assert_eq!(h.last_tick(), Some(2));
        assert_eq!(History::default().last_tick(), None);
    }
}
