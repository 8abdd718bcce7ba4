//! Core state types for the point-mass simulation.
//!
//! - `ForceVector` / `MassPoint`: caller-owned, shared handles that the engine
//!   reads when it builds a tick
//! - `Body` / `System`: the frozen per-tick view the force terms and the
//!   integrator operate on
//!
//! Handles are `Rc<RefCell<_>>` so a force (or object) mutated by the caller
//! is seen by every holder, and so the types stay on one thread.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Unique identity of a [`MassPoint`], independent of its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ObjectId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

// =========================================================================================
// Forces
// =========================================================================================

#[derive(Debug)]
struct ForceData {
    name: String,
    magnitude: NVec3,
}

/// A named, axis-decomposed force that any number of [`MassPoint`]s can apply.
///
/// Cloning yields another handle to the *same* force: `set` on one clone is
/// visible through all of them. Two separately constructed forces are never
/// the same force, even with equal names and magnitudes.
#[derive(Debug, Clone)]
pub struct ForceVector {
    inner: Rc<RefCell<ForceData>>,
}

impl ForceVector {
    pub fn new(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ForceData {
                name: name.into(),
                magnitude: NVec3::new(x, y, z),
            })),
        }
    }

    /// Force with zero magnitude on every axis
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, 0.0, 0.0)
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = name.into();
    }

    pub fn magnitude(&self) -> NVec3 {
        self.inner.borrow().magnitude
    }

    pub fn x(&self) -> f64 {
        self.inner.borrow().magnitude.x
    }

    pub fn y(&self) -> f64 {
        self.inner.borrow().magnitude.y
    }

    pub fn z(&self) -> f64 {
        self.inner.borrow().magnitude.z
    }

    /// Replace all three axes at once
    pub fn set(&self, x: f64, y: f64, z: f64) {
        self.inner.borrow_mut().magnitude = NVec3::new(x, y, z);
    }

    /// Whether both handles point at the same force
    pub fn same_as(&self, other: &ForceVector) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

// =========================================================================================
// Mass points
// =========================================================================================

#[derive(Debug)]
struct MassData {
    name: String,
    mass: f64,
    position: NVec3,
    velocity: NVec3,
    forces: Vec<ForceVector>,
}

/// A simulated point mass.
///
/// Like [`ForceVector`], this is a shared handle: the engine and the caller
/// hold clones of the same object, and changes made by the caller between
/// runs are picked up by the next tick the engine computes.
#[derive(Debug, Clone)]
pub struct MassPoint {
    id: ObjectId,
    inner: Rc<RefCell<MassData>>,
}

/// Masses that are not strictly positive become 1
fn sanitize_mass(mass: f64) -> f64 {
    if mass > 0.0 { mass } else { 1.0 }
}

impl MassPoint {
    /// Object at rest at the origin
    pub fn new(name: impl Into<String>, mass: f64) -> Self {
        Self::at(name, mass, 0.0, 0.0, 0.0)
    }

    /// Object at rest at `(x, y, z)`
    pub fn at(name: impl Into<String>, mass: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: ObjectId::next(),
            inner: Rc::new(RefCell::new(MassData {
                name: name.into(),
                mass: sanitize_mass(mass),
                position: NVec3::new(x, y, z),
                velocity: NVec3::zeros(),
                forces: Vec::new(),
            })),
        }
    }

    /// Builder-style initial velocity
    pub fn with_velocity(self, vx: f64, vy: f64, vz: f64) -> Self {
        self.set_initial_velocity(vx, vy, vz);
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = name.into();
    }

    pub fn mass(&self) -> f64 {
        self.inner.borrow().mass
    }

    pub fn set_mass(&self, mass: f64) {
        self.inner.borrow_mut().mass = sanitize_mass(mass);
    }

    pub fn initial_position(&self) -> NVec3 {
        self.inner.borrow().position
    }

    pub fn set_initial_position(&self, x: f64, y: f64, z: f64) {
        self.inner.borrow_mut().position = NVec3::new(x, y, z);
    }

    pub fn initial_velocity(&self) -> NVec3 {
        self.inner.borrow().velocity
    }

    pub fn set_initial_velocity(&self, vx: f64, vy: f64, vz: f64) {
        self.inner.borrow_mut().velocity = NVec3::new(vx, vy, vz);
    }

    /// Apply `force`; applying the same force twice is a no-op
    pub fn apply(&self, force: &ForceVector) {
        if self.is_acted_on_by(force) {
            return;
        }
        self.inner.borrow_mut().forces.push(force.clone());
    }

    /// Stop applying `force`; other objects holding it are unaffected
    pub fn remove(&self, force: &ForceVector) {
        self.inner.borrow_mut().forces.retain(|f| !f.same_as(force));
    }

    pub fn clear_forces(&self) {
        self.inner.borrow_mut().forces.clear();
    }

    pub fn is_acted_on_by(&self, force: &ForceVector) -> bool {
        self.inner.borrow().forces.iter().any(|f| f.same_as(force))
    }

    /// Handles to every force currently applied, in no particular order
    pub fn forces(&self) -> Vec<ForceVector> {
        self.inner.borrow().forces.clone()
    }

    /// Sum of the magnitudes of every applied force, read right now
    pub fn net_applied_force(&self) -> NVec3 {
        self.inner
            .borrow()
            .forces
            .iter()
            .fold(NVec3::zeros(), |acc, f| acc + f.magnitude())
    }
}

impl PartialEq for MassPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MassPoint {}

impl fmt::Display for MassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        write!(f, "{} (Mass: {})", data.name, data.mass)
    }
}

// =========================================================================================
// Frozen per-tick view
// =========================================================================================

/// One object as seen by a single step: previous state plus the mass and
/// applied force read at the time the step runs
#[derive(Debug, Clone)]
pub struct Body {
    pub id: ObjectId,
    pub x: NVec3, // position at the previous tick
    pub v: NVec3, // velocity at the previous tick
    pub m: f64, // mass
    pub applied: NVec3, // net applied force
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // bodies in case-insensitive name order
    pub tick: u64, // tick the positions/velocities belong to
}
