//! Fixed unit-step integrator for the point-mass system
//!
//! Semi-implicit Euler with Δt = 1 tick: the velocity is kicked first, then
//! the position drifts by the *new* velocity.

use super::forces::ForceSet;
use super::states::{NVec3, System};

/// Advance `sys` by one tick in place.
///
/// Forces for every body are evaluated from the positions `sys` holds on
/// entry, before any body moves, so the order of bodies does not matter.
pub fn semi_implicit_euler(sys: &mut System, forces: &ForceSet) {
    let n = sys.bodies.len(); // number of bodies

    // Allocate one force per body, initialized to zero
    // f[i] will hold F_n for body i at the current tick
    let mut f = vec![NVec3::zeros(); n];

    // Ask the force set for F_n from x_n, all bodies at once
    forces.accumulate_forces(&*sys, &mut f);

    // Kick, with dt = 1:
    // v_n+1 = v_n + F_n / m
    for (b, f) in sys.bodies.iter_mut().zip(f.iter()) {
        b.v += *f / b.m;
    }

    // Drift by the velocity just computed:
    // x_n+1 = x_n + v_n+1
    for b in sys.bodies.iter_mut() {
        b.x += b.v;
    }

    // Positions and velocities now belong to the next tick
    sys.tick += 1;
}
