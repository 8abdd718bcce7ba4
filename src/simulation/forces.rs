//! Force contributors for the point-mass engine
//!
//! Each term adds a *force* (not an acceleration) into `out[i]` for every body
//! of a frozen [`System`]; the integrator divides by mass afterwards. Terms:
//! the caller's applied forces, and pairwise gravity under one of two laws.

use serde::Deserialize;

use crate::simulation::states::{System, NVec3};

/// Gravitational constant used by every gravity term
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;

/// Which pairwise gravity law the engine uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityLaw {
    /// Each axis is an independent 1-D inverse-square interaction on that
    /// axis' signed separation. This is the default law.
    #[default]
    #[serde(rename = "per_axis")]
    PerAxis,

    /// Newtonian gravity along the line joining the two bodies
    #[serde(rename = "radial")]
    Radial,
}

/// Ordered collection of force terms, summed into one force per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm>>,
}

impl ForceSet {
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a force term
    pub fn with(mut self, term: impl ForceTerm + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Standard set for one tick: applied forces, then gravity if enabled
    pub fn for_tick(gravity: Option<GravityLaw>) -> Self {
        let set = ForceSet::new().with(AppliedForces);
        match gravity {
            Some(GravityLaw::PerAxis) => set.with(PerAxisGravity { G: GRAVITATIONAL_CONSTANT }),
            Some(GravityLaw::Radial) => set.with(RadialGravity { G: GRAVITATIONAL_CONSTANT }),
            None => set,
        }
    }

    /// Net force on every body of `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec3]) {
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        for term in &self.terms {
            term.force(sys, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A source of force operating on [`System`].
/// Implementations add their contribution into `out[i]` for each body
pub trait ForceTerm {
    fn force(&self, sys: &System, out: &mut [NVec3]);
}

/// The forces each body's owner has applied to it
pub struct AppliedForces;

impl ForceTerm for AppliedForces {
    fn force(&self, sys: &System, out: &mut [NVec3]) {
        for (f, b) in out.iter_mut().zip(sys.bodies.iter()) {
            *f += b.applied;
        }
    }
}

/// Per-axis inverse-square gravity.
///
/// For a pair (i, j) and each axis with signed separation `d = x_j - x_i`,
/// body i is pulled by `G m_i m_j / d²` towards j on that axis; a zero
/// separation contributes nothing. This is not the radial law: two bodies
/// offset diagonally feel the full 1-D pull on every axis.
#[allow(non_snake_case)]
pub struct PerAxisGravity {
    pub G: f64,
}

impl ForceTerm for PerAxisGravity {
    fn force(&self, sys: &System, out: &mut [NVec3]) {
        let n = sys.bodies.len();

        // Each unordered pair once; j gets the mirror of i's contribution.
        // Pairs are visited in body order, which fixes the summation order
        for i in 0..n {
            let bi = &sys.bodies[i]; // left side of the pair
            for j in (i + 1)..n {
                let bj = &sys.bodies[j]; // right side of the pair
                let mass = bi.m * bj.m; // m_i m_j
                let d = bj.x - bi.x; // signed separation from i to j, per axis

                // Force on i; an axis with no separation stays 0
                let mut f = NVec3::zeros();
                for axis in 0..3 {
                    let delta = d[axis];
                    if delta > 0.0 {
                        f[axis] = self.G * (mass / (delta * delta));
                    } else if delta < 0.0 {
                        f[axis] = -(self.G * (mass / (delta * delta)));
                    }
                }

                // Newton's third law
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

/// Newtonian gravity along the separation vector, unsoftened.
/// Coincident bodies exert no force on each other
#[allow(non_snake_case)]
pub struct RadialGravity {
    pub G: f64,
}

impl ForceTerm for RadialGravity {
    fn force(&self, sys: &System, out: &mut [NVec3]) {
        let n = sys.bodies.len();

        for i in 0..n {
            let bi = &sys.bodies[i]; // left side of the pair
            for j in (i + 1)..n {
                let bj = &sys.bodies[j]; // right side of the pair

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.x - bi.x;
                let r2 = r.dot(&r); // |r|²
                if r2 == 0.0 { // coincident, no direction
                    continue;
                }

                // |F| = G m_i m_j / r², direction r / |r|
                let coef = self.G * bi.m * bj.m / (r2 * r2.sqrt());

                out[i] += coef * r;
                out[j] -= coef * r;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Body, MassPoint};

    fn body(m: f64, x: [f64; 3]) -> Body {
        Body {
            id: MassPoint::new("probe", m).id(),
            x: x.into(),
            v: NVec3::zeros(),
            m,
            applied: NVec3::zeros(),
        }
    }

    fn forces_of(set: &ForceSet, sys: &System) -> Vec<NVec3> {
        let mut out = vec![NVec3::zeros(); sys.bodies.len()];
        set.accumulate_forces(sys, &mut out);
        out
    }

    #[test]
    fn per_axis_gravity_matches_the_closed_form() {
        let sys = System {
            bodies: vec![body(2.0, [0.0, 0.0, 0.0]), body(3.0, [2.0, -1.0, 0.0])],
            tick: 0,
        };
        let out = forces_of(&ForceSet::new().with(PerAxisGravity { G: 1.0 }), &sys);

        // x: +6/4, y: -6/1, z: no separation
        assert_eq!(out[0], NVec3::new(1.5, -6.0, 0.0));
        assert_eq!(out[1], NVec3::new(-1.5, 6.0, 0.0));
    }

    #[test]
    fn per_axis_gravity_is_not_radial() {
        let sys = System {
            bodies: vec![body(1.0, [0.0, 0.0, 0.0]), body(1.0, [1.0, 1.0, 1.0])],
            tick: 0,
        };
        let axis = forces_of(&ForceSet::new().with(PerAxisGravity { G: 1.0 }), &sys);
        let radial = forces_of(&ForceSet::new().with(RadialGravity { G: 1.0 }), &sys);

        assert_eq!(axis[0], NVec3::new(1.0, 1.0, 1.0));
        // radial magnitude is 1/r² = 1/3
        assert!((radial[0].norm() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn radial_gravity_inverse_square_law() {
        let near = System { bodies: vec![body(1.0, [0.0; 3]), body(1.0, [1.0, 0.0, 0.0])], tick: 0 };
        let far = System { bodies: vec![body(1.0, [0.0; 3]), body(1.0, [2.0, 0.0, 0.0])], tick: 0 };
        let set = ForceSet::new().with(RadialGravity { G: 1.0 });

        let ratio = forces_of(&set, &near)[0].norm() / forces_of(&set, &far)[0].norm();
        assert!((ratio - 4.0).abs() < 1e-12, "Expected 4x, got {}", ratio);
    }

    #[test]
    fn coincident_bodies_exert_nothing() {
        let sys = System {
            bodies: vec![body(5.0, [1.0, 1.0, 1.0]), body(5.0, [1.0, 1.0, 1.0])],
            tick: 0,
        };
        for law in [GravityLaw::PerAxis, GravityLaw::Radial] {
            let out = forces_of(&ForceSet::for_tick(Some(law)), &sys);
            assert_eq!(out[0], NVec3::zeros());
            assert_eq!(out[1], NVec3::zeros());
        }
    }

    #[test]
    fn applied_forces_come_through_without_gravity() {
        let mut b = body(1.0, [0.0; 3]);
        b.applied = NVec3::new(1.0, -2.0, 3.0);
        let sys = System { bodies: vec![b, body(1e12, [1.0, 0.0, 0.0])], tick: 0 };

        let out = forces_of(&ForceSet::for_tick(None), &sys);
        assert_eq!(out[0], NVec3::new(1.0, -2.0, 3.0));
        assert_eq!(out[1], NVec3::zeros());
    }
}
