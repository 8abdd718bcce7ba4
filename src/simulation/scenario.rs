//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - the engine with its gravity options and every object registered
//! - the forces and objects themselves, so the caller can keep mutating them
//! - run parameters (`Parameters`)

use log::debug;

use crate::configuration::config::{ObjectConfig, ScenarioConfig};
use crate::error::{ScenarioError, SimError};
use crate::simulation::engine::SimulationEngine;
use crate::simulation::params::Parameters;
use crate::simulation::snapshot::History;
use crate::simulation::states::{ForceVector, MassPoint};
use crate::visualization::report::ReportWindow;

/// Everything needed to run and report one scenario
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: SimulationEngine,
    pub parameters: Parameters,
    pub forces: Vec<ForceVector>, // declaration order
    pub objects: Vec<MassPoint>, // declaration order
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        // Forces: one shared instance per declared force
        let forces: Vec<ForceVector> = cfg
            .forces
            .iter()
            .map(|fc| {
                let [x, y, z] = fc.magnitude;
                ForceVector::new(fc.name.clone(), x, y, z)
            })
            .collect();

        // Objects: map `ObjectConfig` -> runtime `MassPoint`, resolving force names
        let objects = cfg
            .objects
            .iter()
            .map(|oc| build_object(oc, &forces))
            .collect::<Result<Vec<_>, _>>()?;

        let mut engine = SimulationEngine::new();
        engine.set_gravity_enabled(cfg.engine.gravity);
        engine.set_gravity_law(cfg.engine.law);
        for o in &objects {
            engine.add_object(o);
        }

        let parameters = Parameters {
            duration: cfg.run.duration,
            window: ReportWindow {
                start: cfg.report.start,
                end: cfg.report.end,
                interval: cfg.report.interval,
            },
        };

        debug!(
            "scenario: {} forces, {} objects, {} ticks",
            forces.len(),
            objects.len(),
            parameters.duration
        );

        Ok(Self {
            engine,
            parameters,
            forces,
            objects,
        })
    }

    /// Run the engine for the configured duration
    pub fn run(&self) -> Result<History, SimError> {
        self.engine.run(self.parameters.duration)
    }

    /// First declared force with this exact name
    pub fn force(&self, name: &str) -> Option<&ForceVector> {
        self.forces.iter().find(|f| f.name() == name)
    }
}

fn build_object(oc: &ObjectConfig, forces: &[ForceVector]) -> Result<MassPoint, ScenarioError> {
    let [x, y, z] = oc.position;
    let [vx, vy, vz] = oc.velocity;
    let object = MassPoint::at(oc.name.clone(), oc.mass, x, y, z).with_velocity(vx, vy, vz);

    for name in &oc.forces {
        let force = forces
            .iter()
            .find(|f| f.name() == *name)
            .ok_or_else(|| ScenarioError::UnknownForce {
                object: oc.name.clone(),
                force: name.clone(),
            })?;
        object.apply(force);
    }

    Ok(object)
}
