pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{ForceVector, MassPoint, ObjectId, Body, System, NVec3};
pub use simulation::forces::{ForceSet, ForceTerm, AppliedForces, PerAxisGravity, RadialGravity, GravityLaw, GRAVITATIONAL_CONSTANT};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::snapshot::{Snapshot, History, Kinematics};
pub use simulation::engine::{SimulationEngine, Ticks};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, RunConfig, ReportConfig, ForceConfig, ObjectConfig, ScenarioConfig};

pub use visualization::report::{ReportWindow, render_report, print_report};

pub use benchmark::benchmark::{bench_gravity, bench_run};

pub use error::{SimError, ScenarioError};
