//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]    – gravity on/off and which gravity law
//! - [`RunConfig`]       – how many ticks to simulate
//! - [`ReportConfig`]    – which ticks to print
//! - [`ForceConfig`]     – named forces, shared by every object that lists them
//! - [`ObjectConfig`]    – initial state of each point mass
//! - [`ScenarioConfig`]  – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   gravity: true           # optional, default true
//!   law: "per_axis"         # optional, "per_axis" or "radial"
//!
//! run:
//!   duration: 10            # ticks
//!
//! report:                   # optional
//!   start: 0
//!   end: 10                 # optional, default last tick
//!   interval: 1
//!
//! forces:
//!   - name: thrust
//!     magnitude: [ 10.0, 0.0, 0.0 ]
//!
//! objects:
//!   - name: probe
//!     mass: 2.0
//!     position: [ 0.0, 0.0, 0.0 ]   # optional, default origin
//!     velocity: [ 0.0, 0.0, 0.0 ]   # optional, default rest
//!     forces: [ thrust ]            # optional
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::simulation::forces::GravityLaw;

fn enabled() -> bool {
    true
}

fn one() -> u64 {
    1
}

/// Engine-wide options
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "enabled")]
    pub gravity: bool, // pairwise gravity between objects
    #[serde(default)]
    pub law: GravityLaw,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: true,
            law: GravityLaw::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    pub duration: i64, // ticks; the engine rejects negative values
}

/// Window of ticks to print
#[derive(Deserialize, Debug, Clone)]
pub struct ReportConfig {
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub end: Option<u64>, // default: last tick
    #[serde(default = "one")]
    pub interval: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            interval: 1,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ForceConfig {
    pub name: String,
    pub magnitude: [f64; 3], // force per axis
}

/// Initial state of one point mass
#[derive(Deserialize, Debug, Clone)]
pub struct ObjectConfig {
    pub name: String,
    pub mass: f64, // non-positive masses become 1
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
    #[serde(default)]
    pub forces: Vec<String>, // names from the scenario's `forces` list
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub forces: Vec<ForceConfig>,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let cfg = ScenarioConfig::from_yaml_str("run:\n  duration: 3\n").unwrap();
        assert!(cfg.engine.gravity);
        assert_eq!(cfg.engine.law, GravityLaw::PerAxis);
        assert_eq!(cfg.run.duration, 3);
        assert_eq!(cfg.report.start, 0);
        assert_eq!(cfg.report.end, None);
        assert_eq!(cfg.report.interval, 1);
        assert!(cfg.objects.is_empty());
    }

    #[test]
    fn full_scenario_parses() {
        let yaml = r#"
engine:
  gravity: false
  law: "radial"
run:
  duration: 20
report:
  start: 5
  end: 15
  interval: 5
forces:
  - name: thrust
    magnitude: [1.0, 2.0, 3.0]
objects:
  - name: probe
    mass: 2.0
    position: [1.0, 0.0, 0.0]
    forces: [thrust]
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert!(!cfg.engine.gravity);
        assert_eq!(cfg.engine.law, GravityLaw::Radial);
        assert_eq!(cfg.report.end, Some(15));
        assert_eq!(cfg.forces[0].magnitude, [1.0, 2.0, 3.0]);
        assert_eq!(cfg.objects[0].velocity, [0.0; 3]);
        assert_eq!(cfg.objects[0].forces, vec!["thrust".to_string()]);
    }

    #[test]
    fn short_vectors_are_rejected() {
        let yaml = "run:\n  duration: 1\nforces:\n  - name: f\n    magnitude: [1.0, 2.0]\n";
        assert!(ScenarioConfig::from_yaml_str(yaml).is_err());
    }
}
