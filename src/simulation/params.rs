//! Run parameters for a scenario
//!
//! `Parameters` holds what the engine itself does not: how long to run and
//! which part of the resulting history to print.

use crate::visualization::report::ReportWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    pub duration: i64, // ticks to simulate
    pub window: ReportWindow, // ticks to print
}
