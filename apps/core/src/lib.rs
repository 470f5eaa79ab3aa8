//! HoaxScan Core
//!
//! Classifies Indonesian news text as VALID or HOAX and explains the verdict
//! with linguistic insights.

pub mod analysis;
pub mod config;
pub mod error;
pub mod resources;
pub mod samples;
pub mod session;
pub mod telemetry;

#[cfg(test)]
mod tests;
