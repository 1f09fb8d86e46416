//! Document intelligence and underwriting core for MSME credit assessment.
//!
//! The pipeline runs in three stages over immutable inputs: raw document
//! text is pattern-extracted into typed records, those records are
//! validated and screened for anomalies into a quality verdict, and the
//! combined picture feeds the eligibility and risk engines. Every stage is
//! a pure, synchronous computation; callers may run them concurrently over
//! different inputs with no coordination.

pub mod config;
pub mod telemetry;
pub mod workflows;
