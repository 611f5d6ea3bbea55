//! RTRWH Advisor
//!
//! A form-to-report web service for Rooftop Rainwater Harvesting:
//! - Server-rendered single page bound to one state controller
//! - Gemini structured-output analysis (feasibility, aquifer, rainfall,
//!   runoff, structure sizing, cost-benefit)
//! - Typed schema contract; non-conformant payloads fail closed
//!
//! FLOW:
//! FORM → SUBMIT → LOADING → GEMINI → SUCCEEDED | FAILED → RENDER

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod gemini;
pub mod models;
pub mod render;
pub mod schema;

pub use error::Result;

// Re-export common types
pub use controller::{ReportController, ReportState, ReportStatus};
pub use models::*;
