//! # Pulse Core
//!
//! Core contracts for the Pulse training twin client.
//!
//! This crate provides the fundamental building blocks:
//! - [`WorkoutLog`] - A proposed or committed training event
//! - [`UnifiedStateVector`] - The server's latest snapshot of the athlete state S(t)
//! - [`WorkoutPrescription`] - The controller's recommended next action u(t)
//! - [`StressDose`] - A previewed stress dose D(t) for an uncommitted log
//! - [`PulseError`] / [`ApiError`] - Error types and the normalized display shape

pub mod error;
pub mod log;
pub mod prescription;
pub mod state;
pub mod types;

// Re-exports for convenience
pub use error::{ApiError, PulseError, Result};
pub use log::{WorkoutLog, WorkoutLogBuilder};
pub use prescription::WorkoutPrescription;
pub use state::{StressDose, UnifiedStateVector};
pub use types::{Modality, GOAL_CHOICES};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{ApiError, PulseError, Result};
    pub use crate::log::{WorkoutLog, WorkoutLogBuilder};
    pub use crate::prescription::WorkoutPrescription;
    pub use crate::state::{StressDose, UnifiedStateVector};
    pub use crate::types::Modality;
}
