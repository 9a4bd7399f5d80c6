//! The controller's recommended next action u(t).

use serde::{Deserialize, Serialize};

/// Recommended next session given the current state and goal.
///
/// Replaced wholesale on each successful fetch. A stale prescription stays
/// visible while a refresh is in flight; the orchestrator never blanks it
/// implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPrescription {
    /// Category label for the recommended session.
    #[serde(rename = "type")]
    pub session_type: String,

    /// What the session should emphasize.
    pub focus: String,

    /// Controller's explanation for the recommendation.
    pub rationale: String,

    /// Recommended session length in minutes. Positive.
    pub duration_min: f64,
}
