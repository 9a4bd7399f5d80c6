//! Server-owned state snapshots: the unified state vector S(t) and the
//! previewed stress dose D(t).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The server's latest snapshot of the athlete state after a commit.
///
/// Owned exclusively by the session orchestrator and replaced wholesale on
/// each successful commit; never partially updated. Fatigue scalars are
/// nominally in [0,100] but the server does not guarantee the range, so
/// display code clamps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedStateVector {
    /// When this snapshot was produced.
    pub timestamp: DateTime<Utc>,

    /// Aerobic capacity.
    pub aerobic_capacity: f64,
    /// Maximal neuromuscular force capacity.
    pub neuromuscular_force_capacity: f64,
    /// Structural (connective tissue) capacity.
    pub structural_capacity: f64,
    /// Anaerobic reserve capacity.
    pub anaerobic_reserve: f64,

    /// Metabolic fatigue, nominally 0-100.
    pub metabolic_fatigue: f64,
    /// Peripheral neuromuscular fatigue, nominally 0-100.
    pub peripheral_fatigue: f64,
    /// Central neuromuscular fatigue, nominally 0-100.
    pub central_fatigue: f64,
    /// Structural fatigue, nominally 0-100.
    pub structural_fatigue: f64,

    /// Accumulated structural adaptation signal.
    pub structural_signal: f64,

    /// Training habit strength in [0,1].
    pub habit_strength: f64,

    /// Proficiency per movement name, each in [0,1]. The key set is open
    /// and may be empty.
    #[serde(default)]
    pub skill_state: HashMap<String, f64>,
}

/// A hypothetical stress dose for a not-yet-committed log.
///
/// Ephemeral: discarded whenever a new log/simulate/commit cycle starts and
/// never merged into [`UnifiedStateVector`]. All channels are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressDose {
    /// Metabolic load channel.
    pub metabolic: f64,
    /// Peripheral neuromuscular load channel.
    pub neuromuscular_peripheral: f64,
    /// Central neuromuscular load channel.
    pub neuromuscular_central: f64,
    /// Structural damage channel.
    pub structural_damage: f64,
    /// Structural adaptation signal channel.
    pub structural_signal: f64,
}
