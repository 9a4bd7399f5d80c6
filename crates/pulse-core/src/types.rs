//! Common types shared across the Pulse client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Goal labels the client UI offers for the prescription controller.
///
/// The goal is a free-form string on the wire; this list only seeds the
/// selector and is not enforced anywhere.
pub const GOAL_CHOICES: &[&str] = &["Strength", "Hypertrophy", "Power", "General"];

/// Category of training stimulus for a logged session.
///
/// Serialized in PascalCase to match the wire contract (`"Strength"`, not
/// `"strength"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    /// Steady-state or interval running work.
    Running,
    /// Heavy resistance work targeting maximal force.
    Strength,
    /// Moderate-load resistance work targeting muscle growth.
    Hypertrophy,
    /// Explosive work targeting rate of force development.
    Power,
    /// A session combining several stimuli.
    Mixed,
}

impl Modality {
    /// Returns true for modalities where load metrics (RIR, volume load)
    /// are typically recorded.
    pub fn is_resistance(&self) -> bool {
        matches!(
            self,
            Modality::Strength | Modality::Hypertrophy | Modality::Power
        )
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modality::Running => "Running",
            Modality::Strength => "Strength",
            Modality::Hypertrophy => "Hypertrophy",
            Modality::Power => "Power",
            Modality::Mixed => "Mixed",
        };
        f.write_str(name)
    }
}
