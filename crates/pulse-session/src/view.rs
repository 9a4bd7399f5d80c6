//! Display derivation for session outputs.
//!
//! Everything here is pure: views are re-derived from the orchestrator's
//! current output and hold no state of their own. Fatigue scalars are
//! clamped to [0,100] before rendering because the server does not
//! guarantee the nominal range; unit-interval values (habit strength,
//! skill proficiency) are scaled to percentages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pulse_core::{StressDose, UnifiedStateVector, WorkoutPrescription};

/// Clamp a nominally-percentage scalar into [0,100].
pub fn clamp_pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Scale a unit-interval value to a percentage.
pub fn unit_to_pct(value: f64) -> f64 {
    value * 100.0
}

/// Fixed-width zero-padded `MM:SS` for a duration in seconds.
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// One skill proficiency row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillView {
    pub name: String,
    pub proficiency_pct: f64,
}

/// Renderable projection of the unified state vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateView {
    pub timestamp: DateTime<Utc>,

    pub aerobic_capacity: f64,
    pub neuromuscular_force_capacity: f64,
    pub structural_capacity: f64,
    pub anaerobic_reserve: f64,

    /// Fatigue bars, clamped to [0,100].
    pub metabolic_fatigue_pct: f64,
    pub peripheral_fatigue_pct: f64,
    pub central_fatigue_pct: f64,
    pub structural_fatigue_pct: f64,

    pub structural_signal: f64,

    /// Habit strength as a percentage.
    pub habit_strength_pct: f64,

    /// Skill rows sorted by name; empty when the server reports none.
    pub skills: Vec<SkillView>,
}

impl From<&UnifiedStateVector> for StateView {
    fn from(state: &UnifiedStateVector) -> Self {
        let mut skills: Vec<SkillView> = state
            .skill_state
            .iter()
            .map(|(name, proficiency)| SkillView {
                name: name.clone(),
                proficiency_pct: unit_to_pct(*proficiency),
            })
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            timestamp: state.timestamp,
            aerobic_capacity: state.aerobic_capacity,
            neuromuscular_force_capacity: state.neuromuscular_force_capacity,
            structural_capacity: state.structural_capacity,
            anaerobic_reserve: state.anaerobic_reserve,
            metabolic_fatigue_pct: clamp_pct(state.metabolic_fatigue),
            peripheral_fatigue_pct: clamp_pct(state.peripheral_fatigue),
            central_fatigue_pct: clamp_pct(state.central_fatigue),
            structural_fatigue_pct: clamp_pct(state.structural_fatigue),
            structural_signal: state.structural_signal,
            habit_strength_pct: unit_to_pct(state.habit_strength),
            skills,
        }
    }
}

/// Renderable projection of a prescription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrescriptionView {
    pub session_type: String,
    pub focus: String,
    pub rationale: String,
    /// Recommended duration as zero-padded `MM:SS`.
    pub duration_label: String,
}

impl From<&WorkoutPrescription> for PrescriptionView {
    fn from(prescription: &WorkoutPrescription) -> Self {
        let total_seconds = (prescription.duration_min * 60.0).round().max(0.0) as u64;
        Self {
            session_type: prescription.session_type.clone(),
            focus: prescription.focus.clone(),
            rationale: prescription.rationale.clone(),
            duration_label: format_mm_ss(total_seconds),
        }
    }
}

/// Renderable projection of a dose preview. Channels are floored at zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseView {
    pub metabolic: f64,
    pub neuromuscular_peripheral: f64,
    pub neuromuscular_central: f64,
    pub structural_damage: f64,
    pub structural_signal: f64,
}

impl From<&StressDose> for DoseView {
    fn from(dose: &StressDose) -> Self {
        Self {
            metabolic: dose.metabolic.max(0.0),
            neuromuscular_peripheral: dose.neuromuscular_peripheral.max(0.0),
            neuromuscular_central: dose.neuromuscular_central.max(0.0),
            structural_damage: dose.structural_damage.max(0.0),
            structural_signal: dose.structural_signal.max(0.0),
        }
    }
}
