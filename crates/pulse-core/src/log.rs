//! Workout log types and builder.
//!
//! A [`WorkoutLog`] is a proposed or committed training event. The client
//! never stores one beyond the current form draft; it is consumed by the
//! commit and simulate operations. It is immutable once built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};
use crate::types::Modality;

/// A single training event as sent to the twin service.
///
/// Optional fields are omitted from the JSON body entirely when absent, so
/// a minimal log serializes to only the required keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    /// When the session took place.
    pub timestamp: DateTime<Utc>,

    /// Category of training stimulus.
    pub modality: Modality,

    /// Session length in minutes. Must be positive.
    pub duration_minutes: u32,

    /// Perceived effort for the session, 1-10.
    pub session_rpe: u8,

    /// Sleep quality the night before, 1-10.
    pub sleep_quality: u8,

    /// Inverted life stress, 1-10 (higher = less stressed).
    pub life_stress_inverse: u8,

    /// Average reps in reserve across working sets, 0-10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rir: Option<u8>,

    /// Distance covered, for locomotive sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,

    /// Total volume load (sets x reps x load), for resistance sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_volume_load: Option<f64>,
}

impl WorkoutLog {
    /// Create a new WorkoutLogBuilder.
    pub fn builder() -> WorkoutLogBuilder {
        WorkoutLogBuilder::new()
    }

    /// Check the declared field ranges.
    ///
    /// This is advisory; the service revalidates. Its purpose is to reject
    /// obviously malformed logs before any network call and to give the UI
    /// immediate feedback.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(PulseError::Validation {
                field: "duration_minutes",
                message: "must be positive".to_string(),
            });
        }

        Self::check_rating("session_rpe", self.session_rpe)?;
        Self::check_rating("sleep_quality", self.sleep_quality)?;
        Self::check_rating("life_stress_inverse", self.life_stress_inverse)?;

        if let Some(rir) = self.avg_rir {
            if rir > 10 {
                return Err(PulseError::Validation {
                    field: "avg_rir",
                    message: format!("must be between 0 and 10, got {}", rir),
                });
            }
        }

        if let Some(distance) = self.distance_meters {
            if distance < 0.0 {
                return Err(PulseError::Validation {
                    field: "distance_meters",
                    message: "must not be negative".to_string(),
                });
            }
        }

        if let Some(volume) = self.total_volume_load {
            if volume < 0.0 {
                return Err(PulseError::Validation {
                    field: "total_volume_load",
                    message: "must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }

    fn check_rating(field: &'static str, value: u8) -> Result<()> {
        if !(1..=10).contains(&value) {
            return Err(PulseError::Validation {
                field,
                message: format!("must be between 1 and 10, got {}", value),
            });
        }
        Ok(())
    }
}

/// Builder for creating WorkoutLogs with a fluent API.
#[derive(Debug, Default)]
pub struct WorkoutLogBuilder {
    timestamp: Option<DateTime<Utc>>,
    modality: Option<Modality>,
    duration_minutes: Option<u32>,
    session_rpe: Option<u8>,
    sleep_quality: Option<u8>,
    life_stress_inverse: Option<u8>,
    avg_rir: Option<u8>,
    distance_meters: Option<f64>,
    total_volume_load: Option<f64>,
}

impl WorkoutLogBuilder {
    /// Create a new WorkoutLogBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session timestamp. Defaults to now.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the modality.
    pub fn modality(mut self, modality: Modality) -> Self {
        self.modality = Some(modality);
        self
    }

    /// Set the session length in minutes.
    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Set the perceived effort, 1-10.
    pub fn session_rpe(mut self, rpe: u8) -> Self {
        self.session_rpe = Some(rpe);
        self
    }

    /// Set the sleep quality, 1-10.
    pub fn sleep_quality(mut self, quality: u8) -> Self {
        self.sleep_quality = Some(quality);
        self
    }

    /// Set the inverted life stress, 1-10.
    pub fn life_stress_inverse(mut self, value: u8) -> Self {
        self.life_stress_inverse = Some(value);
        self
    }

    /// Set the average reps in reserve, 0-10.
    pub fn avg_rir(mut self, rir: u8) -> Self {
        self.avg_rir = Some(rir);
        self
    }

    /// Set the distance covered in meters.
    pub fn distance_meters(mut self, meters: f64) -> Self {
        self.distance_meters = Some(meters);
        self
    }

    /// Set the total volume load.
    pub fn total_volume_load(mut self, load: f64) -> Self {
        self.total_volume_load = Some(load);
        self
    }

    /// Build and validate the log.
    pub fn build(self) -> Result<WorkoutLog> {
        let log = WorkoutLog {
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            modality: self.modality.ok_or(PulseError::Validation {
                field: "modality",
                message: "is required".to_string(),
            })?,
            duration_minutes: self.duration_minutes.ok_or(PulseError::Validation {
                field: "duration_minutes",
                message: "is required".to_string(),
            })?,
            session_rpe: self.session_rpe.ok_or(PulseError::Validation {
                field: "session_rpe",
                message: "is required".to_string(),
            })?,
            sleep_quality: self.sleep_quality.ok_or(PulseError::Validation {
                field: "sleep_quality",
                message: "is required".to_string(),
            })?,
            life_stress_inverse: self.life_stress_inverse.ok_or(PulseError::Validation {
                field: "life_stress_inverse",
                message: "is required".to_string(),
            })?,
            avg_rir: self.avg_rir,
            distance_meters: self.distance_meters,
            total_volume_load: self.total_volume_load,
        };

        log.validate()?;
        Ok(log)
    }
}
