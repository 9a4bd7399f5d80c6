//! Session orchestration.
//!
//! A [`Session`] owns the client-side view of one logical twin session: the
//! latest committed state vector, the current prescription, the transient
//! dose preview, and a single error slot. All four cells are written only
//! here, and only from resolved, non-superseded operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use pulse_core::{ApiError, StressDose, UnifiedStateVector, WorkoutLog, WorkoutPrescription};
use pulse_transport::TwinApi;

use crate::slot::RequestSlot;

/// Orchestrates the three twin operations over a single logical session.
///
/// Concurrency model: cooperative. No lock is held across a transport
/// await; each operation takes a generation from its slot before dispatch
/// and re-checks it at resolution, so only the most recently issued
/// request's result is ever applied (last-goal-wins for prescriptions).
pub struct Session<A: TwinApi> {
    /// Unique ID for this session, used in log output.
    id: Uuid,

    api: A,

    /// Goal currently driving the prescription controller.
    goal: Arc<RwLock<String>>,

    /// Latest committed S(t). Replaced wholesale on successful commit,
    /// never partially updated.
    state: Arc<RwLock<Option<UnifiedStateVector>>>,

    /// Latest fetched u(t). Stays visible while a refresh is in flight.
    prescription: Arc<RwLock<Option<WorkoutPrescription>>>,

    /// Transient dose preview. Cleared when a new commit or simulate
    /// cycle starts.
    dose: Arc<RwLock<Option<StressDose>>>,

    /// Single error slot: the most recent failure, cleared when a new
    /// operation starts.
    error: Arc<RwLock<Option<ApiError>>>,

    prescription_slot: RequestSlot,
    commit_slot: RequestSlot,
    simulate_slot: RequestSlot,

    closed: AtomicBool,
}

impl<A: TwinApi> Session<A> {
    /// Create a session over the given transport with an initial goal.
    pub fn new(api: A, initial_goal: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            api,
            goal: Arc::new(RwLock::new(initial_goal.into())),
            state: Arc::new(RwLock::new(None)),
            prescription: Arc::new(RwLock::new(None)),
            dose: Arc::new(RwLock::new(None)),
            error: Arc::new(RwLock::new(None)),
            prescription_slot: RequestSlot::new(),
            commit_slot: RequestSlot::new(),
            simulate_slot: RequestSlot::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Session ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Health-check passthrough. Does not touch any session cell.
    pub async fn ping(&self) -> Result<String, ApiError> {
        self.api
            .ping()
            .await
            .map(|response| response.status)
            .map_err(ApiError::from)
    }

    /// Fetch the prescription for `goal`, making it the session goal.
    ///
    /// Idempotent and safe to call repeatedly. When a newer call for a
    /// different goal is issued while this one is outstanding, this call's
    /// result is discarded on arrival. The previous prescription stays
    /// visible until a refresh succeeds. Returns true when the result was
    /// applied.
    pub async fn refresh_prescription(&self, goal: &str) -> bool {
        if self.is_closed() {
            return false;
        }

        *self.goal.write().await = goal.to_string();
        self.error.write().await.take();

        let generation = self.prescription_slot.begin();
        tracing::debug!(session = %self.id, goal, generation, "requesting prescription");

        let outcome = self.api.next_session(goal).await;

        if !self.prescription_slot.finish(generation) {
            tracing::debug!(
                session = %self.id,
                goal,
                generation,
                "discarding superseded prescription response"
            );
            return false;
        }

        match outcome {
            Ok(prescription) => {
                tracing::info!(session = %self.id, goal, "prescription updated");
                *self.prescription.write().await = Some(prescription);
                true
            }
            Err(err) => {
                tracing::warn!(session = %self.id, goal, error = %err, "prescription fetch failed");
                *self.error.write().await = Some(ApiError::from(err));
                false
            }
        }
    }

    /// Commit a workout: validate, send the state transition, and on
    /// success replace S(t) wholesale, then refresh the prescription.
    ///
    /// The two calls are strictly sequential; the refresh is only issued
    /// after the transition resolves successfully, and it uses the goal
    /// current at commit completion (the user may have changed it while
    /// the commit was in flight). On failure the previous state vector is
    /// retained unchanged and no refresh is attempted. Returns true when
    /// the commit was applied.
    pub async fn commit_workout(&self, log: &WorkoutLog) -> bool {
        if self.is_closed() {
            return false;
        }

        self.clear_transient().await;

        if let Err(err) = log.validate() {
            tracing::warn!(session = %self.id, error = %err, "workout log rejected");
            *self.error.write().await = Some(ApiError::from(err));
            return false;
        }

        let generation = self.commit_slot.begin();
        tracing::debug!(session = %self.id, generation, modality = %log.modality, "committing workout");

        let outcome = self.api.log_workout(log).await;

        if !self.commit_slot.finish(generation) {
            tracing::debug!(session = %self.id, generation, "discarding superseded commit response");
            return false;
        }

        match outcome {
            Ok(state) => {
                tracing::info!(session = %self.id, "state transition applied");
                *self.state.write().await = Some(state);

                let goal = self.goal.read().await.clone();
                self.refresh_prescription(&goal).await;
                true
            }
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "commit failed");
                *self.error.write().await = Some(ApiError::from(err));
                false
            }
        }
    }

    /// Preview the stress dose for an uncommitted log.
    ///
    /// Never touches the state vector or the prescription, on success or
    /// failure, and is safe to interleave with the other operations.
    /// Returns true when a dose was applied.
    pub async fn simulate_dose(&self, log: &WorkoutLog) -> bool {
        if self.is_closed() {
            return false;
        }

        self.clear_transient().await;

        if let Err(err) = log.validate() {
            tracing::warn!(session = %self.id, error = %err, "workout log rejected");
            *self.error.write().await = Some(ApiError::from(err));
            return false;
        }

        let generation = self.simulate_slot.begin();
        tracing::debug!(session = %self.id, generation, modality = %log.modality, "simulating dose");

        let outcome = self.api.simulate_dose(log).await;

        if !self.simulate_slot.finish(generation) {
            tracing::debug!(session = %self.id, generation, "discarding superseded dose response");
            return false;
        }

        match outcome {
            Ok(dose) => {
                *self.dose.write().await = Some(dose);
                true
            }
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "dose simulation failed");
                *self.error.write().await = Some(ApiError::from(err));
                false
            }
        }
    }

    /// Clear the transient outputs: the dose preview and the error slot.
    ///
    /// Every commit or simulate cycle starts here, so a previous cycle's
    /// leftover preview is never shown alongside a new cycle's result.
    pub async fn clear_transient(&self) {
        self.dose.write().await.take();
        self.error.write().await.take();
    }

    /// Tear the session down. All outstanding requests are marked
    /// cancelled so no late-arriving response mutates state afterwards.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.prescription_slot.invalidate();
        self.commit_slot.invalidate();
        self.simulate_slot.invalidate();
        tracing::debug!(session = %self.id, "session closed");
    }

    /// True once [`Session::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Current goal.
    pub async fn goal(&self) -> String {
        self.goal.read().await.clone()
    }

    /// Latest committed state vector, if any.
    pub async fn state(&self) -> Option<UnifiedStateVector> {
        self.state.read().await.clone()
    }

    /// Latest fetched prescription, if any.
    pub async fn prescription(&self) -> Option<WorkoutPrescription> {
        self.prescription.read().await.clone()
    }

    /// Current dose preview, if any.
    pub async fn dose(&self) -> Option<StressDose> {
        self.dose.read().await.clone()
    }

    /// Most recent error, if one has not been cleared by a newer
    /// operation.
    pub async fn last_error(&self) -> Option<ApiError> {
        self.error.read().await.clone()
    }

    /// True while a prescription fetch is outstanding.
    pub fn is_prescription_pending(&self) -> bool {
        self.prescription_slot.is_pending()
    }

    /// True while a commit is outstanding.
    pub fn is_commit_pending(&self) -> bool {
        self.commit_slot.is_pending()
    }

    /// True while a dose simulation is outstanding.
    pub fn is_simulate_pending(&self) -> bool {
        self.simulate_slot.is_pending()
    }
}
