//! Twin service client implementation.

use std::sync::Arc;

use async_trait::async_trait;
use pulse_core::{PulseError, Result, StressDose, UnifiedStateVector, WorkoutLog, WorkoutPrescription};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::TransportConfig;

/// Service health response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
}

/// The four wire operations the twin service exposes.
///
/// The session orchestrator is generic over this trait; tests drive it with
/// scripted in-memory implementations.
#[async_trait]
pub trait TwinApi: Send + Sync {
    /// GET `/ping` health check.
    async fn ping(&self) -> Result<PingResponse>;

    /// GET `/v1/next-session?goal={goal}` - fetch the prescription u(t).
    async fn next_session(&self, goal: &str) -> Result<WorkoutPrescription>;

    /// POST `/v1/log-workout` - commit a workout, returning the new S(t).
    async fn log_workout(&self, log: &WorkoutLog) -> Result<UnifiedStateVector>;

    /// POST `/v1/simulate-dose` - preview D(t) without committing.
    async fn simulate_dose(&self, log: &WorkoutLog) -> Result<StressDose>;
}

#[async_trait]
impl<T: TwinApi + ?Sized> TwinApi for Arc<T> {
    async fn ping(&self) -> Result<PingResponse> {
        (**self).ping().await
    }

    async fn next_session(&self, goal: &str) -> Result<WorkoutPrescription> {
        (**self).next_session(goal).await
    }

    async fn log_workout(&self, log: &WorkoutLog) -> Result<UnifiedStateVector> {
        (**self).log_workout(log).await
    }

    async fn simulate_dose(&self, log: &WorkoutLog) -> Result<StressDose> {
        (**self).simulate_dose(log).await
    }
}

/// HTTP transport against a configured twin service.
///
/// Holds no shared state and mutates nothing; every call either returns a
/// parsed JSON value or a normalized [`PulseError`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL, normalized without a trailing slash. `None` when
    /// unconfigured.
    base_url: Option<String>,

    /// HTTP client.
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from a config. The URL is normalized once here;
    /// whether one is present is checked per call, before any I/O.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string());

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PulseError::Transport(e.to_string()))?;

        Ok(Self { base_url, http })
    }

    fn base_url(&self) -> Result<&str> {
        self.base_url.as_deref().ok_or_else(|| {
            PulseError::Configuration(format!(
                "no base URL configured; set {}",
                crate::config::BASE_URL_ENV
            ))
        })
    }

    /// Send a prepared request and return the parsed JSON body.
    ///
    /// Success with an empty or non-JSON body yields `Value::Null` rather
    /// than a parse attempt. Non-2xx responses become `PulseError::Request`
    /// with the best available detail; no reqwest error escapes.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value> {
        let response = request
            .send()
            .await
            .map_err(|e| PulseError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::error_from_body(status, text));
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        let text = response
            .text()
            .await
            .map_err(|e| PulseError::Transport(e.to_string()))?;

        if !is_json || text.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| PulseError::Transport(format!("malformed response body: {}", e)))
    }

    /// Best-effort detail extraction: JSON `detail`/`message` field, then
    /// the raw text, then the canonical status phrase.
    fn error_from_body(status: reqwest::StatusCode, text: String) -> PulseError {
        let trimmed = text.trim();

        let (detail, body) = match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(value) => {
                let detail = value
                    .get("detail")
                    .and_then(|v| v.as_str())
                    .or_else(|| value.get("message").and_then(|v| v.as_str()))
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                (detail, Some(value))
            }
            Err(_) if !trimmed.is_empty() => (
                trimmed.to_string(),
                Some(serde_json::Value::String(trimmed.to_string())),
            ),
            Err(_) => (
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                None,
            ),
        };

        PulseError::Request {
            status: status.as_u16(),
            detail,
            body,
        }
    }

    fn parse<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
        serde_json::from_value(value)
            .map_err(|e| PulseError::Transport(format!("unexpected response shape: {}", e)))
    }
}

#[async_trait]
impl TwinApi for HttpTransport {
    async fn ping(&self) -> Result<PingResponse> {
        let base = self.base_url()?;
        tracing::debug!("GET /ping");
        let value = self.execute(self.http.get(format!("{}/ping", base))).await?;
        Self::parse(value)
    }

    async fn next_session(&self, goal: &str) -> Result<WorkoutPrescription> {
        let base = self.base_url()?;
        tracing::debug!(goal, "GET /v1/next-session");
        let request = self
            .http
            .get(format!("{}/v1/next-session", base))
            .query(&[("goal", goal)]);
        let value = self.execute(request).await?;
        Self::parse(value)
    }

    async fn log_workout(&self, log: &WorkoutLog) -> Result<UnifiedStateVector> {
        let base = self.base_url()?;
        tracing::debug!(modality = %log.modality, "POST /v1/log-workout");
        let request = self
            .http
            .post(format!("{}/v1/log-workout", base))
            .json(log);
        let value = self.execute(request).await?;
        Self::parse(value)
    }

    async fn simulate_dose(&self, log: &WorkoutLog) -> Result<StressDose> {
        let base = self.base_url()?;
        tracing::debug!(modality = %log.modality, "POST /v1/simulate-dose");
        let request = self
            .http
            .post(format!("{}/v1/simulate-dose", base))
            .json(log);
        let value = self.execute(request).await?;
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use pulse_core::{ApiError, Modality};

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn transport_for(base_url: &str) -> HttpTransport {
        HttpTransport::new(TransportConfig::with_base_url(base_url)).unwrap()
    }

    fn sample_log() -> WorkoutLog {
        WorkoutLog::builder()
            .modality(Modality::Strength)
            .duration_minutes(45)
            .session_rpe(7)
            .sleep_quality(5)
            .life_stress_inverse(5)
            .avg_rir(2)
            .build()
            .unwrap()
    }

    fn state_vector_json() -> serde_json::Value {
        serde_json::json!({
            "timestamp": "2026-08-25T10:00:00Z",
            "aerobic_capacity": 61.2,
            "neuromuscular_force_capacity": 55.0,
            "structural_capacity": 48.7,
            "anaerobic_reserve": 40.1,
            "metabolic_fatigue": 31.0,
            "peripheral_fatigue": 22.5,
            "central_fatigue": 18.0,
            "structural_fatigue": 27.3,
            "structural_signal": 4.2,
            "habit_strength": 0.62,
            "skill_state": {"back_squat": 0.74}
        })
    }

    #[tokio::test]
    async fn test_unconfigured_transport_fails_fast() {
        let transport = HttpTransport::new(TransportConfig::default()).unwrap();

        assert!(matches!(
            transport.ping().await,
            Err(PulseError::Configuration(_))
        ));
        assert!(matches!(
            transport.next_session("Strength").await,
            Err(PulseError::Configuration(_))
        ));
        assert!(matches!(
            transport.log_workout(&sample_log()).await,
            Err(PulseError::Configuration(_))
        ));
        assert!(matches!(
            transport.simulate_dose(&sample_log()).await,
            Err(PulseError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_base_url_counts_as_unconfigured() {
        let transport = HttpTransport::new(TransportConfig::with_base_url("  ")).unwrap();
        assert!(matches!(
            transport.ping().await,
            Err(PulseError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_ping_round_trip() {
        let app = Router::new().route(
            "/ping",
            get(|| async { Json(serde_json::json!({"status": "ok"})) }),
        );
        let base = serve(app).await;

        // A trailing slash on the configured URL is normalized away.
        let transport = transport_for(&format!("{}/", base));
        let response = transport.ping().await.unwrap();
        assert_eq!(response.status, "ok");
    }

    #[tokio::test]
    async fn test_next_session_sends_encoded_goal() {
        let seen = Arc::new(Mutex::new(None::<String>));
        let seen_handler = seen.clone();

        let app = Router::new().route(
            "/v1/next-session",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let seen = seen_handler.clone();
                async move {
                    *seen.lock().unwrap() = params.get("goal").cloned();
                    Json(serde_json::json!({
                        "type": "Strength",
                        "focus": "Lower-body maximal force",
                        "rationale": "Fatigue is low.",
                        "duration_min": 60.0
                    }))
                }
            }),
        );
        let base = serve(app).await;

        let transport = transport_for(&base);
        let prescription = transport.next_session("General Fitness").await.unwrap();

        assert_eq!(prescription.session_type, "Strength");
        assert!(prescription.duration_min > 0.0);
        // The query parameter arrives URL-decoded server-side.
        assert_eq!(seen.lock().unwrap().as_deref(), Some("General Fitness"));
    }

    #[tokio::test]
    async fn test_log_workout_posts_json_body() {
        let body_seen = Arc::new(Mutex::new(None::<serde_json::Value>));
        let body_handler = body_seen.clone();

        let app = Router::new().route(
            "/v1/log-workout",
            post(move |Json(body): Json<serde_json::Value>| {
                let seen = body_handler.clone();
                async move {
                    *seen.lock().unwrap() = Some(body);
                    Json(state_vector_json())
                }
            }),
        );
        let base = serve(app).await;

        let transport = transport_for(&base);
        let state = transport.log_workout(&sample_log()).await.unwrap();

        assert_eq!(state.skill_state["back_squat"], 0.74);

        let body = body_seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["modality"], "Strength");
        assert_eq!(body["duration_minutes"], 45);
        assert_eq!(body["avg_rir"], 2);
        assert!(body.get("distance_meters").is_none());
    }

    #[tokio::test]
    async fn test_simulate_dose_round_trip() {
        let app = Router::new().route(
            "/v1/simulate-dose",
            post(|| async {
                Json(serde_json::json!({
                    "metabolic": 42.0,
                    "neuromuscular_peripheral": 30.5,
                    "neuromuscular_central": 12.0,
                    "structural_damage": 8.1,
                    "structural_signal": 3.3
                }))
            }),
        );
        let base = serve(app).await;

        let transport = transport_for(&base);
        let dose = transport.simulate_dose(&sample_log()).await.unwrap();
        assert_eq!(dose.metabolic, 42.0);
        assert_eq!(dose.structural_signal, 3.3);
    }

    #[tokio::test]
    async fn test_json_detail_error_body() {
        let app = Router::new().route(
            "/ping",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"detail": "internal"})),
                )
            }),
        );
        let base = serve(app).await;

        let err = transport_for(&base).ping().await.unwrap_err();
        match &err {
            PulseError::Request {
                status,
                detail,
                body,
            } => {
                assert_eq!(*status, 500);
                assert_eq!(detail, "internal");
                assert_eq!(body.as_ref().unwrap()["detail"], "internal");
            }
            other => panic!("expected request error, got {:?}", other),
        }

        let api = ApiError::from(err);
        assert_eq!(api.message, "internal");
        assert_eq!(api.status, Some(500));
    }

    #[tokio::test]
    async fn test_plain_text_error_body() {
        let app = Router::new().route(
            "/ping",
            get(|| async { (StatusCode::BAD_REQUEST, "goal missing") }),
        );
        let base = serve(app).await;

        let err = transport_for(&base).ping().await.unwrap_err();
        match err {
            PulseError::Request {
                status,
                detail,
                body,
            } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "goal missing");
                assert_eq!(body, Some(serde_json::Value::String("goal missing".into())));
            }
            other => panic!("expected request error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_error_body_falls_back_to_status_phrase() {
        let app = Router::new().route("/ping", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let base = serve(app).await;

        let err = transport_for(&base).ping().await.unwrap_err();
        match err {
            PulseError::Request {
                status,
                detail,
                body,
            } => {
                assert_eq!(status, 503);
                assert_eq!(detail, "Service Unavailable");
                assert!(body.is_none());
            }
            other => panic!("expected request error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null_not_parse_error() {
        let app = Router::new().route("/ping", get(|| async { StatusCode::NO_CONTENT }));
        let base = serve(app).await;

        let transport = transport_for(&base);
        let value = transport
            .execute(transport.http.get(format!("{}/ping", base)))
            .await
            .unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Port 1 is never listening.
        let transport = transport_for("http://127.0.0.1:1");
        let err = transport.ping().await.unwrap_err();
        assert!(matches!(err, PulseError::Transport(_)));

        let api = ApiError::from(err);
        assert!(api.status.is_none());
    }
}
