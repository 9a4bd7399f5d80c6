//! # Pulse Transport
//!
//! HTTP transport for the Pulse training twin service.
//!
//! [`TwinApi`] is the async seam the session orchestrator drives;
//! [`HttpTransport`] is the reqwest-backed implementation of the wire
//! contract. All failures are normalized to [`pulse_core::PulseError`]
//! before leaving this crate.

pub mod client;
pub mod config;

pub use client::{HttpTransport, PingResponse, TwinApi};
pub use config::TransportConfig;
