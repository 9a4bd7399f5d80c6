//! # Pulse Session
//!
//! Session orchestration and synchronization for the Pulse client.
//!
//! [`Session`] owns the client-side view of the latest state vector and
//! prescription, sequences the three twin operations, and discards
//! superseded responses via per-slot generation counters. The [`view`]
//! module derives renderable values from a session snapshot.

pub mod session;
pub mod slot;
pub mod view;

pub use session::Session;
pub use slot::RequestSlot;
