//! Domain models for Shop-Track.
//!
//! Persisted records live here; static catalog types come from
//! `shop_track_core`.

pub mod credential;

pub use credential::Credential;
