//! Configuration management for bannergrab.
//!
//! Provides XDG-compliant settings storage.

mod settings;

pub use settings::{seconds_to_duration, AppSettings, Paths};
