//! ember-config crate
//!
//! This crate handles the config functionality for the Ember project.

pub mod settings;

pub use settings::{BackendConfig, LaunchConfig, LaunchSettings, TimingConfig};
