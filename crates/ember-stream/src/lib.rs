//! ember-stream crate
//!
//! Boundary to the external stream-status lookup provider.

pub mod http;
pub mod lookup;

pub use http::HttpStreamLookup;
pub use lookup::{StreamLookup, StreamLookupError};
