//! ember-forms crate
//!
//! The launch form aggregate and its field validator.

pub mod form;
pub mod validate;

pub use form::{FormError, StreamFields, TokenForm};
pub use validate::{validate, FormField, ValidationReport};
