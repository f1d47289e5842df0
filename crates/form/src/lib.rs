//! Form submission: maps parsed submissions onto external form-field
//! identifiers and POSTs them, form-encoded, to a collector endpoint.

pub mod error;
pub mod mapping;
pub mod submitter;

pub use {
    error::{Error, Result},
    mapping::FieldMapping,
    submitter::{FormSubmitter, HttpFormSubmitter},
};
