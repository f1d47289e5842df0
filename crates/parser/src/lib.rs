//! Parser for structured submission messages.
//!
//! A submission message carries four labeled fields in a fixed order:
//!
//! ```text
//! Reason: ...
//! Amount: ...
//! Deadline: ...
//! Note: ...
//! ```
//!
//! [`parse`] turns raw message text into a [`SubmissionRequest`] or a
//! [`ParseError`] describing what is wrong with the input. Parsing is pure and
//! stateless, so it can be called from any number of tasks concurrently.

pub mod error;
pub mod field;
pub mod parse;
pub mod request;

pub use {
    error::ParseError,
    field::FieldName,
    parse::{USAGE_TEMPLATE, parse},
    request::SubmissionRequest,
};
