//! Draft state for the message editor
//!
//! Holds the header fields of the email being composed. Address validation
//! and sending live elsewhere.

mod draft;

pub use draft::{DraftFields, DraftStore};
