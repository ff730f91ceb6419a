//! Page-specific extraction state machines.
//!
//! Each scan is a single forward pass over one page's token stream, driven
//! by an explicit state enum. The scans know nothing about HTTP; they take
//! page text and return plain values, so every edge case is testable
//! against fixture markup.

pub(crate) mod domain;
pub(crate) mod form_errors;
pub(crate) mod listing;
