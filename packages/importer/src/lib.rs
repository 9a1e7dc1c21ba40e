//! # Mailcraft HTML Importer
//!
//! Best-effort conversion of arbitrary HTML into email template components.
//!
//! Parsing is lenient: malformed markup never fails, unknown elements are
//! recursed into and anything without a structural mapping becomes text.
//! The only error is empty input.

mod error;
mod importer;
mod styles;

#[cfg(test)]
mod tests;

pub use error::ImportError;
pub use importer::{import_html, HtmlImporter};
pub use styles::{parse_int, ExtractedStyles};
