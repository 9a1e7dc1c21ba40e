//! # Mailcraft HTML Compiler
//!
//! Turns an [`EmailTemplate`](mailcraft_model::EmailTemplate) into a
//! standalone, table-based HTML email document.
//!
//! Compilation is a pure function of the template: the same template always
//! produces byte-identical output, and the template is never modified.

mod compiler;
mod merge_tags;
mod social_icons;

#[cfg(test)]
mod tests;

pub use compiler::{compile, compile_to_html, escape_html, CompileOptions};
pub use merge_tags::substitute_merge_tags;
pub use social_icons::icon_svg;
