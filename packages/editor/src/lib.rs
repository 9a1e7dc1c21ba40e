//! # Mailcraft Editor
//!
//! Tree engine for email templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ importer: pasted HTML → components          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: snapshot lifecycle + mutations      │
//! │  - Apply mutations with validation          │
//! │  - Selection and undo/redo                  │
//! │  - Merge tags and document styles           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: template → HTML email        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots**: each mutation produces a new immutable template
//! 2. **Lookup misses are no-ops**: a bad id never corrupts the tree
//! 3. **Explicit state**: all editing state lives in one [`Editor`] value
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailcraft_editor::Editor;
//! use mailcraft_model::{ComponentType, PropsPatch};
//!
//! let mut editor = Editor::new();
//! let section = editor.add_component(ComponentType::Container, None).unwrap();
//! let text = editor.add_component(ComponentType::Text, Some(&section)).unwrap();
//! editor.update_component(&text, PropsPatch::new().set("content", "Hi"));
//!
//! let html = editor.export_html();
//! ```

mod editor;
mod errors;
mod mutations;
mod undo_stack;

pub use editor::Editor;
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use undo_stack::{HistoryEntry, UndoStack};
