//! # Undo/Redo Stack
//!
//! Tracks template history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Templates are immutable snapshots behind an `Arc`, so history stores
//!   the snapshot that was current before each mutation
//! - Undo swaps the current snapshot with the most recent entry
//! - Redo swaps it back
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)
//! - A batch begun inside another joins it; only the outermost end commits

use std::sync::Arc;

use mailcraft_model::EmailTemplate;

/// One undo step: the template as it was before the step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: Arc<EmailTemplate>,

    /// Optional description of this step
    pub description: Option<String>,
}

#[derive(Debug, Default)]
struct PendingBatch {
    start: Option<Arc<EmailTemplate>>,
    description: Option<String>,
    depth: usize,
}

/// Undo/redo stack for template editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied steps (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone steps (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<PendingBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the snapshot that a mutation replaced
    pub fn record(&mut self, previous: Arc<EmailTemplate>, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            // Only the state before the first mutation matters for a batch
            if batch.start.is_none() {
                batch.start = Some(previous);
            }
            if batch.description.is_none() {
                batch.description = Some(description.into());
            }
            return;
        }

        self.push_entry(HistoryEntry {
            snapshot: previous,
            description: Some(description.into()),
        });
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        if let Some(batch) = &mut self.current_batch {
            batch.depth += 1;
        } else {
            self.current_batch = Some(PendingBatch {
                depth: 1,
                ..Default::default()
            });
        }
    }

    /// End the current batch level, pushing to the undo stack once the
    /// outermost level closes
    pub fn end_batch(&mut self) {
        if let Some(batch) = &mut self.current_batch {
            if batch.depth > 1 {
                batch.depth -= 1;
                return;
            }
        }
        self.flush_batch();
    }

    /// Close every open batch level and commit what they recorded
    pub fn flush_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let Some(start) = batch.start {
                self.push_entry(HistoryEntry {
                    snapshot: start,
                    description: batch.description,
                });
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Undo the most recent step, returning the snapshot to restore
    pub fn undo(&mut self, current: Arc<EmailTemplate>) -> Option<Arc<EmailTemplate>> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            snapshot: current,
            description: entry.description,
        });
        Some(entry.snapshot)
    }

    /// Redo the most recently undone step, returning the snapshot to restore
    pub fn redo(&mut self, current: Arc<EmailTemplate>) -> Option<Arc<EmailTemplate>> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            snapshot: current,
            description: entry.description,
        });
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_model::{Component, ComponentId, ComponentType};

    fn template_with(ids: &[&str]) -> Arc<EmailTemplate> {
        let mut template = EmailTemplate::empty();
        template.components = ids
            .iter()
            .map(|id| Component::new(ComponentId::from(*id), ComponentType::Spacer))
            .collect();
        Arc::new(template)
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_record_undo_and_redo() {
        let mut stack = UndoStack::new();
        let before = template_with(&[]);
        let after = template_with(&["a"]);

        stack.record(before.clone(), "Add spacer");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Add spacer"));

        let restored = stack.undo(after.clone()).unwrap();
        assert!(Arc::ptr_eq(&restored, &before));
        assert_eq!(stack.redo_levels(), 1);

        let redone = stack.redo(restored).unwrap();
        assert!(Arc::ptr_eq(&redone, &after));
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_batched_steps_restore_batch_start() {
        let mut stack = UndoStack::new();
        let start = template_with(&[]);

        stack.begin_batch();
        stack.set_batch_description("Build hero");
        stack.record(start.clone(), "Add spacer");
        stack.record(template_with(&["a"]), "Add spacer");
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Build hero"));

        let restored = stack.undo(template_with(&["a", "b"])).unwrap();
        assert!(Arc::ptr_eq(&restored, &start));
    }

    #[test]
    fn test_empty_batch_is_dropped() {
        let mut stack = UndoStack::new();
        stack.begin_batch();
        stack.end_batch();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_nested_batch_joins_outer() {
        let mut stack = UndoStack::new();
        let start = template_with(&[]);

        stack.begin_batch();
        stack.set_batch_description("Outer");
        stack.record(start.clone(), "Add spacer");
        stack.begin_batch();
        stack.record(template_with(&["a"]), "Add spacer");
        stack.end_batch();

        assert!(stack.is_batching());
        assert!(!stack.can_undo());

        stack.end_batch();

        assert!(!stack.is_batching());
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Outer"));
        let restored = stack.undo(template_with(&["a", "b"])).unwrap();
        assert!(Arc::ptr_eq(&restored, &start));
    }

    #[test]
    fn test_flush_closes_all_levels() {
        let mut stack = UndoStack::new();
        stack.begin_batch();
        stack.begin_batch();
        stack.record(template_with(&[]), "Add spacer");

        stack.flush_batch();

        assert!(!stack.is_batching());
        assert_eq!(stack.undo_levels(), 1);
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut stack = UndoStack::new();
        stack.record(template_with(&[]), "one");
        stack.undo(template_with(&["a"]));
        assert_eq!(stack.redo_levels(), 1);

        stack.record(template_with(&["a"]), "two");
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(2);
        for i in 0..3 {
            stack.record(template_with(&[]), format!("step {}", i));
        }
        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.undo_description(), Some("step 2"));
    }
}
