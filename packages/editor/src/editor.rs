//! # Editor Handle
//!
//! Owns the current template snapshot and the editing state around it.
//!
//! Every mutation clones the current template, applies the change to the
//! clone and swaps the result in as the new snapshot. Readers holding an
//! earlier `Arc<EmailTemplate>` keep seeing a complete tree.
//!
//! ## Lifecycle
//!
//! ```text
//! Create/Load → Mutate → Export
//!      ↓           ↓        ↓
//!  Snapshot    Snapshot   HTML
//! ```

use std::sync::Arc;

use mailcraft_compiler_html::{compile_to_html, CompileOptions};
use mailcraft_importer::HtmlImporter;
use mailcraft_model::{
    validate_forest, Component, ComponentId, ComponentType, DocumentStyles, EmailTemplate,
    IdGenerator, MergeTag, MergeTagPatch, PropsPatch,
};
use tracing::debug;

use crate::{EditorError, Mutation, MutationError, MutationResult, UndoStack};

/// Editing session for one email template
#[derive(Debug)]
pub struct Editor {
    /// Current snapshot
    template: Arc<EmailTemplate>,

    /// Current version number (increments on each mutation)
    version: u64,

    selected: Option<ComponentId>,

    ids: IdGenerator,

    history: UndoStack,

    compile_options: CompileOptions,
}

impl Editor {
    /// New editor with an empty template and the default merge tags
    pub fn new() -> Self {
        let mut ids = IdGenerator::session();
        let template = EmailTemplate::new(&mut ids);
        Self::with_parts(template, ids)
    }

    /// Edit an existing template
    pub fn from_template(template: EmailTemplate) -> Self {
        Self::with_parts(template, IdGenerator::session())
    }

    /// Load a template from its JSON form, checking tree invariants
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let template: EmailTemplate = serde_json::from_str(json)?;
        validate_forest(&template.components).map_err(MutationError::from)?;
        Ok(Self::from_template(template))
    }

    fn with_parts(template: EmailTemplate, ids: IdGenerator) -> Self {
        Self {
            template: Arc::new(template),
            version: 0,
            selected: None,
            ids,
            history: UndoStack::new(),
            compile_options: CompileOptions::default(),
        }
    }

    pub fn with_compile_options(mut self, options: CompileOptions) -> Self {
        self.compile_options = options;
        self
    }

    pub fn template(&self) -> &EmailTemplate {
        &self.template
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<EmailTemplate> {
        Arc::clone(&self.template)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.template.as_ref())?)
    }

    /// Apply a mutation, replacing the snapshot only on success
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let mut next = EmailTemplate::clone(&self.template);
        let created = mutation.apply(&mut next, &mut self.ids)?;

        let previous = std::mem::replace(&mut self.template, Arc::new(next));
        self.history.record(previous, mutation.describe());
        self.version += 1;

        if matches!(mutation, Mutation::ImportTemplate { .. }) {
            self.selected = None;
        } else {
            self.reconcile_selection();
        }

        Ok(MutationResult {
            version: self.version,
            created,
        })
    }

    /// Apply, treating rejection as a logged no-op
    fn apply_or_skip(&mut self, mutation: Mutation) -> Option<MutationResult> {
        match self.apply(mutation) {
            Ok(result) => Some(result),
            Err(err) => {
                debug!(error = %err, "Mutation rejected; template unchanged");
                None
            }
        }
    }

    /// Selection never points at a node that is no longer in the tree
    fn reconcile_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.template.find(id).is_none() {
                debug!(id = %id, "Selected component is gone; clearing selection");
                self.selected = None;
            }
        }
    }

    // Tree operations

    /// Add a component with default props under `parent_id`, or at the end of
    /// the root sequence. Returns the new id.
    pub fn add_component(
        &mut self,
        component_type: ComponentType,
        parent_id: Option<&ComponentId>,
    ) -> Option<ComponentId> {
        self.apply_or_skip(Mutation::AddComponent {
            component_type,
            parent_id: parent_id.cloned(),
        })
        .and_then(|result| result.created)
    }

    pub fn update_component(&mut self, id: &ComponentId, patch: PropsPatch) -> bool {
        self.apply_or_skip(Mutation::UpdateComponent {
            node_id: id.clone(),
            patch,
        })
        .is_some()
    }

    /// Move a component to `index` among the children of `new_parent_id`
    /// (root when `None`). Moving into itself or a descendant is rejected.
    pub fn move_component(
        &mut self,
        id: &ComponentId,
        index: usize,
        new_parent_id: Option<&ComponentId>,
    ) -> bool {
        self.apply_or_skip(Mutation::MoveComponent {
            node_id: id.clone(),
            index,
            new_parent_id: new_parent_id.cloned(),
        })
        .is_some()
    }

    pub fn remove_component(&mut self, id: &ComponentId) -> bool {
        self.apply_or_skip(Mutation::RemoveComponent {
            node_id: id.clone(),
        })
        .is_some()
    }

    pub fn duplicate_component(&mut self, id: &ComponentId) -> Option<ComponentId> {
        self.apply_or_skip(Mutation::DuplicateComponent {
            node_id: id.clone(),
        })
        .and_then(|result| result.created)
    }

    pub fn find_component(&self, id: &ComponentId) -> Option<&Component> {
        self.template.find(id)
    }

    /// Replace the root sequence and clear selection
    pub fn import_template(&mut self, components: Vec<Component>) -> bool {
        self.apply_or_skip(Mutation::ImportTemplate { components })
            .is_some()
    }

    /// Import pasted HTML as the new root sequence.
    ///
    /// Returns the number of root components imported.
    pub fn import_html(&mut self, html: &str) -> Result<usize, EditorError> {
        let components = HtmlImporter::new(&mut self.ids).import(html)?;
        let count = components.len();
        self.apply(Mutation::ImportTemplate { components })?;
        Ok(count)
    }

    // Merge tags

    /// Add a merge tag; returns its id
    pub fn add_merge_tag(&mut self, name: &str, value: &str) -> Option<String> {
        let tag = MergeTag::new(&mut self.ids, name, value);
        let tag_id = tag.id.clone();
        self.apply_or_skip(Mutation::AddMergeTag { tag })
            .map(|_| tag_id)
    }

    pub fn remove_merge_tag(&mut self, tag_id: &str) -> bool {
        self.apply_or_skip(Mutation::RemoveMergeTag {
            tag_id: tag_id.to_string(),
        })
        .is_some()
    }

    pub fn update_merge_tag(&mut self, tag_id: &str, patch: MergeTagPatch) -> bool {
        self.apply_or_skip(Mutation::UpdateMergeTag {
            tag_id: tag_id.to_string(),
            patch,
        })
        .is_some()
    }

    pub fn set_styles(&mut self, styles: DocumentStyles) -> bool {
        self.apply_or_skip(Mutation::SetStyles {
            font_family: Some(styles.font_family),
            background_color: Some(styles.background_color),
            width: Some(styles.width),
        })
        .is_some()
    }

    // Selection

    /// Select a component, or clear with `None`. Unknown ids are ignored.
    pub fn select(&mut self, id: Option<&ComponentId>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.template.find(id).is_some() => {
                self.selected = Some(id.clone());
                true
            }
            Some(id) => {
                debug!(id = %id, "Ignoring selection of unknown component");
                false
            }
        }
    }

    pub fn selected_id(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    pub fn selected_component(&self) -> Option<&Component> {
        self.selected.as_ref().and_then(|id| self.template.find(id))
    }

    // Output

    /// Compile the current snapshot to an HTML document
    pub fn export_html(&self) -> String {
        compile_to_html(&self.template, &self.compile_options)
    }

    // History

    /// Group the following mutations into one undo step
    ///
    /// A batch begun while another is open joins the outer one and keeps its
    /// description.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        let description = description.into();
        if self.history.is_batching() {
            debug!(description = %description, "Joining open batch");
            self.history.begin_batch();
            return;
        }
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> bool {
        self.history.flush_batch();
        match self.history.undo(self.snapshot()) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.history.flush_batch();
        match self.history.redo(self.snapshot()) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, template: Arc<EmailTemplate>) {
        self.template = template;
        self.version += 1;
        self.reconcile_selection();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
