//! # Template Mutations
//!
//! Semantic operations on an email template.
//!
//! ## Design Principles
//!
//! 1. **Validated**: every mutation checks its targets before touching the tree
//! 2. **All-or-nothing**: a rejected mutation leaves the template unchanged
//! 3. **Intent-preserving**: one variant per editor operation
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Detach the node, then insert at `index` clamped to the destination length
//! - The index is interpreted after the node has been detached
//! - Fails if the new parent is the node itself or one of its descendants
//! - Fails if the new parent cannot own children
//!
//! ### Remove
//! - Removes the node and all descendants
//!
//! ### Duplicate
//! - Deep copy with a fresh id on every node, inserted right after the original

use mailcraft_model::{
    find_in_mut, remove_from, validate_forest, Component, ComponentId, ComponentType,
    EmailTemplate, IdGenerator, MergeTag, MergeTagPatch, ModelError, PropsPatch,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Create a component with default props, appended to a parent or the root
    AddComponent {
        component_type: ComponentType,
        parent_id: Option<ComponentId>,
    },

    /// Shallow-merge props into an existing component
    UpdateComponent {
        node_id: ComponentId,
        patch: PropsPatch,
    },

    /// Move a component to `index` under a new parent (root when `None`)
    MoveComponent {
        node_id: ComponentId,
        index: usize,
        new_parent_id: Option<ComponentId>,
    },

    /// Remove a component and its subtree
    RemoveComponent { node_id: ComponentId },

    /// Deep-clone a component next to the original
    DuplicateComponent { node_id: ComponentId },

    /// Replace the whole root sequence
    ImportTemplate { components: Vec<Component> },

    AddMergeTag { tag: MergeTag },

    RemoveMergeTag { tag_id: String },

    UpdateMergeTag { tag_id: String, patch: MergeTagPatch },

    /// Update document styles; `None` fields are left alone
    SetStyles {
        font_family: Option<String>,
        background_color: Option<String>,
        width: Option<String>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(ComponentId),

    #[error("Parent not found: {0}")]
    ParentNotFound(ComponentId),

    #[error("Component {0} cannot have children")]
    NotAContainer(ComponentId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Invalid props: {0}")]
    InvalidProps(String),

    #[error("Duplicate component id: {0}")]
    DuplicateId(ComponentId),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Merge tag not found: {0}")]
    MergeTagNotFound(String),

    #[error("Invalid merge tag: {0}")]
    InvalidMergeTag(String),
}

/// Result of applying a mutation through the editor
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Component created by add or duplicate
    pub created: Option<ComponentId>,
}

impl From<ModelError> for MutationError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidProps(msg) => MutationError::InvalidProps(msg),
            ModelError::DuplicateId(id) => MutationError::DuplicateId(id),
            other => MutationError::InvalidStructure(other.to_string()),
        }
    }
}

impl Mutation {
    /// Apply mutation to a template with validation.
    ///
    /// Returns the id of the component created by `AddComponent` or
    /// `DuplicateComponent`.
    pub fn apply(
        &self,
        template: &mut EmailTemplate,
        ids: &mut IdGenerator,
    ) -> Result<Option<ComponentId>, MutationError> {
        self.validate(template)?;

        match self {
            Mutation::AddComponent {
                component_type,
                parent_id,
            } => Self::apply_add(template, *component_type, parent_id.as_ref(), ids).map(Some),

            Mutation::UpdateComponent { node_id, patch } => {
                Self::apply_update(template, node_id, patch).map(|_| None)
            }

            Mutation::MoveComponent {
                node_id,
                index,
                new_parent_id,
            } => Self::apply_move(template, node_id, *index, new_parent_id.as_ref()).map(|_| None),

            Mutation::RemoveComponent { node_id } => {
                remove_from(&mut template.components, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(None)
            }

            Mutation::DuplicateComponent { node_id } => {
                Self::apply_duplicate(template, node_id, ids).map(Some)
            }

            Mutation::ImportTemplate { components } => {
                template.components = components.clone();
                Ok(None)
            }

            Mutation::AddMergeTag { tag } => {
                template.merge_tags.push(tag.clone());
                Ok(None)
            }

            Mutation::RemoveMergeTag { tag_id } => {
                template.merge_tags.retain(|t| &t.id != tag_id);
                Ok(None)
            }

            Mutation::UpdateMergeTag { tag_id, patch } => {
                let tag = template
                    .merge_tags
                    .iter_mut()
                    .find(|t| &t.id == tag_id)
                    .ok_or_else(|| MutationError::MergeTagNotFound(tag_id.clone()))?;
                patch.apply_to(tag);
                Ok(None)
            }

            Mutation::SetStyles {
                font_family,
                background_color,
                width,
            } => {
                if let Some(font_family) = font_family {
                    template.styles.font_family = font_family.clone();
                }
                if let Some(background_color) = background_color {
                    template.styles.background_color = background_color.clone();
                }
                if let Some(width) = width {
                    template.styles.width = width.clone();
                }
                Ok(None)
            }
        }
    }

    fn apply_add(
        template: &mut EmailTemplate,
        component_type: ComponentType,
        parent_id: Option<&ComponentId>,
        ids: &mut IdGenerator,
    ) -> Result<ComponentId, MutationError> {
        let component = Component::new(ids.new_id(), component_type);
        let new_id = component.id.clone();

        let siblings = siblings_mut(template, parent_id)?;
        siblings.push(component);

        Ok(new_id)
    }

    fn apply_update(
        template: &mut EmailTemplate,
        node_id: &ComponentId,
        patch: &PropsPatch,
    ) -> Result<(), MutationError> {
        let node = template
            .find_mut(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

        node.props = patch.apply_to(&node.props)?;
        Ok(())
    }

    fn apply_move(
        template: &mut EmailTemplate,
        node_id: &ComponentId,
        index: usize,
        new_parent_id: Option<&ComponentId>,
    ) -> Result<(), MutationError> {
        // Validation already guaranteed the destination survives the detach
        let node = remove_from(&mut template.components, node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

        let siblings = siblings_mut(template, new_parent_id)?;
        let insert_index = index.min(siblings.len());
        siblings.insert(insert_index, node);
        Ok(())
    }

    fn apply_duplicate(
        template: &mut EmailTemplate,
        node_id: &ComponentId,
        ids: &mut IdGenerator,
    ) -> Result<ComponentId, MutationError> {
        let location = template
            .locate(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
        let copy = template
            .find(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?
            .clone_with_fresh_ids(ids);
        let copy_id = copy.id.clone();

        let siblings = siblings_mut(template, location.parent.as_ref())?;
        siblings.insert(location.index + 1, copy);
        Ok(copy_id)
    }

    /// Validate without applying
    pub fn validate(&self, template: &EmailTemplate) -> Result<(), MutationError> {
        match self {
            Mutation::AddComponent { parent_id, .. } => {
                if let Some(parent_id) = parent_id {
                    let parent = template
                        .find(parent_id)
                        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                    if !parent.is_container() {
                        return Err(MutationError::NotAContainer(parent_id.clone()));
                    }
                    warn_if_columns_full(parent);
                }
                Ok(())
            }

            Mutation::UpdateComponent { node_id, .. }
            | Mutation::RemoveComponent { node_id }
            | Mutation::DuplicateComponent { node_id } => {
                template
                    .find(node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::MoveComponent {
                node_id,
                new_parent_id,
                ..
            } => {
                let node = template
                    .find(node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

                if let Some(parent_id) = new_parent_id {
                    // Covers both "into itself" and "into a descendant"
                    if node.contains(parent_id) {
                        return Err(MutationError::CycleDetected);
                    }

                    let parent = template
                        .find(parent_id)
                        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                    if !parent.is_container() {
                        return Err(MutationError::NotAContainer(parent_id.clone()));
                    }
                }
                Ok(())
            }

            Mutation::ImportTemplate { components } => {
                validate_forest(components)?;
                Ok(())
            }

            Mutation::AddMergeTag { tag } => {
                if tag.name.is_empty() || tag.value.is_empty() {
                    return Err(MutationError::InvalidMergeTag(
                        "name and value are required".to_string(),
                    ));
                }
                if template.merge_tag(&tag.id).is_some() {
                    return Err(MutationError::InvalidMergeTag(format!(
                        "id {} already in use",
                        tag.id
                    )));
                }
                Ok(())
            }

            Mutation::RemoveMergeTag { tag_id } | Mutation::UpdateMergeTag { tag_id, .. } => {
                template
                    .merge_tag(tag_id)
                    .ok_or_else(|| MutationError::MergeTagNotFound(tag_id.clone()))?;
                Ok(())
            }

            Mutation::SetStyles { .. } => Ok(()),
        }
    }

    /// Short human-readable label, used for undo history
    pub fn describe(&self) -> String {
        match self {
            Mutation::AddComponent { component_type, .. } => format!("Add {}", component_type),
            Mutation::UpdateComponent { .. } => "Update component".to_string(),
            Mutation::MoveComponent { .. } => "Move component".to_string(),
            Mutation::RemoveComponent { .. } => "Remove component".to_string(),
            Mutation::DuplicateComponent { .. } => "Duplicate component".to_string(),
            Mutation::ImportTemplate { .. } => "Import template".to_string(),
            Mutation::AddMergeTag { .. } => "Add merge tag".to_string(),
            Mutation::RemoveMergeTag { .. } => "Remove merge tag".to_string(),
            Mutation::UpdateMergeTag { .. } => "Update merge tag".to_string(),
            Mutation::SetStyles { .. } => "Update styles".to_string(),
        }
    }
}

/// Children of `parent_id`, or the root sequence when `None`
fn siblings_mut<'a>(
    template: &'a mut EmailTemplate,
    parent_id: Option<&ComponentId>,
) -> Result<&'a mut Vec<Component>, MutationError> {
    match parent_id {
        None => Ok(&mut template.components),
        Some(parent_id) => {
            let parent = find_in_mut(&mut template.components, parent_id)
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
            if !parent.is_container() {
                return Err(MutationError::NotAContainer(parent_id.clone()));
            }
            Ok(&mut parent.children)
        }
    }
}

fn warn_if_columns_full(parent: &Component) {
    if let mailcraft_model::ComponentProps::Columns(columns) = &parent.props {
        if parent.children.len() >= columns.slot_count() {
            debug!(
                parent_id = %parent.id,
                columns = columns.columns,
                children = parent.children.len(),
                "Adding past the column count; extra children are not rendered"
            );
        }
    }
}
