use serde::{Deserialize, Serialize};

use crate::component::{count_nodes, find_in, find_in_mut, locate, Component, ComponentId, Location};
use crate::IdGenerator;

/// Nominal email width used when the document width is not a pixel length
pub const DEFAULT_EMAIL_WIDTH_PX: u32 = 600;

/// Document-level styles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentStyles {
    pub font_family: String,
    pub background_color: String,
    pub width: String,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            font_family: "Inter, sans-serif".to_string(),
            background_color: "#FFFFFF".to_string(),
            width: "600px".to_string(),
        }
    }
}

impl DocumentStyles {
    /// Width in pixels when `width` is `"600px"` or `"600"`, else the default
    pub fn nominal_width_px(&self) -> u32 {
        let trimmed = self.width.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        match number.parse::<u32>() {
            Ok(px) if px > 0 => px,
            _ => DEFAULT_EMAIL_WIDTH_PX,
        }
    }
}

/// Named literal substitution applied at compile time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTag {
    pub id: String,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MergeTag {
    pub fn new(ids: &mut IdGenerator, name: &str, value: &str) -> Self {
        Self {
            id: ids.next_raw(),
            name: name.to_string(),
            value: value.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a merge tag; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeTagPatch {
    pub name: Option<String>,
    pub value: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
}

impl MergeTagPatch {
    pub fn apply_to(&self, tag: &mut MergeTag) {
        if let Some(name) = &self.name {
            tag.name = name.clone();
        }
        if let Some(value) = &self.value {
            tag.value = value.clone();
        }
        if let Some(description) = &self.description {
            tag.description = description.clone();
        }
    }
}

/// The aggregate root: root components, document styles and merge tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub styles: DocumentStyles,
    #[serde(default)]
    pub merge_tags: Vec<MergeTag>,
}

impl EmailTemplate {
    /// Fresh session template: default styles and the four seeded merge tags
    pub fn new(ids: &mut IdGenerator) -> Self {
        Self {
            components: Vec::new(),
            styles: DocumentStyles::default(),
            merge_tags: default_merge_tags(ids),
        }
    }

    /// Template with no components and no merge tags
    pub fn empty() -> Self {
        Self {
            components: Vec::new(),
            styles: DocumentStyles::default(),
            merge_tags: Vec::new(),
        }
    }

    pub fn find(&self, id: &ComponentId) -> Option<&Component> {
        find_in(&self.components, id)
    }

    pub fn find_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        find_in_mut(&mut self.components, id)
    }

    pub fn locate(&self, id: &ComponentId) -> Option<Location> {
        locate(&self.components, id)
    }

    pub fn node_count(&self) -> usize {
        count_nodes(&self.components)
    }

    pub fn merge_tag(&self, tag_id: &str) -> Option<&MergeTag> {
        self.merge_tags.iter().find(|t| t.id == tag_id)
    }
}

impl Default for EmailTemplate {
    fn default() -> Self {
        Self::new(&mut IdGenerator::new("mailcraft://merge-tags"))
    }
}

pub fn default_merge_tags(ids: &mut IdGenerator) -> Vec<MergeTag> {
    vec![
        MergeTag::new(ids, "First Name", "{{firstName}}"),
        MergeTag::new(ids, "Last Name", "{{lastName}}"),
        MergeTag::new(ids, "Email", "{{email}}"),
        MergeTag::new(ids, "Company", "{{company}}"),
    ]
}
