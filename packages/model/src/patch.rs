use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::props::ComponentProps;

/// Shallow, partial props update keyed by the camelCase prop names
///
/// Keys in the patch replace the existing value, keys absent from the patch
/// are retained. The `type` key is ignored: a patch never changes a variant.
/// Setting `content` without `richContent` clears the rich content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropsPatch(Map<String, Value>);

impl PropsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Set a key from any serializable value (lists, enums)
    pub fn set_serialized<T: Serialize>(mut self, key: &str, value: &T) -> Result<Self, ModelError> {
        self.0.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge this patch over `props`, returning the new props value
    pub fn apply_to(&self, props: &ComponentProps) -> Result<ComponentProps, ModelError> {
        let mut value = serde_json::to_value(props)?;
        let Value::Object(map) = &mut value else {
            return Err(ModelError::InvalidProps(
                "props did not serialize to an object".to_string(),
            ));
        };

        for (key, patch_value) in &self.0 {
            if key == "type" {
                continue;
            }
            map.insert(key.clone(), patch_value.clone());
        }

        // Plain content edits drop any stale rich content
        if self.0.contains_key("content")
            && !self.0.contains_key("richContent")
            && map.contains_key("richContent")
        {
            map.insert("richContent".to_string(), Value::String(String::new()));
        }

        serde_json::from_value(value).map_err(|e| ModelError::InvalidProps(e.to_string()))
    }
}

impl From<Map<String, Value>> for PropsPatch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{defaults_for, ComponentType, Position, SocialLink, SocialPlatform};

    #[test]
    fn test_patch_replaces_only_given_keys() {
        let props = defaults_for(ComponentType::Text);
        let patched = PropsPatch::new()
            .set("fontSize", 20)
            .set("color", "#FF0000")
            .apply_to(&props)
            .unwrap();

        match patched {
            ComponentProps::Text(text) => {
                assert_eq!(text.font_size, 20);
                assert_eq!(text.color, "#FF0000");
                assert_eq!(text.content, "Add your text here");
                assert_eq!(text.rich_content, "<p>Add your text here</p>");
            }
            other => panic!("expected text props, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_content_clears_rich_content() {
        let patched = PropsPatch::new()
            .set("content", "Hi there")
            .apply_to(&defaults_for(ComponentType::Header))
            .unwrap();

        match patched {
            ComponentProps::Header(header) => {
                assert_eq!(header.content, "Hi there");
                assert!(header.rich_content.is_empty());
            }
            other => panic!("expected header props, got {:?}", other),
        }
    }

    #[test]
    fn test_content_and_rich_content_set_together() {
        let patched = PropsPatch::new()
            .set("content", "Hi")
            .set("richContent", "<p><b>Hi</b></p>")
            .apply_to(&defaults_for(ComponentType::Text))
            .unwrap();

        match patched {
            ComponentProps::Text(text) => assert_eq!(text.rich_content, "<p><b>Hi</b></p>"),
            other => panic!("expected text props, got {:?}", other),
        }
    }

    #[test]
    fn test_patch_cannot_change_variant() {
        let props = defaults_for(ComponentType::Spacer);
        let patched = PropsPatch::new()
            .set("type", "text")
            .set("height", 48)
            .apply_to(&props)
            .unwrap();

        assert_eq!(patched.component_type(), ComponentType::Spacer);
    }

    #[test]
    fn test_patch_sets_positioning_fields() {
        let props = defaults_for(ComponentType::Image);
        let patched = PropsPatch::new()
            .set("position", "absolute")
            .set("top", "12px")
            .set("zIndex", 3)
            .apply_to(&props)
            .unwrap();

        let positioning = patched.positioning();
        assert_eq!(positioning.position, Position::Absolute);
        assert_eq!(positioning.top, "12px");
        assert_eq!(positioning.z_index, Some(3));
    }

    #[test]
    fn test_patch_with_wrong_type_is_rejected() {
        let props = defaults_for(ComponentType::Text);
        let result = PropsPatch::new().set("fontSize", "huge").apply_to(&props);

        assert!(matches!(result, Err(ModelError::InvalidProps(_))));
    }

    #[test]
    fn test_patch_social_links_list() {
        let links = vec![SocialLink::new(SocialPlatform::Github, "https://github.com/x", true)];
        let patched = PropsPatch::new()
            .set_serialized("socialLinks", &links)
            .unwrap()
            .apply_to(&defaults_for(ComponentType::Social))
            .unwrap();

        match patched {
            ComponentProps::Social(social) => assert_eq!(social.social_links, links),
            other => panic!("expected social props, got {:?}", other),
        }
    }
}
