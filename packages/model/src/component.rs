use serde::{Deserialize, Serialize};
use std::fmt;

use crate::props::{defaults_for, ComponentProps, ComponentType};
use crate::IdGenerator;

/// Opaque component identifier, stable for the node's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A node in the template tree
///
/// `children` is only populated for container variants. There are no parent
/// back-references; use [`locate`] to recompute a node's parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub props: ComponentProps,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
}

impl Component {
    /// New component carrying the variant defaults
    pub fn new(id: ComponentId, component_type: ComponentType) -> Self {
        Self::with_props(id, defaults_for(component_type))
    }

    pub fn with_props(id: ComponentId, props: ComponentProps) -> Self {
        Self {
            id,
            props,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = children;
        self
    }

    pub fn component_type(&self) -> ComponentType {
        self.props.component_type()
    }

    pub fn is_container(&self) -> bool {
        self.component_type().is_container()
    }

    /// Depth-first search of this node and its descendants
    pub fn find(&self, id: &ComponentId) -> Option<&Component> {
        if &self.id == id {
            return Some(self);
        }
        find_in(&self.children, id)
    }

    /// True if `id` is this node or any of its descendants
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.find(id).is_some()
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + count_nodes(&self.children)
    }

    /// Deep copy of the subtree where every node gets a fresh id
    pub fn clone_with_fresh_ids(&self, ids: &mut IdGenerator) -> Component {
        Component {
            id: ids.new_id(),
            props: self.props.clone(),
            children: self
                .children
                .iter()
                .map(|child| child.clone_with_fresh_ids(ids))
                .collect(),
        }
    }
}

/// Where a node sits: its parent (`None` for the root sequence) and index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub parent: Option<ComponentId>,
    pub index: usize,
}

pub fn find_in<'a>(components: &'a [Component], id: &ComponentId) -> Option<&'a Component> {
    for component in components {
        if let Some(found) = component.find(id) {
            return Some(found);
        }
    }
    None
}

pub fn find_in_mut<'a>(
    components: &'a mut [Component],
    id: &ComponentId,
) -> Option<&'a mut Component> {
    for component in components {
        if &component.id == id {
            return Some(component);
        }
        if let Some(found) = find_in_mut(&mut component.children, id) {
            return Some(found);
        }
    }
    None
}

/// Recompute the parent and sibling index of a node by searching the tree
pub fn locate(components: &[Component], id: &ComponentId) -> Option<Location> {
    locate_under(components, id, None)
}

fn locate_under(
    components: &[Component],
    id: &ComponentId,
    parent: Option<&ComponentId>,
) -> Option<Location> {
    if let Some(index) = components.iter().position(|c| &c.id == id) {
        return Some(Location {
            parent: parent.cloned(),
            index,
        });
    }

    components
        .iter()
        .find_map(|c| locate_under(&c.children, id, Some(&c.id)))
}

/// Detach a node (and its subtree) from wherever it lives
pub fn remove_from(components: &mut Vec<Component>, id: &ComponentId) -> Option<Component> {
    if let Some(pos) = components.iter().position(|c| &c.id == id) {
        return Some(components.remove(pos));
    }

    for component in components.iter_mut() {
        if let Some(removed) = remove_from(&mut component.children, id) {
            return Some(removed);
        }
    }

    None
}

pub fn count_nodes(components: &[Component]) -> usize {
    components.iter().map(Component::node_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ComponentId {
        ComponentId::from(s)
    }

    fn sample_tree() -> Vec<Component> {
        vec![
            Component::new(id("a"), ComponentType::Container).with_children(vec![
                Component::new(id("a1"), ComponentType::Text),
                Component::new(id("a2"), ComponentType::Columns)
                    .with_children(vec![Component::new(id("a2x"), ComponentType::Image)]),
            ]),
            Component::new(id("b"), ComponentType::Divider),
        ]
    }

    #[test]
    fn test_find_in_nested_tree() {
        let tree = sample_tree();

        assert_eq!(find_in(&tree, &id("a2x")).map(|c| c.component_type()), Some(ComponentType::Image));
        assert!(find_in(&tree, &id("missing")).is_none());
    }

    #[test]
    fn test_locate_reports_parent_and_index() {
        let tree = sample_tree();

        assert_eq!(
            locate(&tree, &id("a2")),
            Some(Location { parent: Some(id("a")), index: 1 })
        );
        assert_eq!(locate(&tree, &id("b")), Some(Location { parent: None, index: 1 }));
    }

    #[test]
    fn test_remove_from_takes_whole_subtree() {
        let mut tree = sample_tree();
        assert_eq!(count_nodes(&tree), 5);

        let removed = remove_from(&mut tree, &id("a2")).unwrap();
        assert_eq!(removed.node_count(), 2);
        assert_eq!(count_nodes(&tree), 3);
        assert!(find_in(&tree, &id("a2x")).is_none());
    }

    #[test]
    fn test_clone_with_fresh_ids_renames_every_node() {
        let tree = sample_tree();
        let mut ids = IdGenerator::new("clone-test");

        let copy = tree[0].clone_with_fresh_ids(&mut ids);

        assert_eq!(copy.node_count(), tree[0].node_count());
        assert_ne!(copy.id, tree[0].id);
        assert_ne!(copy.children[1].children[0].id, id("a2x"));
        assert_eq!(copy.children[1].children[0].props, tree[0].children[1].children[0].props);
    }

    #[test]
    fn test_component_json_shape() {
        let component = Component::new(id("c1"), ComponentType::Spacer);
        let json = serde_json::to_value(&component).unwrap();

        assert_eq!(json["id"], "c1");
        assert_eq!(json["props"]["type"], "spacer");
        assert_eq!(json["props"]["height"], 20);
        assert!(json.get("children").is_none());
    }
}
