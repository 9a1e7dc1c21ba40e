use std::collections::HashSet;

use crate::error::ModelError;
use crate::{Component, ComponentId, EmailTemplate, MergeTag};

/// Visitor pattern for traversing a template immutably
///
/// Default implementations walk the entire tree in document order.
/// Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_template(&mut self, template: &EmailTemplate) {
        walk_template(self, template);
    }

    fn visit_component(&mut self, component: &Component) {
        walk_component(self, component);
    }

    fn visit_merge_tag(&mut self, _tag: &MergeTag) {
        // Leaf node, no children to walk
    }
}

pub fn walk_template<V: Visitor>(visitor: &mut V, template: &EmailTemplate) {
    walk_components(visitor, &template.components);
    for tag in &template.merge_tags {
        visitor.visit_merge_tag(tag);
    }
}

pub fn walk_components<V: Visitor>(visitor: &mut V, components: &[Component]) {
    for component in components {
        visitor.visit_component(component);
    }
}

pub fn walk_component<V: Visitor>(visitor: &mut V, component: &Component) {
    walk_components(visitor, &component.children);
}

/// Collects every component id in document order
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: Vec<ComponentId>,
}

impl Visitor for IdCollector {
    fn visit_component(&mut self, component: &Component) {
        self.ids.push(component.id.clone());
        walk_component(self, component);
    }
}

pub fn collect_ids(components: &[Component]) -> Vec<ComponentId> {
    let mut collector = IdCollector::default();
    walk_components(&mut collector, components);
    collector.ids
}

/// Checks the forest invariants: unique ids and no children under leaves
struct ForestValidator {
    seen: HashSet<ComponentId>,
    error: Option<ModelError>,
}

impl Visitor for ForestValidator {
    fn visit_component(&mut self, component: &Component) {
        if self.error.is_some() {
            return;
        }
        if !self.seen.insert(component.id.clone()) {
            self.error = Some(ModelError::DuplicateId(component.id.clone()));
            return;
        }
        if !component.is_container() && !component.children.is_empty() {
            self.error = Some(ModelError::ChildrenOnLeaf {
                id: component.id.clone(),
                component_type: component.component_type(),
            });
            return;
        }
        walk_component(self, component);
    }
}

pub fn validate_forest(components: &[Component]) -> Result<(), ModelError> {
    let mut validator = ForestValidator {
        seen: HashSet::new(),
        error: None,
    };
    walk_components(&mut validator, components);
    match validator.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
