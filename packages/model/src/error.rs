use thiserror::Error;

use crate::{ComponentId, ComponentType};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid props: {0}")]
    InvalidProps(String),

    #[error("Duplicate component id: {0}")]
    DuplicateId(ComponentId),

    #[error("Component {id} is a {component_type} and cannot have children")]
    ChildrenOnLeaf {
        id: ComponentId,
        component_type: ComponentType,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
