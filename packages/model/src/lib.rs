//! # Mailcraft Model
//!
//! Data types for an email template: the component tree, per-variant props
//! with their defaults, document styles and merge tags.
//!
//! The model has no editing behavior of its own. It provides the invariants
//! (unique ids, children only under container variants) and the tree queries
//! the editor and compiler build on.

mod component;
mod error;
mod id_generator;
mod patch;
mod props;
mod template;
mod visitor;

pub use component::{
    count_nodes, find_in, find_in_mut, locate, remove_from, Component, ComponentId, Location,
};
pub use error::ModelError;
pub use id_generator::{get_seed_hash, IdGenerator};
pub use patch::PropsPatch;
pub use props::{
    defaults_for, ButtonProps, ColumnsProps, ComponentProps, ComponentType, ContainerProps,
    DividerProps, FlexAlign, HeaderProps, ImageProps, Position, Positioning, SocialLink,
    SocialPlatform, SocialProps, SocialShape, SpacerProps, TextAlign, TextProps,
    UnsubscribeProps,
};
pub use template::{
    default_merge_tags, DocumentStyles, EmailTemplate, MergeTag, MergeTagPatch,
    DEFAULT_EMAIL_WIDTH_PX,
};
pub use visitor::{
    collect_ids, validate_forest, walk_component, walk_components, walk_template, IdCollector,
    Visitor,
};
