//! Section hierarchy of a heading-structured document.
//!
//! The flat source is reduced to [`ContentSegment`]s, folded into a
//! [`SectionNode`] tree by [`TreeBuilder`], and flattened again into a
//! title-sorted index for navigation.

mod builder;
mod index;
mod node;
mod types;

pub use builder::TreeBuilder;
pub use index::{
    build_index, build_index_paths, first_node_with_content, list_generated_file_names,
    search_by_title,
};
pub use node::{NodePath, PreOrder, SectionNode};
pub use types::ContentSegment;
