//! Output generation: section pages, stylesheet, table of contents and
//! search index.

mod decorator;
mod indexer;
mod links;
mod names;
mod splitter;
mod toc;
mod write;

pub use decorator::{PageDecorator, StandardPageDecorator};
pub use indexer::{IndexedPage, SearchIndexer, TextIndexer};
pub use links::{anchor_names, AnchorMap, AnchorTarget};
pub use names::{slugify, FileNameAllocator};
pub use splitter::ContentSplitter;
pub use toc::{build_toc, generate_toc_yaml, render_outline, save_toc, TocEntry};
pub use write::write_atomic;
