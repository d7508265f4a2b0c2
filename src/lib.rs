//! Locate `TODO` and `FIXME` markers across a directory tree.
//!
//! [`Traversal`] walks a root depth-first under a [`FilterConfig`] and yields
//! one [`Finding`] per tagged line, interleaved with the per-entry errors
//! that did not stop the walk.

pub mod app;

pub use app::error::{Error, Result};
pub use app::filters::{FilterConfig, BUILTIN_EXCLUDED_DIRECTORIES, BUILTIN_EXCLUDED_FILETYPES};
pub use app::models::{Finding, ScanReport, Summary, TagKind};
pub use app::scanner::{Traversal, WalkOptions};
