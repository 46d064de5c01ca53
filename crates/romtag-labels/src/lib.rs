//! romtag-labels - Label storage for romtag
//!
//! This crate provides the `LabelStore` trait with implementations for the
//! `tag` command-line tool and an in-memory store, plus the `TagReconciler`
//! that applies a computed tag set to a file with a minimal mutation.

pub mod error;
pub mod memory;
pub mod reconcile;
pub mod tag_tool;
pub mod traits;

pub use error::{LabelError, LabelResult};
pub use memory::MemoryLabels;
pub use reconcile::{ReconcileOutcome, TagReconciler};
pub use tag_tool::TagTool;
pub use traits::LabelStore;
