//! CLI command implementations

pub(crate) mod build;
pub(crate) mod clean;
pub(crate) mod common;
pub(crate) mod show;
pub(crate) mod tag;
