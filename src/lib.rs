//! Run multiple React projects from one codebase: discover project entry
//! files, pick one, and wire a synthesized virtual entry module into the
//! bundler's dev and build pipelines.

pub mod bundler;
pub mod cli;
pub mod entry;
pub mod plugin;
pub mod project;
pub mod prompt;
pub mod setup;
