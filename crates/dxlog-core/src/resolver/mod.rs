//! Level resolution from configuration sources

mod level_resolver;

pub use level_resolver::{LevelResolver, DEFAULT_LEVEL};
