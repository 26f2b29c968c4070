mod builder;
mod date;
mod document;
mod listing;
mod loader;
mod markdown;
mod paths;
pub mod pipeline;
mod render;
#[cfg(test)]
mod test_support;

pub use builder::{BuildError, BuildReport, Builder};
pub use paths::base_path_from_config;
pub(crate) use render::BUILTIN_LAYOUTS;
