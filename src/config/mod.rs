// config module — options bag and config-file loading

pub mod loader;
pub mod types;

pub use types::Options;
