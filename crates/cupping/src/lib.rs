pub mod macros;

pub mod config;
pub mod export;
pub mod language;
pub mod model;
pub mod persist;
pub mod store;
pub mod taxonomy;
