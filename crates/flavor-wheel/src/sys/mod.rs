pub mod clock;
pub mod input;
pub mod runtime;
pub mod watcher;
