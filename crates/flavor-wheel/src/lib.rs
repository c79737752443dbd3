pub mod app;
pub mod events;
pub mod sys;
pub mod wheel;
