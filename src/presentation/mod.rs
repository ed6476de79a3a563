// Presentation layer - Terminal views and command handling
pub mod app_state;
pub mod cli;
pub mod render;
pub mod shell;
