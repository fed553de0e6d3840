pub mod authoring;
pub mod commands;
pub mod config;
mod editor;
pub mod navigation;
mod navigator;
pub mod session;
pub mod shell;
pub mod state;

pub type HandlerResult = Result<String, Box<dyn std::error::Error + Send + Sync + 'static>>;
