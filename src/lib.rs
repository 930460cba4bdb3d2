pub mod backup;
pub mod commands;
pub mod config;
pub mod engine;
pub mod package;
pub mod runtime;
