pub mod app;
pub mod config;
pub mod prompts;
pub mod provider;
pub mod review;
pub mod shared;
pub mod tui;
