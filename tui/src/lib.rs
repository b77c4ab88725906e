//! Terminal front end for Chatbox: app loop, state, components and input handling.

pub mod app;
pub mod components;
pub mod handlers;
pub mod state;
pub mod utils;

// Re-export main types for convenience
pub use app::App;
