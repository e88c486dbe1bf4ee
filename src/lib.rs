// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod language;
pub mod menu;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod window;

pub use error::{Error, Result};
