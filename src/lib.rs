// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod capabilities;
pub mod config;
pub mod confetti;
pub mod drill;
pub mod error;
pub mod logging;
pub mod profile;
pub mod progress;
pub mod results;
pub mod runtime;
pub mod scoring;
pub mod settings;
pub mod store;
pub mod theme;
pub mod ui;
pub mod word_bank;

pub use error::{Result, SpellError};
