//! Infrastructure for FitCoach.
//!
//! Concrete adapters behind the ports in `fitcoach-core`: the Gemini HTTP
//! client, the country CSV loader, `config.toml` loading and data
//! directory resolution.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod reference;
