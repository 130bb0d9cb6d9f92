//! # Storage Layer
//!
//! Startup inputs for the phonebook. Nothing is ever written back: the
//! contact collection lives in memory for the length of a session.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Initial contacts | JSON array of `{id, name, number}` | built-in, or `--seed PATH` |
//! | Config | TOML | `~/.config/phonebook/config.toml`, or `--config PATH` |
//!
//! ## Key Types
//!
//! - [`Seed`] - Initial contact list and where it came from
//! - [`Config`] - User configuration (seed path, toast options, TUI tick rate)

mod config;
mod seed;

pub use config::{Config, ConfigError, NotifyConfig, OutputFormat, ToastPosition, ToastTheme, TuiConfig};
pub use seed::{parse as parse_seed, Seed, SeedError, SeedSource, BUILTIN_SEED};
