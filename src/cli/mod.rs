//! # Command-Line Interface
//!
//! The presentation layer around [`ContactStore`](crate::domain::ContactStore).
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `tui` (default) | Interactive form, filter and contact list |
//! | `shell` | One command per stdin line: `add`, `delete`, `filter`, `list` |
//! | `list` | Print the initial contacts, optionally filtered |
//! | `config` | Show the effective configuration |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for diagnostics on stderr:
//! ```bash
//! phonebook --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod notify;
mod form;
mod list;
mod shell;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use notify::{ConsoleNotifier, Notifier, Toast, ToastKind, ToastQueue};
pub use form::{validate, ContactForm, Field, FormError, Submission};
pub use shell::{Shell, ShellCommand, ShellError};
