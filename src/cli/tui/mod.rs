//! Interactive phonebook
//!
//! One screen: the add-contact form, the name filter, the contact list and
//! toast notifications, drawn with ratatui.

mod app;
mod event;
mod ui;
mod view;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::ContactStore;
use crate::storage::Config;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, store: ContactStore, config: &Config) -> Result<()> {
    output.verbose_ctx("tui", &format!("Starting with {} contacts", store.len()));

    let mut app = App::new(store, config.notify.clone());
    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(config.tui.tick_rate_ms);

    // The terminal must be restored even if the loop panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
        }
        Err(panic_payload) => {
            let _ = restore_result;
            let message = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown error".to_string()
            };
            return Err(anyhow!("TUI panicked: {}", message));
        }
    }

    output.verbose_ctx("tui", &format!("Session ended with {} contacts", app.store().len()));
    Ok(())
}
