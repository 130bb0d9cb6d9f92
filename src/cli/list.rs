//! One-shot contact listing

use anyhow::Result;

use super::output::Output;
use crate::domain::ContactStore;

/// Prints the seeded contacts, optionally filtered by name
pub fn run(output: &Output, mut store: ContactStore, filter: Option<&str>) -> Result<()> {
    if let Some(text) = filter {
        output.verbose_ctx("list", &format!("Filtering by {:?}", text));
        store.set_filter(text);
    }

    output.contacts(store.visible_contacts());
    output.verbose_ctx(
        "list",
        &format!("{} of {} contacts visible", store.visible_contacts().count(), store.len()),
    );
    Ok(())
}
