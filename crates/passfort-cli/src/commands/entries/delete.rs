use passfort_core::storage::EntryStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::{confirm, parse_entry_id};
use crate::ui::{badge, print, Badge};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let id = parse_entry_id(&args.id)?;
    let vault = ctx.open_vault()?;
    // Summary only: damaged records must stay deletable
    let entry = vault.store().summary(id)?;

    if !args.yes {
        if !ctx.interactive(false) {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation. Pass --yes.",
            )
            .into());
        }
        let prompt = format!("Delete entry {} ({})? This cannot be undone", id, entry.site);
        if !confirm(&prompt)? {
            print(&ui, "Aborted.");
            return Ok(());
        }
    }

    vault.remove(id)?;
    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, &format!("Deleted entry {}", id)));
    }
    Ok(())
}
