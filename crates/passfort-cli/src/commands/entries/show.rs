use passfort_core::storage::EntryStore;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::{parse_entry_id, prompt_pin};
use crate::output::{entry_json, print_entry};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let id = parse_entry_id(&args.id)?;
    let vault = ctx.open_vault()?;

    // Unknown ids fail before the PIN prompt
    vault.store().summary(id)?;
    let pin = prompt_pin(ctx.interactive(args.no_input))?;
    let entry = vault.get(id, &pin)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
    } else {
        print_entry(&ui, &entry);
    }
    Ok(())
}
