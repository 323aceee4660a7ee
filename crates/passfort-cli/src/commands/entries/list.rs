use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{print_entry_list, summaries_json};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, args.format.as_deref());
    let vault = ctx.open_vault()?;
    let summaries = vault.list()?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&summaries_json(&summaries))?);
        return Ok(());
    }
    print_entry_list(&ui, &summaries, ctx.quiet());
    Ok(())
}
