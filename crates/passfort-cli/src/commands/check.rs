use passfort_core::storage::EntryStore;

use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::errors::CliError;
use crate::helpers::prompt_pin;
use crate::ui::{badge, details, print, Badge};

pub fn handle_check(ctx: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let vault = ctx.open_vault()?;

    if let Err(err) = vault.store().check_integrity() {
        return Err(CliError::IntegrityFailed(err.to_string()).into());
    }
    let count = vault.store().count()?;

    let decrypted = if args.decrypt {
        let pin = prompt_pin(ctx.interactive(args.no_input))?;
        let session = vault.unlock(&pin)?;
        Some(session.decrypt_all()?.len())
    } else {
        None
    };

    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, "Integrity check passed"));
        let mut items = vec![("Entries", count.to_string())];
        if let Some(n) = decrypted {
            items.push(("Decrypted", n.to_string()));
        }
        print(&ui, &details(&ui, &items));
    }
    Ok(())
}
