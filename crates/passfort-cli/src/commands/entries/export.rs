use std::io::Write;
use std::path::Path;

use passfort_core::export::seal_export;
use passfort_core::fs::write_atomic;
use passfort_core::storage::EntryStore;

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::errors::CliError;
use crate::helpers::{prompt_export_passphrase, prompt_pin};
use crate::ui::{badge, hint, Badge, UiContext};

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ui = UiContext::for_stderr(ctx.cli().no_color);
    let interactive = ctx.interactive(args.no_input);

    if let Some(output) = args.output.as_deref() {
        if Path::new(output).exists() && !args.force {
            return Err(CliError::invalid_input(format!(
                "{} already exists. Pass --force to overwrite.",
                output
            ))
            .into());
        }
    } else if args.encrypt {
        // Age output is binary
        return Err(CliError::invalid_input("--encrypt requires --output").into());
    }

    let vault = ctx.open_vault()?;
    let pin = prompt_pin(interactive)?;
    let csv = vault.export_all(&pin)?;
    let count = vault.store().count()?;

    let Some(output) = args.output.as_deref() else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&csv)?;
        stdout.flush()?;
        return Ok(());
    };

    if args.encrypt {
        let passphrase = prompt_export_passphrase(interactive)?;
        let sealed = seal_export(&csv, &passphrase)?;
        write_atomic(Path::new(output), &sealed)?;
    } else {
        write_atomic(Path::new(output), &csv)?;
    }

    if !ctx.quiet() {
        eprintln!(
            "{}",
            badge(
                &ui,
                Badge::Ok,
                &format!("Exported {} entries to {}", count, output)
            )
        );
        if !args.encrypt {
            eprintln!(
                "{}",
                hint(&ui, "The export holds plaintext passwords. Delete it when done.")
            );
        }
    }
    Ok(())
}
