use zeroize::Zeroizing;

use passfort_core::generator::{generate_password, GeneratorOptions};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::{prompt_pin_confirmed, read_entry_password, read_stdin_secret};
use crate::ui::{badge, print, Badge};

fn entry_password(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<Zeroizing<String>> {
    if args.generate {
        let defaults = ctx.generator_options()?;
        let options = GeneratorOptions {
            length: args.length.unwrap_or(defaults.length),
            ..defaults
        };
        return Ok(Zeroizing::new(generate_password(&options)?));
    }
    if args.password_stdin {
        return read_stdin_secret();
    }
    if !ctx.interactive(args.no_input) {
        return Err(CliError::invalid_input(
            "No password provided. Use --password-stdin or --generate.",
        )
        .into());
    }
    read_entry_password()
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let vault = ctx.open_vault()?;

    let password = entry_password(ctx, args)?;
    let pin = prompt_pin_confirmed(ctx.interactive(args.no_input))?;
    let id = vault.save(
        &args.site,
        args.username.as_deref(),
        &password,
        &pin,
        args.notes.as_deref(),
    )?;

    if ui.mode.is_json() {
        let mut output = serde_json::json!({ "id": id, "site": args.site.trim() });
        if args.generate {
            output["password"] = serde_json::Value::String(password.to_string());
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, &format!("Saved entry {}", id)));
        if args.generate {
            print(&ui, password.as_str());
        }
    }
    Ok(())
}
