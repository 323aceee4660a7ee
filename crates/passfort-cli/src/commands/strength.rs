use std::io::IsTerminal;

use dialoguer::Password;
use zeroize::Zeroizing;

use passfort_core::strength::analyze;

use crate::app::AppContext;
use crate::cli::StrengthArgs;
use crate::errors::CliError;
use crate::helpers::read_stdin_secret;
use crate::output::{print_strength, strength_json};

fn password_to_score(args: &StrengthArgs) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = args.password.as_deref() {
        return Ok(Zeroizing::new(password.to_string()));
    }
    if !std::io::stdin().is_terminal() {
        return read_stdin_secret();
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

pub fn handle_strength(ctx: &AppContext, args: &StrengthArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let password = password_to_score(args)?;
    if password.is_empty() {
        return Err(CliError::invalid_input("Password cannot be empty").into());
    }

    let report = analyze(&password);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&strength_json(&report))?);
    } else {
        print_strength(&ui, &report);
    }
    Ok(())
}
