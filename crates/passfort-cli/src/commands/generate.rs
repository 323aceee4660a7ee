use passfort_core::generator::{generate_password, GeneratorOptions};
use passfort_core::strength::{analyze, SecurityLevel};

use crate::app::AppContext;
use crate::cli::GenerateArgs;
use crate::errors::CliError;
use crate::output::strength_json;
use crate::ui::{hint, print};

/// Merge flags over the configured generator defaults.
fn resolve_options(defaults: GeneratorOptions, args: &GenerateArgs) -> GeneratorOptions {
    GeneratorOptions {
        length: args.length.unwrap_or(defaults.length),
        uppercase: defaults.uppercase && !args.no_uppercase,
        numbers: defaults.numbers && !args.no_numbers,
        symbols: defaults.symbols && !args.no_symbols,
    }
}

pub fn handle_generate(ctx: &AppContext, args: &GenerateArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let options = resolve_options(ctx.generator_options()?, args);
    options
        .validate()
        .map_err(|e| CliError::invalid_input(e.to_string()))?;
    if args.count == 0 {
        return Err(CliError::invalid_input("--count must be at least 1").into());
    }

    let passwords = (0..args.count)
        .map(|_| generate_password(&options))
        .collect::<Result<Vec<_>, _>>()?;
    let level = SecurityLevel::for_length(options.length);

    if ui.mode.is_json() {
        let output = serde_json::json!({
            "passwords": passwords,
            "length": options.length,
            "security_level": level,
            "strength": passwords
                .iter()
                .map(|p| strength_json(&analyze(p)))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let annotate = ui.mode.is_pretty() && !ctx.quiet();
    for password in &passwords {
        println!("{}", password);
        if annotate {
            let report = analyze(password);
            let line = format!(
                "Strength: {} ({:.1}/4, {:.0} bits)",
                report.level.label(),
                report.score,
                report.entropy_bits
            );
            print(&ui, &hint(&ui, &line));
        }
    }
    if let Some(level) = level.filter(|_| annotate) {
        print(&ui, &hint(&ui, &format!("Security level: {}", level.label())));
    }
    Ok(())
}
