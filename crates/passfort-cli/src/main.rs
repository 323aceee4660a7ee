//! PassFort CLI - a local password generator and PIN-encrypted vault
//!
//! This is the command-line interface for PassFort. It parses arguments,
//! resolves config and paths, prompts for secrets and renders results; all
//! cryptography and storage live in `passfort-core`.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::{CommandFactory, Parser};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{check, entries, generate, init, misc, strength};
use crate::errors::CliError;
use crate::ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(err) = run(&ctx, &cli) {
        tracing::debug!(error = ?err, "command failed");
        let classified = CliError::classify(&err);
        let ui = UiContext::for_stderr(cli.no_color);
        print_error(&ui, classified.message(), classified.hint());
        std::process::exit(classified.exit_code());
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Init(args) => init::handle_init(ctx, args),
        Commands::Add(args) => entries::handle_add(ctx, args),
        Commands::List(args) => entries::handle_list(ctx, args),
        Commands::Show(args) => entries::handle_show(ctx, args),
        Commands::Delete(args) => entries::handle_delete(ctx, args),
        Commands::Export(args) => entries::handle_export(ctx, args),
        Commands::Generate(args) => generate::handle_generate(ctx, args),
        Commands::Strength(args) => strength::handle_strength(ctx, args),
        Commands::Check(args) => check::handle_check(ctx, args),
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}
