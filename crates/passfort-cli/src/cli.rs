use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use passfort_core::VERSION;

/// PassFort - a local password generator and PIN-encrypted password vault
#[derive(Parser)]
#[command(name = "passfort")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault file
    #[arg(long, global = true, env = "PASSFORT_VAULT")]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the vault will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Argon2 memory cost in KiB
    #[arg(long)]
    pub memory_kib: Option<u32>,

    /// Argon2 iteration count
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Argon2 parallelism
    #[arg(long)]
    pub parallelism: Option<u32>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Site or service name
    #[arg(value_name = "SITE")]
    pub site: String,

    /// Username for the site
    #[arg(short, long)]
    pub username: Option<String>,

    /// Free-form notes (stored encrypted)
    #[arg(long)]
    pub notes: Option<String>,

    /// Generate the password instead of prompting for it
    #[arg(short, long, conflicts_with = "password_stdin")]
    pub generate: bool,

    /// Length of the generated password
    #[arg(long, requires = "generate")]
    pub length: Option<usize>,

    /// Read the password from stdin
    #[arg(long)]
    pub password_stdin: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Seal the export with a passphrase (Age format)
    #[arg(long)]
    pub encrypt: bool,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Password length (5-30)
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_numbers: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Number of passwords to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `strength` command
#[derive(Args)]
pub struct StrengthArgs {
    /// Password to score (read from stdin or a prompt when omitted)
    #[arg(value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Also decrypt every entry with the PIN
    #[arg(long)]
    pub decrypt: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new encrypted vault
    Init(InitArgs),

    /// Store a new password entry
    Add(AddArgs),

    /// List entries (no secrets are shown)
    List(ListArgs),

    /// Decrypt and show one entry
    Show(ShowArgs),

    /// Permanently delete an entry
    Delete(DeleteArgs),

    /// Export all entries as CSV
    Export(ExportArgs),

    /// Generate random passwords
    Generate(GenerateArgs),

    /// Score a password's strength
    Strength(StrengthArgs),

    /// Check vault integrity
    Check(CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_generate() {
        let cli = Cli::try_parse_from([
            "passfort",
            "add",
            "example.com",
            "--username",
            "alice",
            "--generate",
            "--length",
            "20",
        ])
        .expect("parse");
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.site, "example.com");
                assert_eq!(args.username.as_deref(), Some("alice"));
                assert!(args.generate);
                assert_eq!(args.length, Some(20));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_generate_conflicts_with_password_stdin() {
        let result = Cli::try_parse_from([
            "passfort",
            "add",
            "example.com",
            "--generate",
            "--password-stdin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["passfort", "-vv", "list"]).expect("parse");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_init_takes_no_prompt_flags() {
        let cli = Cli::try_parse_from(["passfort", "init", "--memory-kib", "1024"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Init(InitArgs { memory_kib: Some(1024), .. }))
        ));
        assert!(Cli::try_parse_from(["passfort", "init", "--no-input"]).is_err());
    }
}
