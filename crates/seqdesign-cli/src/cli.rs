use crate::utils::parser::parse_chain_id;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "seqdesign contributors",
    version,
    about = "seqdesign CLI - validate protein structures and design amino-acid sequences for them with ProteinMPNN.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Design new sequences for chains of a protein structure.
    Design(DesignArgs),
    /// Check that a structure file is usable for sequence design.
    Validate(ValidateArgs),
    /// Report whether the design model weights are available.
    Health(HealthArgs),
    /// Manage the location of the local ProteinMPNN installation.
    Data(DataArgs),
}

/// Arguments for the `design` subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Path to the input structure file in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Chains to redesign, comma separated (e.g., 'A,B').
    #[arg(
        short,
        long,
        required = true,
        value_delimiter = ',',
        value_parser = parse_chain_id,
        value_name = "IDS"
    )]
    pub chains: Vec<char>,

    /// Number of sequences to design (1-10).
    #[arg(short, long, value_name = "INT")]
    pub num_sequences: Option<usize>,

    /// Write the JSON result to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the sampling temperature.
    #[arg(short, long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Override the random seed passed to the design program.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the time limit for the design program, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sampling.seed=7
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the input structure file in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Chains to check, comma separated (e.g., 'A,B').
    #[arg(
        short,
        long,
        required = true,
        value_delimiter = ',',
        value_parser = parse_chain_id,
        value_name = "IDS"
    )]
    pub chains: Vec<char>,

    /// Path to a configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `health` subcommand.
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Path to a configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The directory that contains (or will contain) the ProteinMPNN checkout.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn design_parses_comma_separated_chains() {
        let cli = Cli::parse_from([
            "seqdesign", "-vv", "design", "-i", "1ubq.pdb", "-c", "A,B", "-n", "3", "-S",
            "sampling.seed=7",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Design(args) = cli.command else {
            panic!("expected design command");
        };
        assert_eq!(args.chains, vec!['A', 'B']);
        assert_eq!(args.num_sequences, Some(3));
        assert_eq!(args.set_values, vec!["sampling.seed=7".to_string()]);
    }

    #[test]
    fn multi_character_chain_is_rejected() {
        let result = Cli::try_parse_from(["seqdesign", "validate", "-i", "x.pdb", "-c", "AB"]);
        assert!(result.is_err());
    }
}
