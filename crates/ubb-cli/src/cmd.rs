use crate::check::run_check_command;
use crate::config::{Config, OutputFormat};
use crate::parse::run_parse_command;
use crate::tokens::run_tokens_command;
use anyhow::Result;
use clap::{arg, ArgAction};
use clap::{Args, Parser, Subcommand};
use ubb_parser::FallbackPolicy;

///////// Args /////////

#[derive(Clone, Debug, Args)]
pub struct InputArgs {
    #[arg(help = "File path to read markup from, `-` for stdin")]
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct ParserArgs {
    #[arg(
        long = "fallback",
        help = "What to do with unknown or unmatched tags: `literal` keeps them as text, `discard` drops them"
    )]
    pub fallback: Option<FallbackPolicy>,

    #[arg(long = "max-depth", help = "Maximum tag nesting depth")]
    pub max_depth: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub parser: ParserArgs,

    #[arg(short = 'f', long = "format", value_enum, help = "Output format")]
    pub format: Option<OutputFormat>,

    #[arg(
        long = "strict",
        help = "Fail when the parser had to recover from malformed markup",
        action = ArgAction::SetTrue,
    )]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TokensArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        long = "json",
        help = "Print tokens as json",
        action = ArgAction::SetTrue,
    )]
    pub json: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub parser: ParserArgs,
}

///////// Subcommand /////////

#[derive(Clone, Debug, Parser)]
#[command(name = "ubb")]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        help = "Path to the toml config file holding default options"
    )]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    #[command(about = "parse markup and print the document tree")]
    Parse(ParseArgs),

    #[command(about = "print the tokens markup splits into")]
    Tokens(TokensArgs),

    #[command(about = "report recoveries the parser makes on malformed markup")]
    Check(CheckArgs),
}

/// Main entry of all subcommands.
pub async fn run_command_with_args(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(path) => Config::load(path).await?,
        None => Config::default(),
    };

    match cli.command {
        Command::Parse(parse_args) => run_parse_command(parse_args, config).await,
        Command::Tokens(tokens_args) => run_tokens_command(tokens_args).await,
        Command::Check(check_args) => run_check_command(check_args, config).await,
    }
}
