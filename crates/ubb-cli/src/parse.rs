use crate::cmd::ParseArgs;
use crate::config::{Config, OutputFormat};
use crate::tree::render_tree;
use crate::utils::read_input;
use anyhow::{bail, Context, Result};
use tracing::trace;
use ubb_parser::parse_str_with_options;
use ubb_writer::to_ubb_string;

pub async fn run_parse_command(args: ParseArgs, config: Config) -> Result<()> {
    trace!("running parse command with args: {args:?}");

    let content = read_input(args.input.file.as_str()).await?;
    let document = parse_str_with_options(content, config.parse_options(&args.parser));

    let format = args.format.or(config.format).unwrap_or_default();
    let output = match format {
        OutputFormat::Tree => render_tree(&document),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&document).context("when serializing document")?
        }
        OutputFormat::Ubb => to_ubb_string(&document),
    };
    println!("{output}");

    let strict = args.strict || config.strict.unwrap_or_default();
    if strict && !document.diagnostics().is_empty() {
        for diagnostic in document.diagnostics() {
            eprintln!("{diagnostic}");
        }
        bail!(
            "{} recoveries made on malformed markup",
            document.diagnostics().len()
        );
    }

    Ok(())
}
