use crate::cmd::CheckArgs;
use crate::config::Config;
use crate::utils::read_input;
use anyhow::{bail, Result};
use ubb_parser::parse_str_with_options;

pub async fn run_check_command(args: CheckArgs, config: Config) -> Result<()> {
    let content = read_input(args.input.file.as_str()).await?;
    let document = parse_str_with_options(content, config.parse_options(&args.parser));

    let diagnostics = document.diagnostics();
    if diagnostics.is_empty() {
        println!("ok");
        return Ok(());
    }

    for diagnostic in diagnostics {
        match diagnostic.position() {
            Some(position) => println!("{position}: {diagnostic}"),
            None => println!("end of input: {diagnostic}"),
        }
    }
    bail!("{} recoveries made on malformed markup", diagnostics.len())
}
