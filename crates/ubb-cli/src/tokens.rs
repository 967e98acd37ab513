use crate::cmd::TokensArgs;
use crate::utils::read_input;
use anyhow::{Context, Result};
use ubb_parser::lexer::lex;

pub async fn run_tokens_command(args: TokensArgs) -> Result<()> {
    let content = read_input(args.input.file.as_str()).await?;
    let tokens = lex(content);

    if args.json {
        let output = serde_json::to_string_pretty(&tokens).context("when serializing tokens")?;
        println!("{output}");
        return Ok(());
    }

    for token in tokens.iter() {
        let position = token.position.unwrap_or_default();
        if token.kind.symbol().is_some() {
            println!("{position:>6} {:?}", token.kind);
        } else {
            println!("{position:>6} {:?} {:?}", token.kind, token.value);
        }
    }
    Ok(())
}
