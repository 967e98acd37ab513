use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::{self, AsyncReadExt};

/// Read all markup from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// When failed to io on the file or stdin.
pub async fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut data = String::new();
        io::stdin()
            .read_to_string(&mut data)
            .await
            .context("when reading markup from stdin")?;
        return Ok(data);
    }

    fs::read_to_string(path)
        .await
        .with_context(|| format!("when reading markup file {path}"))
}
