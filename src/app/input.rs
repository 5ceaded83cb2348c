//! URL list input.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads URLs from `path`, one per line; `-` reads stdin.
///
/// Blank lines and lines starting with `#` are skipped.
pub async fn read_url_lines(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        log::info!("Reading URLs from stdin");
        collect_lines(BufReader::new(tokio::io::stdin())).await
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        collect_lines(BufReader::new(file)).await
    }
}

async fn collect_lines<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read URL input")?
    {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            urls.push(trimmed.to_string());
        }
    }
    Ok(urls)
}
