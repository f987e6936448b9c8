//! The `lingodrill import` and `lingodrill import-logs` commands.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lingodrill_content::api::{ImportKind, ImportMode};
use lingodrill_content::config::load_config_from;
use lingodrill_content::ContentApi;

pub async fn execute(
    file: PathBuf,
    kind: String,
    mode: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let kind = match kind.as_str() {
        "vocabulary" => ImportKind::Vocabulary,
        "reading-units" => ImportKind::ReadingUnits,
        other => anyhow::bail!("unknown import kind '{other}' (expected vocabulary or reading-units)"),
    };
    let mode = match mode.as_str() {
        "append" => ImportMode::Append,
        "overwrite" => ImportMode::Overwrite,
        other => anyhow::bail!("unknown import mode '{other}' (expected append or overwrite)"),
    };
    anyhow::ensure!(file.is_file(), "file not found: {}", file.display());

    let config = load_config_from(config_path.as_deref())?;
    let api = ContentApi::from_config(&config.api)?;

    eprintln!("Importing {} as {kind} ({mode})", file.display());
    let summary = api.import_file(&file, kind, mode).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub async fn execute_logs(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let api = ContentApi::from_config(&config.api)?;
    let logs = api.import_logs().await?;

    if logs.is_empty() {
        println!("No imports yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["File", "Type", "Mode", "Imported", "Date"]);
    for log in &logs {
        table.add_row(vec![
            Cell::new(&log.file),
            Cell::new(&log.file_type),
            Cell::new(&log.mode),
            Cell::new(format!("{}/{}", log.result.success, log.result.total)),
            Cell::new(log.created_at.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    Ok(())
}
