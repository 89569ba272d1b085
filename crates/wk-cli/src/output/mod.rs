use serde::Serialize;
use wk_calendar::{CategoryProgress, LevelProgress};

use crate::cli::OutputFormat;

pub mod table;

/// Render the level dashboard in the requested format.
pub fn render_progress(progress: &LevelProgress, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => render_json(progress),
        OutputFormat::Table => Ok(progress_table(progress, table::TableOptions::from_env())),
    }
}

pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn progress_table(progress: &LevelProgress, options: table::TableOptions) -> String {
    let headers = ["category", "total", "passed", "goal", "remaining", "stages"];
    let rows = progress.categories().map(progress_row).collect::<Vec<_>>();
    format!(
        "{} (level {})\n\n{}",
        progress.username,
        progress.level,
        table::render_table(&headers, &rows, options)
    )
}

fn progress_row(category: &CategoryProgress) -> Vec<String> {
    let stages = category
        .stages
        .iter()
        .map(|(stage, count)| format!("{stage}:{count}"))
        .collect::<Vec<_>>()
        .join(" ");
    vec![
        category.category.to_string(),
        category.total.to_string(),
        category.passed.to_string(),
        category.goal.to_string(),
        category.remaining.to_string(),
        stages,
    ]
}
