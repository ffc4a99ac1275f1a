//! Rendering tool output as JSON or tables

use clap::ValueEnum;
use comfy_table::{Table, presets::UTF8_FULL};
use kuona_engine::ReturnSet;
use serde_json::Value;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

const ROW_COLUMNS: [(&str, &str); 6] = [
    ("ticker", "Ticker"),
    ("call_date", "Call date"),
    ("token_count", "Tokens"),
    ("sentiment_mean", "Sentiment"),
    ("sentiment_std", "Sentiment std"),
    ("uncertainty_score", "Uncertainty"),
];

/// Render a tool result
///
/// Feature results (`{features: [...]}`) become one row per event with a
/// return column per horizon; anything else is treated as a backtest report.
pub fn render(value: &Value, format: OutputFormat, horizons: &[u32]) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::Table => Ok(match value.get("features").and_then(Value::as_array) {
            Some(rows) => rows_table(rows, horizons).to_string(),
            None => report_table(value).to_string(),
        }),
    }
}

fn rows_table(rows: &[Value], horizons: &[u32]) -> Table {
    let return_fields: Vec<String> = horizons.iter().map(|&h| ReturnSet::field_name(h)).collect();

    let mut header: Vec<String> = ROW_COLUMNS.iter().map(|(_, title)| (*title).to_string()).collect();
    header.extend(horizons.iter().map(|h| format!("{h}d return")));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);

    for row in rows {
        let cells = ROW_COLUMNS
            .iter()
            .map(|(field, _)| *field)
            .chain(return_fields.iter().map(String::as_str))
            .map(|field| cell(&row[field]));
        table.add_row(cells.collect::<Vec<_>>());
    }
    table
}

fn report_table(report: &Value) -> Table {
    let bucket = |name: &str| {
        format!(
            "{} events, avg {}",
            cell(&report[name]["count"]),
            cell(&report[name]["avg_return"])
        )
    };
    let tickers = match report["tickers"].as_array() {
        Some(list) => list.iter().map(cell).collect::<Vec<_>>().join(", "),
        None => "all".to_string(),
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Tickers".to_string(), tickers]);
    table.add_row(vec!["Start date".to_string(), cell(&report["start_date"])]);
    table.add_row(vec!["End date".to_string(), cell(&report["end_date"])]);
    table.add_row(vec!["Horizon (days)".to_string(), cell(&report["horizon_days"])]);
    table.add_row(vec!["Events".to_string(), cell(&report["events_count"])]);
    table.add_row(vec!["Correlation".to_string(), cell(&report["correlation"])]);
    table.add_row(vec!["Low sentiment".to_string(), bucket("low_bucket")]);
    table.add_row(vec!["High sentiment".to_string(), bucket("high_bucket")]);
    table
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(String::new, |f| format!("{f:.4}")),
        other => other.to_string(),
    }
}
