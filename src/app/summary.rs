use std::io::IsTerminal;
use std::path::Path;

use crossterm::style::Stylize;

use crate::{domain::RunConfig, metrics::BenchmarkResult};

fn use_color(no_color: bool) -> bool {
    !no_color && std::io::stdout().is_terminal()
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.green().to_string()
    } else {
        text.to_owned()
    }
}

/// Lines describing the run before it starts.
#[must_use]
pub fn parameter_lines(config: &RunConfig, output: Option<&Path>, debug: bool) -> Vec<String> {
    let mut lines = vec![
        format!("URI: {}", config.uri),
        format!("Connections: {}", config.connections),
        format!("Duration: {} seconds", config.duration_secs()),
        format!("Timeout: {} seconds", config.request_timeout.as_secs()),
        format!("Method: {}", config.method),
        format!("Expected status: {}", config.expected_status_code),
    ];
    if !config.headers.is_empty() {
        lines.push(format!("Headers: {}", config.headers.len()));
    }
    if !config.body.is_empty() {
        lines.push(format!("Body: {} bytes", config.body_len()));
    }
    if let Some(path) = output {
        lines.push(format!("Output file: {}", path.display()));
    }
    lines.push(format!("Debug: {}", debug));
    lines
}

pub fn print_parameters(config: &RunConfig, output: Option<&Path>, debug: bool, no_color: bool) {
    let color = use_color(no_color);
    println!(
        "{}",
        heading("Starting barrage with the following parameters:", color)
    );
    for line in parameter_lines(config, output, debug) {
        println!("{}", line);
    }
    println!("{}", heading("Starting barrage...", color));
}

/// Aggregate metrics rendered as a two-column table.
#[must_use]
pub fn metrics_table_lines(result: &BenchmarkResult) -> Vec<String> {
    let rows = vec![
        vec!["Total Requests".to_owned(), result.total_requests.to_string()],
        vec![
            "Successful Requests".to_owned(),
            result.successful_requests.to_string(),
        ],
        vec![
            "Failed Requests".to_owned(),
            result.failed_requests.to_string(),
        ],
        vec!["Timeouts".to_owned(), result.timeouts.to_string()],
        vec![
            "Unexpected Status".to_owned(),
            result.unexpected_status.to_string(),
        ],
        vec![
            "Requests/sec".to_owned(),
            format!("{:.2}", result.requests_per_second),
        ],
        vec![
            "Average Latency".to_owned(),
            format!("{:.2} ms", result.average_latency_ms),
        ],
        vec![
            "Min Latency".to_owned(),
            format!("{:.2} ms", result.min_latency_ms),
        ],
        vec![
            "Max Latency".to_owned(),
            format!("{:.2} ms", result.max_latency_ms),
        ],
        vec![
            "P50/P90/P99 Latency".to_owned(),
            format!(
                "{:.2} / {:.2} / {:.2} ms",
                result.p50_latency_ms, result.p90_latency_ms, result.p99_latency_ms
            ),
        ],
        vec![
            "Total Data Received".to_owned(),
            format!("{} bytes", result.bytes_read),
        ],
        vec![
            "Total Data Sent".to_owned(),
            format!("{} bytes", result.bytes_written),
        ],
        vec!["Error Rate".to_owned(), format!("{:.2}%", result.error_rate)],
    ];
    render_table(&["Metric", "Value"], &rows)
}

/// Status code distribution, ascending by code.
#[must_use]
pub fn status_table_lines(result: &BenchmarkResult) -> Vec<String> {
    let rows: Vec<Vec<String>> = result
        .status_codes
        .iter()
        .map(|(code, count)| {
            vec![
                code.to_string(),
                count.to_string(),
                format!("{:.2}%", result.status_share(*count)),
            ]
        })
        .collect();
    render_table(&["Status Code", "Count", "Percentage"], &rows)
}

pub fn print_results(result: &BenchmarkResult, no_color: bool) {
    let color = use_color(no_color);
    println!();
    println!("{}", heading("Benchmark Results:", color));
    for line in metrics_table_lines(result) {
        println!("{}", line);
    }
    println!();
    println!("{}", heading("Status Code Distribution:", color));
    for line in status_table_lines(result) {
        println!("{}", line);
    }
}

fn render_table(header: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|width| "-".repeat(width.saturating_add(2)))
            .collect::<Vec<_>>()
            .join("+")
    );
    let mut lines = vec![
        border.clone(),
        format_row(header.iter().copied(), &widths),
        border.clone(),
    ];
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines.push(border);
    lines
}

fn format_row<'row>(cells: impl Iterator<Item = &'row str>, widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!(" {:<width$} ", cell, width = *width))
        .collect();
    format!("|{}|", cells.join("|"))
}
