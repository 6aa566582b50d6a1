/*!
 * Reporting functionality for dirclip
 *
 * Summarises a run in a table rendered with tabled. The report goes to
 * stderr so it never mixes with a document printed on stdout.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::scanner::ScanStatistics;
use crate::utils::format_file_size;

/// Summary of one run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Where the document went
    pub sink: String,
    /// Time taken to render and deliver
    pub duration: Duration,
    /// Scanner statistics
    pub statistics: ScanStatistics,
    /// Size of the rendered text
    pub rendered_bytes: usize,
    /// Size of the minified text, if minification ran
    pub minified_bytes: Option<usize>,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    key: &'static str,

    #[tabled(rename = "Value")]
    value: String,
}

/// Report generator for run results
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate the report text
    pub fn generate_report(&self, report: &RunReport) -> String {
        let stats = &report.statistics;

        let mut rows = vec![
            SummaryRow {
                key: "Output",
                value: report.sink.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Directories",
                value: format!(
                    "{} visited, {} skipped",
                    self.format_number(stats.directories_visited),
                    self.format_number(stats.directories_skipped)
                ),
            },
            SummaryRow {
                key: "Files Rendered",
                value: self.format_number(stats.files_rendered),
            },
            SummaryRow {
                key: "Files Skipped",
                value: format!(
                    "{} by extension, {} oversized",
                    self.format_number(stats.files_skipped_by_extension),
                    self.format_number(stats.files_oversized)
                ),
            },
            SummaryRow {
                key: "Total Lines",
                value: self.format_number(stats.total_lines),
            },
            SummaryRow {
                key: "Output Size",
                value: format_file_size(report.rendered_bytes as u64),
            },
        ];

        if stats.files_unreadable > 0 {
            rows.insert(
                4,
                SummaryRow {
                    key: "Files Unreadable",
                    value: self.format_number(stats.files_unreadable),
                },
            );
        }

        if let Some(minified) = report.minified_bytes {
            let saved = if report.rendered_bytes > 0 {
                100.0 - (minified as f64 / report.rendered_bytes as f64) * 100.0
            } else {
                0.0
            };
            rows.push(SummaryRow {
                key: "Minified Size",
                value: format!("{} ({:.1}% smaller)", format_file_size(minified as u64), saved),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("DONE\n{}", table)
    }

    /// Print the report to stderr
    pub fn print_report(&self, report: &RunReport) {
        eprintln!("\n{}", self.generate_report(report));
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
