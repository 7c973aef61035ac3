use std::io::Write;

use colored::Colorize;

use crate::pipeline::events::ScanStatus;
use crate::report::{Report, ReportError, ReportRenderer};

const HEADER: [&str; 3] = ["[elapsed]", "[byte_count]", "[status]"];

/// Fixed-width console table with a throughput footer.
///
/// With `color` set, status cells are painted green, yellow or red after
/// padding, so escape codes never skew the column widths.
pub struct TableRenderer {
    pub color: bool,
}

impl ReportRenderer for TableRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<(), ReportError> {
        let rows: Vec<[String; 3]> = report
            .rows
            .iter()
            .map(|row| match (row.status, row.elapsed_ms) {
                (ScanStatus::Matched, Some(ms)) => [
                    format!("{ms:.3} ms"),
                    row.byte_count.to_string(),
                    row.status.to_string(),
                ],
                _ => [String::new(), String::new(), row.status.to_string()],
            })
            .collect();
        let footer = [
            String::new(),
            "Average Bytes/ms".to_string(),
            report
                .average_bytes_per_ms
                .map(|avg| format!("{avg:.6}"))
                .unwrap_or_else(|| "n/a".to_string()),
        ];

        let mut widths = HEADER.map(str::len);
        for cells in rows.iter().chain(std::iter::once(&footer)) {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.len());
            }
        }

        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let border = format!("+{border}+");

        writeln!(out, "{border}")?;
        write_line(out, &widths, &HEADER.map(str::to_string))?;
        writeln!(out, "{border}")?;
        for (row, cells) in report.rows.iter().zip(&rows) {
            let status = self.color.then_some(row.status);
            write_status_line(out, &widths, cells, status)?;
        }
        writeln!(out, "{border}")?;
        write_line(out, &widths, &footer)?;
        writeln!(out, "{border}")?;
        out.flush()?;
        Ok(())
    }
}

fn write_line(
    out: &mut dyn Write,
    widths: &[usize; 3],
    cells: &[String; 3],
) -> std::io::Result<()> {
    write_status_line(out, widths, cells, None)
}

fn write_status_line(
    out: &mut dyn Write,
    widths: &[usize; 3],
    cells: &[String; 3],
    status: Option<ScanStatus>,
) -> std::io::Result<()> {
    write!(out, "|")?;
    for (column, (&width, cell)) in widths.iter().zip(cells).enumerate() {
        let padded = format!("{cell:<width$}");
        match status {
            Some(status) if column == cells.len() - 1 => {
                write!(out, " {} |", paint(status, &padded))?;
            }
            _ => write!(out, " {padded} |")?,
        }
    }
    writeln!(out)
}

fn paint(status: ScanStatus, text: &str) -> String {
    match status {
        ScanStatus::Matched => text.green().to_string(),
        ScanStatus::TimedOut => text.yellow().to_string(),
        ScanStatus::NotMatched => text.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::events::ScanResult;
    use std::time::Duration;

    fn render_with(results: &[ScanResult], color: bool) -> String {
        let report = Report::from_results(results);
        let mut out = Vec::new();
        TableRenderer { color }
            .render(&report, &mut out)
            .expect("render");
        String::from_utf8(out).expect("utf8")
    }

    fn render(results: &[ScanResult]) -> String {
        render_with(results, false)
    }

    #[test]
    fn renders_matched_and_unmatched_rows() {
        let text = render(&[
            ScanResult::not_matched(0, 10),
            ScanResult::matched(1, Duration::from_millis(5), 250),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[1].contains("[elapsed]"));
        assert!(lines[3].contains("5.000 ms"));
        assert!(lines[3].contains("250"));
        assert!(lines[3].contains("SUCCESS"));
        assert!(lines[4].contains("FAILURE"));
        assert!(!lines[4].contains("10"));
        assert!(lines[6].contains("Average Bytes/ms"));
        assert!(lines[6].contains("50.000000"));
        let width = lines[0].len();
        assert!(lines.iter().all(|l| l.len() == width));
    }

    #[test]
    fn footer_reports_undefined_average() {
        let text = render(&[ScanResult::timed_out(0)]);
        assert!(text.contains("n/a"));
        assert!(text.contains("TIMEOUT"));
    }

    #[test]
    fn colored_statuses_keep_columns_aligned() {
        colored::control::set_override(true);
        let results = [
            ScanResult::matched(0, Duration::from_millis(5), 250),
            ScanResult::timed_out(1),
            ScanResult::not_matched(2, 10),
        ];
        let text = render_with(&results, true);
        let plain = render(&results);

        assert!(text.contains("\x1b[32mSUCCESS"));
        assert!(text.contains("\x1b[33mTIMEOUT"));
        assert!(text.contains("\x1b[31mFAILURE"));

        // stripping the escape codes gives back the plain table
        let stripped = regex::Regex::new("\x1b\\[[0-9;]*m")
            .expect("regex")
            .replace_all(&text, "");
        assert_eq!(stripped.as_ref(), plain.as_str());
    }
}
