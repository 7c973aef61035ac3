use std::io::Write;

use crate::report::{Report, ReportError, ReportRenderer};

/// One JSON object per row.
pub struct JsonlRenderer;

impl ReportRenderer for JsonlRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<(), ReportError> {
        for row in &report.rows {
            serde_json::to_writer(&mut *out, row)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}
