use std::io::Write;

use crate::report::{Report, ReportError, ReportRenderer};

pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<(), ReportError> {
        let mut writer = csv::Writer::from_writer(out);
        for row in &report.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
