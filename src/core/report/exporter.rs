//! Accumulates report rows across camps and writes the CSV tables

use super::rows::{CampSummaryRow, StaffSummaryRow, CAMP_HEADERS, STAFF_HEADERS};
use crate::domain::{Camp, CampdocError, Result, View};
use std::path::{Path, PathBuf};

pub const CAMPS_FILE: &str = "camps.csv";
pub const STAFF_FILE: &str = "chefs.csv";

/// Rows in camp-input order
#[derive(Debug, Default)]
pub struct ReportExporter {
    camp_rows: Vec<CampSummaryRow>,
    staff_rows: Vec<StaffSummaryRow>,
}

impl ReportExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_camp_row(&mut self, camp: &Camp, view: &View) {
        self.camp_rows.push(CampSummaryRow::from_view(camp, view));
    }

    /// Appends the camp's staff rows, returning how many were added
    pub fn add_staff_rows(&mut self, camp: &Camp, view: &View) -> usize {
        let rows = StaffSummaryRow::from_view(camp, view);
        let count = rows.len();
        self.staff_rows.extend(rows);
        count
    }

    /// Writes `camps.csv` and `chefs.csv` into `output_dir`
    ///
    /// Both files are replaced on every run and always carry their header
    /// row, even when no camp was processed.
    ///
    /// # Errors
    ///
    /// Returns a report error if either file cannot be written.
    pub fn flush(&self, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(output_dir).map_err(|e| {
            CampdocError::Report(format!("Failed to create {}: {e}", output_dir.display()))
        })?;

        let camps_path = output_dir.join(CAMPS_FILE);
        write_table(
            &camps_path,
            &CAMP_HEADERS,
            self.camp_rows.iter().map(|r| r.to_record()),
        )?;

        let staff_path = output_dir.join(STAFF_FILE);
        write_table(
            &staff_path,
            &STAFF_HEADERS,
            self.staff_rows.iter().map(|r| r.to_record()),
        )?;

        tracing::info!(
            camps = self.camp_rows.len(),
            staff = self.staff_rows.len(),
            directory = %output_dir.display(),
            "Reports written"
        );

        Ok((camps_path, staff_path))
    }
}

fn write_table<'a, const N: usize>(
    path: &Path,
    headers: &[&str; N],
    records: impl Iterator<Item = [&'a str; N]>,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer
        .flush()
        .map_err(|e| CampdocError::Report(format!("Failed to write {}: {e}", path.display())))?;
    Ok(())
}
