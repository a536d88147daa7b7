//! CSV summary export and writing export files to disk.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::backend::domain::{
    commands::export::CsvExportResult, models::record::DailyRecord,
};

#[derive(Debug, Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// One summary row per record, oldest first
    pub fn export_csv(&self, records: &[DailyRecord], today: NaiveDate) -> Result<CsvExportResult> {
        let mut ordered: Vec<&DailyRecord> = records.iter().collect();
        ordered.sort_by_key(|record| record.date);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["date", "total_sales", "total_expenses", "profit"])?;
        for record in &ordered {
            writer.write_record([
                record.id.clone(),
                format_amount(record.total_sales),
                format_amount(record.total_expenses()),
                format_amount(record.profit()),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to finish CSV export: {}", e))?;
        let csv_content = String::from_utf8(bytes).context("CSV export produced invalid UTF-8")?;
        let filename = format!("pnl_summary_{}.csv", today.format("%Y%m%d"));

        info!("Exported {} records as CSV ({} bytes)", ordered.len(), csv_content.len());
        Ok(CsvExportResult {
            csv_content,
            filename,
            record_count: ordered.len(),
        })
    }

    /// Write `content` as `filename` inside `custom_dir`, or inside the user's
    /// documents folder when no directory is given
    pub fn write_export(&self, filename: &str, content: &str, custom_dir: Option<&str>) -> Result<PathBuf> {
        let export_dir = match custom_dir {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(sanitize_path(dir)),
            _ => dirs::document_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| anyhow!("Could not determine a default export directory"))?,
        };

        fs::create_dir_all(&export_dir)
            .with_context(|| format!("Failed to create export directory {}", export_dir.display()))?;
        let file_path = export_dir.join(filename);
        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write export file {}", file_path.display()))?;

        info!("Wrote {}", file_path.display());
        Ok(file_path)
    }
}

/// Amounts without float noise: whole numbers print bare, others to 2 places
fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.2}", rounded)
    }
}

/// Clean up a user-supplied directory: quotes, escaped spaces, trailing
/// separators and a leading `~`
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    if cleaned.len() >= 2
        && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'')))
    {
        cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
    }

    cleaned = cleaned.replace("\\ ", " ");

    while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
        cleaned.pop();
    }

    if let Some(home) = dirs::home_dir() {
        if cleaned == "~" {
            cleaned = home.to_string_lossy().to_string();
        } else if let Some(rest) = cleaned.strip_prefix("~/").or_else(|| cleaned.strip_prefix("~\\")) {
            cleaned = home.join(rest).to_string_lossy().to_string();
        }
    }

    cleaned
}
