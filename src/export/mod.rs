// File exports: CSV of raw readings and the PDF health report, plus download file names.

pub mod csv;
pub mod pdf;
pub mod report;

use chrono::{DateTime, SecondsFormat, Utc};

pub use csv::export_readings_to_csv;
pub use report::{DeviceVitals, ReportInput, generate_health_report_pdf};

/// `sensor-data-2026-10-18T09-05-03-120Z.csv` (':' and '.' are unsafe in file names).
pub fn csv_file_name(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(|c: char| c == ':' || c == '.', "-");
    format!("sensor-data-{stamp}.csv")
}

/// `health-metrics-report-2026-10-18_09-05-03.pdf`
pub fn pdf_file_name(now: DateTime<Utc>) -> String {
    format!("health-metrics-report-{}.pdf", now.format("%Y-%m-%d_%H-%M-%S"))
}
