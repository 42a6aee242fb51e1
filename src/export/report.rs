// Health metrics report: current-metrics table, trend table and rule-based
// recommendations, rendered to PDF. Presentation only; all values arrive pre-computed.

use chrono::{DateTime, Utc};

use super::pdf::{self, TextLine, TextStyle};
use crate::error::PipelineError;
use crate::models::{AverageSensorData, TimeSeriesPoint};
use crate::pipeline::metrics;

pub const HEART_RATE_HIGH_BPM: f64 = 100.0;
pub const HEART_RATE_LOW_BPM: f64 = 50.0;
pub const BODY_TEMPERATURE_HIGH_C: f64 = 37.5;
pub const BODY_TEMPERATURE_LOW_C: f64 = 35.0;
pub const ACTIVITY_LOW_PERCENT: f64 = 30.0;
pub const BATTERY_LOW_PERCENT: f64 = 20.0;

pub const ALL_NORMAL: &str = "All monitored metrics are within normal ranges.";

/// Wearable-side values the sensor table does not carry. Each is optional; missing
/// values are shown as "N/A" and skipped by the recommendation rules.
/// The sensor table's temperature is ambient; body temperature only comes from here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceVitals {
    pub heart_rate: Option<f64>,
    /// °C
    pub body_temperature: Option<f64>,
    /// 0–100
    pub activity: Option<f64>,
    /// 0–100
    pub battery: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub summary: &'a AverageSensorData,
    /// Rendered in the order given, capped at `trend_rows`.
    pub trend: &'a [TimeSeriesPoint],
    pub vitals: DeviceVitals,
    pub reading_count: usize,
    pub generated_at: DateTime<Utc>,
    pub trend_rows: usize,
}

/// Fixed threshold checks on the wearer's vitals. Returns ALL_NORMAL alone when nothing triggers.
pub fn recommendations(vitals: &DeviceVitals) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(hr) = vitals.heart_rate {
        if hr > HEART_RATE_HIGH_BPM {
            out.push(format!(
                "Heart rate is elevated ({hr:.0} bpm). Rest and re-check; consult a doctor if it persists."
            ));
        } else if hr < HEART_RATE_LOW_BPM {
            out.push(format!(
                "Heart rate is low ({hr:.0} bpm). Seek advice if you feel dizzy or tired."
            ));
        }
    }
    if let Some(t) = vitals.body_temperature {
        if t > BODY_TEMPERATURE_HIGH_C {
            out.push(format!(
                "Body temperature is high ({t:.1} °C). Stay hydrated and monitor for fever."
            ));
        } else if t < BODY_TEMPERATURE_LOW_C {
            out.push(format!(
                "Body temperature is low ({t:.1} °C). Keep warm and re-measure."
            ));
        }
    }
    if let Some(activity) = vitals.activity
        && activity < ACTIVITY_LOW_PERCENT
    {
        out.push(format!(
            "Activity level is low ({activity:.0}%). Aim for light exercise such as a short walk."
        ));
    }
    if let Some(battery) = vitals.battery
        && battery < BATTERY_LOW_PERCENT
    {
        out.push(format!(
            "Device battery is low ({battery:.0}%). Charge the device to avoid gaps in monitoring."
        ));
    }
    if out.is_empty() {
        out.push(ALL_NORMAL.to_string());
    }
    out
}

/// Report as a flat list of styled lines (the PDF renderer paginates).
pub fn build_report(input: &ReportInput<'_>) -> Vec<TextLine> {
    let s = input.summary;
    let status = metrics::get_air_quality_status(s.air_quality_percentage);
    let mut lines = vec![
        TextLine::new(TextStyle::Title, "Health Metrics Report"),
        TextLine::new(
            TextStyle::Body,
            format!(
                "Generated {} UTC from {} readings",
                input.generated_at.format("%Y-%m-%d %H:%M:%S"),
                input.reading_count
            ),
        ),
        TextLine::new(TextStyle::Body, ""),
        TextLine::new(TextStyle::Heading, "Current Metrics"),
        table_row("Metric", "Value"),
        table_row("Room temperature", &format!("{:.1} °C", s.temperature)),
        table_row("Humidity", &format!("{:.1} %", s.humidity)),
        table_row("Glucose estimate", &format!("{:.2}", s.glucose_estimate)),
        table_row(
            "Air quality",
            &format!("{:.1} % ({})", s.air_quality_percentage, status.label),
        ),
        table_row("Heart rate", &optional(input.vitals.heart_rate, "bpm")),
        table_row(
            "Body temperature",
            &match input.vitals.body_temperature {
                Some(t) => format!("{t:.1} °C"),
                None => "N/A".to_string(),
            },
        ),
        table_row("Activity", &optional(input.vitals.activity, "%")),
        table_row("Battery", &optional(input.vitals.battery, "%")),
        TextLine::new(TextStyle::Body, ""),
        TextLine::new(TextStyle::Heading, "Trend"),
    ];

    if input.trend.is_empty() {
        lines.push(TextLine::new(TextStyle::Body, "N/A"));
    } else {
        lines.push(TextLine::new(
            TextStyle::Table,
            format!(
                "{:<10}{:>10}{:>10}{:>10}{:>10}",
                "Time", "Temp", "Humidity", "Glucose", "Air %"
            ),
        ));
        for p in input.trend.iter().take(input.trend_rows) {
            lines.push(TextLine::new(
                TextStyle::Table,
                format!(
                    "{:<10}{:>10.1}{:>10.1}{:>10.2}{:>10.1}",
                    p.time, p.temperature, p.humidity, p.glucose, p.air_quality_percentage
                ),
            ));
        }
    }

    lines.push(TextLine::new(TextStyle::Body, ""));
    lines.push(TextLine::new(TextStyle::Heading, "Recommendations"));
    for r in recommendations(&input.vitals) {
        lines.push(TextLine::new(TextStyle::Body, format!("- {r}")));
    }
    lines
}

pub fn generate_health_report_pdf(input: &ReportInput<'_>) -> Result<Vec<u8>, PipelineError> {
    pdf::render(&build_report(input))
}

fn table_row(label: &str, value: &str) -> TextLine {
    TextLine::new(TextStyle::Table, format!("{:<20}{}", label, value))
}

fn optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.0} {unit}"),
        None => "N/A".to_string(),
    }
}
