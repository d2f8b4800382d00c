use crate::core::engine::RoiModel;
use crate::domain::model::ScenarioOutcome;
use crate::utils::error::{RoiError, Result};
use crate::utils::format::{format_currency, format_months};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const HEADER: [&str; 9] = [
    "scenario",
    "production_lines",
    "downtime_hours",
    "hourly_cost",
    "defect_rate",
    "downtime_savings",
    "quality_savings",
    "total_annual_savings",
    "roi_months",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const ALL: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(RoiError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: other.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", Self::ALL.join(", ")),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Aggregate view over every row of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub scenarios: usize,
    pub total_annual_savings: f64,
    pub fastest_payback: Option<(String, u32)>,
    pub slowest_payback: Option<(String, u32)>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub model: RoiModel,
    pub rows: Vec<ScenarioOutcome>,
    pub summary: ReportSummary,
}

impl RoiReport {
    pub fn new(name: impl Into<String>, model: RoiModel, rows: Vec<ScenarioOutcome>) -> Self {
        let summary = summarize(&rows);
        Self {
            name: name.into(),
            description: None,
            generated_at: Utc::now(),
            model,
            rows,
            summary,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Csv => self.to_csv(),
            OutputFormat::Tsv => self.to_tsv(),
            OutputFormat::Json => self.to_json(),
        }
    }

    pub fn to_csv(&self) -> Result<String> {
        self.to_delimited(b',')
    }

    pub fn to_tsv(&self) -> Result<String> {
        self.to_delimited(b'\t')
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn to_delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(HEADER)?;
        for row in &self.rows {
            writer.write_record([
                row.scenario.clone(),
                row.inputs.production_lines.to_string(),
                row.inputs.downtime_hours.to_string(),
                row.inputs.hourly_cost.to_string(),
                row.inputs.defect_rate.to_string(),
                row.results.downtime_savings.to_string(),
                row.results.quality_savings.to_string(),
                row.results.total_annual_savings.to_string(),
                row.results.roi_months.to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| RoiError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            RoiError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Human-readable table with currency formatting.
    pub fn to_table(&self) -> String {
        let name_width = self
            .rows
            .iter()
            .map(|row| row.scenario.chars().count())
            .max()
            .unwrap_or(0)
            .max("Scenario".len());

        let mut out = String::new();
        out.push_str(&format!(
            "{:<name_width$}  {:>14}  {:>14}  {:>14}  {:>10}\n",
            "Scenario", "Downtime", "Quality", "Total", "Payback"
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{:<name_width$}  {:>14}  {:>14}  {:>14}  {:>10}\n",
                row.scenario,
                format_currency(row.results.downtime_savings),
                format_currency(row.results.quality_savings),
                format_currency(row.results.total_annual_savings),
                format_months(row.results.roi_months),
            ));
        }
        out.push_str(&format!(
            "{} scenario(s), combined annual savings {}\n",
            self.summary.scenarios,
            format_currency(self.summary.total_annual_savings)
        ));
        out
    }
}

/// Payback extremes ignore rows without savings (roi_months == 0).
fn summarize(rows: &[ScenarioOutcome]) -> ReportSummary {
    let total_annual_savings = rows.iter().map(|r| r.results.total_annual_savings).sum();

    let paying: Vec<&ScenarioOutcome> = rows.iter().filter(|r| r.results.roi_months > 0).collect();
    let fastest_payback = paying
        .iter()
        .min_by_key(|r| r.results.roi_months)
        .map(|r| (r.scenario.clone(), r.results.roi_months));
    let slowest_payback = paying
        .iter()
        .max_by_key(|r| r.results.roi_months)
        .map(|r| (r.scenario.clone(), r.results.roi_months));

    ReportSummary {
        scenarios: rows.len(),
        total_annual_savings,
        fastest_payback,
        slowest_payback,
    }
}
