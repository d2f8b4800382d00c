use crate::utils::error::{RoiError, Result};
use serde::{Deserialize, Serialize};

/// Operating parameters entered into the calculator.
///
/// `downtime_hours` is per month; `defect_rate` is a percentage (5.0 == 5%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    pub production_lines: u32,
    pub downtime_hours: f64,
    pub hourly_cost: f64,
    pub defect_rate: f64,
}

/// Projection derived from [`RoiInputs`]. Currency amounts are annual USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResults {
    pub downtime_savings: f64,
    pub quality_savings: f64,
    pub total_annual_savings: f64,
    pub roi_months: u32,
}

/// A named set of inputs, as used in batch reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub inputs: RoiInputs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub inputs: RoiInputs,
    pub results: RoiResults,
}

/// Slider bounds the calculator UI offers for one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl InputRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &str, value: f64) -> Result<()> {
        if self.contains(value) {
            return Ok(());
        }
        Err(RoiError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", self.min, self.max),
        })
    }
}

pub const PRODUCTION_LINES_RANGE: InputRange = InputRange {
    min: 1.0,
    max: 50.0,
    step: 1.0,
    default: 10.0,
};

pub const DOWNTIME_HOURS_RANGE: InputRange = InputRange {
    min: 0.0,
    max: 500.0,
    step: 5.0,
    default: 40.0,
};

pub const HOURLY_COST_RANGE: InputRange = InputRange {
    min: 0.0,
    max: 50000.0,
    step: 500.0,
    default: 5000.0,
};

pub const DEFECT_RATE_RANGE: InputRange = InputRange {
    min: 0.0,
    max: 20.0,
    step: 0.5,
    default: 5.0,
};

impl RoiInputs {
    pub fn new(production_lines: u32, downtime_hours: f64, hourly_cost: f64, defect_rate: f64) -> Self {
        Self {
            production_lines,
            downtime_hours,
            hourly_cost,
            defect_rate,
        }
    }

    /// Field names paired with their values, in display order.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("productionLines", f64::from(self.production_lines)),
            ("downtimeHours", self.downtime_hours),
            ("hourlyCost", self.hourly_cost),
            ("defectRate", self.defect_rate),
        ]
    }

    /// Checks every field against the calculator's slider bounds.
    ///
    /// The engine itself accepts values outside these bounds.
    pub fn validate_ranges(&self) -> Result<()> {
        let ranges = [
            PRODUCTION_LINES_RANGE,
            DOWNTIME_HOURS_RANGE,
            HOURLY_COST_RANGE,
            DEFECT_RATE_RANGE,
        ];
        for ((field, value), range) in self.fields().into_iter().zip(ranges) {
            range.check(field, value)?;
        }
        Ok(())
    }
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            production_lines: PRODUCTION_LINES_RANGE.default as u32,
            downtime_hours: DOWNTIME_HOURS_RANGE.default,
            hourly_cost: HOURLY_COST_RANGE.default,
            defect_rate: DEFECT_RATE_RANGE.default,
        }
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>, inputs: RoiInputs) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_match_calculator() {
        let inputs = RoiInputs::default();
        assert_eq!(inputs, RoiInputs::new(10, 40.0, 5000.0, 5.0));
        assert!(inputs.validate_ranges().is_ok());
    }

    #[test]
    fn test_validate_ranges_reports_field() {
        let err = RoiInputs::new(0, 40.0, 5000.0, 5.0)
            .validate_ranges()
            .unwrap_err();
        assert!(err.to_string().contains("productionLines"));

        let err = RoiInputs::new(10, 40.0, 5000.0, 25.0)
            .validate_ranges()
            .unwrap_err();
        assert!(err.to_string().contains("defectRate"));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_value(RoiInputs::default()).unwrap();
        assert_eq!(json["productionLines"], 10);
        assert_eq!(json["downtimeHours"], 40.0);

        let results: RoiResults = serde_json::from_str(
            r#"{"downtimeSavings":1.0,"qualitySavings":2.0,"totalAnnualSavings":3.0,"roiMonths":4}"#,
        )
        .unwrap();
        assert_eq!(results.roi_months, 4);
    }
}
