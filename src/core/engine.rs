//! ROI projection for the savings calculator.
//!
//! ```text
//! downtime_savings     = downtime_hours * downtime_recovery * hourly_cost * months_per_year
//! quality_savings      = lines * hourly_cost * (defect_rate / 100) * quality_recovery * months_per_year
//! total_annual_savings = downtime_savings + quality_savings
//! implementation_cost  = lines * implementation_cost_per_line
//! roi_months           = ceil(implementation_cost / total_annual_savings * months_per_year)
//! ```
//!
//! `roi_months` is 0 when there are no savings and at least 1 otherwise.

use crate::domain::model::{RoiInputs, RoiResults, Scenario, ScenarioOutcome};
use crate::domain::ports::ModelProvider;
use crate::utils::error::{RoiError, Result};
use crate::utils::validation::{validate_input, validate_range, Validate};
use serde::{Deserialize, Serialize};

/// Calibration of the financial model. `Default` is the published calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiModel {
    /// Share of downtime cost recovered by the platform.
    pub downtime_recovery: f64,
    /// Share of defect-driven cost recovered by the platform.
    pub quality_recovery: f64,
    pub months_per_year: f64,
    /// One-time cost per production line, only used for the payback period.
    pub implementation_cost_per_line: f64,
}

impl RoiModel {
    pub const DOWNTIME_RECOVERY: f64 = 0.35;
    pub const QUALITY_RECOVERY: f64 = 0.4;
    pub const MONTHS_PER_YEAR: f64 = 12.0;
    pub const IMPLEMENTATION_COST_PER_LINE: f64 = 50000.0;

    pub fn compute(&self, inputs: &RoiInputs) -> RoiResults {
        let lines = f64::from(inputs.production_lines);

        let downtime_savings =
            inputs.downtime_hours * self.downtime_recovery * inputs.hourly_cost * self.months_per_year;
        let quality_savings = lines
            * inputs.hourly_cost
            * (inputs.defect_rate / 100.0)
            * self.quality_recovery
            * self.months_per_year;
        let total_annual_savings = downtime_savings + quality_savings;

        let implementation_cost = lines * self.implementation_cost_per_line;
        let roi_months =
            payback_months(implementation_cost, total_annual_savings, self.months_per_year);

        RoiResults {
            downtime_savings,
            quality_savings,
            total_annual_savings,
            roi_months,
        }
    }
}

impl Default for RoiModel {
    fn default() -> Self {
        Self {
            downtime_recovery: Self::DOWNTIME_RECOVERY,
            quality_recovery: Self::QUALITY_RECOVERY,
            months_per_year: Self::MONTHS_PER_YEAR,
            implementation_cost_per_line: Self::IMPLEMENTATION_COST_PER_LINE,
        }
    }
}

impl Validate for RoiModel {
    fn validate(&self) -> Result<()> {
        validate_range("model.downtime_recovery", self.downtime_recovery, 0.0, 1.0)?;
        validate_range("model.quality_recovery", self.quality_recovery, 0.0, 1.0)?;

        if !self.months_per_year.is_finite() || self.months_per_year <= 0.0 {
            return Err(RoiError::InvalidConfigValueError {
                field: "model.months_per_year".to_string(),
                value: self.months_per_year.to_string(),
                reason: "Value must be a positive number".to_string(),
            });
        }

        if !self.implementation_cost_per_line.is_finite() || self.implementation_cost_per_line < 0.0 {
            return Err(RoiError::InvalidConfigValueError {
                field: "model.implementation_cost_per_line".to_string(),
                value: self.implementation_cost_per_line.to_string(),
                reason: "Value must be a finite, non-negative amount".to_string(),
            });
        }

        Ok(())
    }
}

fn payback_months(implementation_cost: f64, total_annual_savings: f64, months_per_year: f64) -> u32 {
    if total_annual_savings.is_nan() || total_annual_savings <= 0.0 {
        return 0;
    }
    let months = ((implementation_cost / total_annual_savings) * months_per_year).ceil();
    // float-to-int casts saturate
    (months as u32).max(1)
}

/// Projection with the default model.
pub fn compute_roi(inputs: &RoiInputs) -> RoiResults {
    RoiModel::default().compute(inputs)
}

#[derive(Debug, Clone, Default)]
pub struct RoiEngine {
    model: RoiModel,
}

impl RoiEngine {
    pub fn new(model: RoiModel) -> Self {
        Self { model }
    }

    /// Builds an engine from a provider, rejecting an invalid calibration.
    pub fn from_provider<P: ModelProvider>(provider: &P) -> Result<Self> {
        let model = provider.model()?;
        model.validate()?;
        tracing::debug!("Using ROI model: {:?}", model);
        Ok(Self::new(model))
    }

    pub fn model(&self) -> &RoiModel {
        &self.model
    }

    /// Unchecked projection. Never fails; negative or non-finite inputs flow
    /// through the arithmetic as-is.
    pub fn compute(&self, inputs: &RoiInputs) -> RoiResults {
        self.model.compute(inputs)
    }

    /// Rejects non-finite or negative inputs, then computes.
    pub fn compute_checked(&self, inputs: &RoiInputs) -> Result<RoiResults> {
        for (field, value) in inputs.fields() {
            validate_input(field, value)?;
        }

        let results = self.compute(inputs);
        tracing::debug!(
            "ROI computed: lines={}, downtime={}h, cost={}, defects={}% -> total={}, payback={} months",
            inputs.production_lines,
            inputs.downtime_hours,
            inputs.hourly_cost,
            inputs.defect_rate,
            results.total_annual_savings,
            results.roi_months
        );
        Ok(results)
    }

    /// Checked projection of every scenario; stops at the first invalid one.
    pub fn compute_batch(&self, scenarios: &[Scenario]) -> Result<Vec<ScenarioOutcome>> {
        scenarios
            .iter()
            .map(|scenario| -> Result<ScenarioOutcome> {
                let results = self.compute_checked(&scenario.inputs).map_err(|e| match e {
                    RoiError::InvalidInput {
                        field,
                        value,
                        reason,
                    } => RoiError::InvalidInput {
                        field: format!("{}.{}", scenario.name, field),
                        value,
                        reason,
                    },
                    other => other,
                })?;
                Ok(ScenarioOutcome {
                    scenario: scenario.name.clone(),
                    inputs: scenario.inputs,
                    results,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_reference_scenario() {
        let results = compute_roi(&RoiInputs::new(10, 40.0, 5000.0, 5.0));

        assert_close(results.downtime_savings, 840000.0);
        assert_close(results.quality_savings, 12000.0);
        assert_close(results.total_annual_savings, 852000.0);
        // 500_000 / 852_000 * 12 = 7.04
        assert_eq!(results.roi_months, 8);
    }

    #[test]
    fn test_zero_inputs() {
        for lines in [0, 1] {
            let results = compute_roi(&RoiInputs::new(lines, 0.0, 0.0, 0.0));
            assert_eq!(results.downtime_savings, 0.0);
            assert_eq!(results.quality_savings, 0.0);
            assert_eq!(results.total_annual_savings, 0.0);
            assert_eq!(results.roi_months, 0);
        }
    }

    #[test]
    fn test_total_is_exact_sum() {
        let cases = [
            RoiInputs::new(3, 17.5, 1234.56, 3.3),
            RoiInputs::new(50, 500.0, 50000.0, 20.0),
            RoiInputs::new(1, 0.1, 0.7, 0.01),
        ];
        for inputs in cases {
            let r = compute_roi(&inputs);
            assert_eq!(r.total_annual_savings, r.downtime_savings + r.quality_savings);
        }
    }

    #[test]
    fn test_deterministic_bits() {
        let inputs = RoiInputs::new(7, 33.3, 4321.0, 2.5);
        let a = compute_roi(&inputs);
        let b = compute_roi(&inputs);
        assert_eq!(a.downtime_savings.to_bits(), b.downtime_savings.to_bits());
        assert_eq!(a.quality_savings.to_bits(), b.quality_savings.to_bits());
        assert_eq!(a.total_annual_savings.to_bits(), b.total_annual_savings.to_bits());
        assert_eq!(a.roi_months, b.roi_months);
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let base = RoiInputs::new(5, 20.0, 1000.0, 2.0);
        let base_total = compute_roi(&base).total_annual_savings;

        let bumped = [
            RoiInputs { production_lines: 6, ..base },
            RoiInputs { downtime_hours: 25.0, ..base },
            RoiInputs { hourly_cost: 1500.0, ..base },
            RoiInputs { defect_rate: 2.5, ..base },
        ];
        for inputs in bumped {
            assert!(compute_roi(&inputs).total_annual_savings >= base_total);
        }
    }

    #[test]
    fn test_payback_zero_only_without_savings() {
        let no_savings = compute_roi(&RoiInputs::new(10, 40.0, 0.0, 5.0));
        assert_eq!(no_savings.total_annual_savings, 0.0);
        assert_eq!(no_savings.roi_months, 0);

        // no lines means no implementation cost, but savings still exist
        let no_lines = compute_roi(&RoiInputs::new(0, 40.0, 5000.0, 5.0));
        assert!(no_lines.total_annual_savings > 0.0);
        assert_eq!(no_lines.roi_months, 1);
    }

    #[test]
    fn test_payback_rounds_up() {
        // 50000 / (100 * 0.35 * 1000 * 12) * 12 = 1.428...
        let results = compute_roi(&RoiInputs::new(1, 100.0, 1000.0, 0.0));
        assert_eq!(results.roi_months, 2);
    }

    #[test]
    fn test_tiny_savings_saturate() {
        let results = compute_roi(&RoiInputs::new(50, 0.0, 1e-300, 1e-10));
        assert!(results.total_annual_savings > 0.0);
        assert_eq!(results.roi_months, u32::MAX);
    }

    #[test]
    fn test_custom_model() {
        let model = RoiModel {
            downtime_recovery: 0.5,
            implementation_cost_per_line: 100000.0,
            ..RoiModel::default()
        };
        let results = RoiEngine::new(model).compute(&RoiInputs::new(10, 40.0, 5000.0, 5.0));

        assert_close(results.downtime_savings, 1200000.0);
        assert_close(results.quality_savings, 12000.0);
        // 1_000_000 / 1_212_000 * 12 = 9.9
        assert_eq!(results.roi_months, 10);
    }

    #[test]
    fn test_model_validation() {
        assert!(RoiModel::default().validate().is_ok());

        let bad_fraction = RoiModel {
            quality_recovery: 1.5,
            ..RoiModel::default()
        };
        assert!(bad_fraction.validate().is_err());

        let bad_months = RoiModel {
            months_per_year: 0.0,
            ..RoiModel::default()
        };
        assert!(bad_months.validate().is_err());

        let bad_cost = RoiModel {
            implementation_cost_per_line: f64::NAN,
            ..RoiModel::default()
        };
        assert!(bad_cost.validate().is_err());
    }

    #[test]
    fn test_checked_rejects_bad_inputs() {
        let engine = RoiEngine::default();

        let err = engine
            .compute_checked(&RoiInputs::new(10, -1.0, 5000.0, 5.0))
            .unwrap_err();
        assert!(matches!(err, RoiError::InvalidInput { ref field, .. } if field == "downtimeHours"));

        assert!(engine
            .compute_checked(&RoiInputs::new(10, 40.0, f64::NAN, 5.0))
            .is_err());
        assert!(engine
            .compute_checked(&RoiInputs::new(10, 40.0, 5000.0, f64::INFINITY))
            .is_err());
        assert!(engine.compute_checked(&RoiInputs::default()).is_ok());
    }

    #[test]
    fn test_unchecked_accepts_negative() {
        let results = RoiEngine::default().compute(&RoiInputs::new(10, -40.0, 5000.0, 5.0));
        assert!(results.total_annual_savings < 0.0);
        assert_eq!(results.roi_months, 0);
    }

    #[test]
    fn test_batch_names_failing_scenario() {
        let engine = RoiEngine::default();
        let scenarios = vec![
            Scenario::new("baseline", RoiInputs::default()),
            Scenario::new("broken", RoiInputs::new(2, 10.0, -5.0, 1.0)),
        ];

        let err = engine.compute_batch(&scenarios).unwrap_err();
        assert!(err.to_string().contains("broken.hourlyCost"));

        let outcomes = engine.compute_batch(&scenarios[..1]).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].scenario, "baseline");
        assert_eq!(outcomes[0].results.roi_months, 8);
    }
}
