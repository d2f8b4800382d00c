use crate::core::engine::RoiModel;
use crate::core::report::OutputFormat;
use crate::domain::model::{RoiInputs, Scenario};
use crate::domain::ports::ModelProvider;
use crate::utils::error::{RoiError, Result};
use crate::utils::validation::{
    validate_input, validate_non_empty_string, validate_path, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Batch scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub model: Option<ModelConfig>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// Partial overrides of the default model; omitted fields keep their default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub downtime_recovery: Option<f64>,
    pub quality_recovery: Option<f64>,
    pub months_per_year: Option<f64>,
    pub implementation_cost_per_line: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub name: String,
    pub production_lines: u32,
    pub downtime_hours: f64,
    pub hourly_cost: f64,
    pub defect_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    pub strict: Option<bool>,
}

fn default_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default)]
    model: ModelConfig,
}

impl ModelConfig {
    pub fn apply(&self, base: RoiModel) -> RoiModel {
        RoiModel {
            downtime_recovery: self.downtime_recovery.unwrap_or(base.downtime_recovery),
            quality_recovery: self.quality_recovery.unwrap_or(base.quality_recovery),
            months_per_year: self.months_per_year.unwrap_or(base.months_per_year),
            implementation_cost_per_line: self
                .implementation_cost_per_line
                .unwrap_or(base.implementation_cost_per_line),
        }
    }

    /// Reads the `[model]` table of a TOML file; other tables are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let processed = substitute_env_vars(&content)?;
        let file: ModelFile = toml::from_str(&processed)?;
        Ok(file.model)
    }
}

impl ScenarioConfig {
    pub fn inputs(&self) -> RoiInputs {
        RoiInputs::new(
            self.production_lines,
            self.downtime_hours,
            self.hourly_cost,
            self.defect_rate,
        )
    }

    pub fn to_scenario(&self) -> Scenario {
        Scenario::new(self.name.clone(), self.inputs())
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RoiError::ConfigValidationError {
        field: "env_substitution".to_string(),
        message: e.to_string(),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RoiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn roi_model(&self) -> RoiModel {
        self.model
            .as_ref()
            .map(|m| m.apply(RoiModel::default()))
            .unwrap_or_default()
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        self.scenarios.iter().map(ScenarioConfig::to_scenario).collect()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }

    pub fn output_formats(&self) -> Result<Vec<OutputFormat>> {
        match &self.output {
            Some(output) => output.formats.iter().map(|f| f.parse()).collect(),
            None => Ok(vec![OutputFormat::Csv]),
        }
    }

    /// Strict mode also holds scenarios to the calculator's slider bounds.
    pub fn is_strict(&self) -> bool {
        self.output.as_ref().and_then(|o| o.strict).unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("report.name", &self.report.name)?;

        self.roi_model().validate()?;

        if self.scenarios.is_empty() {
            return Err(RoiError::ConfigValidationError {
                field: "scenarios".to_string(),
                message: "At least one [[scenarios]] entry is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            validate_non_empty_string("scenarios.name", &scenario.name)?;
            if !seen.insert(scenario.name.as_str()) {
                return Err(RoiError::InvalidConfigValueError {
                    field: "scenarios.name".to_string(),
                    value: scenario.name.clone(),
                    reason: "Scenario names must be unique".to_string(),
                });
            }

            let inputs = scenario.inputs();
            for (field, value) in inputs.fields() {
                validate_input(&format!("{}.{}", scenario.name, field), value)?;
            }
            if self.is_strict() {
                inputs.validate_ranges()?;
            }
        }

        let output = validate_required_field("output", &self.output)?;
        validate_path("output.path", &output.path)?;
        if output.formats.is_empty() {
            return Err(RoiError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: "[]".to_string(),
                reason: format!(
                    "At least one format is required. Valid formats: {}",
                    OutputFormat::ALL.join(", ")
                ),
            });
        }
        self.output_formats()?;

        Ok(())
    }
}

impl ModelProvider for TomlConfig {
    fn model(&self) -> Result<RoiModel> {
        Ok(self.roi_model())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[report]
name = "plant-review"
description = "Quarterly review"

[[scenarios]]
name = "baseline"
production_lines = 10
downtime_hours = 40
hourly_cost = 5000
defect_rate = 5

[[scenarios]]
name = "expansion"
production_lines = 25
downtime_hours = 120
hourly_cost = 8000
defect_rate = 3.5

[output]
path = "./reports"
formats = ["csv", "json"]
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.report.name, "plant-review");
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.scenarios[1].defect_rate, 3.5);
        assert_eq!(config.roi_model(), RoiModel::default());
        assert_eq!(
            config.output_formats().unwrap(),
            vec![OutputFormat::Csv, OutputFormat::Json]
        );
        assert!(!config.is_strict());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_model_overrides() {
        let content = format!(
            "{}\n[model]\ndowntime_recovery = 0.5\nimplementation_cost_per_line = 75000\n",
            BASIC
        );
        let config = TomlConfig::from_toml_str(&content).unwrap();
        let model = config.model().unwrap();

        assert_eq!(model.downtime_recovery, 0.5);
        assert_eq!(model.quality_recovery, RoiModel::QUALITY_RECOVERY);
        assert_eq!(model.implementation_cost_per_line, 75000.0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROI_TEST_OUTPUT_DIR", "/tmp/roi-reports");

        let content = BASIC.replace("./reports", "${ROI_TEST_OUTPUT_DIR}");
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.output_path(), Some("/tmp/roi-reports"));

        std::env::remove_var("ROI_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_unknown_env_var_left_verbatim() {
        let content = BASIC.replace("./reports", "${ROI_TEST_SURELY_UNSET_VAR}");
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.output_path(), Some("${ROI_TEST_SURELY_UNSET_VAR}"));
    }

    #[test]
    fn test_config_validation() {
        let negative = BASIC.replace("hourly_cost = 8000", "hourly_cost = -8000");
        let err = TomlConfig::from_toml_str(&negative)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("expansion.hourlyCost"));

        let duplicate = BASIC.replace("name = \"expansion\"", "name = \"baseline\"");
        assert!(TomlConfig::from_toml_str(&duplicate)
            .unwrap()
            .validate()
            .is_err());

        let bad_format = BASIC.replace("\"json\"", "\"xml\"");
        assert!(TomlConfig::from_toml_str(&bad_format)
            .unwrap()
            .validate()
            .is_err());

        let bad_model = format!("{}\n[model]\nquality_recovery = 2.0\n", BASIC);
        assert!(TomlConfig::from_toml_str(&bad_model)
            .unwrap()
            .validate()
            .is_err());
    }

    #[test]
    fn test_missing_sections() {
        let no_output = BASIC.split("[output]").next().unwrap().to_string();
        let err = TomlConfig::from_toml_str(&no_output)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, RoiError::MissingConfigError { .. }));

        let no_scenarios = "[report]\nname = \"empty\"\n\n[output]\npath = \"./out\"\n";
        assert!(TomlConfig::from_toml_str(no_scenarios)
            .unwrap()
            .validate()
            .is_err());

        assert!(TomlConfig::from_toml_str("[report]\n").is_err());
    }

    #[test]
    fn test_strict_mode_enforces_slider_bounds() {
        let content = BASIC
            .replace("production_lines = 25", "production_lines = 80")
            .replace("formats = [\"csv\", \"json\"]", "formats = [\"csv\"]\nstrict = true");
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert!(config.is_strict());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_misspelled_keys_are_rejected() {
        let model_typo = format!("{}\n[model]\ndowntime_recovry = 0.5\n", BASIC);
        let err = TomlConfig::from_toml_str(&model_typo).unwrap_err();
        assert!(err.to_string().contains("downtime_recovry"));

        let scenario_typo = BASIC.replace("defect_rate = 3.5", "defect_rate = 3.5\ndefects = 2");
        assert!(TomlConfig::from_toml_str(&scenario_typo).is_err());
    }

    #[test]
    fn test_model_file_rejects_misspelled_keys() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[model]\nquality_recovry = 0.25\n")
            .unwrap();

        assert!(ModelConfig::from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.report.name, "plant-review");
    }

    #[test]
    fn test_model_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[model]\nmonths_per_year = 12\nquality_recovery = 0.25\n")
            .unwrap();

        let overrides = ModelConfig::from_file(temp_file.path()).unwrap();
        let model = overrides.apply(RoiModel::default());
        assert_eq!(model.quality_recovery, 0.25);
        assert_eq!(model.downtime_recovery, RoiModel::DOWNTIME_RECOVERY);
    }
}
