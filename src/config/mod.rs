pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::config::toml_config::ModelConfig;
    use crate::core::engine::RoiModel;
    use crate::domain::model::{
        RoiInputs, DEFECT_RATE_RANGE, DOWNTIME_HOURS_RANGE, HOURLY_COST_RANGE,
        PRODUCTION_LINES_RANGE,
    };
    use crate::domain::ports::ModelProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_input, validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "roi-engine")]
    #[command(about = "Projects annual savings and payback period for an industrial AI rollout")]
    pub struct CliConfig {
        /// Number of production lines
        #[arg(long, default_value_t = PRODUCTION_LINES_RANGE.default as u32)]
        pub production_lines: u32,

        /// Unplanned downtime per month, in hours
        #[arg(long, default_value_t = DOWNTIME_HOURS_RANGE.default, allow_negative_numbers = true)]
        pub downtime_hours: f64,

        /// Cost of one hour of downtime on one line (USD)
        #[arg(long, default_value_t = HOURLY_COST_RANGE.default, allow_negative_numbers = true)]
        pub hourly_cost: f64,

        /// Defect rate in percent
        #[arg(long, default_value_t = DEFECT_RATE_RANGE.default, allow_negative_numbers = true)]
        pub defect_rate: f64,

        /// TOML file with a [model] table overriding the default calibration
        #[arg(long)]
        pub model: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        pub json: bool,

        /// Reject inputs outside the calculator's slider bounds
        #[arg(long)]
        pub strict: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn inputs(&self) -> RoiInputs {
            RoiInputs::new(
                self.production_lines,
                self.downtime_hours,
                self.hourly_cost,
                self.defect_rate,
            )
        }
    }

    impl ModelProvider for CliConfig {
        fn model(&self) -> Result<RoiModel> {
            match &self.model {
                Some(path) => Ok(ModelConfig::from_file(path)?.apply(RoiModel::default())),
                None => Ok(RoiModel::default()),
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(path) = &self.model {
                validate_path("model", path)?;
            }

            let inputs = self.inputs();
            for (field, value) in inputs.fields() {
                validate_input(field, value)?;
            }
            if self.strict {
                inputs.validate_ranges()?;
            }
            Ok(())
        }
    }

}
