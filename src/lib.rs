pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    batch::BatchRunner,
    engine::{compute_roi, RoiEngine, RoiModel},
    report::{OutputFormat, RoiReport},
};
pub use crate::domain::model::{RoiInputs, RoiResults, Scenario, ScenarioOutcome};
pub use crate::utils::error::{Result, RoiError};
pub use crate::utils::format::format_currency;
