pub mod batch;
pub mod engine;
pub mod report;

pub use crate::domain::model::{RoiInputs, RoiResults, Scenario, ScenarioOutcome};
pub use crate::domain::ports::{ModelProvider, Storage};
pub use crate::utils::error::Result;
