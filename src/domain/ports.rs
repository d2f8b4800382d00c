use crate::core::engine::RoiModel;
use crate::utils::error::Result;

/// Source of the financial model calibration (CLI flags, TOML files).
pub trait ModelProvider {
    fn model(&self) -> Result<RoiModel>;
}

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
