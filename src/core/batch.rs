use crate::config::toml_config::TomlConfig;
use crate::core::engine::RoiEngine;
use crate::core::report::{OutputFormat, RoiReport};
use crate::core::Storage;
use crate::utils::error::Result;

/// Computes every scenario of a TOML config and writes the report files.
pub struct BatchRunner<S: Storage> {
    engine: RoiEngine,
    storage: S,
}

impl<S: Storage> BatchRunner<S> {
    pub fn new(engine: RoiEngine, storage: S) -> Self {
        Self { engine, storage }
    }

    pub fn build_report(&self, config: &TomlConfig) -> Result<RoiReport> {
        let scenarios = config.scenarios();
        tracing::info!("Computing {} scenario(s)", scenarios.len());

        let rows = self.engine.compute_batch(&scenarios)?;
        let mut report = RoiReport::new(config.report.name.clone(), *self.engine.model(), rows);
        if let Some(description) = &config.report.description {
            report = report.with_description(description.clone());
        }
        Ok(report)
    }

    /// Returns the relative file names that were written.
    pub fn write_report(&self, report: &RoiReport, formats: &[OutputFormat]) -> Result<Vec<String>> {
        let stem = file_stem(&report.name);
        let mut written = Vec::with_capacity(formats.len());

        for format in formats {
            let filename = format!("{}.{}", stem, format.extension());
            let content = report.render(*format)?;
            self.storage.write_file(&filename, content.as_bytes())?;
            tracing::info!("Wrote {} report: {}", format, filename);
            written.push(filename);
        }

        Ok(written)
    }

    pub fn run(&self, config: &TomlConfig) -> Result<(RoiReport, Vec<String>)> {
        let report = self.build_report(config)?;
        let formats = config.output_formats()?;
        let written = self.write_report(&report, &formats)?;
        Ok((report, written))
    }
}

/// Lowercase, `-` separated file stem derived from a report name.
fn file_stem(name: &str) -> String {
    let stem = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    if stem.is_empty() {
        "roi-report".to_string()
    } else {
        stem
    }
}
