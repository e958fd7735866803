use std::path::PathBuf;

use cdq_core::PipelineRun;
use cdq_report::OutputPaths;
use cdq_validate::{PiiReport, QualityProfile};

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub run: PipelineRun,
    /// `None` for a dry run.
    pub outputs: Option<OutputPaths>,
}

impl RunResult {
    pub fn has_warnings(&self) -> bool {
        self.run.has_critical_failures()
    }
}

#[derive(Debug)]
pub struct ProfileResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub profile: QualityProfile,
    pub pii: PiiReport,
    pub reports: Vec<PathBuf>,
}
