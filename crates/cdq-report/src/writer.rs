//! Writing run outputs to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cdq_core::{PipelineRun, Stage, StageRecorder};
use cdq_ingest::write_customer_table;
use cdq_model::ActionLogEntry;
use cdq_validate::{PiiReport, QualityProfile};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::cleaning::render_cleaning_log;
use crate::execution::render_execution_report;
use crate::masking::render_masked_sample;
use crate::pii::render_pii_report;
use crate::quality::render_quality_report;
use crate::validation::render_validation_results;

pub const CLEANED_TABLE_FILE: &str = "customers_cleaned.csv";
pub const MASKED_TABLE_FILE: &str = "customers_masked.csv";
pub const QUALITY_REPORT_FILE: &str = "data_quality_report.txt";
pub const PII_REPORT_FILE: &str = "pii_detection_report.txt";
pub const VALIDATION_RESULTS_FILE: &str = "validation_results.txt";
pub const CLEANING_LOG_FILE: &str = "cleaning_log.txt";
pub const MASKED_SAMPLE_FILE: &str = "masked_sample.txt";
pub const EXECUTION_REPORT_FILE: &str = "pipeline_execution_report.txt";
pub const ACTION_LOG_FILE: &str = "action_log.json";

const ACTION_LOG_SCHEMA: &str = "cdq.action_log";
const ACTION_LOG_SCHEMA_VERSION: u32 = 1;

/// Paths of everything [`write_outputs`] produced.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub output_dir: PathBuf,
    pub cleaned: PathBuf,
    pub masked: PathBuf,
    /// Text reports in the order they were written.
    pub reports: Vec<PathBuf>,
    pub action_log: PathBuf,
}

#[derive(Serialize)]
struct ActionLogPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    as_of: String,
    rows: usize,
    entries: &'a [ActionLogEntry],
}

/// Writes both tables, all six reports, and the action log JSON.
pub fn write_outputs(run: &PipelineRun, output_dir: &Path) -> Result<OutputPaths> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let mut stage = StageRecorder::begin(Stage::Save);

    let cleaned = output_dir.join(CLEANED_TABLE_FILE);
    write_customer_table(&cleaned, &run.cleaned)
        .with_context(|| format!("write {}", cleaned.display()))?;
    stage.ok(format!("Saved {CLEANED_TABLE_FILE}"));

    let masked = output_dir.join(MASKED_TABLE_FILE);
    write_customer_table(&masked, &run.masked)
        .with_context(|| format!("write {}", masked.display()))?;
    stage.ok(format!("Saved {MASKED_TABLE_FILE}"));

    let validation = run.pre_validation.as_ref().unwrap_or(&run.post_validation);
    let rendered = [
        (QUALITY_REPORT_FILE, render_quality_report(&run.profile)),
        (PII_REPORT_FILE, render_pii_report(&run.pii)),
        (
            VALIDATION_RESULTS_FILE,
            render_validation_results(validation, &run.registry),
        ),
        (CLEANING_LOG_FILE, render_cleaning_log(run)),
        (MASKED_SAMPLE_FILE, render_masked_sample(run)),
    ];
    let mut reports = Vec::with_capacity(rendered.len() + 1);
    for (name, lines) in &rendered {
        reports.push(write_report(output_dir, name, lines)?);
        stage.ok(format!("Saved {name}"));
    }

    let action_log = output_dir.join(ACTION_LOG_FILE);
    write_action_log_json(&action_log, run)?;
    stage.ok(format!("Saved {ACTION_LOG_FILE} ({} entries)", run.log.len()));

    let save = stage.finish();
    let mut files = vec![CLEANED_TABLE_FILE.to_string(), MASKED_TABLE_FILE.to_string()];
    files.extend(rendered.iter().map(|(name, _)| (*name).to_string()));
    files.push(ACTION_LOG_FILE.to_string());
    files.push(EXECUTION_REPORT_FILE.to_string());
    let execution = render_execution_report(
        run,
        std::slice::from_ref(&save),
        run.timeline.elapsed(),
        &files,
    );
    reports.push(write_report(output_dir, EXECUTION_REPORT_FILE, &execution)?);

    info!(
        output_dir = %output_dir.display(),
        files = files.len(),
        "outputs written"
    );
    Ok(OutputPaths {
        output_dir: output_dir.to_path_buf(),
        cleaned,
        masked,
        reports,
        action_log,
    })
}

/// Writes the quality profile and PII reports only.
pub fn write_profile_reports(
    profile: &QualityProfile,
    pii: &PiiReport,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let quality = write_report(output_dir, QUALITY_REPORT_FILE, &render_quality_report(profile))?;
    let pii = write_report(output_dir, PII_REPORT_FILE, &render_pii_report(pii))?;
    Ok(vec![quality, pii])
}

/// Writes the full action log, masking included, as JSON.
pub fn write_action_log_json(path: &Path, run: &PipelineRun) -> Result<()> {
    let payload = ActionLogPayload {
        schema: ACTION_LOG_SCHEMA,
        schema_version: ACTION_LOG_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        as_of: run.options.as_of.to_string(),
        rows: run.total_rows(),
        entries: run.log.entries(),
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize action log")?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn write_report(output_dir: &Path, name: &str, lines: &[String]) -> Result<PathBuf> {
    let path = output_dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
