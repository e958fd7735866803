use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info, info_span, trace};

use cdq_core::{PipelineOptions, PipelineRun, parse_as_of, run_file};
use cdq_ingest::read_customer_table;
use cdq_model::{MissingPolicy, RuleRegistry};
use cdq_report::{write_outputs, write_profile_reports};
use cdq_validate::{detect_pii, profile_dataset};

use crate::cli::{ProfileArgs, RunArgs};
use crate::logging::redact_value;
use crate::summary::{apply_table_style, dim_cell, header_cell};
use crate::types::{ProfileResult, RunResult};

/// `<INPUT parent>/outputs`, or `./outputs` for a bare file name.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("outputs")
}

fn resolve_as_of(value: Option<&str>) -> Result<PipelineOptions> {
    let mut options = PipelineOptions::default();
    if let Some(value) = value {
        options.as_of = parse_as_of(value)?;
    }
    Ok(options)
}

pub fn run_customers(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", input = %args.input.display());
    let _guard = span.enter();
    let options = resolve_as_of(args.as_of.as_deref())?
        .with_pre_validation(!args.skip_pre_validation)
        .with_mask_sample_rows(args.sample_rows);

    let run = run_file(&args.input, &options)?;
    trace_changes(&run);

    let outputs = if args.dry_run {
        info!("dry run: no files written");
        None
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.input));
        Some(write_outputs(&run, &output_dir)?)
    };

    Ok(RunResult {
        input: args.input.clone(),
        run,
        outputs,
    })
}

/// One trace event per logged cell change, values redacted unless allowed.
fn trace_changes(run: &PipelineRun) {
    for entry in run.log.entries() {
        trace!(
            category = %entry.category,
            field = %entry.field,
            row = entry.row,
            before = redact_value(&entry.before),
            after = redact_value(&entry.after),
            "cell changed"
        );
    }
}

pub fn run_profile(args: &ProfileArgs) -> Result<ProfileResult> {
    let span = info_span!("profile", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let options = resolve_as_of(args.as_of.as_deref())?;

    let dataset = read_customer_table(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let profile = profile_dataset(&dataset, options.as_of);
    let pii = detect_pii(&dataset, &RuleRegistry::standard());

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    let reports = write_profile_reports(&profile, &pii, &output_dir)?;
    info!(
        rows = dataset.len(),
        issues = profile.issues.len(),
        duration_ms = start.elapsed().as_millis(),
        "profile complete"
    );

    Ok(ProfileResult {
        input: args.input.clone(),
        output_dir,
        profile,
        pii,
        reports,
    })
}

/// The rule registry as a table, one row per column.
pub fn rules_table(registry: &RuleRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Normalizer"),
        header_cell("Validation"),
        header_cell("Missing"),
        header_cell("Mask"),
        header_cell("PII risk"),
    ]);
    apply_table_style(&mut table);
    for rule in registry.iter() {
        let missing = match rule.missing {
            MissingPolicy::Fill { value, .. } => Cell::new(format!("fill '{value}'")),
            MissingPolicy::Leave => dim_cell("leave empty"),
        };
        let risk = match rule.pii {
            Some(class) => Cell::new(format!("{} ({})", class.risk.label(), class.category)),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(rule.field.column_name()),
            Cell::new(rule.normalizer.display_name()),
            Cell::new(rule.validator.description()),
            missing,
            Cell::new(rule.mask.description()),
            risk,
        ]);
    }
    table
}

pub fn run_rules() {
    println!("{}", rules_table(&RuleRegistry::standard()));
}
