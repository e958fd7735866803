//! Stage timeline for the execution report.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::span::EnteredSpan;
use tracing::{info, info_span, warn};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Load,
    Profile,
    Normalize,
    ValidatePre,
    FillMissing,
    ValidatePost,
    DetectPii,
    Mask,
    Save,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Load => "Load",
            Self::Profile => "Profile",
            Self::Normalize => "Normalize",
            Self::ValidatePre => "Validate (pre-clean)",
            Self::FillMissing => "Fill missing",
            Self::ValidatePost => "Validate (post-clean)",
            Self::DetectPii => "Detect PII",
            Self::Mask => "Mask",
            Self::Save => "Save",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEvent {
    pub message: String,
    pub ok: bool,
}

/// Everything that happened inside one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub stage: Stage,
    pub events: Vec<StageEvent>,
    pub duration: Duration,
}

impl StageRecord {
    pub fn ok(&self) -> bool {
        self.events.iter().all(|e| e.ok)
    }
}

/// Collects events for a running stage inside its tracing span.
///
/// Every event is also logged: `info!` when ok, `warn!` otherwise.
pub struct StageRecorder {
    stage: Stage,
    events: Vec<StageEvent>,
    start: Instant,
    span: EnteredSpan,
}

impl StageRecorder {
    pub fn begin(stage: Stage) -> Self {
        let span = info_span!("stage", name = stage.label()).entered();
        info!("stage started");
        Self {
            stage,
            events: Vec::new(),
            start: Instant::now(),
            span,
        }
    }

    pub fn ok(&mut self, message: impl Into<String>) {
        self.event(message.into(), true);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.event(message.into(), false);
    }

    pub fn event(&mut self, message: String, ok: bool) {
        if ok {
            info!("{message}");
        } else {
            warn!("{message}");
        }
        self.events.push(StageEvent { message, ok });
    }

    pub fn finish(self) -> StageRecord {
        let duration = self.start.elapsed();
        info!(
            events = self.events.len(),
            duration_ms = duration.as_millis(),
            "stage complete"
        );
        drop(self.span);
        StageRecord {
            stage: self.stage,
            events: self.events,
            duration,
        }
    }
}

/// Ordered stage records for one run.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub started_at: DateTime<Local>,
    started: Instant,
    stages: Vec<StageRecord>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::start()
    }
}

impl Timeline {
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            started: Instant::now(),
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, record: StageRecord) {
        self.stages.push(record);
    }

    pub fn stages(&self) -> &[StageRecord] {
        &self.stages
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageRecord> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    /// Wall-clock time since the timeline started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn failed_events(&self) -> usize {
        self.stages
            .iter()
            .flat_map(|r| &r.events)
            .filter(|e| !e.ok)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_collects_events_in_order() {
        let mut recorder = StageRecorder::begin(Stage::Normalize);
        recorder.ok("first");
        recorder.fail("second");
        let record = recorder.finish();
        assert_eq!(record.stage, Stage::Normalize);
        assert_eq!(record.events.len(), 2);
        assert!(!record.ok());

        let mut timeline = Timeline::start();
        timeline.push(record);
        assert_eq!(timeline.failed_events(), 1);
        assert!(timeline.stage(Stage::Normalize).is_some());
        assert!(timeline.stage(Stage::Mask).is_none());
    }
}
