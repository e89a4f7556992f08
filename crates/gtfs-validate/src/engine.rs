//! Validator execution.
//!
//! The engine runs every selected validator against a loaded feed. Each
//! validator writes into its own [`NoticeContainer`]; the containers are
//! merged into the caller's container in registration order once all
//! validators have finished, so parallel and sequential runs produce the
//! same notice list.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use gtfs_ingest::{FeedInput, GtfsFeedContainer, GtfsFeedLoader, TableStatus};
use gtfs_model::{Notice, NoticeContainer, ValidationConfig};
use rayon::prelude::*;

use crate::validator::{ValidatorRegistration, ValidatorRegistry, default_registry};

/// Counters of a single engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Validators that were executed, including the failed ones.
    pub validators_run: usize,
    /// Validators that were disabled or whose tables had invalid headers.
    pub validators_skipped: usize,
    /// Validators that returned an error or panicked.
    pub validators_failed: usize,
}

/// Notices and counters of a full load-and-validate run.
#[derive(Debug)]
pub struct ValidationReport {
    pub notices: NoticeContainer,
    pub summary: ValidationSummary,
}

/// Runs a registry of validators against loaded feeds.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    registry: ValidatorRegistry,
    config: ValidationConfig,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

struct Outcome {
    notices: NoticeContainer,
    failed: bool,
}

impl ValidationEngine {
    /// Engine with every built-in validator.
    pub fn new(config: ValidationConfig) -> Self {
        Self::with_registry(default_registry().clone(), config)
    }

    pub fn with_registry(registry: ValidatorRegistry, config: ValidationConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run all selected validators and append their notices to `notices`.
    ///
    /// Never fails: validator errors and panics are reported as
    /// `runtime_exception_in_validator` notices.
    pub fn run(&self, feed: &GtfsFeedContainer, notices: &NoticeContainer) -> ValidationSummary {
        let _span = tracing::info_span!("validate_feed").entered();
        let start = Instant::now();

        let selected: Vec<&ValidatorRegistration> = self
            .registry
            .iter()
            .filter(|registration| self.should_run(registration, feed))
            .collect();
        let validators_skipped = self.registry.len() - selected.len();

        let outcomes: Vec<Outcome> = if self.config.parallel {
            selected
                .par_iter()
                .map(|registration| run_validator(registration, feed))
                .collect()
        } else {
            selected
                .iter()
                .map(|registration| run_validator(registration, feed))
                .collect()
        };

        let mut summary = ValidationSummary {
            validators_run: outcomes.len(),
            validators_skipped,
            validators_failed: 0,
        };
        for outcome in outcomes {
            if outcome.failed {
                summary.validators_failed += 1;
            }
            notices.merge(outcome.notices);
        }

        tracing::info!(
            validators_run = summary.validators_run,
            validators_skipped = summary.validators_skipped,
            validators_failed = summary.validators_failed,
            notices = notices.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Validated feed"
        );
        summary
    }

    /// Load `input` with the configured loader options and validate it.
    pub fn validate(&self, input: &FeedInput) -> ValidationReport {
        let notices = NoticeContainer::new();
        let feed = GtfsFeedLoader::new(self.config.loader.clone()).load(input, &notices);
        let summary = self.run(&feed, &notices);
        ValidationReport { notices, summary }
    }

    fn should_run(&self, registration: &ValidatorRegistration, feed: &GtfsFeedContainer) -> bool {
        if self.config.is_disabled(registration.name) {
            tracing::debug!(validator = registration.name, "Validator disabled");
            return false;
        }
        let invalid = registration
            .tables
            .iter()
            .copied()
            .find(|filename| feed.table_status(filename) == Some(TableStatus::InvalidHeaders));
        if let Some(filename) = invalid {
            tracing::warn!(
                validator = registration.name,
                filename,
                "Skipping validator: table has invalid headers"
            );
            return false;
        }
        true
    }
}

/// Load and validate a feed with the built-in validators.
pub fn validate_feed(input: &FeedInput, config: ValidationConfig) -> ValidationReport {
    ValidationEngine::new(config).validate(input)
}

fn run_validator(registration: &ValidatorRegistration, feed: &GtfsFeedContainer) -> Outcome {
    let start = Instant::now();
    let notices = NoticeContainer::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        (registration.build)(feed).validate(&notices)
    }));

    let failure = match result {
        Ok(Ok(())) => None,
        Ok(Err(error)) => Some(("Error", format!("{error:#}"))),
        Err(payload) => Some(("Panic", panic_message(payload.as_ref()))),
    };
    let failed = failure.is_some();
    if let Some((exception, message)) = failure {
        tracing::warn!(
            validator = registration.name,
            exception,
            message = %message,
            "Validator failed"
        );
        notices.add(Notice::RuntimeExceptionInValidator {
            validator: registration.name.to_string(),
            exception: exception.to_string(),
            message,
        });
    }

    tracing::debug!(
        validator = registration.name,
        notices = notices.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Validator finished"
    );
    Outcome { notices, failed }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
