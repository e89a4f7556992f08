//! Engine behavior: isolation of failing validators, skipping and ordering.

use anyhow::bail;
use gtfs_ingest::{FeedInput, GtfsFeedContainer, GtfsFeedLoader};
use gtfs_model::{LoaderOptions, Notice, NoticeContainer, ValidationConfig};
use gtfs_validate::{
    Validator, ValidationEngine, ValidationSummary, ValidatorRegistration, ValidatorRegistry,
    default_registry,
};

fn marker(name: &str) -> Notice {
    Notice::EmptyFile {
        filename: format!("{name}.txt"),
    }
}

struct Reports(&'static str);

impl Validator for Reports {
    fn validate(&self, notices: &NoticeContainer) -> anyhow::Result<()> {
        notices.add(marker(self.0));
        Ok(())
    }
}

struct Panics;

impl Validator for Panics {
    fn validate(&self, notices: &NoticeContainer) -> anyhow::Result<()> {
        notices.add(marker("before_panic"));
        panic!("validator exploded");
    }
}

struct Fails;

impl Validator for Fails {
    fn validate(&self, _notices: &NoticeContainer) -> anyhow::Result<()> {
        bail!("boom")
    }
}

fn build_first(_feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(Reports("first"))
}

fn build_last(_feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(Reports("last"))
}

fn build_panics(_feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(Panics)
}

fn build_fails(_feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(Fails)
}

fn faulty_registry() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    registry.register(ValidatorRegistration {
        name: "first",
        tables: &[],
        build: build_first,
    });
    registry.register(ValidatorRegistration {
        name: "panics",
        tables: &[],
        build: build_panics,
    });
    registry.register(ValidatorRegistration {
        name: "fails",
        tables: &[],
        build: build_fails,
    });
    registry.register(ValidatorRegistration {
        name: "last",
        tables: &["routes.txt"],
        build: build_last,
    });
    registry
}

fn run(
    registry: ValidatorRegistry,
    config: ValidationConfig,
    feed: &GtfsFeedContainer,
) -> (ValidationSummary, Vec<Notice>) {
    let notices = NoticeContainer::new();
    let summary = ValidationEngine::with_registry(registry, config).run(feed, &notices);
    (summary, notices.into_notices())
}

fn load(input: &FeedInput) -> GtfsFeedContainer {
    GtfsFeedLoader::new(LoaderOptions::default()).load(input, &NoticeContainer::new())
}

#[test]
fn failing_validators_do_not_stop_the_others() {
    let feed = GtfsFeedContainer::default();
    let (summary, notices) = run(faulty_registry(), ValidationConfig::sequential(), &feed);

    assert_eq!(
        summary,
        ValidationSummary {
            validators_run: 4,
            validators_skipped: 0,
            validators_failed: 2,
        }
    );
    assert_eq!(
        notices,
        vec![
            marker("first"),
            marker("before_panic"),
            Notice::RuntimeExceptionInValidator {
                validator: "panics".to_string(),
                exception: "Panic".to_string(),
                message: "validator exploded".to_string(),
            },
            Notice::RuntimeExceptionInValidator {
                validator: "fails".to_string(),
                exception: "Error".to_string(),
                message: "boom".to_string(),
            },
            marker("last"),
        ]
    );
}

#[test]
fn parallel_run_merges_in_registration_order() {
    let feed = GtfsFeedContainer::default();
    let (sequential_summary, sequential) =
        run(faulty_registry(), ValidationConfig::sequential(), &feed);
    let (parallel_summary, parallel) = run(faulty_registry(), ValidationConfig::default(), &feed);

    assert_eq!(parallel_summary, sequential_summary);
    assert_eq!(parallel, sequential);
}

#[test]
fn disabled_validators_are_skipped() {
    let feed = GtfsFeedContainer::default();
    let config = ValidationConfig::sequential()
        .with_disabled_validator("panics")
        .with_disabled_validator("fails");
    let (summary, notices) = run(faulty_registry(), config, &feed);

    assert_eq!(summary.validators_run, 2);
    assert_eq!(summary.validators_skipped, 2);
    assert_eq!(summary.validators_failed, 0);
    assert_eq!(notices, vec![marker("first"), marker("last")]);
}

#[test]
fn validators_of_tables_with_invalid_headers_are_skipped() {
    let input = FeedInput::new().with_file("routes.txt", "route_short_name,route_type\n10,3\n");
    let feed = load(&input);
    let (summary, notices) = run(faulty_registry(), ValidationConfig::sequential(), &feed);

    assert_eq!(summary.validators_skipped, 1);
    assert!(!notices.contains(&marker("last")));
}

#[test]
fn default_registry_skips_every_validator_reading_broken_routes() {
    let input = FeedInput::new()
        .with_file("routes.txt", "route_short_name,route_type\n10,3\n")
        .with_file("trips.txt", "route_id,service_id,trip_id\nr1,WEEK,t1\n");
    let feed = load(&input);
    let (summary, notices) = run(
        default_registry().clone(),
        ValidationConfig::sequential(),
        &feed,
    );

    assert_eq!(summary.validators_skipped, 3);
    assert_eq!(summary.validators_run, default_registry().len() - 3);
    assert!(notices.is_empty(), "{notices:?}");
}
