//! Routes need a short or a long name.

use anyhow::Result;
use gtfs_ingest::GtfsFeedContainer;
use gtfs_model::{Notice, NoticeContainer, Route};

use crate::validator::{Validator, ValidatorRegistration};

pub const REGISTRATION: ValidatorRegistration = ValidatorRegistration {
    name: "route_names",
    tables: &[Route::FILENAME],
    build,
};

fn build(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(RouteNameValidator { feed })
}

pub struct RouteNameValidator<'a> {
    feed: &'a GtfsFeedContainer,
}

impl Validator for RouteNameValidator<'_> {
    fn validate(&self, notices: &NoticeContainer) -> Result<()> {
        let unnamed = self
            .feed
            .routes()
            .entities()
            .iter()
            .filter(|route| route.route_short_name.is_none() && route.route_long_name.is_none());
        for route in unnamed {
            notices.add(Notice::RouteBothShortAndLongNameMissing {
                route_id: route.route_id.clone(),
                csv_row_number: route.csv_row_number,
            });
        }
        Ok(())
    }
}
