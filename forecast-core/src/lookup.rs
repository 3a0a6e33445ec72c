//! The lookup pipeline: validate, fetch once, render.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    error::LookupError,
    geo::Geolocator,
    model::{DateSelection, Query},
    provider::ForecastProvider,
    render::{DisplayModel, render},
    validate::build_query,
};

/// Look up a typed location. Invalid input never reaches the provider.
pub async fn lookup(
    provider: &dyn ForecastProvider,
    location: &str,
    dates: Option<DateSelection>,
    today: NaiveDate,
) -> Result<DisplayModel, LookupError> {
    let query = build_query(location, dates, today)?;
    run(provider, &query).await
}

/// Startup flow: current position if known, else `fallback`. One day only.
pub async fn lookup_current_position(
    provider: &dyn ForecastProvider,
    geolocator: &dyn Geolocator,
    fallback: &str,
) -> Result<DisplayModel, LookupError> {
    let query = match geolocator.current_position().await {
        Some(position) => Query::for_position(position),
        None => {
            info!(fallback, "no position available, using fallback location");
            Query::for_fallback(fallback)
        }
    };
    run(provider, &query).await
}

async fn run(provider: &dyn ForecastProvider, query: &Query) -> Result<DisplayModel, LookupError> {
    debug!(location = %query.location, days = %query.days, "fetching forecast");
    let response = provider.fetch(query).await?;
    Ok(render(&response)?)
}
