//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Input validation that turns a location and date range into a [`Query`]
//! - The WeatherAPI.com client behind the [`ForecastProvider`] port
//! - A pure renderer from the provider payload to a [`DisplayModel`]
//! - Presenters (text, HTML, JSON) and the persisted display mode
//! - Configuration & credentials handling
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod geo;
pub mod lookup;
pub mod model;
pub mod present;
pub mod provider;
pub mod render;
pub mod theme;
pub mod validate;

pub use config::Config;
pub use error::{FetchError, LookupError, MalformedResponse, ValidationError};
pub use geo::{FixedPosition, Geolocator};
pub use lookup::{lookup, lookup_current_position};
pub use model::{Coordinates, DateSelection, DayCount, ForecastResponse, Query};
pub use present::{HtmlPresenter, JsonPresenter, Presenter, TextPresenter};
pub use provider::{ForecastProvider, WeatherApiProvider, provider_from_config};
pub use render::{DisplayModel, render};
pub use theme::{AppState, DisplayMode, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use validate::{build_query, build_query_today, forecast_window};
