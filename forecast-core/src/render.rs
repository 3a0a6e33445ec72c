//! Pure mapping from the provider payload to a [`DisplayModel`].
//!
//! Values are passed through as the provider sent them, in both unit systems.
//! Days keep the provider's order.

use serde::{Deserialize, Serialize};

use crate::{ForecastResponse, error::MalformedResponse};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    /// `name, region, country`
    pub location: String,
    pub current: CurrentSection,
    pub forecast_title: String,
    pub days: Vec<DaySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSection {
    pub heading: String,
    pub condition: Condition,
    pub lines: Vec<DisplayLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySection {
    pub date: String,
    pub condition: Condition,
    pub lines: Vec<DisplayLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub text: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLine {
    pub label: &'static str,
    pub value: String,
}

impl DisplayLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Map a provider payload to display form, or report the first missing field.
pub fn render(response: &ForecastResponse) -> Result<DisplayModel, MalformedResponse> {
    let parsed: WaForecastResponse =
        serde_path_to_error::deserialize(&response.0).map_err(|e| MalformedResponse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;

    let loc = &parsed.location;
    let location = format!("{}, {}, {}", loc.name, loc.region, loc.country);

    let current = current_section(&location, &parsed.current);
    let days: Vec<DaySection> = parsed.forecast.forecastday.iter().map(day_section).collect();

    Ok(DisplayModel {
        forecast_title: format!("{}-Day Forecast:", days.len()),
        location,
        current,
        days,
    })
}

fn current_section(location: &str, c: &WaCurrent) -> CurrentSection {
    let lines = vec![
        DisplayLine::new("Temperature", temps(c.temp_f, c.temp_c)),
        DisplayLine::new("Feels Like", temps(c.feelslike_f, c.feelslike_c)),
        DisplayLine::new("Humidity", format!("{}%", c.humidity)),
        DisplayLine::new(
            "Wind",
            format!("{} mph / {} kph, direction {}", c.wind_mph, c.wind_kph, c.wind_dir),
        ),
        DisplayLine::new("Pressure", format!("{} in / {} mb", c.pressure_in, c.pressure_mb)),
        DisplayLine::new("Cloud Cover", format!("{}%", c.cloud)),
        DisplayLine::new("UV Index", c.uv.to_string()),
        DisplayLine::new("Precipitation", format!("{} in / {} mm", c.precip_in, c.precip_mm)),
        DisplayLine::new("Visibility", format!("{} mi / {} km", c.vis_miles, c.vis_km)),
    ];

    CurrentSection {
        heading: format!("Current Weather for {location}"),
        condition: condition(&c.condition),
        lines,
    }
}

fn day_section(day: &WaForecastDay) -> DaySection {
    let d = &day.day;
    let lines = vec![
        DisplayLine::new("Max Temp", temps(d.maxtemp_f, d.maxtemp_c)),
        DisplayLine::new("Min Temp", temps(d.mintemp_f, d.mintemp_c)),
        DisplayLine::new("Avg Temp", temps(d.avgtemp_f, d.avgtemp_c)),
        DisplayLine::new("Max Wind", format!("{} mph / {} kph", d.maxwind_mph, d.maxwind_kph)),
        DisplayLine::new(
            "Precipitation",
            format!("{} in / {} mm", d.totalprecip_in, d.totalprecip_mm),
        ),
        DisplayLine::new("Avg Humidity", format!("{}%", d.avghumidity)),
        DisplayLine::new("Avg Visibility", format!("{} mi / {} km", d.avgvis_miles, d.avgvis_km)),
        DisplayLine::new("Chance of Rain", format!("{}%", d.daily_chance_of_rain)),
        DisplayLine::new("Chance of Snow", format!("{}%", d.daily_chance_of_snow)),
        DisplayLine::new("UV Index", d.uv.to_string()),
    ];

    DaySection { date: day.date.clone(), condition: condition(&d.condition), lines }
}

fn temps(f: f64, c: f64) -> String {
    format!("{f}°F / {c}°C")
}

fn condition(c: &WaCondition) -> Condition {
    Condition { text: c.text.clone(), icon_url: format!("https:{}", c.icon) }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    region: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    condition: WaCondition,
    temp_f: f64,
    temp_c: f64,
    feelslike_f: f64,
    feelslike_c: f64,
    humidity: f64,
    wind_mph: f64,
    wind_kph: f64,
    wind_dir: String,
    pressure_in: f64,
    pressure_mb: f64,
    cloud: f64,
    uv: f64,
    precip_in: f64,
    precip_mm: f64,
    vis_miles: f64,
    vis_km: f64,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    condition: WaCondition,
    maxtemp_f: f64,
    maxtemp_c: f64,
    mintemp_f: f64,
    mintemp_c: f64,
    avgtemp_f: f64,
    avgtemp_c: f64,
    maxwind_mph: f64,
    maxwind_kph: f64,
    totalprecip_in: f64,
    totalprecip_mm: f64,
    avghumidity: f64,
    avgvis_miles: f64,
    avgvis_km: f64,
    daily_chance_of_rain: f64,
    daily_chance_of_snow: f64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}
