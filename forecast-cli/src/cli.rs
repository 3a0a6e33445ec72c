use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use forecast_core::{
    AppState, Config, Coordinates, DateSelection, DisplayMode, FilePreferenceStore, FixedPosition,
    HtmlPresenter, JsonPresenter, LookupError, PreferenceStore, Presenter, TextPresenter,
    ValidationError, forecast_window, lookup, lookup_current_position, provider_from_config,
};
use inquire::{Password, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast lookup")]
pub struct Cli {
    /// WeatherAPI.com key; overrides the configured one.
    #[arg(long, global = true, env = "FORECAST_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default location.
    Configure,

    /// Show the forecast for a city, ZIP code or "lat,lon".
    Show {
        location: String,

        /// First day of the range (YYYY-MM-DD), today or later.
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day of the range (YYYY-MM-DD), at most 10 days in total.
        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Today's weather at the given position, the configured home, or the default location.
    Here {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show or change the light/dark display mode.
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
    Json,
}

impl Format {
    fn presenter(self) -> Box<dyn Presenter> {
        match self {
            Format::Text => Box::new(TextPresenter),
            Format::Html => Box::new(HtmlPresenter),
            Format::Json => Box::new(JsonPresenter),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { location, from, to, format } => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                let provider = provider_from_config(&config)?;
                let state = load_state()?;

                let dates = (from.is_some() || to.is_some())
                    .then_some(DateSelection { start: from, end: to });
                let today = Local::now().date_naive();

                let result = lookup(&provider, &location, dates, today).await;
                Ok(print_outcome(result, format, &state, Some(today)))
            }
            Command::Here { lat, lon, format } => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                let provider = provider_from_config(&config)?;
                let state = load_state()?;

                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Coordinates::new(lat, lon).or_else(|| {
                        tracing::warn!(lat, lon, "position out of range, ignoring");
                        None
                    }),
                    _ => config.home_position(),
                };

                let result = lookup_current_position(
                    &provider,
                    &FixedPosition(position),
                    config.default_location(),
                )
                .await;
                Ok(print_outcome(result, format, &state, None))
            }
            Command::Theme { action } => {
                let mut store = FilePreferenceStore::open_default()?;
                let mut state = AppState::load(&store)?;
                theme(action, &mut state, &mut store)?;
                println!("Display mode: {}", state.mode);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_state() -> anyhow::Result<AppState> {
    let store = FilePreferenceStore::open_default()?;
    AppState::load(&store)
}

fn theme(
    action: ThemeAction,
    state: &mut AppState,
    store: &mut dyn PreferenceStore,
) -> anyhow::Result<()> {
    match action {
        ThemeAction::Show => Ok(()),
        ThemeAction::Toggle => state.toggle(store).map(|_| ()),
        ThemeAction::Light => state.set_mode(DisplayMode::Light, store),
        ThemeAction::Dark => state.set_mode(DisplayMode::Dark, store),
    }
}

/// Print the forecast or the user-facing error. Lookup failures never abort the process.
fn print_outcome(
    result: Result<forecast_core::DisplayModel, LookupError>,
    format: Format,
    state: &AppState,
    today: Option<NaiveDate>,
) -> ExitCode {
    let presenter = format.presenter();
    let hint = result.as_ref().err().and_then(|err| date_hint(err, today));

    let rendered = result
        .map_err(|err| {
            tracing::error!(error = %err, "lookup failed");
            err.user_message()
        })
        .and_then(|model| {
            presenter.present(&model, state).map_err(|err| {
                tracing::error!(error = %err, "could not format forecast");
                "Sorry, the forecast could not be displayed.".to_string()
            })
        });

    match rendered {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", presenter.present_message(&message, state));
            if let Some(hint) = hint {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Extra line listing the selectable dates, for date errors the window explains.
fn date_hint(err: &LookupError, today: Option<NaiveDate>) -> Option<String> {
    match err {
        LookupError::Validation(ValidationError::DateInPast | ValidationError::RangeTooLong { .. }) => {
            let (first, last) = forecast_window(today?);
            Some(format!("Available dates: {first} to {last}."))
        }
        _ => None,
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let location = Text::new("Default location (city, ZIP or lat,lon):")
        .with_default(config.default_location())
        .prompt()
        .context("Failed to read default location")?;
    config.default_location = Some(location.trim().to_string()).filter(|l| !l.is_empty());

    config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::MemoryPreferenceStore;

    #[test]
    fn parses_show_with_range() {
        let cli = Cli::try_parse_from([
            "forecast", "show", "Chicago", "--from", "2026-10-20", "--to", "2026-10-25",
            "--format", "html",
        ])
        .unwrap();

        match cli.command {
            Command::Show { location, from, to, format } => {
                assert_eq!(location, "Chicago");
                assert_eq!(from, NaiveDate::from_ymd_opt(2026, 10, 20));
                assert_eq!(to, NaiveDate::from_ymd_opt(2026, 10, 25));
                assert_eq!(format, Format::Html);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["forecast", "show", "Chicago", "--from", "10/20/2026"]).is_err());
    }

    #[test]
    fn here_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["forecast", "here", "--lat", "41.8"]).is_err());

        let cli = Cli::try_parse_from(["forecast", "here", "--lat", "41.8", "--lon", "-87.6"]).unwrap();
        assert!(matches!(cli.command, Command::Here { lat: Some(_), lon: Some(_), .. }));
    }

    #[test]
    fn theme_actions_persist() {
        let mut store = MemoryPreferenceStore::default();
        let mut state = AppState::load(&store).unwrap();

        theme(ThemeAction::Toggle, &mut state, &mut store).unwrap();
        assert_eq!(state.mode, DisplayMode::Dark);

        theme(ThemeAction::Light, &mut state, &mut store).unwrap();
        assert_eq!(AppState::load(&store).unwrap().mode, DisplayMode::Light);

        theme(ThemeAction::Show, &mut state, &mut store).unwrap();
        assert_eq!(state.mode, DisplayMode::Light);
    }

    #[test]
    fn failed_lookup_exits_with_failure() {
        let err = LookupError::from(ValidationError::MissingLocation);
        let code = print_outcome(Err(err), Format::Text, &AppState::default(), None);
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn date_hint_only_for_window_errors() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17);

        let too_long = LookupError::from(ValidationError::RangeTooLong { days: 11 });
        assert_eq!(
            date_hint(&too_long, today).as_deref(),
            Some("Available dates: 2026-10-17 to 2026-10-27.")
        );
        assert!(date_hint(&LookupError::from(ValidationError::DateInPast), today).is_some());

        for err in [
            ValidationError::MissingLocation,
            ValidationError::MissingDate,
            ValidationError::InvertedRange,
        ] {
            assert_eq!(date_hint(&LookupError::from(err), today), None);
        }
        assert_eq!(date_hint(&too_long, None), None);
    }

    #[test]
    fn validation_message_stays_verbatim() {
        let err = LookupError::from(ValidationError::RangeTooLong { days: 11 });
        let hint = date_hint(&err, NaiveDate::from_ymd_opt(2026, 10, 17));

        assert_eq!(err.user_message(), "Please select a date range within 10 days.");
        assert!(!hint.unwrap_or_default().contains("within 10 days"));
    }
}
