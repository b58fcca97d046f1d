use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use skycast_core::{
    Config, IpLocationSource, LookupService, RecentSearches, Session, Theme, ThemePreference,
    WeatherRecord, config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// Show current weather for the device's approximate location.
    Here,

    /// List recently looked-up cities, most recent first.
    History,

    /// Toggle the display theme, or set it explicitly.
    Theme {
        /// Target theme; omit to toggle.
        #[arg(long, value_enum)]
        set: Option<ThemeArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut session = build_session()?;
                match session.search(&city).await {
                    Ok(Some(record)) => print_result(&record, session.history()),
                    Ok(None) => {}
                    Err(e) => println!("{e}"),
                }
                Ok(())
            }
            Command::Here => {
                let mut session = build_session()?;
                let source = IpLocationSource::new()?;
                match session.search_here(&source).await {
                    Ok(Some(record)) => print_result(&record, session.history()),
                    Ok(None) => {}
                    Err(e) => println!("{e}"),
                }
                Ok(())
            }
            Command::History => {
                let history = RecentSearches::load(config::history_file_path()?);
                print_history(history.current());
                Ok(())
            }
            Command::Theme { set } => {
                let mut pref = ThemePreference::load(config::theme_file_path()?);
                match set {
                    Some(theme) => pref.set(theme.into()),
                    None => {
                        pref.toggle();
                    }
                }
                println!("Theme: {}", pref.current().as_str());
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;

    let mut cfg = Config::load()?;
    cfg.set_api_key(api_key);
    cfg.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_session() -> Result<Session> {
    let cfg = Config::load()?;
    let api_key = cfg.resolved_api_key()?;
    let lookup = LookupService::new(api_key)?;
    let history = RecentSearches::load(config::history_file_path()?);
    Ok(Session::new(lookup, history))
}

fn print_result(record: &WeatherRecord, history: &[String]) {
    println!("{}", render_record(record));
    print_history(history);
}

fn print_history(history: &[String]) {
    if history.is_empty() {
        return;
    }
    println!();
    println!("Recent searches:");
    for city in history {
        println!("  {city}");
    }
}

/// Render a weather record for the terminal, skipping absent fields.
fn render_record(record: &WeatherRecord) -> String {
    let mut lines = Vec::new();

    let heading = match (&record.city, &record.country) {
        (city, Some(country)) if !city.is_empty() => format!("{city}, {country}"),
        (city, None) if !city.is_empty() => city.clone(),
        _ => "(unknown location)".to_string(),
    };
    lines.push(heading);

    if let Some(description) = &record.description {
        lines.push(description.clone());
    }
    if let Some(temp) = record.temperature_c {
        lines.push(format!("Temperature: {temp:.1}°C"));
    }
    if let Some(humidity) = record.humidity_pct {
        lines.push(format!("Humidity: {humidity}%"));
    }
    if let Some(wind) = record.wind_speed_mps {
        lines.push(format!("Wind speed: {wind:.1} m/s"));
    }
    if let Some(observed) = record.observed_at {
        lines.push(format!("Observed: {}", observed.format("%Y-%m-%d %H:%M UTC")));
    }
    if let Some(icon_url) = record.icon_url() {
        lines.push(format!("Icon: {icon_url}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn render_record_includes_present_fields() {
        let record = WeatherRecord {
            city: "Paris".to_string(),
            country: Some("FR".to_string()),
            description: Some("clear sky".to_string()),
            icon: Some("01d".to_string()),
            temperature_c: Some(21.34),
            humidity_pct: Some(40),
            wind_speed_mps: Some(3.6),
            observed_at: Some(Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()),
        };

        let rendered = render_record(&record);
        assert!(rendered.starts_with("Paris, FR\n"));
        assert!(rendered.contains("clear sky"));
        assert!(rendered.contains("Temperature: 21.3°C"));
        assert!(rendered.contains("Humidity: 40%"));
        assert!(rendered.contains("Wind speed: 3.6 m/s"));
        assert!(rendered.contains("Observed: 2026-08-30 12:00 UTC"));
        assert!(rendered.contains("https://openweathermap.org/img/wn/01d@2x.png"));
    }

    #[test]
    fn render_record_skips_absent_fields() {
        let record = WeatherRecord {
            city: "Giza".to_string(),
            country: None,
            description: None,
            icon: None,
            temperature_c: None,
            humidity_pct: None,
            wind_speed_mps: None,
            observed_at: None,
        };

        assert_eq!(render_record(&record), "Giza");
    }

    #[test]
    fn render_record_handles_missing_city() {
        let record = WeatherRecord {
            city: String::new(),
            country: None,
            description: None,
            icon: None,
            temperature_c: None,
            humidity_pct: None,
            wind_speed_mps: None,
            observed_at: None,
        };

        assert_eq!(render_record(&record), "(unknown location)");
    }
}
