//! Core library for the `skycast` weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather lookup service (by city name or by coordinate)
//! - A bounded, persisted recent-search history
//! - Theme preference storage
//! - A session wrapper that applies only the freshest lookup result
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod history;
pub mod location;
pub mod lookup;
pub mod model;
pub mod session;
pub mod theme;

pub use config::Config;
pub use error::LookupError;
pub use history::{HISTORY_CAPACITY, RecentSearches};
pub use location::{IpLocationSource, LocationSource};
pub use lookup::LookupService;
pub use model::{Coordinates, WeatherRecord};
pub use session::Session;
pub use theme::{Theme, ThemePreference};
