//! Core library for `weather-cards`.
//!
//! This crate defines:
//! - The weather record schema and its validation
//! - The OpenWeather fetch step behind the [`WeatherProvider`] trait
//! - The explicit card/error/mood state container and the search handler
//! - The view model handed to a presentation layer
//!
//! It is used by `weather-cards`, but can also back other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod search;
pub mod state;
pub mod view;

pub use config::Config;
pub use error::{FailureReason, FetchFailed};
pub use model::{CardId, Condition, WeatherRecord};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use search::{SearchForm, Submission};
pub use state::{AppState, CardList, Mood, SearchTicket};
pub use view::{AppView, CardView};
