//! Data handed to the presentation layer.

use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fmt;

use crate::{
    model::{CardId, WeatherRecord},
    state::AppState,
};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub title: String,
    pub icon_url: String,
    pub temperature: String,
    pub condition: String,
    pub wind: String,
    pub humidity: String,
    pub updated: String,
}

impl CardView {
    /// Build a card with the observation time in the local time zone.
    pub fn from_record(record: &WeatherRecord) -> Self {
        Self::from_record_in(record, &Local)
    }

    pub fn from_record_in<Tz: TimeZone>(record: &WeatherRecord, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let primary = record.primary_condition();
        let updated = record
            .observed_at_utc()
            .map(|at| at.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            id: record.id(),
            title: format!("{}, {}", record.name(), record.country()),
            icon_url: icon_url(&primary.icon),
            temperature: format!("{} °C", one_decimal(record.temperature())),
            condition: primary.description.clone(),
            wind: format!("{} m/s", record.wind_speed()),
            humidity: format!("{}%", record.humidity()),
            updated,
        }
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.id, self.title)?;
        writeln!(f, "  Temperature: {}", self.temperature)?;
        writeln!(f, "  Condition:   {}", self.condition)?;
        writeln!(f, "  Wind Speed:  {}", self.wind)?;
        writeln!(f, "  Humidity:    {}", self.humidity)?;
        writeln!(f, "  Updated:     {}", self.updated)?;
        write!(f, "  Icon:        {}", self.icon_url)
    }
}

/// One decimal place, exact halves rounded away from zero.
///
/// `{:.1}` rounds ties to even; a double sits exactly halfway between two
/// tenths only when its fractional part is .25 or .75.
fn one_decimal(value: f64) -> String {
    let quarters = value.abs() * 4.0;
    let is_tie = quarters.fract() == 0.0 && quarters % 2.0 == 1.0;
    if is_tie {
        let away = (value.abs() * 10.0).ceil() / 10.0;
        format!("{:.1}", away.copysign(value))
    } else {
        format!("{value:.1}")
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppView {
    pub background: String,
    pub error_banner: Option<String>,
    pub cards: Vec<CardView>,
}

impl AppView {
    pub fn from_state(state: &AppState) -> Self {
        Self::from_state_in(state, &Local)
    }

    pub fn from_state_in<Tz: TimeZone>(state: &AppState, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            background: state.mood().to_string(),
            error_banner: state.error().filter(|e| !e.is_empty()).map(str::to_string),
            cards: state.cards().iter().map(|r| CardView::from_record_in(r, tz)).collect(),
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Background: {}", self.background)?;
        if let Some(err) = &self.error_banner {
            writeln!(f, "!! {err}")?;
        }
        if self.cards.is_empty() {
            return write!(f, "(no cards)");
        }
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}
