use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchFailed;

/// Card identifier. This is the provider's own record id, reused as-is,
/// so two searches for the same city yield the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One condition entry of the provider's `weather` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Result of one successful fetch. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    id: CardId,
    name: String,
    country: String,
    conditions: Vec<Condition>,
    temperature: f64,
    humidity: u8,
    wind_speed: f64,
    observed_at: i64,
}

impl WeatherRecord {
    /// Parse and validate a current-conditions document.
    pub fn from_json(body: &str) -> Result<Self, FetchFailed> {
        let doc: OwCurrentResponse = serde_json::from_str(body).map_err(FetchFailed::schema)?;
        Self::try_from(doc)
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// First entry of the condition array; validation guarantees one exists.
    pub fn primary_condition(&self) -> &Condition {
        &self.conditions[0]
    }

    /// Background label derived from the primary condition keyword.
    pub fn mood(&self) -> String {
        self.primary_condition().main.to_lowercase()
    }

    /// Degrees Celsius.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Relative humidity, percent.
    pub fn humidity(&self) -> u8 {
        self.humidity
    }

    /// Metres per second.
    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// Seconds since the Unix epoch.
    pub fn observed_at(&self) -> i64 {
        self.observed_at
    }

    pub fn observed_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.observed_at, 0)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    id: i64,
    name: String,
    dt: i64,
    sys: OwSys,
    main: OwMain,
    weather: Vec<Condition>,
    wind: OwWind,
}

impl TryFrom<OwCurrentResponse> for WeatherRecord {
    type Error = FetchFailed;

    fn try_from(doc: OwCurrentResponse) -> Result<Self, Self::Error> {
        if doc.weather.is_empty() {
            return Err(FetchFailed::schema("response contained no condition entries"));
        }

        Ok(Self {
            id: CardId(doc.id),
            name: doc.name,
            country: doc.sys.country,
            conditions: doc.weather,
            temperature: doc.main.temp,
            humidity: doc.main.humidity,
            wind_speed: doc.wind.speed,
            observed_at: doc.dt,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::WeatherRecord;

    pub fn london_json() -> String {
        serde_json::json!({
            "id": 1,
            "name": "London",
            "sys": { "country": "GB" },
            "weather": [{ "main": "Clouds", "description": "overcast clouds", "icon": "04d" }],
            "main": { "temp": 15.2, "humidity": 70 },
            "wind": { "speed": 4.1 },
            "dt": 1_700_000_000
        })
        .to_string()
    }

    pub fn record(id: i64, name: &str, main: &str) -> WeatherRecord {
        build(id, name, main, 20.0)
    }

    pub fn record_with_temp(id: i64, name: &str, temp: f64) -> WeatherRecord {
        build(id, name, "Clear", temp)
    }

    fn build(id: i64, name: &str, main: &str, temp: f64) -> WeatherRecord {
        let body = serde_json::json!({
            "id": id,
            "name": name,
            "sys": { "country": "XX" },
            "weather": [{ "main": main, "description": main.to_lowercase(), "icon": "01d" }],
            "main": { "temp": temp, "humidity": 50 },
            "wind": { "speed": 1.0 },
            "dt": 1_700_000_000
        })
        .to_string();
        WeatherRecord::from_json(&body).expect("fixture must parse")
    }
}
