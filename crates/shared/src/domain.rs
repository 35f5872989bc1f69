use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseCityIdError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CityId);

impl FromStr for CityId {
    type Err = ParseCityIdError;

    /// Parses an id taken from a route segment such as `/cities/17`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        trimmed
            .parse::<i64>()
            .map(CityId)
            .map_err(|_| ParseCityIdError::new(trimmed))
    }
}

/// A visited city as stored by the remote city service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(alias = "cityName")]
    pub name: String,
    pub country: String,
    pub emoji: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn position(&self) -> Position {
        Position {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// Creation payload: a city before the server has assigned its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCity {
    #[serde(alias = "cityName")]
    pub name: String,
    pub country: String,
    pub emoji: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewCity {
    pub fn at(
        name: impl Into<String>,
        country: impl Into<String>,
        emoji: impl Into<String>,
        position: Position,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            emoji: emoji.into(),
            date,
            notes: String::new(),
            latitude: position.lat,
            longitude: position.lng,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Attaches a server-assigned id, producing the stored record.
    pub fn into_city(self, id: CityId) -> City {
        City {
            id,
            name: self.name,
            country: self.country,
            emoji: self.emoji,
            date: self.date,
            notes: self.notes,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// One entry of the visited-countries list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub emoji: String,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
