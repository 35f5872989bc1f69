//! Read-only projections of [`StoreState`] for list screens.

use std::collections::HashSet;

use shared::domain::{City, CountrySummary};

use crate::state::StoreState;

pub const EMPTY_LIST_MESSAGE: &str = "Add your first city by clicking on a city on the map";

/// What a city or country list should show for a given state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Empty { message: &'static str },
    Ready(&'a [City]),
}

impl<'a> ListView<'a> {
    pub fn of(state: &'a StoreState) -> Self {
        if state.is_loading {
            ListView::Loading
        } else if state.cities.is_empty() {
            ListView::Empty {
                message: EMPTY_LIST_MESSAGE,
            }
        } else {
            ListView::Ready(&state.cities)
        }
    }
}

/// Visited countries in first-seen order. A country keeps the emoji of its first city.
pub fn countries(cities: &[City]) -> Vec<CountrySummary> {
    let mut seen = HashSet::new();
    cities
        .iter()
        .filter(|city| seen.insert(city.country.as_str()))
        .map(|city| CountrySummary {
            country: city.country.clone(),
            emoji: city.emoji.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use shared::domain::CityId;

    use super::*;

    fn city(id: i64, country: &str, emoji: &str) -> City {
        City {
            id: CityId(id),
            name: format!("city-{id}"),
            country: country.to_string(),
            emoji: emoji.to_string(),
            date: "2027-10-31T15:59:59.138Z".parse().expect("timestamp"),
            notes: String::new(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn groups_countries_in_first_seen_order() {
        let cities = vec![
            city(1, "Portugal", "🇵🇹"),
            city(2, "Spain", "🇪🇸"),
            city(3, "Portugal", "🏳"),
            city(4, "Germany", "🇩🇪"),
        ];

        let summary = countries(&cities);

        let names: Vec<_> = summary.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(names, vec!["Portugal", "Spain", "Germany"]);
        assert_eq!(summary[0].emoji, "🇵🇹");
    }

    #[test]
    fn no_cities_means_no_countries() {
        assert!(countries(&[]).is_empty());
    }

    #[test]
    fn list_view_prefers_loading_over_empty() {
        let mut state = StoreState {
            is_loading: true,
            ..StoreState::default()
        };
        assert_eq!(ListView::of(&state), ListView::Loading);

        state.is_loading = false;
        assert_eq!(
            ListView::of(&state),
            ListView::Empty {
                message: EMPTY_LIST_MESSAGE
            }
        );

        state.cities.push(city(1, "Portugal", "🇵🇹"));
        assert!(matches!(ListView::of(&state), ListView::Ready(cities) if cities.len() == 1));
    }
}
