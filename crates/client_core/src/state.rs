//! Client-side city state and the reducer that moves it between states.
//!
//! Every change to [`StoreState`] goes through [`reduce`]. Actions are
//! matched exhaustively, so an unknown transition cannot be expressed.

use shared::domain::{City, CityId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub cities: Vec<City>,
    pub is_loading: bool,
    pub current_city: Option<City>,
    /// Text of the last rejected operation. Successful operations leave it as is.
    pub error: String,
}

impl StoreState {
    pub fn current_city_id(&self) -> Option<CityId> {
        self.current_city.as_ref().map(|city| city.id)
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Loading,
    CitiesLoaded(Vec<City>),
    CityLoaded(City),
    CityCreated(City),
    CityDeleted(CityId),
    Rejected(String),
    /// The operation's future was dropped before it finished.
    Cancelled,
}

impl Action {
    pub fn tag(&self) -> &'static str {
        match self {
            Action::Loading => "loading",
            Action::CitiesLoaded(_) => "cities/loaded",
            Action::CityLoaded(_) => "city/loaded",
            Action::CityCreated(_) => "city/created",
            Action::CityDeleted(_) => "city/deleted",
            Action::Rejected(_) => "rejected",
            Action::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Action::Loading)
    }
}

pub fn reduce(state: StoreState, action: Action) -> StoreState {
    match action {
        Action::Loading => StoreState {
            is_loading: true,
            ..state
        },
        Action::CitiesLoaded(cities) => StoreState {
            is_loading: false,
            cities,
            ..state
        },
        Action::CityLoaded(city) => StoreState {
            is_loading: false,
            current_city: Some(city),
            ..state
        },
        Action::CityCreated(city) => {
            let mut cities = state.cities;
            cities.push(city.clone());
            StoreState {
                is_loading: false,
                current_city: Some(city),
                cities,
                error: state.error,
            }
        }
        Action::CityDeleted(id) => {
            let mut cities = state.cities;
            cities.retain(|city| city.id != id);
            StoreState {
                is_loading: false,
                current_city: None,
                cities,
                error: state.error,
            }
        }
        Action::Rejected(error) => StoreState {
            is_loading: false,
            error,
            ..state
        },
        Action::Cancelled => StoreState {
            is_loading: false,
            ..state
        },
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
