//! Client-side city tracking: a store kept in sync with the remote city service.

pub mod config;
pub mod error;
pub mod position;
pub mod remote;
pub mod state;
mod store;
pub mod views;

pub use config::{load_settings, Settings};
pub use error::{Operation, StoreError};
pub use remote::{CityService, HttpCityService};
pub use state::{Action, StoreState};
pub use store::{CitiesHandle, CityStore};

/// Opens a store against the configured service and waits for the initial city list.
pub async fn connect(settings: &Settings) -> CityStore<HttpCityService> {
    CityStore::initialize(HttpCityService::new(settings.base_url.as_str())).await
}
