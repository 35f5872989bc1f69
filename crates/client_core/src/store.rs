use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{CityId, NewCity};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::{Operation, StoreError},
    remote::CityService,
    state::{reduce, Action, StoreState},
};

#[async_trait]
pub trait CitiesHandle: Send + Sync {
    fn snapshot(&self) -> StoreState;
    fn subscribe(&self) -> watch::Receiver<StoreState>;
    async fn get_city(&self, id: CityId);
    async fn add_city(&self, new_city: NewCity);
    async fn delete_city(&self, id: CityId);
}

/// Single source of truth for city data, kept in step with a [`CityService`].
///
/// Operations never return errors: a failed call is recorded in
/// [`StoreState::error`]. Results are applied in completion order, and a
/// second call while another is loading is not held back.
pub struct CityStore<S: CityService> {
    service: S,
    state: watch::Sender<StoreState>,
}

impl<S: CityService> CityStore<S> {
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { service, state }
    }

    pub async fn initialize(service: S) -> Self {
        let store = Self::new(service);
        store.list_cities().await;
        store
    }

    /// Aborting the returned handle cancels the request and clears the loading flag.
    pub fn spawn_initial_load(self: &Arc<Self>) -> JoinHandle<()>
    where
        S: 'static,
    {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.list_cities().await })
    }

    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub async fn list_cities(&self) {
        let pending = self.begin(Operation::ListCities);
        match self.service.list_cities().await {
            Ok(cities) => {
                info!(count = cities.len(), "store: cities loaded");
                pending.finish(Action::CitiesLoaded(cities));
            }
            Err(err) => pending.reject(&err),
        }
    }

    pub async fn get_city(&self, id: CityId) {
        let already_selected = self.state.borrow().current_city_id() == Some(id);
        if already_selected {
            debug!(city_id = id.0, "store: city already selected; skipping fetch");
            return;
        }

        let pending = self.begin(Operation::GetCity);
        match self.service.get_city(id).await {
            Ok(city) => {
                info!(city_id = city.id.0, city = %city.name, "store: city loaded");
                pending.finish(Action::CityLoaded(city));
            }
            Err(err) => pending.reject(&err),
        }
    }

    pub async fn add_city(&self, new_city: &NewCity) {
        let pending = self.begin(Operation::AddCity);
        match self.service.create_city(new_city).await {
            Ok(city) => {
                info!(city_id = city.id.0, city = %city.name, "store: city created");
                pending.finish(Action::CityCreated(city));
            }
            Err(err) => pending.reject(&err),
        }
    }

    pub async fn delete_city(&self, id: CityId) {
        let pending = self.begin(Operation::DeleteCity);
        match self.service.delete_city(id).await {
            Ok(()) => {
                info!(city_id = id.0, "store: city deleted");
                pending.finish(Action::CityDeleted(id));
            }
            Err(err) => pending.reject(&err),
        }
    }

    fn begin(&self, operation: Operation) -> PendingOperation<'_> {
        dispatch(&self.state, Action::Loading);
        PendingOperation {
            state: &self.state,
            operation,
            finished: false,
        }
    }
}

fn dispatch(state: &watch::Sender<StoreState>, action: Action) {
    let tag = action.tag();
    state.send_modify(|current| {
        let previous = std::mem::take(current);
        *current = reduce(previous, action);
    });
    debug!(action = tag, "store: dispatched");
}

// Dispatches `Cancelled` if dropped before a terminal action.
struct PendingOperation<'a> {
    state: &'a watch::Sender<StoreState>,
    operation: Operation,
    finished: bool,
}

impl PendingOperation<'_> {
    fn finish(mut self, action: Action) {
        debug_assert!(action.is_terminal());
        self.finished = true;
        dispatch(self.state, action);
    }

    fn reject(self, source: &anyhow::Error) {
        let error = StoreError::remote(self.operation, source);
        warn!(operation = %self.operation, error = %error, "store: remote operation rejected");
        self.finish(Action::Rejected(error.to_string()));
    }
}

impl Drop for PendingOperation<'_> {
    fn drop(&mut self) {
        if !self.finished {
            info!(operation = %self.operation, "store: operation dropped before completion");
            dispatch(self.state, Action::Cancelled);
        }
    }
}

#[async_trait]
impl<S: CityService> CitiesHandle for CityStore<S> {
    fn snapshot(&self) -> StoreState {
        self.state()
    }

    fn subscribe(&self) -> watch::Receiver<StoreState> {
        CityStore::subscribe(self)
    }

    async fn get_city(&self, id: CityId) {
        CityStore::get_city(self, id).await
    }

    async fn add_city(&self, new_city: NewCity) {
        CityStore::add_city(self, &new_city).await
    }

    async fn delete_city(&self, id: CityId) {
        CityStore::delete_city(self, id).await
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
