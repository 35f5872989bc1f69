use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::domain::{City, CityId, NewCity};
use tracing::debug;

#[async_trait]
pub trait CityService: Send + Sync {
    async fn list_cities(&self) -> Result<Vec<City>>;
    async fn get_city(&self, id: CityId) -> Result<City>;
    async fn create_city(&self, new_city: &NewCity) -> Result<City>;
    async fn delete_city(&self, id: CityId) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HttpCityService {
    http: Client,
    base_url: String,
}

impl HttpCityService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cities_url(&self) -> String {
        format!("{}/cities", self.base_url)
    }

    fn city_url(&self, id: CityId) -> String {
        format!("{}/cities/{id}", self.base_url)
    }
}

#[async_trait]
impl CityService for HttpCityService {
    async fn list_cities(&self) -> Result<Vec<City>> {
        let url = self.cities_url();
        debug!(url = %url, "service: GET cities");
        let cities = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()?
            .json::<Vec<City>>()
            .await
            .context("invalid city list body")?;
        Ok(cities)
    }

    async fn get_city(&self, id: CityId) -> Result<City> {
        let url = self.city_url(id);
        debug!(url = %url, city_id = id.0, "service: GET city");
        let city = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()?
            .json::<City>()
            .await
            .context("invalid city body")?;
        Ok(city)
    }

    async fn create_city(&self, new_city: &NewCity) -> Result<City> {
        let url = self.cities_url();
        debug!(url = %url, city = %new_city.name, "service: POST city");
        // `.json` sets `Content-Type: application/json`.
        let city = self
            .http
            .post(&url)
            .json(new_city)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?
            .error_for_status()?
            .json::<City>()
            .await
            .context("invalid created city body")?;
        Ok(city)
    }

    async fn delete_city(&self, id: CityId) -> Result<()> {
        let url = self.city_url(id);
        debug!(url = %url, city_id = id.0, "service: DELETE city");
        self.http
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("DELETE {url} failed"))?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
