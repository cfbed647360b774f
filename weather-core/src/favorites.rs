//! Favorite cities: the remote service boundary and the client-side cache.

use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};
use tracing::{info, warn};

use crate::{
    error::{Error, Result, TransportError},
    http::{get_json, http_client, send_checked},
    model::{FavoriteCity, NewFavorite, WeatherSnapshot},
    state::SharedState,
};

pub const DEFAULT_FAVORITES_URL: &str = "http://localhost:5000";

#[async_trait]
pub trait FavoritesService: Send + Sync + Debug {
    async fn list(&self) -> Result<Vec<FavoriteCity>, TransportError>;

    async fn create(&self, city: &NewFavorite) -> Result<FavoriteCity, TransportError>;

    async fn delete(&self, id: &str) -> Result<(), TransportError>;
}

/// REST client for `/api/cities`.
#[derive(Debug, Clone)]
pub struct HttpFavoritesService {
    base_url: String,
    http: Client,
}

impl HttpFavoritesService {
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client()?,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/cities", self.base_url)
    }
}

#[async_trait]
impl FavoritesService for HttpFavoritesService {
    async fn list(&self) -> Result<Vec<FavoriteCity>, TransportError> {
        get_json(self.http.get(self.collection_url()), "favorites list").await
    }

    async fn create(&self, city: &NewFavorite) -> Result<FavoriteCity, TransportError> {
        let request = self.http.post(self.collection_url()).json(city);
        get_json(request, "favorites create").await
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        let url = format!("{}/{id}", self.collection_url());
        send_checked(self.http.delete(url), "favorites delete").await?;
        Ok(())
    }
}

/// Case-insensitive name match between the displayed snapshot and the favorites.
pub fn find_favorite<'a>(
    snapshot: Option<&WeatherSnapshot>,
    favorites: &'a [FavoriteCity],
) -> Option<&'a FavoriteCity> {
    let name = snapshot?.name.to_lowercase();
    favorites.iter().find(|city| city.name.to_lowercase() == name)
}

/// Local copy of the favorites list. The local list changes only after the
/// service has acknowledged the change; failures are logged and leave it as is.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    service: Arc<dyn FavoritesService>,
    state: SharedState,
}

impl FavoritesStore {
    pub fn new(service: Arc<dyn FavoritesService>, state: SharedState) -> Self {
        Self { service, state }
    }

    pub async fn load(&self) -> Result<Vec<FavoriteCity>> {
        match self.service.list().await {
            Ok(favorites) => {
                info!(count = favorites.len(), "loaded favorites");
                self.state.lock().favorites = favorites.clone();
                Ok(favorites)
            }
            Err(err) => {
                warn!(error = %err, "failed to load favorites");
                Err(Error::FavoritesSync(err))
            }
        }
    }

    pub async fn add(&self, city: NewFavorite) -> Result<FavoriteCity> {
        match self.service.create(&city).await {
            Ok(record) => {
                info!(id = %record.id, name = %record.name, "added favorite");
                self.state.lock().favorites.push(record.clone());
                Ok(record)
            }
            Err(err) => {
                warn!(name = %city.name, error = %err, "failed to add favorite");
                Err(Error::FavoritesSync(err))
            }
        }
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                info!(%id, "removed favorite");
                self.state.lock().favorites.retain(|city| city.id != id);
                Ok(())
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to remove favorite");
                Err(Error::FavoritesSync(err))
            }
        }
    }

    pub fn favorites(&self) -> Vec<FavoriteCity> {
        self.state.lock().favorites.clone()
    }
}
