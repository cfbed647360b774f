use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    Config,
    error::{Error, Result},
    model::{Coordinates, LocationQuery},
};

/// Platform location capability. One call is one position request.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates>;
}

/// Always reports the same position, e.g. one taken from config or flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates> {
        let Coordinates {
            latitude,
            longitude,
        } = self.0;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::GeolocationUnsupported);
        }
        Ok(self.0)
    }
}

/// No location capability on this device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl LocationSource for Unsupported {
    async fn current_position(&self) -> Result<Coordinates> {
        Err(Error::GeolocationUnsupported)
    }
}

/// Location sharing switched off by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Denied;

#[async_trait]
impl LocationSource for Denied {
    async fn current_position(&self) -> Result<Coordinates> {
        Err(Error::GeolocationDenied)
    }
}

pub fn location_source_from_config(config: &Config) -> Arc<dyn LocationSource> {
    if config.share_location == Some(false) {
        return Arc::new(Denied);
    }
    match config.location {
        Some(coordinates) => Arc::new(FixedLocation(coordinates)),
        None => Arc::new(Unsupported),
    }
}

/// Ask the source once and turn the answer into a coordinate query.
pub async fn resolve_location(source: &dyn LocationSource) -> Result<LocationQuery> {
    let coordinates = source.current_position().await?;
    Ok(LocationQuery::Coordinates(coordinates))
}
