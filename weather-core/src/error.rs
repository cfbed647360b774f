use reqwest::StatusCode;
use thiserror::Error;

/// Shown when either half of a weather fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Could not fetch weather data. Try another location.";
pub const LOCATION_DENIED_MESSAGE: &str = "Location access denied or unavailable.";
pub const LOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported on this device.";

/// Failure talking to the weather provider or the favorites service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to send request to {endpoint}: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Location permission denied")]
    GeolocationDenied,

    #[error("Geolocation is not available")]
    GeolocationUnsupported,

    #[error("Favorites sync failed: {0}")]
    FavoritesSync(#[source] TransportError),
}

impl Error {
    /// Message for the error banner, for the kinds that are ever surfaced.
    ///
    /// Favorites failures are recovered silently and have no banner text.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Error::Transport(_) => Some(FETCH_ERROR_MESSAGE),
            Error::GeolocationDenied => Some(LOCATION_DENIED_MESSAGE),
            Error::GeolocationUnsupported => Some(LOCATION_UNSUPPORTED_MESSAGE),
            Error::FavoritesSync(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
