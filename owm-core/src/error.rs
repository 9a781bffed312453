use thiserror::Error;

use crate::address::RequestKind;

/// The single error callers see when weather data could not be obtained.
///
/// The display text is fixed per [`RequestKind`]; the underlying cause is
/// available through [`std::error::Error::source`] and [`WeatherNotFoundError::cause`].
#[derive(Debug, Error)]
#[error("{}", .kind.not_found_message())]
pub struct WeatherNotFoundError {
    kind: RequestKind,
    #[source]
    cause: FetchError,
}

impl WeatherNotFoundError {
    pub fn new(kind: RequestKind, cause: impl Into<FetchError>) -> Self {
        Self { kind, cause: cause.into() }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn cause(&self) -> &FetchError {
        &self.cause
    }
}

/// Everything that can go wrong between building an address and parsing the body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid location: {0}")]
    Address(#[from] AddressError),
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddressError {
    #[error("City name cannot be empty")]
    EmptyCityName,
    #[error("Country code cannot be empty")]
    EmptyCountryCode,
    #[error("Coordinates must be finite, got lat={latitude}, lon={longitude}")]
    NonFiniteCoordinates { latitude: f32, longitude: f32 },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}
