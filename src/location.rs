//! Location resolution for the forecast fetch
//!
//! The aggregation core only ever needs final coordinates; how they were
//! obtained is a collaborator concern. The provider is an injected trait
//! rather than a global service so the orchestration layer stays testable
//! and the core carries no hidden state.

use thiserror::Error;

/// Geographic coordinates handed to the feed client
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Errors a location provider can report
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The user refused to share a location
    #[error("Location access denied by the user")]
    Denied,

    /// The platform forbids location access for this process
    #[error("Location access restricted by the operating system")]
    Restricted,

    /// The provider failed for another reason
    #[error("Location lookup failed: {0}")]
    Failed(String),
}

/// Source of the coordinates the forecast is fetched for.
///
/// Implementations may prompt the user, read a GPS fix or just return a
/// configured pair; the orchestration layer does not care which.
pub trait LocationProvider {
    /// Resolves the coordinates to fetch a forecast for.
    fn resolve(&self) -> Result<Coordinates, LocationError>;
}

/// Provider backed by coordinates supplied up front (e.g. CLI arguments)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn resolve(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_location_returns_its_coordinates() {
        let provider = FixedLocation(Coordinates {
            latitude: 47.0105,
            longitude: 28.8638,
        });
        let coords = provider.resolve().expect("fixed location cannot fail");
        assert!((coords.latitude - 47.0105).abs() < 1e-9);
        assert!((coords.longitude - 28.8638).abs() < 1e-9);
    }

    /// Provider double exercising the failure paths a real GPS-backed
    /// implementation would produce.
    struct DeniedProvider;

    impl LocationProvider for DeniedProvider {
        fn resolve(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::Denied)
        }
    }

    #[test]
    fn test_provider_errors_propagate() {
        let result = DeniedProvider.resolve();
        assert_eq!(result, Err(LocationError::Denied));
    }
}
