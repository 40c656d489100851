use crate::domain::model::Coordinate;
use crate::domain::ports::LocationProvider;
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::validate_coordinate;
use async_trait::async_trait;

/// A device capability backed by a coordinate known up front (e.g. from CLI flags).
/// `None` behaves like a user who refused the permission prompt.
#[derive(Debug, Clone, Default)]
pub struct FixedLocationProvider {
    coordinate: Option<Coordinate>,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }

    pub fn denied() -> Self {
        Self { coordinate: None }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> Result<Coordinate> {
        self.coordinate.ok_or_else(|| LocatorError::LocationDenied {
            reason: "no device position available".to_string(),
        })
    }
}

pub struct LocationResolver<L: LocationProvider> {
    provider: L,
}

impl<L: LocationProvider> LocationResolver<L> {
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// Single request; any provider error or out-of-range fix is reported as `LocationDenied`.
    pub async fn resolve(&self) -> Result<Coordinate> {
        tracing::debug!("Requesting device position");
        let coordinate = match self.provider.current_position().await {
            Ok(coordinate) => coordinate,
            Err(LocatorError::LocationDenied { reason }) => {
                return Err(LocatorError::LocationDenied { reason })
            }
            Err(e) => {
                return Err(LocatorError::LocationDenied {
                    reason: e.to_string(),
                })
            }
        };

        validate_coordinate("device_position", &coordinate).map_err(|e| {
            LocatorError::LocationDenied {
                reason: e.to_string(),
            }
        })?;

        tracing::debug!("Device position resolved: {}", coordinate);
        Ok(coordinate)
    }
}
