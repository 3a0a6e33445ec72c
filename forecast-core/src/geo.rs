use async_trait::async_trait;

use crate::model::Coordinates;

/// Source of the user's current position. `None` means denied or unavailable.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Option<Coordinates>;
}

/// Position known ahead of time (command-line flags or config).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Option<Coordinates> {
        self.0
    }
}
