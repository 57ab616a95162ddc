use std::time::Duration;
use tokio::time::sleep;

/// Pause applied after every remote call to stay under the service's rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throttle {
    /// No pause between calls.
    Disabled,
    /// Sleep for a fixed duration after each call.
    Fixed(Duration),
}

impl Throttle {
    /// Builds a throttle from a millisecond delay; `0` disables it.
    pub fn from_millis(delay_ms: u64) -> Self {
        if delay_ms == 0 {
            Self::Disabled
        } else {
            Self::Fixed(Duration::from_millis(delay_ms))
        }
    }

    pub fn delay(&self) -> Duration {
        match self {
            Self::Disabled => Duration::ZERO,
            Self::Fixed(d) => *d,
        }
    }

    pub async fn pause(&self) {
        if let Self::Fixed(d) = self {
            sleep(*d).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::Fixed(Duration::from_millis(crate::constants::DEFAULT_DELAY_MS))
    }
}
