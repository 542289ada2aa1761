use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Produces jittered delays between navigations so page walks read like a
/// person paging through a document rather than a tight loop.
#[derive(Debug, Clone)]
pub struct Pacing {
    min_ms: u64,
    max_ms: u64,
}

impl Pacing {
    /// Build a pacer with the given settle bounds in milliseconds. Inverted
    /// bounds are swapped rather than rejected.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self { min_ms, max_ms }
    }

    /// Sleep for a random duration inside the configured settle bounds.
    pub async fn settle(&self) {
        self.delay(self.min_ms, self.max_ms).await;
    }

    /// Sleep for a random duration between `min` and `max` milliseconds.
    pub async fn delay(&self, min: u64, max: u64) {
        let mut rng = OsRng;
        let ms = rng.gen_range(min..=max);
        sleep(Duration::from_millis(ms)).await;
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(800, 1500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_bounds_are_swapped() {
        let p = Pacing::new(2000, 100);
        assert_eq!(p.min_ms, 100);
        assert_eq!(p.max_ms, 2000);
    }
}
