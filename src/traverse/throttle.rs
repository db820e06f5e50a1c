use std::time::Duration;

/// Fixed pause taken before each collection detail request.
///
/// Since the traversal is sequential, pausing before every call also guarantees at
/// least `delay` between consecutive calls.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
