use std::time::Instant;

// Each search profile carries a flat per-move time budget in milliseconds;
// there is no game clock, move-count estimation, or panic-time extension.
pub struct TimeManager {
    budget_ms: u64,
    start: Instant,
}

impl TimeManager {
    pub fn new(time_ms: u64) -> Self {
        Self { budget_ms: time_ms, start: Instant::now() }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed_ms() >= self.budget_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_time_manager_is_not_expired() {
        let tm = TimeManager::new(1000);
        assert!(!tm.is_expired());
    }

    #[test]
    fn a_zero_budget_expires_immediately() {
        let tm = TimeManager::new(0);
        assert!(tm.is_expired());
    }
}
