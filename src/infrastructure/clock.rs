use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, Mutex};

/// Hands out insert timestamps that never repeat or go backwards, even when
/// the wall clock does.
#[derive(Debug, Default, Clone)]
pub struct MonotonicClock {
    last: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Utc::now();
        let ts = match *last {
            Some(prev) if now <= prev => prev + TimeDelta::microseconds(1),
            _ => now,
        };
        *last = Some(ts);
        ts
    }
}
