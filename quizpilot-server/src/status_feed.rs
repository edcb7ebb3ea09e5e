//! Bounded in-memory feed of engine status notices.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use quizpilot_core::StatusReporter;
use quizpilot_types::{StatusLevel, StatusUpdate};
use serde::Serialize;

const MAX_EVENTS: usize = 200;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusEvent {
    pub id: u64,
    /// Unix millis
    pub timestamp: i64,
    pub message: String,
    pub level: StatusLevel,
}

pub struct StatusFeed {
    events: Mutex<VecDeque<StatusEvent>>,
    next_id: Mutex<u64>,
}

impl StatusFeed {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(MAX_EVENTS)),
            next_id: Mutex::new(1),
        }
    }

    pub fn push(&self, update: StatusUpdate) {
        let id = {
            let mut next = self.next_id.lock();
            let id = *next;
            *next += 1;
            id
        };
        let event = StatusEvent {
            id,
            timestamp: chrono::Utc::now().timestamp_millis(),
            message: update.message,
            level: update.level,
        };

        let mut events = self.events.lock();
        if events.len() >= MAX_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Most recent events first, at most `limit`, only those newer than `since`.
    pub fn recent(&self, limit: usize, since: Option<u64>) -> Vec<StatusEvent> {
        self.events
            .lock()
            .iter()
            .rev()
            .filter(|e| since.map_or(true, |s| e.id > s))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StatusReporter for StatusFeed {
    async fn report(&self, update: StatusUpdate) -> bool {
        self.push(update);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_is_bounded_and_newest_first() {
        let feed = StatusFeed::new();
        for i in 0..250 {
            feed.push(StatusUpdate::new(StatusLevel::Info, format!("notice {i}")));
        }

        let all = feed.recent(usize::MAX, None);
        assert_eq!(all.len(), 200);
        assert_eq!(all[0].message, "notice 249");
        assert_eq!(all[199].message, "notice 50");

        let newer = feed.recent(10, Some(245));
        assert_eq!(newer.iter().map(|e| e.id).collect::<Vec<_>>(), vec![250, 249, 248, 247, 246]);
    }
}
