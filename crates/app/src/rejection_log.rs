//! Bounded log of rejected poll events.

use std::collections::VecDeque;

use serde_json::Value;
use shc_domain::error::ValidationError;
use shc_domain::time::{Timestamp, now};

/// A poll event that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEvent {
    /// Index of the event within its cycle.
    pub position: usize,
    pub received_at: Timestamp,
    /// The event as received.
    pub event: Value,
    pub error: ValidationError,
}

impl RejectedEvent {
    #[must_use]
    pub fn new(position: usize, event: Value, error: ValidationError) -> Self {
        Self {
            position,
            received_at: now(),
            event,
            error,
        }
    }
}

/// Keeps the most recent rejections, dropping the oldest beyond `capacity`.
#[derive(Debug, Clone)]
pub struct RejectionLog {
    capacity: usize,
    entries: VecDeque<RejectedEvent>,
    total: u64,
}

impl RejectionLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            total: 0,
        }
    }

    pub fn push(&mut self, rejected: RejectedEvent) {
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(rejected);
    }

    /// Retained rejections, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RejectedEvent> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rejections recorded since creation, including dropped ones.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }
}
