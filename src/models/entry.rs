#![allow(dead_code)]
use serde::{Deserialize, Serialize};

/// One dated measurement for a tracked metric. The date is a calendar day
/// (`YYYY-MM-DD`); older exports may carry a full RFC 3339 instant instead,
/// which downstream consumers truncate to the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub value: f64,
}

impl Entry {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}
