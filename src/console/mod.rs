// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bounded ring of console messages forwarded from the patcher.
//!
//! Process-scoped state owned by the facade; constructed once, never
//! implicitly reset. Reads can filter by minimum level and page through
//! entries since the previous read.

use std::collections::VecDeque;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Entries kept before the oldest are evicted.
pub const CONSOLE_BUFFER_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Classifies a raw console line by its text.
    pub fn detect(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("error") {
            Self::Error
        } else if lower.contains("warning") {
            Self::Warning
        } else {
            Self::Info
        }
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(UnknownLevel(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl std::fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown console level '{}'", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleEntry {
    pub id: u64,
    pub level: LogLevel,
    pub message: String,
    pub timestamp_unix_ms: u64,
}

/// One page of console messages plus whether unread entries were evicted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolePage {
    pub messages: Vec<ConsoleEntry>,
    pub overflow: bool,
}

#[derive(Debug)]
pub struct ConsoleRing {
    entries: VecDeque<ConsoleEntry>,
    next_id: u64,
    last_read_id: i64,
}

impl ConsoleRing {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 0,
            last_read_id: -1,
        }
    }

    /// Appends a message, detecting its level and evicting from the front
    /// once the buffer limit is reached.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        let entry = ConsoleEntry {
            id: self.next_id,
            level: LogLevel::detect(&message),
            message,
            timestamp_unix_ms: unix_millis(),
        };
        self.next_id += 1;
        self.entries.push_back(entry);
        if self.entries.len() > CONSOLE_BUFFER_LIMIT {
            self.entries.pop_front();
        }
    }

    /// Entries at or above `min_level`. With `since_last_call`, only entries
    /// newer than the previous such read are returned, and `overflow` is set
    /// when eviction dropped entries that were never read.
    pub fn messages(&mut self, min_level: LogLevel, since_last_call: bool) -> ConsolePage {
        let start_id = if since_last_call { self.last_read_id } else { -1 };

        let messages = self
            .entries
            .iter()
            .filter(|entry| entry.id as i64 > start_id && entry.level >= min_level)
            .cloned()
            .collect::<Vec<_>>();

        let overflow = since_last_call
            && self
                .entries
                .front()
                .is_some_and(|first| first.id as i64 > self.last_read_id + 1);

        if since_last_call {
            if let Some(last) = self.entries.back() {
                self.last_read_id = last.id as i64;
            }
        }

        ConsolePage { messages, overflow }
    }
}

impl Default for ConsoleRing {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConsoleRing, LogLevel, CONSOLE_BUFFER_LIMIT};

    #[rstest]
    #[case("plain status line", LogLevel::Info)]
    #[case("Warning: clipping on dac~", LogLevel::Warning)]
    #[case("script error: no such object", LogLevel::Error)]
    fn level_detection_matches_message_text(#[case] message: &str, #[case] expected: LogLevel) {
        assert_eq!(LogLevel::detect(message), expected);
    }

    #[test]
    fn min_level_filter_is_inclusive() {
        let mut ring = ConsoleRing::new();
        ring.push("info line");
        ring.push("warning line");
        ring.push("error line");

        let page = ring.messages(LogLevel::Warning, false);
        let levels = page.messages.iter().map(|entry| entry.level).collect::<Vec<_>>();
        assert_eq!(levels, vec![LogLevel::Warning, LogLevel::Error]);
    }

    #[test]
    fn since_last_call_pages_forward() {
        let mut ring = ConsoleRing::new();
        ring.push("first");

        let page = ring.messages(LogLevel::Info, true);
        assert_eq!(page.messages.len(), 1);
        assert!(!page.overflow);

        ring.push("second");
        let page = ring.messages(LogLevel::Info, true);
        assert_eq!(page.messages.len(), 1);
        assert_eq!(page.messages[0].message, "second");

        let page = ring.messages(LogLevel::Info, true);
        assert!(page.messages.is_empty());
    }

    #[test]
    fn eviction_of_unread_entries_reports_overflow() {
        let mut ring = ConsoleRing::new();
        for index in 0..(CONSOLE_BUFFER_LIMIT + 5) {
            ring.push(format!("line {index}"));
        }

        let page = ring.messages(LogLevel::Info, true);
        assert_eq!(page.messages.len(), CONSOLE_BUFFER_LIMIT);
        assert!(page.overflow);

        ring.push("after");
        let page = ring.messages(LogLevel::Info, true);
        assert_eq!(page.messages.len(), 1);
        assert!(!page.overflow);
    }

    #[test]
    fn full_read_does_not_advance_the_cursor() {
        let mut ring = ConsoleRing::new();
        ring.push("kept");

        let page = ring.messages(LogLevel::Info, false);
        assert_eq!(page.messages.len(), 1);

        let page = ring.messages(LogLevel::Info, true);
        assert_eq!(page.messages.len(), 1);
    }
}
