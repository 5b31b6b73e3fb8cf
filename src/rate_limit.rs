//! Question rate limiting
//!
//! Caps how often the expensive generation fallback may run: per-hour and
//! per-day counters backed by a persistent string-keyed store. Callers charge
//! the quota themselves by calling [`RateLimiter::log_question`] at the point
//! they commit to the chargeable path; matcher hits and predefined answers
//! are never charged.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use chrono::DateTime;
use chrono::Duration;
use chrono::Local;
use chrono::Timelike;
use chrono::Utc;
use dashmap::DashMap;
use tracing::warn;

use crate::config::RateLimitConfig;
use crate::errors::Result;
use crate::models::QuestionLogEntry;

const HOURLY_PREFIX: &str = "chatbot_rate_limit_hourly";
const DAILY_PREFIX: &str = "chatbot_rate_limit_daily";

/// Persistent counter store: string-keyed JSON blobs, tolerant of absence
pub trait CounterStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory counter store backed by a concurrent map
#[derive(Default)]
pub struct MemoryCounterStore {
    entries: DashMap<String, String>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|e| e.key().clone()).collect())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Counter store persisted as a single JSON file
///
/// The CLI counterpart of the browser localStorage the original counters
/// lived in. Read-modify-write is guarded by a process-local mutex; counting
/// is an abuse deterrent, not a billing-grade meter.
pub struct FileCounterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<std::collections::HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content).unwrap_or_default()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Default::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, map: &std::collections::HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(map)?)?;
        Ok(())
    }
}

impl CounterStore for FileCounterStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().expect("counter store lock");
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().expect("counter store lock");
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().expect("counter store lock");
        Ok(self.load()?.keys().cloned().collect())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().expect("counter store lock");
        let mut map = self.load()?;
        map.remove(key);
        self.save(&map)
    }
}

/// Outcome of a rate-limit check
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Human-readable denial reason naming the concrete reset time
    pub reason: Option<String>,
    pub remaining: Option<u32>,
}

/// Remaining quota per window, floored at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingQuestions {
    pub hourly: u32,
    pub daily: u32,
}

/// Hour- and day-bucketed question counter
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Arc<dyn CounterStore>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, store: Arc<dyn CounterStore>) -> Self {
        Self { config, store }
    }

    /// Check whether another chargeable question is allowed right now
    pub fn can_ask_question(&self) -> RateLimitDecision {
        self.can_ask_question_at(Local::now())
    }

    /// Clock-injected variant of [`Self::can_ask_question`]
    pub fn can_ask_question_at(&self, now: DateTime<Local>) -> RateLimitDecision {
        let hourly_count = self.bucket_count(&hour_key(now), now);
        if hourly_count >= self.config.max_questions_per_hour {
            let minutes = minutes_until_next_hour(now);
            return RateLimitDecision {
                allowed: false,
                reason: Some(format!(
                    "시간당 질문 제한에 도달했습니다. {minutes}분 후 다시 시도해주세요."
                )),
                remaining: Some(0),
            };
        }

        let daily_count = self.bucket_count(&day_key(now), now);
        if daily_count >= self.config.max_questions_per_day {
            let hours = hours_until_next_day(now);
            return RateLimitDecision {
                allowed: false,
                reason: Some(format!(
                    "일일 질문 제한에 도달했습니다. {hours}시간 후 다시 시도해주세요."
                )),
                remaining: Some(0),
            };
        }

        RateLimitDecision {
            allowed: true,
            reason: None,
            remaining: Some(
                (self.config.max_questions_per_hour - hourly_count)
                    .min(self.config.max_questions_per_day - daily_count),
            ),
        }
    }

    /// Record one chargeable question in the current hour and day buckets
    pub fn log_question(&self) -> Result<()> {
        self.log_question_at(Local::now())
    }

    /// Clock-injected variant of [`Self::log_question`]
    pub fn log_question_at(&self, now: DateTime<Local>) -> Result<()> {
        let entry = QuestionLogEntry {
            timestamp: now.with_timezone(&Utc),
            count: 1,
        };

        for key in [hour_key(now), day_key(now)] {
            let mut logs = self.load_logs(&key, now);
            logs.push(entry.clone());
            self.store.set(&key, &serde_json::to_string(&logs)?)?;
        }

        Ok(())
    }

    /// Remaining hourly and daily quota, floored at zero
    pub fn remaining_questions(&self) -> RemainingQuestions {
        self.remaining_questions_at(Local::now())
    }

    /// Clock-injected variant of [`Self::remaining_questions`]
    pub fn remaining_questions_at(&self, now: DateTime<Local>) -> RemainingQuestions {
        let hourly_count = self.bucket_count(&hour_key(now), now);
        let daily_count = self.bucket_count(&day_key(now), now);

        RemainingQuestions {
            hourly: self.config.max_questions_per_hour.saturating_sub(hourly_count),
            daily: self.config.max_questions_per_day.saturating_sub(daily_count),
        }
    }

    /// Clear every persisted bucket (test/operator utility)
    pub fn reset(&self) -> Result<()> {
        for key in self.store.keys()? {
            if key.starts_with(HOURLY_PREFIX) || key.starts_with(DAILY_PREFIX) {
                self.store.remove(&key)?;
            }
        }
        Ok(())
    }

    fn bucket_count(&self, key: &str, now: DateTime<Local>) -> u32 {
        self.load_logs(key, now).iter().map(|log| log.count).sum()
    }

    /// Load a bucket, pruning entries older than 24 hours
    fn load_logs(&self, key: &str, now: DateTime<Local>) -> Vec<QuestionLogEntry> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Counter store read failed for {}: {}", key, e);
                return Vec::new();
            }
        };

        let logs: Vec<QuestionLogEntry> = serde_json::from_str(&raw).unwrap_or_default();
        let one_day_ago = now.with_timezone(&Utc) - Duration::hours(24);
        logs.into_iter()
            .filter(|log| log.timestamp > one_day_ago)
            .collect()
    }
}

fn hour_key(now: DateTime<Local>) -> String {
    format!("{HOURLY_PREFIX}_{}", now.format("%Y-%m-%d-%H"))
}

fn day_key(now: DateTime<Local>) -> String {
    format!("{DAILY_PREFIX}_{}", now.format("%Y-%m-%d"))
}

fn minutes_until_next_hour(now: DateTime<Local>) -> i64 {
    let seconds_into_hour = i64::from(now.minute()) * 60 + i64::from(now.second());
    let seconds_left = 3600 - seconds_into_hour;
    // Ceiling division so "0 minutes" is never reported
    (seconds_left + 59) / 60
}

fn hours_until_next_day(now: DateTime<Local>) -> i64 {
    let seconds_into_day = i64::from(now.num_seconds_from_midnight());
    let seconds_left = 86_400 - seconds_into_day;
    (seconds_left + 3599) / 3600
}
