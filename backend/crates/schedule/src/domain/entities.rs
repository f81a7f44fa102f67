//! Schedule Document
//!
//! `videoIndex`/`delay` are the only named fields; anything else a client
//! stores on an entry is kept as-is. Both are kept as the JSON number the
//! client sent (negative or fractional included) since the server never does
//! arithmetic on them.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Candidate gaps between rotations
pub const REFRESH_INTERVALS_MS: [i64; 3] = [HOUR_MS, 5 * HOUR_MS, 24 * HOUR_MS];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub video_index: Number,
    /// Milliseconds before playback; absent reads as 0
    #[serde(default = "zero")]
    pub delay: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScheduleEntry {
    pub fn new(video_index: u64, delay: u64) -> Self {
        Self {
            video_index: video_index.into(),
            delay: delay.into(),
            extra: Map::new(),
        }
    }
}

fn zero() -> Number {
    Number::from(0u64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    pub schedule: Vec<ScheduleEntry>,
    /// Epoch ms; a document without one is due immediately
    #[serde(default)]
    pub next_refresh: i64,
}

impl ScheduleDocument {
    /// New document with a freshly drawn refresh time
    pub fn new<G: Rng + ?Sized>(schedule: Vec<ScheduleEntry>, now_ms: i64, rng: &mut G) -> Self {
        Self {
            schedule,
            next_refresh: draw_next_refresh(now_ms, rng),
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        now_ms >= self.next_refresh
    }

    /// Shuffle the entries and push the refresh time forward
    pub fn rotate<G: Rng + ?Sized>(&mut self, now_ms: i64, rng: &mut G) {
        self.schedule.shuffle(rng);
        self.next_refresh = draw_next_refresh(now_ms, rng);
    }

    /// Swap in new entries; order is kept until the next rotation
    pub fn replace<G: Rng + ?Sized>(
        &mut self,
        schedule: Vec<ScheduleEntry>,
        now_ms: i64,
        rng: &mut G,
    ) {
        self.schedule = schedule;
        self.next_refresh = draw_next_refresh(now_ms, rng);
    }
}

/// Shape of the file on disk
///
/// Older deployments wrote the bare entry array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredSchedule {
    Document(ScheduleDocument),
    Legacy(Vec<ScheduleEntry>),
}

pub fn draw_next_refresh<G: Rng + ?Sized>(now_ms: i64, rng: &mut G) -> i64 {
    let gap = REFRESH_INTERVALS_MS[rng.random_range(0..REFRESH_INTERVALS_MS.len())];
    now_ms.saturating_add(gap)
}

/// Entries `0..count`, no delay
pub fn default_schedule(count: u64) -> Vec<ScheduleEntry> {
    (0..count).map(|i| ScheduleEntry::new(i, 0)).collect()
}
