//! Domain entities for the dashboard view.
//!
//! All entities are transient: they live only for the duration of one
//! message handler and are never persisted.

/// Number of queue slots on the dashboard, independent of the real queue length.
pub const QUEUE_DISPLAY_SLOTS: usize = 4;

/// A track as shown in the current-track region or a queue slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackView {
    pub thumbnail_url: String,
    pub title: String,
    pub source_uri: String,
    pub author: String,
    pub length_ms: u64,
    pub requester_name: String,
}

/// One fixed-index queue display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueSlot {
    Populated(TrackView),
    Empty,
}

/// Queue contents as received from the gateway.
///
/// `None` entries stand for indices the server did not fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    entries: Vec<Option<TrackView>>,
}

impl QueueSnapshot {
    pub fn new(entries: Vec<Option<TrackView>>) -> Self {
        Self { entries }
    }

    /// A snapshot for a null queue: every slot renders empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Project the snapshot onto exactly `capacity` display slots.
    ///
    /// Entries past `capacity` are truncated; indices without a track are empty.
    pub fn slots(&self, capacity: usize) -> Vec<QueueSlot> {
        (0..capacity)
            .map(|index| match self.entries.get(index) {
                Some(Some(track)) => QueueSlot::Populated(track.clone()),
                _ => QueueSlot::Empty,
            })
            .collect()
    }
}

/// Playback progress of the current track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPosition {
    pub position_ms: u64,
    pub length_ms: u64,
}

impl PlaybackPosition {
    /// Build a position from a gateway report.
    ///
    /// Returns `None` when the reported position is exactly zero, which means
    /// there is no active position regardless of the length.
    pub fn from_report(position: f64, length: f64) -> Option<Self> {
        if position == 0.0 {
            return None;
        }
        Some(Self {
            position_ms: round_millis(position),
            length_ms: round_millis(length),
        })
    }

    /// Progress bar fill in percent, clamped to `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        if self.length_ms == 0 {
            return 0.0;
        }
        let percent = 100.0 * self.position_ms as f64 / self.length_ms as f64;
        percent.clamp(0.0, 100.0)
    }
}

fn round_millis(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Opaque session identifier forwarded to the gateway during the handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionIdentity(String);

impl ConnectionIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
