//! Conversion from payload DTOs into domain entities.

use crate::domain::{PlaybackPosition, QueueSnapshot, TrackView};

use super::payload::{PositionData, QueueData, TrackPayload};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<TrackPayload> for TrackView {
    fn from(dto: TrackPayload) -> Self {
        Self {
            thumbnail_url: dto.thumbnail,
            title: dto.title,
            source_uri: dto.uri,
            author: dto.author,
            length_ms: dto.length,
            requester_name: dto.requester_name,
        }
    }
}

impl PositionData {
    /// `None` when the reported position is zero.
    pub fn to_domain(self) -> Option<PlaybackPosition> {
        PlaybackPosition::from_report(self.position, self.length)
    }
}

/// Build a queue snapshot from the decoded queue document.
///
/// A missing document or a null queue both produce an empty snapshot.
/// Only the first `capacity` entries are read.
pub fn queue_snapshot(queue: Option<QueueData>, capacity: usize) -> QueueSnapshot {
    let entries = queue
        .and_then(|document| document.queue)
        .map(|entries| entries.into_ordered(capacity))
        .unwrap_or_default();

    QueueSnapshot::new(
        entries
            .into_iter()
            .map(|entry| entry.map(TrackView::from))
            .collect(),
    )
}
