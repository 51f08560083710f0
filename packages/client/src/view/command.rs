//! Render commands addressed to the dashboard's display elements.
//!
//! Every builder here produces absolute values, so applying the same list
//! twice leaves the display as applying it once, and a clear never depends on
//! what was rendered before.

use std::fmt;

use crate::{
    domain::{PlaybackPosition, QueueSlot, QueueSnapshot, TrackView},
    time::TimeFormat,
};

/// Image shown when no track occupies a region.
pub const NO_IMAGE_URL: &str = "https://media.mrrandom.xyz/no_image320x180.png";
/// Title of the current-track region without a track.
pub const NO_CURRENT_TRACK: &str = "No current track";
/// Title of an empty queue slot.
pub const EMPTY_QUEUE_SLOT: &str = "Empty queue slot";
/// Link target of a title without a track.
pub const INERT_LINK: &str = "#";

/// Display element, rendered as its literal DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    CurrentThumbnail,
    CurrentTitle,
    CurrentAuthor,
    CurrentLength,
    CurrentRequester,
    CurrentPosition,
    CurrentProgress,
    CurrentProgressBar,
    QueueThumbnail(usize),
    QueueTitle(usize),
    QueueAuthor(usize),
    QueueLength(usize),
    QueueRequester(usize),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::CurrentThumbnail => f.write_str("CurrentThumbnail"),
            ElementId::CurrentTitle => f.write_str("CurrentTitle"),
            ElementId::CurrentAuthor => f.write_str("CurrentAuthor"),
            ElementId::CurrentLength => f.write_str("CurrentLength"),
            ElementId::CurrentRequester => f.write_str("CurrentRequester"),
            ElementId::CurrentPosition => f.write_str("CurrentPosition"),
            ElementId::CurrentProgress => f.write_str("CurrentProgress"),
            ElementId::CurrentProgressBar => f.write_str("CurrentProgressBar"),
            ElementId::QueueThumbnail(index) => write!(f, "QueueThumbnail{}", index),
            ElementId::QueueTitle(index) => write!(f, "QueueTitle{}", index),
            ElementId::QueueAuthor(index) => write!(f, "QueueAuthor{}", index),
            ElementId::QueueLength(index) => write!(f, "QueueLength{}", index),
            ElementId::QueueRequester(index) => write!(f, "QueueRequester{}", index),
        }
    }
}

/// A single mutation of one display element.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Image source
    SetSource { element: ElementId, url: String },
    /// Text content
    SetText { element: ElementId, text: String },
    /// Link target
    SetLink { element: ElementId, href: String },
    /// Fill width in percent
    SetWidth { element: ElementId, percent: f64 },
    /// Visibility
    SetVisible { element: ElementId, visible: bool },
}

impl RenderCommand {
    pub fn element(&self) -> ElementId {
        match self {
            RenderCommand::SetSource { element, .. }
            | RenderCommand::SetText { element, .. }
            | RenderCommand::SetLink { element, .. }
            | RenderCommand::SetWidth { element, .. }
            | RenderCommand::SetVisible { element, .. } => *element,
        }
    }

    fn source(element: ElementId, url: impl Into<String>) -> Self {
        RenderCommand::SetSource {
            element,
            url: url.into(),
        }
    }

    fn text(element: ElementId, text: impl Into<String>) -> Self {
        RenderCommand::SetText {
            element,
            text: text.into(),
        }
    }

    fn link(element: ElementId, href: impl Into<String>) -> Self {
        RenderCommand::SetLink {
            element,
            href: href.into(),
        }
    }
}

/// The element set showing one track: the current track or a queue slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackElements {
    pub thumbnail: ElementId,
    pub title: ElementId,
    pub author: ElementId,
    pub length: ElementId,
    pub requester: ElementId,
    placeholder_title: &'static str,
}

impl TrackElements {
    pub fn current() -> Self {
        Self {
            thumbnail: ElementId::CurrentThumbnail,
            title: ElementId::CurrentTitle,
            author: ElementId::CurrentAuthor,
            length: ElementId::CurrentLength,
            requester: ElementId::CurrentRequester,
            placeholder_title: NO_CURRENT_TRACK,
        }
    }

    pub fn queue(index: usize) -> Self {
        Self {
            thumbnail: ElementId::QueueThumbnail(index),
            title: ElementId::QueueTitle(index),
            author: ElementId::QueueAuthor(index),
            length: ElementId::QueueLength(index),
            requester: ElementId::QueueRequester(index),
            placeholder_title: EMPTY_QUEUE_SLOT,
        }
    }

    pub fn render(&self, track: &TrackView, time_format: TimeFormat) -> Vec<RenderCommand> {
        vec![
            RenderCommand::source(self.thumbnail, &track.thumbnail_url),
            RenderCommand::text(self.title, &track.title),
            RenderCommand::link(self.title, &track.source_uri),
            RenderCommand::text(self.author, format!("Author: {}", track.author)),
            RenderCommand::text(
                self.length,
                format!("Length: {}", time_format.format(track.length_ms)),
            ),
            RenderCommand::text(
                self.requester,
                format!("Requester: {}", track.requester_name),
            ),
        ]
    }

    pub fn clear(&self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::source(self.thumbnail, NO_IMAGE_URL),
            RenderCommand::text(self.title, self.placeholder_title),
            RenderCommand::link(self.title, INERT_LINK),
            RenderCommand::text(self.author, ""),
            RenderCommand::text(self.length, ""),
            RenderCommand::text(self.requester, ""),
        ]
    }
}

pub fn render_current_track(track: &TrackView, time_format: TimeFormat) -> Vec<RenderCommand> {
    TrackElements::current().render(track, time_format)
}

pub fn clear_current_track() -> Vec<RenderCommand> {
    TrackElements::current().clear()
}

/// Elapsed-time label, progress fill and a visible progress bar.
pub fn render_position(position: &PlaybackPosition, time_format: TimeFormat) -> Vec<RenderCommand> {
    vec![
        RenderCommand::text(
            ElementId::CurrentPosition,
            format!("Position: {}", time_format.format(position.position_ms)),
        ),
        RenderCommand::SetWidth {
            element: ElementId::CurrentProgress,
            percent: position.progress_percent(),
        },
        RenderCommand::SetVisible {
            element: ElementId::CurrentProgressBar,
            visible: true,
        },
    ]
}

pub fn clear_position() -> Vec<RenderCommand> {
    vec![
        RenderCommand::text(ElementId::CurrentPosition, ""),
        RenderCommand::SetWidth {
            element: ElementId::CurrentProgress,
            percent: 0.0,
        },
        RenderCommand::SetVisible {
            element: ElementId::CurrentProgressBar,
            visible: false,
        },
    ]
}

pub fn render_queue_slot(
    index: usize,
    track: &TrackView,
    time_format: TimeFormat,
) -> Vec<RenderCommand> {
    TrackElements::queue(index).render(track, time_format)
}

pub fn clear_queue_slot(index: usize) -> Vec<RenderCommand> {
    TrackElements::queue(index).clear()
}

/// Render every slot in `[0, capacity)` from the snapshot.
pub fn render_queue(
    snapshot: &QueueSnapshot,
    capacity: usize,
    time_format: TimeFormat,
) -> Vec<RenderCommand> {
    snapshot
        .slots(capacity)
        .iter()
        .enumerate()
        .flat_map(|(index, slot)| match slot {
            QueueSlot::Populated(track) => render_queue_slot(index, track, time_format),
            QueueSlot::Empty => clear_queue_slot(index),
        })
        .collect()
}

pub fn clear_queue(capacity: usize) -> Vec<RenderCommand> {
    (0..capacity).flat_map(clear_queue_slot).collect()
}
