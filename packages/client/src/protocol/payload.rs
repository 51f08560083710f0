//! Event payload schemas.
//!
//! Several payload fields are JSON documents serialized into JSON strings
//! (the current track, the queue, and every queue entry). They are modeled
//! with [`Encoded`], which performs the second decode explicitly.

use std::{collections::BTreeMap, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, DeserializeOwned},
};

/// A value carried as a JSON-encoded string inside another JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<T>(pub T);

impl<T> Encoded<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Encoded<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EncodedVisitor<T>(PhantomData<T>);

        impl<T: DeserializeOwned> de::Visitor<'_> for EncodedVisitor<T> {
            type Value = Encoded<T>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string containing JSON")
            }

            fn visit_str<E: de::Error>(self, raw: &str) -> Result<Self::Value, E> {
                serde_json::from_str(raw).map(Encoded).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(EncodedVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for Encoded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = serde_json::to_string(&self.0).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&raw)
    }
}

/// A track as serialized by the player (Lavalink track info plus extras).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPayload {
    pub thumbnail: String,
    pub title: String,
    pub uri: String,
    pub author: String,
    pub length: u64,
    pub requester_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "isSeekable", default, skip_serializing_if = "Option::is_none")]
    pub is_seekable: Option<bool>,
    #[serde(rename = "isStream", default, skip_serializing_if = "Option::is_none")]
    pub is_stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,
}

/// Encoded current-track field.
///
/// Accepts a raw JSON `null` as well as the encoded string `"null"`.
pub type CurrentField = Option<Encoded<Option<TrackPayload>>>;

/// Flatten a [`CurrentField`] into the track, if any.
pub fn current_track(field: CurrentField) -> Option<TrackPayload> {
    field.and_then(Encoded::into_inner)
}

/// Queue entries keyed by display index.
///
/// The player sends a list; an index-keyed object is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueueEntries {
    List(Vec<Option<Encoded<TrackPayload>>>),
    Indexed(BTreeMap<String, Option<Encoded<TrackPayload>>>),
}

impl QueueEntries {
    /// The first `limit` entries in index order; gaps are `None`.
    ///
    /// Keys of an indexed object that are not decimal indices are skipped.
    pub fn into_ordered(self, limit: usize) -> Vec<Option<TrackPayload>> {
        match self {
            QueueEntries::List(entries) => entries
                .into_iter()
                .take(limit)
                .map(|entry| entry.map(Encoded::into_inner))
                .collect(),
            QueueEntries::Indexed(entries) => {
                let indexed: BTreeMap<usize, Option<TrackPayload>> = entries
                    .into_iter()
                    .filter_map(|(key, entry)| {
                        let index = key.parse::<usize>().ok().filter(|index| *index < limit)?;
                        Some((index, entry.map(Encoded::into_inner)))
                    })
                    .collect();
                let len = indexed.keys().next_back().map_or(0, |last| last + 1);
                let mut ordered = vec![None; len];
                for (index, entry) in indexed {
                    ordered[index] = entry;
                }
                ordered
            }
        }
    }
}

/// The decoded queue document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueData {
    #[serde(default)]
    pub queue: Option<QueueEntries>,
}

/// Payload of CONNECTED and READY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(default)]
    pub current: CurrentField,
    #[serde(default)]
    pub queue: Option<Encoded<QueueData>>,
}

/// Payload of TRACK_START.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackStartData {
    #[serde(default)]
    pub current: CurrentField,
}

/// Payload of QUEUE_UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueUpdateData {
    #[serde(default)]
    pub queue: Option<Encoded<QueueData>>,
}

/// Payload of POSITION. Values are plain numbers, not encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionData {
    pub position: f64,
    #[serde(default)]
    pub length: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_JSON: &str = r#"{"thumbnail":"https://img.youtube.com/vi/abc/mqdefault.jpg","title":"Song","uri":"https://www.youtube.com/watch?v=abc","author":"Band","length":215000,"requester_name":"alice","identifier":"abc","isSeekable":true,"isStream":false,"track_id":"QAAAjQIA","requester_id":123456789012345678}"#;

    #[test]
    fn test_encoded_decodes_inner_json() {
        // テスト項目: 文字列にエンコードされた JSON が二段階でデコードされる
        // given (前提条件):
        let outer = serde_json::json!({ "current": TRACK_JSON }).to_string();

        // when (操作):
        let data: TrackStartData = serde_json::from_str(&outer).unwrap();

        // then (期待する結果):
        let track = current_track(data.current).unwrap();
        assert_eq!(track.title, "Song");
        assert_eq!(track.length, 215_000);
        assert_eq!(track.is_seekable, Some(true));
        assert_eq!(track.requester_id, Some(123_456_789_012_345_678));
    }

    #[test]
    fn test_encoded_rejects_unencoded_object() {
        // テスト項目: エンコードされていないオブジェクトはエラーになる
        // given (前提条件):
        let outer = format!(r#"{{"current": {}}}"#, TRACK_JSON);

        // when (操作):
        let result = serde_json::from_str::<TrackStartData>(&outer);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_current_accepts_raw_and_encoded_null() {
        // テスト項目: current は生の null とエンコードされた "null" の両方を受け付ける
        // given (前提条件):
        let raw_null = r#"{"current": null}"#;
        let encoded_null = r#"{"current": "null"}"#;

        // when (操作):
        let raw: TrackStartData = serde_json::from_str(raw_null).unwrap();
        let encoded: TrackStartData = serde_json::from_str(encoded_null).unwrap();

        // then (期待する結果):
        assert!(current_track(raw.current).is_none());
        assert!(current_track(encoded.current).is_none());
    }

    #[test]
    fn test_track_payload_without_extras() {
        // テスト項目: 追加フィールドがなくてもトラックがデコードされる
        // given (前提条件):
        let json = r#"{"thumbnail":"t","title":"x","uri":"u","author":"a","length":1,"requester_name":"r"}"#;

        // when (操作):
        let track: TrackPayload = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(track.identifier, None);
        assert_eq!(track.is_stream, None);
    }

    #[test]
    fn test_queue_list_entries_in_order() {
        // テスト項目: リスト形式のキューが順番通りにデコードされる
        // given (前提条件):
        let queue = serde_json::json!({ "queue": [TRACK_JSON, TRACK_JSON] }).to_string();
        let outer = serde_json::json!({ "queue": queue }).to_string();

        // when (操作):
        let data: QueueUpdateData = serde_json::from_str(&outer).unwrap();

        // then (期待する結果):
        let entries = data.queue.unwrap().into_inner().queue.unwrap().into_ordered(4);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(Option::is_some));
    }

    #[test]
    fn test_queue_indexed_entries_fill_gaps() {
        // テスト項目: インデックス形式のキューは欠番が None で埋められる
        // given (前提条件):
        let queue = serde_json::json!({ "queue": { "2": TRACK_JSON } }).to_string();
        let outer = serde_json::json!({ "queue": queue }).to_string();

        // when (操作):
        let data: QueueUpdateData = serde_json::from_str(&outer).unwrap();

        // then (期待する結果):
        let entries = data.queue.unwrap().into_inner().queue.unwrap().into_ordered(4);
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_none());
        assert!(entries[1].is_none());
        assert_eq!(entries[2].as_ref().unwrap().title, "Song");
    }

    #[test]
    fn test_queue_entries_are_limited() {
        // テスト項目: 上限を超えるエントリは読み捨てられる
        // given (前提条件):
        let queue = serde_json::json!({
            "queue": { "0": TRACK_JSON, "7": TRACK_JSON, "99999999999": TRACK_JSON, "x": TRACK_JSON }
        })
        .to_string();
        let outer = serde_json::json!({ "queue": queue }).to_string();

        // when (操作):
        let data: QueueUpdateData = serde_json::from_str(&outer).unwrap();

        // then (期待する結果):
        let entries = data.queue.unwrap().into_inner().queue.unwrap().into_ordered(4);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_some());
    }

    #[test]
    fn test_queue_null_inside_document() {
        // テスト項目: キュー文書内の queue が null の場合、None になる
        // given (前提条件):
        let outer = r#"{"queue": "{\"queue\": null}"}"#;

        // when (操作):
        let data: QueueUpdateData = serde_json::from_str(outer).unwrap();

        // then (期待する結果):
        assert!(data.queue.unwrap().into_inner().queue.is_none());
    }

    #[test]
    fn test_encoded_serializes_as_string() {
        // テスト項目: Encoded は JSON 文字列としてシリアライズされる
        // given (前提条件):
        let data = QueueUpdateData {
            queue: Some(Encoded(QueueData { queue: None })),
        };

        // when (操作):
        let json = serde_json::to_string(&data).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"queue":"{\"queue\":null}"}"#);
    }

    #[test]
    fn test_position_without_length_defaults_to_zero() {
        // テスト項目: length がない場合、0 として扱われる
        // given (前提条件):
        let json = r#"{"position": 1500}"#;

        // when (操作):
        let data: PositionData = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(data.position, 1500.0);
        assert_eq!(data.length, 0.0);
    }
}
