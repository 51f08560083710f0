//! Pure view synchronisation.
//!
//! This module contains the mapping from inbound gateway messages to a reply
//! and a list of render commands, without touching any display surface.

use crate::{
    domain::{ConnectionIdentity, QUEUE_DISPLAY_SLOTS, TrackView},
    protocol::{
        DispatchEvent, IdentifyMessage, Inbound, QueueData, TrackPayload,
        conversion::queue_snapshot,
    },
    time::TimeFormat,
};

use super::command::{
    RenderCommand, clear_current_track, clear_position, clear_queue, render_current_track,
    render_position, render_queue,
};

/// What the client does in response to one inbound message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    /// Message to send back, if any
    pub reply: Option<IdentifyMessage>,
    /// Display mutations, in order
    pub commands: Vec<RenderCommand>,
}

impl Reaction {
    pub fn is_empty(&self) -> bool {
        self.reply.is_none() && self.commands.is_empty()
    }
}

/// Connection context plus display settings for one dashboard.
#[derive(Debug, Clone)]
pub struct DashboardSync {
    guild_id: String,
    identity: ConnectionIdentity,
    time_format: TimeFormat,
    queue_slots: usize,
}

impl DashboardSync {
    pub fn new(guild_id: impl Into<String>, identity: ConnectionIdentity) -> Self {
        Self {
            guild_id: guild_id.into(),
            identity,
            time_format: TimeFormat::default(),
            queue_slots: QUEUE_DISPLAY_SLOTS,
        }
    }

    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn with_queue_slots(mut self, queue_slots: usize) -> Self {
        self.queue_slots = queue_slots;
        self
    }

    pub fn guild_id(&self) -> &str {
        &self.guild_id
    }

    pub fn queue_slots(&self) -> usize {
        self.queue_slots
    }

    /// Compute the reaction to one inbound message.
    ///
    /// A hello is answered with identify every time it arrives. Other op codes
    /// and unrecognized events produce an empty reaction.
    pub fn handle(&self, inbound: &Inbound) -> Reaction {
        match inbound {
            Inbound::Hello => Reaction {
                reply: Some(IdentifyMessage::new(
                    self.guild_id.clone(),
                    self.identity.as_str(),
                )),
                commands: Vec::new(),
            },
            Inbound::Dispatch(event) => Reaction {
                reply: None,
                commands: self.dispatch(event),
            },
            Inbound::Other(_) => Reaction::default(),
        }
    }

    /// Render commands for one dispatch event
    pub fn dispatch(&self, event: &DispatchEvent) -> Vec<RenderCommand> {
        match event {
            DispatchEvent::Connected { current, queue } | DispatchEvent::Ready { current, queue } => {
                let mut commands = self.current_track(current.as_ref());
                commands.extend(self.queue(queue.as_ref()));
                commands
            }
            DispatchEvent::Disconnected => {
                let mut commands = clear_current_track();
                commands.extend(clear_position());
                commands.extend(clear_queue(self.queue_slots));
                commands
            }
            DispatchEvent::TrackStart { current } => self.current_track(current.as_ref()),
            DispatchEvent::TrackEnd => clear_current_track(),
            DispatchEvent::Position(data) => match data.to_domain() {
                Some(position) => render_position(&position, self.time_format),
                None => clear_position(),
            },
            DispatchEvent::QueueUpdate { queue } => self.queue(queue.as_ref()),
            DispatchEvent::Unrecognized(_) => Vec::new(),
        }
    }

    fn current_track(&self, current: Option<&TrackPayload>) -> Vec<RenderCommand> {
        match current {
            Some(payload) => {
                let track = TrackView::from(payload.clone());
                render_current_track(&track, self.time_format)
            }
            None => clear_current_track(),
        }
    }

    fn queue(&self, queue: Option<&QueueData>) -> Vec<RenderCommand> {
        let snapshot = queue_snapshot(queue.cloned(), self.queue_slots);
        render_queue(&snapshot, self.queue_slots, self.time_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::command::{ElementId, EMPTY_QUEUE_SLOT, NO_CURRENT_TRACK};

    fn sync() -> DashboardSync {
        DashboardSync::new("12345", ConnectionIdentity::new("abc"))
    }

    fn track_json(title: &str) -> String {
        serde_json::json!({
            "thumbnail": format!("https://img.example/{}.jpg", title),
            "title": title,
            "uri": format!("https://example.com/{}", title),
            "author": "Band",
            "length": 3723000,
            "requester_name": "alice",
        })
        .to_string()
    }

    fn queue_json(titles: &[&str]) -> String {
        let entries: Vec<String> = titles.iter().map(|title| track_json(title)).collect();
        serde_json::json!({ "queue": entries }).to_string()
    }

    fn decode(text: &str) -> Inbound {
        Inbound::decode(text).unwrap()
    }

    fn connected(current: Option<&str>, queue: &str) -> Inbound {
        let current = current.map_or("null".to_string(), track_json);
        decode(
            &serde_json::json!({
                "op": 0,
                "event": "CONNECTED",
                "data": { "current": current, "queue": queue },
            })
            .to_string(),
        )
    }

    fn text_of(commands: &[RenderCommand], element: ElementId) -> Option<&str> {
        commands.iter().rev().find_map(|command| match command {
            RenderCommand::SetText { element: e, text } if *e == element => Some(text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_hello_replies_with_identify() {
        // テスト項目: hello を受信すると identify で応答する
        // given (前提条件):
        let sync = sync();

        // when (操作):
        let reaction = sync.handle(&decode(r#"{"op":1}"#));

        // then (期待する結果):
        let reply = reaction.reply.unwrap().to_json().unwrap();
        assert_eq!(reply, r#"{"op":2,"data":{"guild_id":"12345","identifier":"abc"}}"#);
        assert!(reaction.commands.is_empty());
    }

    #[test]
    fn test_hello_with_missing_identity_sends_empty_identifier() {
        // テスト項目: 識別子がない場合、空文字列のまま送信される
        // given (前提条件):
        let sync = DashboardSync::new("12345", ConnectionIdentity::default());

        // when (操作):
        let reaction = sync.handle(&Inbound::Hello);

        // then (期待する結果):
        assert_eq!(reaction.reply.unwrap().data.identifier, "");
    }

    #[test]
    fn test_connected_renders_current_and_queue() {
        // テスト項目: CONNECTED で現在のトラックとキューが描画される
        // given (前提条件):
        let inbound = connected(Some("now"), &queue_json(&["q0", "q1"]));

        // when (操作):
        let reaction = sync().handle(&inbound);

        // then (期待する結果):
        let commands = &reaction.commands;
        assert_eq!(text_of(commands, ElementId::CurrentTitle), Some("now"));
        assert_eq!(text_of(commands, ElementId::QueueTitle(0)), Some("q0"));
        assert_eq!(text_of(commands, ElementId::QueueTitle(1)), Some("q1"));
        assert_eq!(text_of(commands, ElementId::QueueTitle(2)), Some(EMPTY_QUEUE_SLOT));
        assert_eq!(text_of(commands, ElementId::QueueTitle(3)), Some(EMPTY_QUEUE_SLOT));
        assert!(reaction.reply.is_none());
    }

    #[test]
    fn test_connected_with_null_current_and_queue_clears() {
        // テスト項目: current と queue が null の場合、全てリセットされる
        // given (前提条件):
        let inbound = connected(None, r#"{"queue": null}"#);

        // when (操作):
        let commands = sync().handle(&inbound).commands;

        // then (期待する結果):
        assert_eq!(text_of(&commands, ElementId::CurrentTitle), Some(NO_CURRENT_TRACK));
        for index in 0..QUEUE_DISPLAY_SLOTS {
            assert_eq!(
                text_of(&commands, ElementId::QueueTitle(index)),
                Some(EMPTY_QUEUE_SLOT)
            );
        }
    }

    #[test]
    fn test_ready_behaves_like_connected() {
        // テスト項目: READY は CONNECTED と同じ描画になる
        // given (前提条件):
        let queue = queue_json(&["q0"]);
        let ready = decode(
            &serde_json::json!({
                "op": 0,
                "event": "READY",
                "data": { "current": track_json("now"), "queue": queue },
            })
            .to_string(),
        );

        // when (操作):
        let from_ready = sync().handle(&ready).commands;
        let from_connected = sync().handle(&connected(Some("now"), &queue)).commands;

        // then (期待する結果):
        assert_eq!(from_ready, from_connected);
    }

    #[test]
    fn test_queue_longer_than_display_is_truncated() {
        // テスト項目: 表示枠より長いキューは先頭 N 件のみ描画される
        // given (前提条件):
        let titles = ["a", "b", "c", "d", "e", "f"];
        let inbound = decode(
            &serde_json::json!({
                "op": 0,
                "event": "QUEUE_UPDATE",
                "data": { "queue": queue_json(&titles) },
            })
            .to_string(),
        );

        // when (操作):
        let commands = sync().handle(&inbound).commands;

        // then (期待する結果):
        assert_eq!(text_of(&commands, ElementId::QueueTitle(3)), Some("d"));
        assert!(commands
            .iter()
            .all(|command| !matches!(command.element(), ElementId::QueueTitle(index) if index >= 4)));
    }

    #[test]
    fn test_queue_update_with_null_queue_clears_every_slot() {
        // テスト項目: QUEUE_UPDATE の queue が null の場合、全ての枠が空になる
        // given (前提条件):
        let inbound = decode(r#"{"op":0,"event":"QUEUE_UPDATE","data":{"queue":"{\"queue\":null}"}}"#);

        // when (操作):
        let commands = sync().handle(&inbound).commands;

        // then (期待する結果):
        assert_eq!(commands, clear_queue(QUEUE_DISPLAY_SLOTS));
    }

    #[test]
    fn test_disconnected_resets_everything() {
        // テスト項目: DISCONNECTED で現在のトラック・位置・キューが全てリセットされる
        // given (前提条件):
        let inbound = decode(r#"{"op":0,"event":"DISCONNECTED","data":{}}"#);

        // when (操作):
        let commands = sync().handle(&inbound).commands;

        // then (期待する結果):
        let mut expected = clear_current_track();
        expected.extend(clear_position());
        expected.extend(clear_queue(QUEUE_DISPLAY_SLOTS));
        assert_eq!(commands, expected);
    }

    #[test]
    fn test_track_start_and_end() {
        // テスト項目: TRACK_START で描画、TRACK_END でリセットされる
        // given (前提条件):
        let start = decode(
            &serde_json::json!({
                "op": 0,
                "event": "TRACK_START",
                "data": { "current": track_json("now") },
            })
            .to_string(),
        );
        let end = decode(r#"{"op":0,"event":"TRACK_END","data":{}}"#);

        // when (操作):
        let started = sync().handle(&start).commands;
        let ended = sync().handle(&end).commands;

        // then (期待する結果):
        assert_eq!(text_of(&started, ElementId::CurrentTitle), Some("now"));
        assert_eq!(
            text_of(&started, ElementId::CurrentLength),
            Some("Length: 1h 2m 3s")
        );
        assert_eq!(ended, clear_current_track());
    }

    #[test]
    fn test_track_start_with_null_track_clears() {
        // テスト項目: TRACK_START の current が null の場合、リセットされる
        // given (前提条件):
        let inbound = decode(r#"{"op":0,"event":"TRACK_START","data":{"current":null}}"#);

        // when (操作):
        let commands = sync().handle(&inbound).commands;

        // then (期待する結果):
        assert_eq!(commands, clear_current_track());
    }

    #[test]
    fn test_position_renders_progress() {
        // テスト項目: 位置が 0 以外の場合、進捗が描画される
        // given (前提条件):
        let inbound = decode(r#"{"op":0,"event":"POSITION","data":{"position":60000,"length":240000}}"#);

        // when (操作):
        let commands = sync().with_time_format(TimeFormat::Clock).handle(&inbound).commands;

        // then (期待する結果):
        assert_eq!(
            text_of(&commands, ElementId::CurrentPosition),
            Some("Position: 00:01:00")
        );
        assert!(commands.contains(&RenderCommand::SetWidth {
            element: ElementId::CurrentProgress,
            percent: 25.0,
        }));
    }

    #[test]
    fn test_position_zero_equals_clear() {
        // テスト項目: 位置が 0 の場合、長さに関わらずリセットと同じになる
        // given (前提条件):
        let lengths = [0, 1000, 240000];

        for length in lengths {
            let inbound = decode(&format!(
                r#"{{"op":0,"event":"POSITION","data":{{"position":0,"length":{}}}}}"#,
                length
            ));

            // when (操作):
            let commands = sync().handle(&inbound).commands;

            // then (期待する結果):
            assert_eq!(commands, clear_position());
        }
    }

    #[test]
    fn test_unrecognized_event_is_ignored() {
        // テスト項目: 未知のイベントは何もしない
        // given (前提条件):
        let inbound = decode(r#"{"op":0,"event":"PLAYER","data":{"volume":50}}"#);

        // when (操作):
        let reaction = sync().handle(&inbound);

        // then (期待する結果):
        assert!(reaction.is_empty());
    }

    #[test]
    fn test_unknown_op_is_ignored() {
        // テスト項目: 未知の op コードは何もしない
        // given (前提条件):
        let inbound = Inbound::Other(9);

        // when (操作):
        let reaction = sync().handle(&inbound);

        // then (期待する結果):
        assert!(reaction.is_empty());
    }

    #[test]
    fn test_custom_queue_slots() {
        // テスト項目: 表示枠数を変更した場合、その数だけ描画される
        // given (前提条件):
        let sync = sync().with_queue_slots(8);
        let inbound = decode(r#"{"op":0,"event":"DISCONNECTED"}"#);

        // when (操作):
        let commands = sync.handle(&inbound).commands;

        // then (期待する結果):
        assert_eq!(
            text_of(&commands, ElementId::QueueTitle(7)),
            Some(EMPTY_QUEUE_SLOT)
        );
        assert_eq!(sync.queue_slots(), 8);
    }
}
