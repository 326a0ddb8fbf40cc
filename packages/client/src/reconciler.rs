//! Reconciler: merges inbound server events into the local message log and roster.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - Reconciler::apply() / apply_frame()
//! - (id, message, timestamp) による重複排除、user list による roster の置き換え
//!
//! ### なぜこのテストが必要か
//! - 同じメッセージが複数回届いてもログには 1 件だけ残る必要がある
//! - 不正なフレームで状態が壊れてはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：チャットメッセージとシステム通知の追加
//! - エッジケース：同一ペイロードの二重受信、同じ本文で異なるタイムスタンプ
//! - 異常系：不正なフレーム

use std::{collections::HashSet, sync::Arc};

use hiroba_shared::{
    protocol::{ChatMessageDto, ParticipantDto, SYSTEM_SENDER_ID, ServerEvent},
    time::{Clock, timestamp_to_iso8601},
};

/// One entry of the local message log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: String,
    pub name: String,
    pub message: String,
    /// ISO 8601 UTC
    pub timestamp: String,
}

impl LogEntry {
    pub fn is_system(&self) -> bool {
        self.id == SYSTEM_SENDER_ID
    }

    fn key(&self) -> (String, String, String) {
        (
            self.id.clone(),
            self.message.clone(),
            self.timestamp.clone(),
        )
    }
}

impl From<ChatMessageDto> for LogEntry {
    fn from(dto: ChatMessageDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            message: dto.message,
            timestamp: dto.timestamp,
        }
    }
}

/// Result of applying one inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// A new entry was appended to the log
    Appended(LogEntry),
    /// The entry was already in the log
    Duplicate,
    /// The roster was replaced
    RosterReplaced,
    /// The frame could not be decoded
    Ignored,
}

pub struct Reconciler {
    log: Vec<LogEntry>,
    seen: HashSet<(String, String, String)>,
    roster: Vec<ParticipantDto>,
    clock: Arc<dyn Clock>,
}

impl Reconciler {
    /// `clock` stamps system notices, which carry no timestamp on the wire
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            log: Vec::new(),
            seen: HashSet::new(),
            roster: Vec::new(),
            clock,
        }
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn roster(&self) -> &[ParticipantDto] {
        &self.roster
    }

    /// Decode a raw frame and apply it. Malformed frames leave the state untouched.
    pub fn apply_frame(&mut self, frame: &str) -> Update {
        match ServerEvent::decode(frame) {
            Ok(event) => self.apply(event),
            Err(e) => {
                tracing::warn!("Ignoring malformed frame: {}", e);
                Update::Ignored
            }
        }
    }

    /// Merge one decoded server event into the local view.
    ///
    /// Chat messages are appended unless their `(id, message, timestamp)`
    /// triple was already seen. A `user list` replaces the roster wholesale.
    /// System notices carry no timestamp on the wire, so they are stamped
    /// with the receipt time and then deduplicated by the same triple: the
    /// same notice received twice within one millisecond yields one entry.
    pub fn apply(&mut self, event: ServerEvent) -> Update {
        match event {
            ServerEvent::SystemNotice(text) => self.append(LogEntry {
                id: SYSTEM_SENDER_ID.to_string(),
                name: SYSTEM_SENDER_ID.to_string(),
                message: text,
                timestamp: timestamp_to_iso8601(self.clock.now_millis()),
            }),
            ServerEvent::ChatMessage(dto) => self.append(dto.into()),
            ServerEvent::RosterSnapshot(participants) => {
                self.roster = participants;
                Update::RosterReplaced
            }
        }
    }

    fn append(&mut self, entry: LogEntry) -> Update {
        if !self.seen.insert(entry.key()) {
            tracing::debug!("Skipping duplicate message from '{}'", entry.id);
            return Update::Duplicate;
        }
        self.log.push(entry.clone());
        Update::Appended(entry)
    }
}
