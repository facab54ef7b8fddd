//! Quest log and its decoder.
//!
//! The started-quest section mixes two record kinds that look identical on
//! the wire (`i16 quest id, string payload`):
//!
//! - a **start** record for a quest not seen yet in this section, and
//! - a **progress** record, recognised only because its id is already in
//!   the started set. It belongs to the quest started most recently.
//!
//! The leading count covers start records only. Progress records ride along
//! between them and do not move the count forward.
//!
//! The completed section follows: an `i16` count of `(i16 quest id, i64
//! completion time)` pairs.

use std::collections::BTreeMap;

use leafline_wire::{InPacket, WireError};
use serde::{Deserialize, Serialize};

/// One record of the started-quest section, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestRecord {
    Started { quest_id: i16, payload: String },
    Progress { owner: i16, quest_id: i16, payload: String },
}

impl QuestRecord {
    /// Reads one record and classifies it against what `log` has so far.
    pub fn read(packet: &mut InPacket<'_>, log: &Questlog) -> Result<Self, WireError> {
        let quest_id = packet.read_i16()?;
        let payload = packet.read_string()?;
        Ok(match (log.is_started(quest_id), log.last_started()) {
            (true, Some(owner)) => QuestRecord::Progress {
                owner,
                quest_id,
                payload,
            },
            _ => QuestRecord::Started { quest_id, payload },
        })
    }

    /// Whether this record counts toward the section's declared size.
    pub fn advances_count(&self) -> bool {
        matches!(self, QuestRecord::Started { .. })
    }
}

/// A sub-payload attached to a started quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestProgress {
    pub quest_id: i16,
    pub payload: String,
}

/// Started, in-progress, and completed quests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questlog {
    started: BTreeMap<i16, String>,
    progress: BTreeMap<i16, Vec<QuestProgress>>,
    completed: BTreeMap<i16, i64>,
    last_started: Option<i16>,
}

impl Questlog {
    pub fn is_started(&self, quest_id: i16) -> bool {
        self.started.contains_key(&quest_id)
    }

    /// The quest most recently added to the started set.
    pub fn last_started(&self) -> Option<i16> {
        self.last_started
    }

    pub fn add_started(&mut self, quest_id: i16, payload: String) {
        self.started.insert(quest_id, payload);
        self.last_started = Some(quest_id);
    }

    pub fn add_in_progress(&mut self, owner: i16, quest_id: i16, payload: String) {
        self.progress
            .entry(owner)
            .or_default()
            .push(QuestProgress { quest_id, payload });
    }

    pub fn add_completed(&mut self, quest_id: i16, time: i64) {
        self.completed.insert(quest_id, time);
    }

    /// Files a classified record.
    pub fn apply(&mut self, record: QuestRecord) {
        match record {
            QuestRecord::Started { quest_id, payload } => self.add_started(quest_id, payload),
            QuestRecord::Progress {
                owner,
                quest_id,
                payload,
            } => self.add_in_progress(owner, quest_id, payload),
        }
    }

    /// Start payload of a started quest.
    pub fn started(&self, quest_id: i16) -> Option<&str> {
        self.started.get(&quest_id).map(String::as_str)
    }

    pub fn started_count(&self) -> usize {
        self.started.len()
    }

    /// Progress records attached to `quest_id`, in wire order.
    pub fn progress(&self, quest_id: i16) -> &[QuestProgress] {
        self.progress.get(&quest_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Completion time of a finished quest.
    pub fn completed(&self, quest_id: i16) -> Option<i64> {
        self.completed.get(&quest_id).copied()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}

/// Decodes the started and completed quest sections.
pub fn parse_questlog(packet: &mut InPacket<'_>) -> Result<Questlog, WireError> {
    let mut log = Questlog::default();

    let declared = packet.read_i16()?;
    let mut started = 0;
    while started < declared {
        let record = QuestRecord::read(packet, &log)?;
        let advanced = record.advances_count();
        log.apply(record);
        if advanced {
            started += 1;
        }
    }

    let completed = packet.read_i16()?;
    for _ in 0..completed {
        let quest_id = packet.read_i16()?;
        let time = packet.read_i64()?;
        log.add_completed(quest_id, time);
    }

    Ok(log)
}
