//! Roster: the table of currently connected participants.
//!
//! A channel id is in the roster if and only if its channel is connected.
//! Listing order is insertion order.

use super::{entity::Participant, error::RosterError, value_object::ChannelId};

#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a participant. Fails if the channel id is already present.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RosterError> {
        if self.contains(&participant.id) {
            return Err(RosterError::DuplicateChannelId(
                participant.id.as_str().to_string(),
            ));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant, returning it if it was present.
    ///
    /// Removing an unknown id leaves the roster untouched.
    pub fn remove_participant(&mut self, channel_id: &ChannelId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.id == channel_id)?;
        Some(self.participants.remove(index))
    }

    pub fn find(&self, channel_id: &ChannelId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == channel_id)
    }

    pub fn contains(&self, channel_id: &ChannelId) -> bool {
        self.find(channel_id).is_some()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn channel_ids(&self) -> Vec<ChannelId> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
