//! Request tickets
//!
//! Each request channel hands out monotonically increasing tickets. A list
//! response is applied only if its ticket is the last one dispatched on the
//! channel, so a slow response can never overwrite a newer one.

use std::collections::HashMap;

/// Logical source of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Campaigns,
    Contacts,
    Users,
    Voices,
    /// Read-only views of the campaign open in the detail modal
    CampaignCalls,
    CampaignAnalytics,
    CampaignHistory,
    /// Create/update/delete and other one-shot actions
    Mutation,
    VoiceTest,
    Audio,
    Recording,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub channel: Channel,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    last: HashMap<Channel, u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket for `channel`
    pub fn issue(&mut self, channel: Channel) -> Ticket {
        let seq = self.last.entry(channel).or_insert(0);
        *seq += 1;
        Ticket {
            channel,
            seq: *seq,
        }
    }

    /// Whether `ticket` is the latest dispatched on its channel
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.last.get(&ticket.channel) == Some(&ticket.seq)
    }
}
