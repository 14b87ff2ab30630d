//! UI state - presentation state separate from domain data

use super::sequence::Channel;

/// Dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Campaigns,
    Contacts,
    Users,
    VoiceTest,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        vec![Tab::Campaigns, Tab::Contacts, Tab::Users, Tab::VoiceTest]
    }

    pub fn name(&self) -> &str {
        match self {
            Tab::Campaigns => "Campaigns",
            Tab::Contacts => "Contacts",
            Tab::Users => "Users",
            Tab::VoiceTest => "Voice Test",
        }
    }

    /// Channel whose list is fetched when the tab is shown
    pub fn channel(&self) -> Channel {
        match self {
            Tab::Campaigns => Channel::Campaigns,
            Tab::Contacts => Channel::Contacts,
            Tab::Users => Channel::Users,
            Tab::VoiceTest => Channel::Voices,
        }
    }

    pub fn next(&self) -> Tab {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(idx + 1) % tabs.len()]
    }

    pub fn previous(&self) -> Tab {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(idx + tabs.len() - 1) % tabs.len()]
    }

    /// Tab bound to a digit key (`1`-based)
    pub fn from_digit(c: char) -> Option<Tab> {
        let idx = c.to_digit(10)?.checked_sub(1)? as usize;
        Tab::all().get(idx).copied()
    }
}

/// Client-side name filter for the active list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

impl SearchState {
    pub fn matches(&self, text: &str) -> bool {
        self.query.is_empty() || text.to_lowercase().contains(&self.query.to_lowercase())
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.query.clear();
    }
}
