//! Domain state - cached backend data separate from UI concerns

use super::records::{CallRecord, Campaign, Contact, Metric, User, VoiceOption};
use super::selection::SelectionSet;
use super::voice::VoiceTestState;

/// Lifecycle of one cached list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// A list mirrored from the backend
///
/// The items are replaced wholesale on every successful load. A failed load
/// keeps the previous items but the panel shows the error instead.
#[derive(Debug, Clone)]
pub struct Cache<T> {
    pub items: Vec<T>,
    pub state: LoadState,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Idle,
        }
    }
}

impl<T> Cache<T> {
    pub fn begin(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.state = LoadState::Loaded;
    }

    pub fn fail(&mut self, message: String) {
        self.state = LoadState::Failed(message);
    }

    pub fn error(&self) -> Option<&str> {
        match self.state {
            LoadState::Failed(ref message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }
}

/// Read-only views of one campaign: its calls, analytics and versions
#[derive(Debug, Default)]
pub struct CampaignDetail {
    pub campaign: Option<Campaign>,
    pub calls: Cache<CallRecord>,
    pub metrics: Cache<Metric>,
    pub history: Cache<Campaign>,
}

impl CampaignDetail {
    /// Point the views at `campaign`, dropping whatever was shown before
    pub fn show(&mut self, campaign: Campaign) {
        *self = Self {
            campaign: Some(campaign),
            ..Self::default()
        };
    }
}

/// Domain state containing all client-held data
#[derive(Debug, Default)]
pub struct DomainState {
    pub campaigns: Cache<Campaign>,
    pub contacts: Cache<Contact>,
    pub users: Cache<User>,
    pub voices: Cache<VoiceOption>,

    /// Campaign opened in the detail view
    pub detail: CampaignDetail,

    /// Contacts staged for the campaign being composed
    pub selection: SelectionSet,

    /// Voice test panel inputs and in-flight flags
    pub voice: VoiceTestState,
}

impl DomainState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_failure_keeps_items() {
        let mut cache: Cache<u32> = Cache::default();
        cache.replace(vec![1, 2]);
        cache.begin();
        assert!(cache.is_loading());

        cache.fail("boom".to_string());
        assert_eq!(cache.items, vec![1, 2]);
        assert_eq!(cache.error(), Some("boom"));
    }

    #[test]
    fn test_detail_show_resets_views() {
        let mut detail = CampaignDetail::default();
        detail.calls.replace(vec![CallRecord::default()]);
        detail.history.fail("gone".to_string());

        let campaign: Campaign = serde_json::from_str(r#"{"campaign_id":"c2"}"#).unwrap();
        detail.show(campaign);
        assert!(detail.calls.items.is_empty());
        assert_eq!(detail.history.state, LoadState::Idle);
        assert_eq!(
            detail.campaign.map(|c| c.campaign_id.to_string()),
            Some("c2".to_string())
        );
    }

    #[test]
    fn test_cache_replace_clears_error() {
        let mut cache: Cache<u32> = Cache::default();
        cache.fail("boom".to_string());
        cache.replace(vec![3]);
        assert_eq!(cache.state, LoadState::Loaded);
        assert!(cache.error().is_none());
    }
}
