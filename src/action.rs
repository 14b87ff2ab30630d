//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::{Tab, VoiceField};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain request completions, expire notices
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next item in list
    NextItem,
    /// Move to previous item in list
    PrevItem,
    /// Jump to first item
    FirstItem,
    /// Jump to last item
    LastItem,
    /// Move to next tab
    NextTab,
    /// Move to previous tab
    PrevTab,
    /// Show a specific tab
    SelectTab(Tab),
    /// Reload the active tab's list
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Exit search mode, keeping the filter
    ExitSearchMode,
    /// Exit search mode and drop the filter
    ClearSearch,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the create form of the active tab
    OpenCreateForm,
    /// Open the edit form for the focused record
    OpenEditForm,
    /// Open the CSV path prompt
    OpenImportPrompt,
    /// Submit the open form
    SubmitForm,

    // ─────────────────────────────────────────────────────────────────────────
    // Contact Selection
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the contact checklist over the campaign form
    OpenContactSelector,
    /// Toggle the focused contact in the selection
    ToggleContactSelection,
    /// Close the checklist and write the summary
    ConfirmContactSelection,

    // ─────────────────────────────────────────────────────────────────────────
    // Record Actions
    // ─────────────────────────────────────────────────────────────────────────
    /// Ask to start the focused campaign
    RequestStartCampaign,
    /// Pause an active campaign or resume a paused one
    ToggleCampaignPause,
    /// Duplicate the focused campaign
    DuplicateCampaign,
    /// Ask to delete the focused record
    RequestDelete,

    // ─────────────────────────────────────────────────────────────────────────
    // Campaign Detail
    // ─────────────────────────────────────────────────────────────────────────
    /// Open calls, analytics and history of the focused campaign
    OpenCampaignDetail,
    /// Show the next detail section
    NextDetailSection,
    /// Show the previous detail section
    PrevDetailSection,
    /// Reload all detail sections
    ReloadCampaignDetail,
    /// Look up the recording of the focused call, or of the last test call
    FetchRecording,

    // ─────────────────────────────────────────────────────────────────────────
    // Voice Test
    // ─────────────────────────────────────────────────────────────────────────
    /// Make the focused voice tile the active voice
    SelectVoice,
    /// Start editing a voice panel input
    EditVoiceField(VoiceField),
    /// Stop editing the voice panel input
    StopVoiceEdit,
    /// Add character to the edited voice input
    VoiceInput(char),
    /// Remove last character from the edited voice input
    VoiceBackspace,
    /// Place a test call with the active voice
    TestVoice,
    /// Synthesize the entered text with the active voice
    GenerateAudio,
    /// Open the last saved clip in the audio player
    PlayAudio,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::SelectTab(tab) => write!(f, "SelectTab({})", tab.name()),
            Action::Refresh => write!(f, "Refresh"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::OpenCreateForm => write!(f, "OpenCreateForm"),
            Action::OpenEditForm => write!(f, "OpenEditForm"),
            Action::OpenImportPrompt => write!(f, "OpenImportPrompt"),
            Action::SubmitForm => write!(f, "SubmitForm"),
            Action::OpenContactSelector => write!(f, "OpenContactSelector"),
            Action::ToggleContactSelection => write!(f, "ToggleContactSelection"),
            Action::ConfirmContactSelection => write!(f, "ConfirmContactSelection"),
            Action::RequestStartCampaign => write!(f, "RequestStartCampaign"),
            Action::ToggleCampaignPause => write!(f, "ToggleCampaignPause"),
            Action::DuplicateCampaign => write!(f, "DuplicateCampaign"),
            Action::RequestDelete => write!(f, "RequestDelete"),
            Action::OpenCampaignDetail => write!(f, "OpenCampaignDetail"),
            Action::NextDetailSection => write!(f, "NextDetailSection"),
            Action::PrevDetailSection => write!(f, "PrevDetailSection"),
            Action::ReloadCampaignDetail => write!(f, "ReloadCampaignDetail"),
            Action::FetchRecording => write!(f, "FetchRecording"),
            Action::SelectVoice => write!(f, "SelectVoice"),
            Action::EditVoiceField(field) => write!(f, "EditVoiceField({:?})", field),
            Action::StopVoiceEdit => write!(f, "StopVoiceEdit"),
            Action::VoiceInput(c) => write!(f, "VoiceInput('{}')", c),
            Action::VoiceBackspace => write!(f, "VoiceBackspace"),
            Action::TestVoice => write!(f, "TestVoice"),
            Action::GenerateAudio => write!(f, "GenerateAudio"),
            Action::PlayAudio => write!(f, "PlayAudio"),
        }
    }
}
