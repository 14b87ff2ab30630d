//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It owns every piece of client state, dispatches backend requests through
//! the request runner and applies their completions on each tick.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_alert_dialog, draw_campaign_detail, draw_campaigns_panel,
    draw_confirm_dialog, draw_contact_selector, draw_contacts_panel, draw_users_panel,
    draw_voice_panel, AlertDialog, CampaignDetailDialog, CampaignsPanel, ConfirmDialog,
    ContactSelector, ContactsPanel, FormDialog, HelpDialog, PanelContext, UsersPanel, VoicePanel,
};
use crate::config::Config;
use crate::model::records::recording_link;
use crate::model::{
    Channel, ConfirmPurpose, DomainState, Form, FormKind, Modal, ModalStack, NoticeKind,
    RequestSequencer, SearchState, SelectionSet, Tab, Ticket,
};
use crate::services::{
    audio, load_contacts_csv, ApiError, MAX_BATCH_ROWS, ApiRequest, ApiResponse, Completion, RequestRunner,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::env;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Import row errors listed in the result alert
const MAX_LISTED_ERRORS: usize = 5;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (cached lists, selection, voice panel)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Per-channel request tickets
    pub sequencer: RequestSequencer,

    /// Background request runner
    pub runner: RequestRunner,

    pub active_tab: Tab,

    /// Name filter over the active list
    pub search: SearchState,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    /// Backend root shown in the status line
    pub base_url: String,

    /// Where generated clips are saved
    pub audio_dir: PathBuf,

    /// Program used to play a clip
    pub audio_player: String,

    /// Clip to open with the audio player (handled by main loop)
    pub pending_audio: Option<PathBuf>,

    /// Selection as it was when the contact selector opened
    selector_snapshot: Option<SelectionSet>,

    /// Rows rejected locally by the pending import, keyed by its ticket
    import_errors: Option<(Ticket, Vec<String>)>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub campaigns: CampaignsPanel,
    pub contacts: ContactsPanel,
    pub users: UsersPanel,
    pub voice_panel: VoicePanel,
    pub form_dialog: FormDialog,
    pub contact_selector: ContactSelector,
    pub campaign_detail: CampaignDetailDialog,
    pub confirm_dialog: ConfirmDialog,
    pub alert_dialog: AlertDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance
    pub fn new(runner: RequestRunner, config: &Config) -> App {
        App {
            domain: DomainState::new(),
            modals: ModalStack::new(),
            sequencer: RequestSequencer::new(),
            runner,
            active_tab: Tab::Campaigns,
            search: SearchState::default(),
            should_quit: false,
            status_message: None,
            base_url: config.base_url.clone(),
            audio_dir: config.audio_dir(),
            audio_player: config.audio_player.clone(),
            pending_audio: None,
            selector_snapshot: None,
            import_errors: None,
            // Components
            campaigns: CampaignsPanel::new(),
            contacts: ContactsPanel::new(),
            users: UsersPanel::new(),
            voice_panel: VoicePanel::new(),
            form_dialog: FormDialog::default(),
            contact_selector: ContactSelector::new(),
            campaign_detail: CampaignDetailDialog::new(),
            confirm_dialog: ConfirmDialog,
            alert_dialog: AlertDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    fn dispatch(&mut self, channel: Channel, request: ApiRequest) -> Ticket {
        let ticket = self.sequencer.issue(channel);
        self.runner.spawn(ticket, request);
        ticket
    }

    /// Fetch the list behind `channel`, superseding any load still in flight
    fn load(&mut self, channel: Channel) {
        let request = match channel {
            Channel::Campaigns => {
                self.domain.campaigns.begin();
                ApiRequest::LoadCampaigns
            }
            Channel::Contacts => {
                self.domain.contacts.begin();
                ApiRequest::LoadContacts
            }
            Channel::Users => {
                self.domain.users.begin();
                ApiRequest::LoadUsers
            }
            Channel::Voices => {
                self.domain.voices.begin();
                ApiRequest::LoadVoices
            }
            Channel::CampaignCalls
            | Channel::CampaignAnalytics
            | Channel::CampaignHistory
            | Channel::Mutation
            | Channel::VoiceTest
            | Channel::Audio
            | Channel::Recording => return,
        };
        self.dispatch(channel, request);
    }

    /// Make `tab` active; its list is reloaded every time it is shown
    fn show_tab(&mut self, tab: Tab) {
        if tab != self.active_tab {
            self.search.reset();
            self.voice_panel.editing = None;
            self.status_message = None;
        }
        self.active_tab = tab;
        self.load(tab.channel());
    }

    fn alert(&mut self, title: impl Into<String>, message: impl Into<String>, is_error: bool) {
        self.modals.push(Modal::Alert {
            title: title.into(),
            message: message.into(),
            is_error,
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completions
    // ─────────────────────────────────────────────────────────────────────────

    fn drain_completions(&mut self) {
        for completion in self.runner.poll() {
            self.handle_completion(completion);
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        let Completion {
            ticket,
            request,
            result,
        } = completion;

        match request {
            ApiRequest::LoadCampaigns
            | ApiRequest::LoadContacts
            | ApiRequest::LoadUsers
            | ApiRequest::LoadVoices
            | ApiRequest::LoadCampaignCalls(_)
            | ApiRequest::LoadCampaignAnalytics(_)
            | ApiRequest::LoadCampaignHistory(_) => {
                if !self.sequencer.is_current(&ticket) {
                    debug!(?ticket, request = %request, "discarding stale response");
                    return;
                }
                self.apply_load(&request, result);
            }
            ApiRequest::TestVoice { .. } => self.apply_voice_test(result),
            ApiRequest::GenerateAudio { ref voice, .. } => {
                let voice = voice.clone();
                self.apply_generated_audio(&voice, result)
            }
            _ => match result {
                Ok(response) => self.apply_mutation(ticket, request, response),
                Err(e) => self.fail_mutation(ticket, &request, &e),
            },
        }
    }

    fn apply_load(&mut self, request: &ApiRequest, result: Result<ApiResponse, ApiError>) {
        let outcome = match result {
            Ok(ApiResponse::Campaigns(items)) => {
                debug!(count = items.len(), "campaigns loaded");
                self.domain.campaigns.replace(items);
                return;
            }
            Ok(ApiResponse::Contacts(items)) => {
                debug!(count = items.len(), "contacts loaded");
                self.domain.contacts.replace(items);
                return;
            }
            Ok(ApiResponse::Users(items)) => {
                debug!(count = items.len(), "users loaded");
                self.domain.users.replace(items);
                return;
            }
            Ok(ApiResponse::Voices(items)) => {
                debug!(count = items.len(), "voices loaded");
                self.domain.voices.replace(items);
                return;
            }
            Ok(ApiResponse::Calls(items)) => {
                debug!(count = items.len(), "campaign calls loaded");
                self.domain.detail.calls.replace(items);
                return;
            }
            Ok(ApiResponse::Metrics(items)) => {
                self.domain.detail.metrics.replace(items);
                return;
            }
            Ok(ApiResponse::History(items)) => {
                debug!(count = items.len(), "campaign versions loaded");
                self.domain.detail.history.replace(items);
                return;
            }
            Ok(_) => ApiError::Unexpected(request.name()),
            Err(e) => e,
        };

        warn!(request = %request, error = %outcome, "load failed");
        let message = outcome.user_message();
        match request {
            ApiRequest::LoadCampaigns => self.domain.campaigns.fail(message),
            ApiRequest::LoadContacts => self.domain.contacts.fail(message),
            ApiRequest::LoadUsers => self.domain.users.fail(message),
            ApiRequest::LoadCampaignCalls(_) => self.domain.detail.calls.fail(message),
            ApiRequest::LoadCampaignAnalytics(_) => self.domain.detail.metrics.fail(message),
            ApiRequest::LoadCampaignHistory(_) => self.domain.detail.history.fail(message),
            _ => self.domain.voices.fail(message),
        }
    }

    /// Whether `ticket` belongs to the form that is still open
    fn owns_form(&self, ticket: Ticket) -> bool {
        self.form_dialog.pending == Some(ticket)
            && self.modals.contains(|m| matches!(m, Modal::Form(_)))
    }

    fn apply_mutation(&mut self, ticket: Ticket, request: ApiRequest, response: ApiResponse) {
        info!(request = %request, "request succeeded");
        let owned = self.owns_form(ticket);
        match request {
            ApiRequest::CreateCampaign(_) => {
                if owned {
                    self.domain.selection.clear();
                    self.close_form();
                }
                self.status_message = Some("Campaign created.".to_string());
                self.load(Channel::Campaigns);
            }
            ApiRequest::StartCampaign { .. } => {
                let message = match response {
                    ApiResponse::Ack(ref body) => body
                        .get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string),
                    _ => None,
                };
                self.alert(
                    "Campaign Started",
                    message.unwrap_or_else(|| "Campaign started successfully.".to_string()),
                    false,
                );
                self.load(Channel::Campaigns);
            }
            ApiRequest::UpdateCampaignStatus { status, .. } => {
                self.status_message = Some(format!("Campaign is now {}.", status.label()));
                self.load(Channel::Campaigns);
            }
            ApiRequest::DuplicateCampaign(_) => {
                self.status_message = Some("Campaign duplicated.".to_string());
                self.load(Channel::Campaigns);
            }
            ApiRequest::DeleteCampaign(_) => {
                self.status_message = Some("Campaign deleted.".to_string());
                self.load(Channel::Campaigns);
            }
            ApiRequest::CreateContact(_) | ApiRequest::UpdateContact { .. } => {
                if owned {
                    self.close_form();
                }
                self.status_message = Some("Contact saved.".to_string());
                self.load(Channel::Contacts);
            }
            ApiRequest::DeleteContact(_) => {
                self.status_message = Some("Contact deleted.".to_string());
                self.load(Channel::Contacts);
            }
            ApiRequest::ImportContacts(_) => {
                if owned {
                    self.close_form();
                }
                let mut lines = Vec::new();
                if let ApiResponse::Imported(ref result) = response {
                    lines.push(format!("Created {} contacts.", result.created));
                    if result.errors > 0 {
                        lines.push(format!("{} rows were rejected by the server.", result.errors));
                    }
                    lines.extend(result.error_details.iter().take(MAX_LISTED_ERRORS).cloned());
                }
                let skipped = match self.import_errors.take() {
                    Some((pending, skipped)) if pending == ticket => skipped,
                    other => {
                        self.import_errors = other;
                        Vec::new()
                    }
                };
                if !skipped.is_empty() {
                    lines.push(format!("{} rows were skipped:", skipped.len()));
                    lines.extend(skipped.into_iter().take(MAX_LISTED_ERRORS));
                }
                self.alert("Import Finished", lines.join("\n"), false);
                self.load(Channel::Contacts);
            }
            ApiRequest::CreateUser(_) | ApiRequest::UpdateUser { .. } => {
                if owned {
                    self.close_form();
                }
                self.status_message = Some("User saved.".to_string());
                self.load(Channel::Users);
            }
            ApiRequest::DeleteUser(_) => {
                self.status_message = Some("User deleted.".to_string());
                self.load(Channel::Users);
            }
            ApiRequest::FetchRecording(call_id) => {
                let body = match response {
                    ApiResponse::Recording(body) | ApiResponse::Ack(body) => body,
                    _ => serde_json::Value::Null,
                };
                let message = match recording_link(&body) {
                    Some(link) => format!("Recording for call {}:\n{}", call_id, link),
                    None => {
                        let mut lines = vec![format!("No recording link for call {} yet.", call_id)];
                        if let Some(note) = ["message", "status"]
                            .iter()
                            .find_map(|k| body.get(*k).and_then(|v| v.as_str()))
                        {
                            lines.push(note.to_string());
                        }
                        lines.join("\n")
                    }
                };
                self.alert("Call Recording", message, false);
            }
            _ => {}
        }
    }

    /// Keep the form open with its contents and report the failure
    fn fail_mutation(&mut self, ticket: Ticket, request: &ApiRequest, error: &ApiError) {
        warn!(request = %request, error = %error, "request failed");
        if self.owns_form(ticket) {
            self.form_dialog.submitting = false;
            self.form_dialog.pending = None;
        }
        if matches!(self.import_errors, Some((pending, _)) if pending == ticket) {
            self.import_errors = None;
        }
        self.alert(
            format!("Could not {}", request.name()),
            error.user_message(),
            true,
        );
    }

    fn apply_voice_test(&mut self, result: Result<ApiResponse, ApiError>) {
        self.domain.voice.testing = false;
        match result {
            Ok(ApiResponse::VoiceTest(reply)) => {
                info!(call_id = ?reply.call_id, "test call placed");
                self.domain.voice.notify(NoticeKind::Success, reply.summary());
                if reply.call_id.is_some() {
                    self.domain.voice.last_call_id = reply.call_id;
                }
            }
            Ok(_) => {
                let e = ApiError::Unexpected("test voice");
                self.domain.voice.notify(NoticeKind::Error, e.user_message());
            }
            Err(e) => {
                warn!(error = %e, "test call failed");
                self.domain.voice.notify(NoticeKind::Error, e.user_message());
            }
        }
    }

    fn apply_generated_audio(&mut self, voice: &str, result: Result<ApiResponse, ApiError>) {
        self.domain.voice.generating = false;
        let clip = match result {
            Ok(ApiResponse::Audio(clip)) => clip,
            Ok(_) => {
                let e = ApiError::Unexpected("generate audio");
                self.domain.voice.notify(NoticeKind::Error, e.user_message());
                return;
            }
            Err(e) => {
                warn!(error = %e, "audio generation failed");
                self.domain.voice.notify(NoticeKind::Error, e.user_message());
                return;
            }
        };

        match audio::save_clip(&self.audio_dir, voice, &clip) {
            Ok(path) => {
                info!(path = %path.display(), "audio saved");
                self.domain.voice.notify(
                    NoticeKind::Success,
                    "Audio saved. Press o to play.",
                );
                self.domain.voice.last_audio = Some(path);
            }
            Err(e) => {
                warn!(error = %e, "could not save audio");
                self.domain
                    .voice
                    .notify(NoticeKind::Error, format!("Failed to save audio: {}", e));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────

    fn open_form(&mut self, kind: FormKind, form: Form) {
        self.form_dialog = FormDialog::open(kind.clone(), form);
        self.modals.push(Modal::Form(kind));
    }

    /// Close the form (and a selector stacked on it) after a successful submit
    fn close_form(&mut self) {
        self.modals
            .remove_where(|m| matches!(m, Modal::Form(_) | Modal::ContactSelector));
        self.form_dialog.reset();
        self.selector_snapshot = None;
    }

    fn submit_form(&mut self) {
        if self.form_dialog.submitting {
            return;
        }
        if let Some(label) = self.form_dialog.form.missing_required() {
            self.form_dialog.error = Some(format!("{} is required.", label));
            return;
        }

        let form = &self.form_dialog.form;
        let request = match self.form_dialog.kind.clone() {
            FormKind::NewCampaign => {
                ApiRequest::CreateCampaign(form.to_new_campaign(&self.domain.selection))
            }
            FormKind::NewContact => ApiRequest::CreateContact(form.to_field_map()),
            FormKind::EditContact(id) => ApiRequest::UpdateContact {
                id,
                fields: form.to_field_map(),
            },
            FormKind::NewUser => ApiRequest::CreateUser(form.to_field_map()),
            FormKind::EditUser(id) => ApiRequest::UpdateUser {
                id,
                fields: form.to_field_map(),
            },
            FormKind::ImportContacts => {
                self.start_import();
                return;
            }
        };

        self.form_dialog.submitting = true;
        self.form_dialog.pending = Some(self.dispatch(Channel::Mutation, request));
    }

    fn start_import(&mut self) {
        let path = expand_home(self.form_dialog.form.value("path").trim());
        let plan = match load_contacts_csv(&path) {
            Ok(plan) => plan,
            Err(e) => {
                self.form_dialog.error = Some(format!("{:#}", e));
                return;
            }
        };

        if plan.is_empty() {
            self.close_form();
            let mut lines = vec!["No valid rows found, nothing was imported.".to_string()];
            lines.extend(plan.errors.into_iter().take(MAX_LISTED_ERRORS));
            self.alert("Import Contacts", lines.join("\n"), true);
            return;
        }

        if plan.rows.len() > MAX_BATCH_ROWS {
            self.form_dialog.error = Some(format!(
                "{} valid rows; at most {} can be imported at once. Split the file.",
                plan.rows.len(),
                MAX_BATCH_ROWS
            ));
            return;
        }

        info!(rows = plan.rows.len(), skipped = plan.errors.len(), "importing contacts");
        self.form_dialog.submitting = true;
        let ticket = self.dispatch(Channel::Mutation, ApiRequest::ImportContacts(plan.rows));
        self.form_dialog.pending = Some(ticket);
        self.import_errors = Some((ticket, plan.errors));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────

    fn close_modal(&mut self) {
        match self.modals.top() {
            Some(Modal::Form(FormKind::NewCampaign)) => {
                // Dismissing the campaign form drops the staged contacts
                self.domain.selection.clear();
                self.form_dialog.reset();
            }
            Some(Modal::Form(_)) => self.form_dialog.pending = None,
            Some(Modal::ContactSelector) => {
                if let Some(snapshot) = self.selector_snapshot.take() {
                    self.domain.selection = snapshot;
                }
            }
            _ => {}
        }
        self.modals.pop();
    }

    fn confirm_modal(&mut self) {
        let Some(Modal::Confirm(purpose)) = self.modals.top().cloned() else {
            return;
        };
        self.modals.pop();

        let request = match purpose {
            ConfirmPurpose::Quit => {
                self.should_quit = true;
                return;
            }
            ConfirmPurpose::StartCampaign { id, .. } => {
                ApiRequest::StartCampaign { campaign_id: id }
            }
            ConfirmPurpose::DeleteCampaign { id, .. } => ApiRequest::DeleteCampaign(id),
            ConfirmPurpose::DeleteContact { id, .. } => ApiRequest::DeleteContact(id),
            ConfirmPurpose::DeleteUser { id, .. } => ApiRequest::DeleteUser(id),
        };
        self.dispatch(Channel::Mutation, request);
    }

    fn open_contact_selector(&mut self) {
        self.selector_snapshot = Some(self.domain.selection.clone());
        if self.domain.contacts.items.is_empty() && !self.domain.contacts.is_loading() {
            self.load(Channel::Contacts);
        }
        self.contact_selector = ContactSelector::new();
        self.modals.push(Modal::ContactSelector);
    }

    fn confirm_contact_selection(&mut self) {
        self.form_dialog.summary = Some(self.domain.selection.summary());
        self.selector_snapshot = None;
        if self.modals.top() == Some(&Modal::ContactSelector) {
            self.modals.pop();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record actions
    // ─────────────────────────────────────────────────────────────────────────

    fn request_start_campaign(&mut self) {
        let Some(campaign) = self
            .campaigns
            .focused(&self.domain.campaigns.items, &self.search)
        else {
            return;
        };
        if campaign.is_active() {
            self.status_message = Some(format!("'{}' is already running.", campaign.campaign_name));
            return;
        }
        let purpose = ConfirmPurpose::StartCampaign {
            id: campaign.campaign_id.clone(),
            name: campaign.campaign_name.clone(),
        };
        self.modals.push(Modal::Confirm(purpose));
    }

    fn toggle_campaign_pause(&mut self) {
        let Some(campaign) = self
            .campaigns
            .focused(&self.domain.campaigns.items, &self.search)
        else {
            return;
        };
        match campaign.status.toggled() {
            Some(status) => {
                let id = campaign.campaign_id.clone();
                self.dispatch(
                    Channel::Mutation,
                    ApiRequest::UpdateCampaignStatus { id, status },
                );
            }
            None => {
                self.status_message =
                    Some("Only active or paused campaigns can be paused or resumed.".to_string());
            }
        }
    }

    fn duplicate_campaign(&mut self) {
        let id = self
            .campaigns
            .focused(&self.domain.campaigns.items, &self.search)
            .map(|c| c.campaign_id.clone());
        if let Some(id) = id {
            self.dispatch(Channel::Mutation, ApiRequest::DuplicateCampaign(id));
        }
    }

    fn request_delete(&mut self) {
        let purpose = match self.active_tab {
            Tab::Campaigns => self
                .campaigns
                .focused(&self.domain.campaigns.items, &self.search)
                .map(|c| ConfirmPurpose::DeleteCampaign {
                    id: c.campaign_id.clone(),
                    name: c.campaign_name.clone(),
                }),
            Tab::Contacts => self
                .contacts
                .focused(&self.domain.contacts.items, &self.search)
                .map(|c| ConfirmPurpose::DeleteContact {
                    id: c.id.clone(),
                    name: c.name.clone(),
                }),
            Tab::Users => self
                .users
                .focused(&self.domain.users.items, &self.search)
                .map(|u| ConfirmPurpose::DeleteUser {
                    id: u.id.clone(),
                    name: u.name.clone(),
                }),
            Tab::VoiceTest => None,
        };
        if let Some(purpose) = purpose {
            self.modals.push(Modal::Confirm(purpose));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Campaign detail
    // ─────────────────────────────────────────────────────────────────────────

    fn open_campaign_detail(&mut self) {
        let Some(campaign) = self
            .campaigns
            .focused(&self.domain.campaigns.items, &self.search)
            .cloned()
        else {
            return;
        };
        self.domain.detail.show(campaign);
        self.campaign_detail = CampaignDetailDialog::new();
        self.modals.push(Modal::CampaignDetail);
        self.load_campaign_detail();
    }

    /// Fetch every section of the open detail view
    fn load_campaign_detail(&mut self) {
        let Some(campaign) = self.domain.detail.campaign.clone() else {
            return;
        };
        let id = campaign.campaign_id.clone();

        self.domain.detail.calls.begin();
        self.dispatch(Channel::CampaignCalls, ApiRequest::LoadCampaignCalls(id.clone()));
        self.domain.detail.metrics.begin();
        self.dispatch(Channel::CampaignAnalytics, ApiRequest::LoadCampaignAnalytics(id));

        match campaign.campaign_group_id.clone() {
            Some(group_id) => {
                self.domain.detail.history.begin();
                self.dispatch(
                    Channel::CampaignHistory,
                    ApiRequest::LoadCampaignHistory(group_id),
                );
            }
            // Without a group the campaign is its own only version
            None => self.domain.detail.history.replace(vec![campaign]),
        }
    }

    fn fetch_recording(&mut self) {
        let call_id = if self.modals.top() == Some(&Modal::CampaignDetail) {
            self.campaign_detail
                .focused_call(&self.domain.detail)
                .map(|c| c.call_id.clone())
        } else {
            self.domain.voice.last_call_id.clone()
        };

        match call_id {
            Some(id) if !id.is_empty() => {
                self.dispatch(Channel::Recording, ApiRequest::FetchRecording(id));
            }
            _ if self.modals.is_empty() && self.active_tab == Tab::VoiceTest => self
                .domain
                .voice
                .notify(NoticeKind::Info, "Place a test call first."),
            _ => {}
        }
    }

    fn open_create_form(&mut self) {
        let kind = match self.active_tab {
            Tab::Campaigns => FormKind::NewCampaign,
            Tab::Contacts => FormKind::NewContact,
            Tab::Users => FormKind::NewUser,
            Tab::VoiceTest => return,
        };
        let form = Form::for_kind(&kind);
        self.open_form(kind, form);
    }

    fn open_edit_form(&mut self) {
        let target = match self.active_tab {
            Tab::Contacts => self
                .contacts
                .focused(&self.domain.contacts.items, &self.search)
                .map(|c| (FormKind::EditContact(c.id.clone()), Form::from_contact(c))),
            Tab::Users => self
                .users
                .focused(&self.domain.users.items, &self.search)
                .map(|u| (FormKind::EditUser(u.id.clone()), Form::from_user(u))),
            _ => None,
        };
        if let Some((kind, form)) = target {
            self.open_form(kind, form);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Voice actions
    // ─────────────────────────────────────────────────────────────────────────

    fn select_voice(&mut self) {
        let id = self
            .voice_panel
            .focused(&self.domain.voices.items, &self.search)
            .map(|v| v.id.clone());
        if let Some(id) = id {
            self.domain.voice.select_voice(&id);
        }
    }

    fn test_voice(&mut self) {
        if self.domain.voice.testing {
            return;
        }
        match self.domain.voice.validate_test_call() {
            Ok((phone, voice)) => {
                self.domain.voice.testing = true;
                self.domain.voice.notice = None;
                self.dispatch(Channel::VoiceTest, ApiRequest::TestVoice { phone, voice });
            }
            Err(e) => self.domain.voice.notify(NoticeKind::Error, e.to_string()),
        }
    }

    fn generate_audio(&mut self) {
        if self.domain.voice.generating {
            return;
        }
        match self.domain.voice.validate_generate() {
            Ok((text, voice)) => {
                self.domain.voice.generating = true;
                self.domain.voice.notice = None;
                self.dispatch(Channel::Audio, ApiRequest::GenerateAudio { text, voice });
            }
            Err(e) => self.domain.voice.notify(NoticeKind::Error, e.to_string()),
        }
    }

    fn play_audio(&mut self) {
        match self.domain.voice.last_audio.clone() {
            Some(path) => self.pending_audio = Some(path),
            None => self
                .domain
                .voice
                .notify(NoticeKind::Info, "Generate audio first."),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    fn visible_len(&self) -> usize {
        match self.active_tab {
            Tab::Campaigns => self
                .campaigns
                .visible(&self.domain.campaigns.items, &self.search)
                .len(),
            Tab::Contacts => self
                .contacts
                .visible(&self.domain.contacts.items, &self.search)
                .len(),
            Tab::Users => self.users.visible(&self.domain.users.items, &self.search).len(),
            Tab::VoiceTest => self
                .voice_panel
                .visible(&self.domain.voices.items, &self.search)
                .len(),
        }
    }

    fn move_cursor(&mut self, action: &Action) {
        let len = self.visible_len();
        let cursor = match self.active_tab {
            Tab::Campaigns => &mut self.campaigns.cursor,
            Tab::Contacts => &mut self.contacts.cursor,
            Tab::Users => &mut self.users.cursor,
            Tab::VoiceTest => &mut self.voice_panel.cursor,
        };
        match action {
            Action::NextItem => cursor.next(len),
            Action::PrevItem => cursor.previous(len),
            Action::FirstItem => cursor.first(len),
            Action::LastItem => cursor.last(len),
            _ => {}
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.load(self.active_tab.channel());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else if self.search.active {
            self.handle_search_key_event(key)
        } else if self.active_tab == Tab::VoiceTest && self.voice_panel.is_editing() {
            self.voice_panel.handle_key_event(key)
        } else if let Some(action) = self.handle_global_key_event(key) {
            Ok(Some(action))
        } else {
            match self.active_tab {
                Tab::Campaigns => self.campaigns.handle_key_event(key),
                Tab::Contacts => self.contacts.handle_key_event(key),
                Tab::Users => self.users.handle_key_event(key),
                Tab::VoiceTest => self.voice_panel.handle_key_event(key),
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.drain_completions();
                self.domain.voice.expire_notice(Instant::now());
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem => {
                self.move_cursor(&action)
            }
            Action::NextTab => self.show_tab(self.active_tab.next()),
            Action::PrevTab => self.show_tab(self.active_tab.previous()),
            Action::SelectTab(tab) => self.show_tab(tab),
            Action::Refresh => self.load(self.active_tab.channel()),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::Confirm(ConfirmPurpose::Quit));
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => self.close_modal(),
            Action::ConfirmModal => self.confirm_modal(),
            Action::ModalUp | Action::ModalDown => {
                let (cursor, len) = match self.modals.top() {
                    Some(Modal::ContactSelector) => (
                        &mut self.contact_selector.cursor,
                        self.domain.contacts.items.len(),
                    ),
                    Some(Modal::CampaignDetail) => {
                        let len = self.campaign_detail.row_count(&self.domain.detail);
                        (&mut self.campaign_detail.cursor, len)
                    }
                    _ => return Ok(None),
                };
                if action == Action::ModalUp {
                    cursor.previous(len);
                } else {
                    cursor.next(len);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.search.active = true,
            Action::ExitSearchMode => self.search.active = false,
            Action::ClearSearch => self.search.reset(),
            Action::SearchInput(c) => self.search.query.push(c),
            Action::SearchBackspace => {
                self.search.query.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Forms
            // ─────────────────────────────────────────────────────────────────
            Action::OpenCreateForm => self.open_create_form(),
            Action::OpenEditForm => self.open_edit_form(),
            Action::OpenImportPrompt => {
                if self.active_tab == Tab::Contacts {
                    self.open_form(FormKind::ImportContacts, Form::import_path());
                }
            }
            Action::SubmitForm => self.submit_form(),

            // ─────────────────────────────────────────────────────────────────
            // Contact selection
            // ─────────────────────────────────────────────────────────────────
            Action::OpenContactSelector => self.open_contact_selector(),
            Action::ToggleContactSelection => {
                let id = self
                    .contact_selector
                    .focused(&self.domain.contacts.items)
                    .map(|c| c.id.clone());
                if let Some(id) = id {
                    self.domain.selection.toggle(&id);
                }
            }
            Action::ConfirmContactSelection => self.confirm_contact_selection(),

            // ─────────────────────────────────────────────────────────────────
            // Record actions
            // ─────────────────────────────────────────────────────────────────
            Action::RequestStartCampaign => self.request_start_campaign(),
            Action::ToggleCampaignPause => self.toggle_campaign_pause(),
            Action::DuplicateCampaign => self.duplicate_campaign(),
            Action::RequestDelete => self.request_delete(),

            // ─────────────────────────────────────────────────────────────────
            // Campaign Detail
            // ─────────────────────────────────────────────────────────────────
            Action::OpenCampaignDetail => self.open_campaign_detail(),
            Action::NextDetailSection | Action::PrevDetailSection => {
                self.campaign_detail.update(action)?;
            }
            Action::ReloadCampaignDetail => self.load_campaign_detail(),
            Action::FetchRecording => self.fetch_recording(),

            // ─────────────────────────────────────────────────────────────────
            // Voice
            // ─────────────────────────────────────────────────────────────────
            Action::SelectVoice => self.select_voice(),
            Action::EditVoiceField(_) | Action::StopVoiceEdit => {
                self.voice_panel.update(action)?;
            }
            Action::VoiceInput(c) => {
                if let Some(field) = self.voice_panel.editing {
                    self.domain.voice.field_mut(field).push(c);
                }
            }
            Action::VoiceBackspace => {
                if let Some(field) = self.voice_panel.editing {
                    self.domain.voice.field_mut(field).pop();
                }
            }
            Action::TestVoice => self.test_voice(),
            Action::GenerateAudio => self.generate_audio(),
            Action::PlayAudio => self.play_audio(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let has_status = self.status_message.is_some() || self.runner.in_flight() > 0;
        let layout = calculate_main_layout(area, has_status);

        render_tabs(frame, layout.tabs, self.active_tab);

        let ctx = PanelContext {
            domain: &self.domain,
            search: &self.search,
        };
        match self.active_tab {
            Tab::Campaigns => draw_campaigns_panel(frame, layout.body, &mut self.campaigns, &ctx),
            Tab::Contacts => draw_contacts_panel(frame, layout.body, &mut self.contacts, &ctx),
            Tab::Users => draw_users_panel(frame, layout.body, &mut self.users, &ctx),
            Tab::VoiceTest => draw_voice_panel(frame, layout.body, &mut self.voice_panel, &ctx),
        }

        if let Some(status_area) = layout.status {
            self.render_status_bar(frame, status_area);
        }
        self.render_help_bar(frame, layout.help);

        // Modals are drawn bottom to top so the selector sits over its form
        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::Form(_) => self.form_dialog.handle_key_event(key),
            Modal::ContactSelector => self.contact_selector.handle_key_event(key),
            Modal::CampaignDetail => self.campaign_detail.handle_key_event(key),
            Modal::Confirm(_) => self.confirm_dialog.handle_key_event(key),
            Modal::Alert { .. } => self.alert_dialog.handle_key_event(key),
            Modal::Help { .. } => {
                let action = self.help_dialog.handle_key_event(key)?;
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = self.help_dialog.scroll_offset;
                }
                Ok(action)
            }
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::ClearSearch),
            KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    /// Keys that mean the same thing on every tab
    fn handle_global_key_event(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Esc if !self.search.query.is_empty() => Some(Action::ClearSearch),
            KeyCode::Char(c) => Tab::from_digit(c).map(Action::SelectTab),
            _ => None,
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::Form(_) => self.form_dialog.draw(frame, area)?,
            Modal::ContactSelector => draw_contact_selector(
                frame,
                area,
                &mut self.contact_selector,
                &self.domain.contacts,
                &self.domain.selection,
            ),
            Modal::CampaignDetail => draw_campaign_detail(
                frame,
                area,
                &mut self.campaign_detail,
                &self.domain.detail,
            ),
            Modal::Confirm(purpose) => draw_confirm_dialog(frame, area, purpose),
            Modal::Alert {
                title,
                message,
                is_error,
            } => draw_alert_dialog(frame, area, title, message, *is_error),
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.base_url),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        let in_flight = self.runner.in_flight();
        if in_flight > 0 {
            spans.push(Span::styled(
                format!("⟳ {} pending ", in_flight),
                Style::default().fg(Color::Yellow),
            ));
        }

        if let Some(ref status) = self.status_message {
            spans.push(Span::styled(
                status.clone(),
                Style::default().fg(Color::Green),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &str| {
            Span::styled(
                format!(" {} ", k),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let spans = if self.search.active {
            vec![
                key("Esc"),
                Span::raw("Clear  "),
                key("Enter"),
                Span::raw("Keep  "),
                Span::styled(
                    format!("Search: {}_", self.search.query),
                    Style::default().fg(Color::Cyan),
                ),
            ]
        } else if self.voice_panel.is_editing() && self.active_tab == Tab::VoiceTest {
            vec![key("Enter/Esc"), Span::raw("Done editing")]
        } else {
            let mut spans = vec![key("q"), Span::raw("Quit "), key("?"), Span::raw("Help ")];
            let tab_keys: &[(&str, &str)] = match self.active_tab {
                Tab::Campaigns => &[("n", "New"), ("s", "Start"), ("p", "Pause"), ("v", "Detail"), ("d", "Delete")],
                Tab::Contacts => &[("n", "New"), ("e", "Edit"), ("i", "Import"), ("d", "Delete")],
                Tab::Users => &[("n", "New"), ("e", "Edit"), ("d", "Delete")],
                Tab::VoiceTest => &[("Enter", "Choose"), ("p", "Phone"), ("w", "Text"), ("t", "Test"), ("a", "Audio")],
            };
            for &(k, label) in tab_keys {
                spans.push(key(k));
                spans.push(Span::raw(format!("{} ", label)));
            }
            spans.push(key("/"));
            spans.push(Span::raw("Search "));
            spans.push(key("r"));
            spans.push(Span::raw("Reload"));
            spans
        };

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, active: Tab) {
    let all_tabs = Tab::all();
    let titles: Vec<String> = all_tabs
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t.name()))
        .collect();
    let selected = all_tabs.iter().position(|t| *t == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BatchImportResult, CallRecord, Campaign, CampaignStatus, Contact, Metric, RecordId, User,
        VoiceOption, VoiceTestReply,
    };
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;
    use std::io::Write;

    fn app() -> App {
        App::new(RequestRunner::offline(), &Config::default())
    }

    fn sale() -> Campaign {
        serde_json::from_value(json!({
            "campaign_id": "c1",
            "campaign_name": "Sale",
            "version": 1,
            "status": "draft",
            "contact_list": ["1", "2"],
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: RecordId::new(id),
            name: name.to_string(),
            phone_number: "+14155550123".to_string(),
            company_name: None,
            email: None,
            tags: None,
            created_at: None,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let mut current = app.handle_key_event(key).unwrap();
        while let Some(action) = current {
            current = app.update(action).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn sent(app: &App) -> Vec<ApiRequest> {
        app.runner.sent().iter().map(|(_, r)| r.clone()).collect()
    }

    /// Complete the most recently dispatched request and apply it
    fn finish_last(app: &mut App, result: Result<ApiResponse, ApiError>) {
        let (ticket, request) = app.runner.sent().last().cloned().unwrap();
        app.runner.complete(ticket, request, result);
        app.update(Action::Tick).unwrap();
    }

    /// Complete the `index`-th dispatched request and apply it
    fn finish_at(app: &mut App, index: usize, result: Result<ApiResponse, ApiError>) {
        let (ticket, request) = app.runner.sent()[index].clone();
        app.runner.complete(ticket, request, result);
        app.update(Action::Tick).unwrap();
    }

    fn fields(value: serde_json::Value) -> crate::services::FieldMap {
        value.as_object().cloned().unwrap()
    }

    fn with_status(status: CampaignStatus) -> Campaign {
        let mut campaign = sale();
        campaign.status = status;
        campaign
    }

    fn alert_text(app: &App) -> (String, String, bool) {
        match app.modals.top() {
            Some(Modal::Alert {
                title,
                message,
                is_error,
            }) => (title.clone(), message.clone(), *is_error),
            other => panic!("expected an alert, found {:?}", other),
        }
    }

    fn with_campaigns(campaigns: Vec<Campaign>) -> App {
        let mut app = app();
        app.domain.campaigns.replace(campaigns);
        app.campaigns.cursor.first(1);
        app
    }

    #[test]
    fn test_init_loads_active_tab() {
        let mut app = app();
        app.init().unwrap();
        assert_eq!(sent(&app), vec![ApiRequest::LoadCampaigns]);
        assert!(app.domain.campaigns.is_loading());
    }

    #[test]
    fn test_showing_a_tab_loads_it_every_time() {
        let mut app = app();
        app.update(Action::SelectTab(Tab::Contacts)).unwrap();
        app.update(Action::SelectTab(Tab::Campaigns)).unwrap();
        app.update(Action::SelectTab(Tab::Contacts)).unwrap();
        assert_eq!(
            sent(&app),
            vec![
                ApiRequest::LoadContacts,
                ApiRequest::LoadCampaigns,
                ApiRequest::LoadContacts
            ]
        );
    }

    #[test]
    fn test_loaded_campaigns_replace_cache() {
        let mut app = app();
        app.init().unwrap();
        finish_last(&mut app, Ok(ApiResponse::Campaigns(vec![sale()])));
        assert_eq!(app.domain.campaigns.items, vec![sale()]);
        assert!(!app.domain.campaigns.is_loading());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut app = app();
        app.update(Action::Refresh).unwrap();
        app.update(Action::Refresh).unwrap();
        let (old_ticket, old_request) = app.runner.sent()[0].clone();
        let (new_ticket, new_request) = app.runner.sent()[1].clone();

        let mut newer = sale();
        newer.campaign_name = "Newer".to_string();
        app.runner
            .complete(new_ticket, new_request, Ok(ApiResponse::Campaigns(vec![newer])));
        app.runner
            .complete(old_ticket, old_request, Ok(ApiResponse::Campaigns(vec![sale()])));
        app.update(Action::Tick).unwrap();

        assert_eq!(app.domain.campaigns.items.len(), 1);
        assert_eq!(app.domain.campaigns.items[0].campaign_name, "Newer");
    }

    #[test]
    fn test_load_failure_is_shown_inline() {
        let mut app = app();
        app.init().unwrap();
        finish_last(
            &mut app,
            Err(ApiError::Status {
                status: 500,
                detail: Some("database offline".to_string()),
            }),
        );
        assert_eq!(app.domain.campaigns.error(), Some("database offline"));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_start_without_confirmation_sends_nothing() {
        let mut app = with_campaigns(vec![sale()]);
        press(&mut app, KeyCode::Char('s'));
        assert!(matches!(
            app.modals.top(),
            Some(Modal::Confirm(ConfirmPurpose::StartCampaign { .. }))
        ));
        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(sent(&app).is_empty());

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(
            sent(&app),
            vec![ApiRequest::StartCampaign {
                campaign_id: RecordId::new("c1")
            }]
        );
    }

    #[test]
    fn test_start_success_alerts_and_reloads() {
        let mut app = with_campaigns(vec![sale()]);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('y'));
        finish_last(&mut app, Ok(ApiResponse::Ack(json!({"message": "Started"}))));

        assert!(matches!(
            app.modals.top(),
            Some(Modal::Alert { message, is_error: false, .. }) if message == "Started"
        ));
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadCampaigns));
    }

    #[test]
    fn test_start_refused_for_active_campaign() {
        let mut running = sale();
        running.status = crate::model::CampaignStatus::Active;
        let mut app = with_campaigns(vec![running]);
        press(&mut app, KeyCode::Char('s'));
        assert!(app.modals.is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_campaign_create_success_clears_selection_and_summary() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Spring");
        app.domain.selection.toggle(&RecordId::new("2"));
        app.domain.selection.toggle(&RecordId::new("1"));
        app.form_dialog.summary = Some(app.domain.selection.summary());

        press(&mut app, KeyCode::Enter);
        match sent(&app).last() {
            Some(ApiRequest::CreateCampaign(payload)) => {
                assert_eq!(payload.campaign_name, "Spring");
                assert_eq!(payload.contact_list, vec![RecordId::new("2"), RecordId::new("1")]);
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert!(app.form_dialog.submitting);

        let mut created = sale();
        created.campaign_name = "Spring".to_string();
        finish_last(&mut app, Ok(ApiResponse::Campaign(created)));

        assert!(app.domain.selection.is_empty());
        assert!(app.form_dialog.summary.is_none());
        assert_eq!(app.form_dialog.form.value("campaign_name"), "");
        assert!(app.modals.is_empty());
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadCampaigns));
    }

    #[test]
    fn test_campaign_create_failure_keeps_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Spring");
        press(&mut app, KeyCode::Enter);
        finish_last(
            &mut app,
            Err(ApiError::Status {
                status: 422,
                detail: Some("agent_name: field required".to_string()),
            }),
        );

        assert!(matches!(app.modals.top(), Some(Modal::Alert { is_error: true, .. })));
        assert!(app
            .modals
            .contains(|m| *m == Modal::Form(FormKind::NewCampaign)));
        assert_eq!(app.form_dialog.form.value("campaign_name"), "Spring");
        assert!(!app.form_dialog.submitting);
    }

    #[test]
    fn test_campaign_name_required_locally() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        assert!(sent(&app).is_empty());
        assert!(app.form_dialog.error.is_some());
    }

    #[test]
    fn test_dismissing_campaign_form_clears_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        app.domain.selection.toggle(&RecordId::new("1"));
        app.form_dialog.summary = Some(app.domain.selection.summary());

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(app.domain.selection.is_empty());
        assert!(app.form_dialog.summary.is_none());
    }

    #[test]
    fn test_selector_confirm_writes_summary() {
        let mut app = app();
        app.domain
            .contacts
            .replace(vec![contact("1", "Ada"), contact("2", "Grace")]);
        press(&mut app, KeyCode::Char('n'));
        app.update(Action::OpenContactSelector).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::ContactSelector));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.domain.selection.len(), 2);
        assert_eq!(app.form_dialog.summary.as_deref(), Some("2 contacts selected."));
        assert_eq!(app.modals.top(), Some(&Modal::Form(FormKind::NewCampaign)));
    }

    #[test]
    fn test_selector_cancel_restores_selection() {
        let mut app = app();
        app.domain
            .contacts
            .replace(vec![contact("1", "Ada"), contact("2", "Grace")]);
        app.domain.selection.toggle(&RecordId::new("1"));
        press(&mut app, KeyCode::Char('n'));
        app.update(Action::OpenContactSelector).unwrap();

        // first move focuses Ada, second moves to Grace
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.domain.selection.len(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.domain.selection.to_vec(), vec![RecordId::new("1")]);
        assert_eq!(app.modals.top(), Some(&Modal::Form(FormKind::NewCampaign)));
    }

    #[test]
    fn test_selector_loads_contacts_when_empty() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        app.update(Action::OpenContactSelector).unwrap();
        assert_eq!(sent(&app), vec![ApiRequest::LoadContacts]);
    }

    #[test]
    fn test_voice_rejections_send_nothing() {
        let mut app = app();
        app.update(Action::SelectTab(Tab::VoiceTest)).unwrap();
        let loads = sent(&app).len();

        app.update(Action::TestVoice).unwrap();
        app.domain.voice.phone = "14155550123".to_string();
        app.update(Action::TestVoice).unwrap();
        app.domain.voice.phone = "+14155550123".to_string();
        app.update(Action::TestVoice).unwrap();

        assert_eq!(sent(&app).len(), loads);
        assert!(matches!(
            app.domain.voice.notice,
            Some(ref n) if n.kind == NoticeKind::Error
        ));
    }

    #[test]
    fn test_selecting_voice_enables_test() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        finish_last(
            &mut app,
            Ok(ApiResponse::Voices(vec![VoiceOption {
                id: "v1".to_string(),
                name: "Ava".to_string(),
                gender: "female".to_string(),
                description: "warm".to_string(),
            }])),
        );
        assert!(!app.domain.voice.can_test());

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.domain.voice.active_voice.as_deref(), Some("v1"));
        assert!(app.domain.voice.can_test());
    }

    #[test]
    fn test_voice_test_call_round_trip() {
        let mut app = app();
        app.active_tab = Tab::VoiceTest;
        app.domain.voice.select_voice("v1");
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "+14155550123");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.domain.voice.phone, "+14155550123");

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(
            sent(&app),
            vec![ApiRequest::TestVoice {
                phone: "+14155550123".to_string(),
                voice: "v1".to_string()
            }]
        );
        assert_eq!(app.domain.voice.test_label(), "Calling...");

        finish_last(
            &mut app,
            Ok(ApiResponse::VoiceTest(VoiceTestReply {
                message: Some("Test call initiated".to_string()),
                call_id: Some("CA1".to_string()),
                status: None,
            })),
        );
        assert!(!app.domain.voice.testing);
        assert!(matches!(
            app.domain.voice.notice,
            Some(ref n) if n.kind == NoticeKind::Success
        ));
    }

    #[test]
    fn test_voice_test_failure_is_inline() {
        let mut app = app();
        app.domain.voice.select_voice("v1");
        app.domain.voice.phone = "+14155550123".to_string();
        app.update(Action::TestVoice).unwrap();
        finish_last(
            &mut app,
            Err(ApiError::Status {
                status: 400,
                detail: Some("Twilio not configured".to_string()),
            }),
        );
        assert!(!app.domain.voice.testing);
        assert!(app.modals.is_empty());
        assert_eq!(
            app.domain.voice.notice.as_ref().map(|n| n.text.as_str()),
            Some("Twilio not configured")
        );
    }

    #[test]
    fn test_generated_audio_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.audio_dir = dir.path().to_path_buf();
        app.domain.voice.select_voice("v1");
        app.domain.voice.text = "Hello there".to_string();
        app.update(Action::GenerateAudio).unwrap();
        assert!(app.domain.voice.generating);

        finish_last(
            &mut app,
            Ok(ApiResponse::Audio(crate::model::AudioClip {
                bytes: vec![1, 2, 3],
                content_type: Some("audio/mpeg".to_string()),
            })),
        );
        let path = app.domain.voice.last_audio.clone().unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        app.update(Action::PlayAudio).unwrap();
        assert_eq!(app.pending_audio, Some(path));
    }

    #[test]
    fn test_import_without_valid_rows_sends_nothing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,phone_number").unwrap();
        writeln!(file, ",+14155550123").unwrap();
        writeln!(file, "Bob,not-a-phone").unwrap();

        let mut app = app();
        app.active_tab = Tab::Contacts;
        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, &file.path().display().to_string());
        press(&mut app, KeyCode::Enter);

        assert!(sent(&app).is_empty());
        assert!(matches!(app.modals.top(), Some(Modal::Alert { is_error: true, .. })));
        assert!(!app.modals.contains(|m| matches!(m, Modal::Form(_))));
    }

    #[test]
    fn test_import_posts_valid_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,phone_number").unwrap();
        writeln!(file, "Ada,+14155550123").unwrap();
        writeln!(file, "Bob,").unwrap();

        let mut app = app();
        app.active_tab = Tab::Contacts;
        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, &file.path().display().to_string());
        press(&mut app, KeyCode::Enter);

        match sent(&app).last() {
            Some(ApiRequest::ImportContacts(rows)) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_delete_contact_after_confirmation() {
        let mut app = app();
        app.active_tab = Tab::Contacts;
        app.domain.contacts.replace(vec![contact("7", "Ada")]);
        app.contacts.cursor.first(1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(
            sent(&app),
            vec![ApiRequest::DeleteContact(RecordId::new("7"))]
        );
    }

    #[test]
    fn test_search_filters_active_list() {
        let mut other = sale();
        other.campaign_name = "Winter".to_string();
        let mut app = with_campaigns(vec![sale(), other]);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "win");
        press(&mut app, KeyCode::Enter);
        assert!(!app.search.active);
        assert_eq!(app.visible_len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible_len(), 2);
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_dashboard_renders_campaign_card() {
        let mut app = with_campaigns(vec![sale()]);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("1 Campaigns"));
        assert!(text.contains("Sale"));
        assert!(text.contains("Version 1"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Form ownership
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_abandoned_form_completion_leaves_new_form_open() {
        let mut app = app();
        app.active_tab = Tab::Contacts;
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Bob");
        finish_at(&mut app, 0, Ok(ApiResponse::Contact(contact("1", "Ada"))));

        assert_eq!(app.modals.top(), Some(&Modal::Form(FormKind::NewContact)));
        assert_eq!(app.form_dialog.form.value("name"), "Bob");
        assert_eq!(app.status_message.as_deref(), Some("Contact saved."));
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadContacts));
    }

    #[test]
    fn test_abandoned_campaign_completion_keeps_staged_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Spring");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Summer");
        app.domain.selection.toggle(&RecordId::new("2"));
        finish_at(&mut app, 0, Ok(ApiResponse::Campaign(sale())));

        assert_eq!(app.domain.selection.to_vec(), vec![RecordId::new("2")]);
        assert_eq!(app.form_dialog.form.value("campaign_name"), "Summer");
        assert_eq!(app.modals.top(), Some(&Modal::Form(FormKind::NewCampaign)));
    }

    #[test]
    fn test_abandoned_form_failure_keeps_new_submission_pending() {
        let mut app = app();
        app.active_tab = Tab::Contacts;
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Bob");
        press(&mut app, KeyCode::Enter);
        assert!(app.form_dialog.submitting);

        finish_at(
            &mut app,
            0,
            Err(ApiError::Status {
                status: 400,
                detail: Some("Phone number already exists".to_string()),
            }),
        );
        let (title, _, is_error) = alert_text(&app);
        assert_eq!(title, "Could not create contact");
        assert!(is_error);
        assert!(app.form_dialog.submitting);

        finish_at(&mut app, 1, Ok(ApiResponse::Contact(contact("2", "Bob"))));
        assert!(!app.modals.contains(|m| matches!(m, Modal::Form(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record actions
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_edit_contact_sends_prefilled_fields() {
        let mut app = app();
        app.active_tab = Tab::Contacts;
        let mut ada = contact("7", "Ada");
        ada.company_name = Some("Acme".to_string());
        app.domain.contacts.replace(vec![ada]);
        app.contacts.cursor.first(1);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(
            app.modals.top(),
            Some(&Modal::Form(FormKind::EditContact(RecordId::new("7"))))
        );
        type_text(&mut app, " L");
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            sent(&app),
            vec![ApiRequest::UpdateContact {
                id: RecordId::new("7"),
                fields: fields(json!({
                    "name": "Ada L",
                    "phone_number": "+14155550123",
                    "company_name": "Acme",
                    "email": "",
                    "tags": ""
                })),
            }]
        );

        finish_last(&mut app, Ok(ApiResponse::Contact(contact("7", "Ada L"))));
        assert!(app.modals.is_empty());
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadContacts));
    }

    #[test]
    fn test_edit_user_sends_update() {
        let mut app = app();
        app.active_tab = Tab::Users;
        app.domain.users.replace(vec![User {
            id: RecordId::new("3"),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone_number: "+14155550100".to_string(),
            business_name: None,
            business_details: None,
        }]);
        app.users.cursor.first(1);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Navy");
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            sent(&app),
            vec![ApiRequest::UpdateUser {
                id: RecordId::new("3"),
                fields: fields(json!({
                    "name": "Grace",
                    "email": "grace@example.com",
                    "phone_number": "+14155550100",
                    "business_name": "Navy"
                })),
            }]
        );
    }

    #[test]
    fn test_create_user_closes_form_and_reloads() {
        let mut app = app();
        app.active_tab = Tab::Users;
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Enter);

        match sent(&app).last() {
            Some(ApiRequest::CreateUser(map)) => {
                assert_eq!(map.get("name"), Some(&json!("Ada")));
                assert_eq!(map.get("email"), Some(&json!("ada@example.com")));
                assert_eq!(map.get("password"), Some(&json!("")));
            }
            other => panic!("unexpected request {:?}", other),
        }

        let created: User = serde_json::from_value(json!({"id": 9, "name": "Ada"})).unwrap();
        finish_last(&mut app, Ok(ApiResponse::User(created)));
        assert!(app.modals.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("User saved."));
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadUsers));
    }

    #[test]
    fn test_pause_and_resume_dispatch_status_updates() {
        let mut app = with_campaigns(vec![with_status(CampaignStatus::Active)]);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(
            sent(&app),
            vec![ApiRequest::UpdateCampaignStatus {
                id: RecordId::new("c1"),
                status: CampaignStatus::Paused,
            }]
        );
        finish_last(
            &mut app,
            Ok(ApiResponse::Campaign(with_status(CampaignStatus::Paused))),
        );
        assert_eq!(app.status_message.as_deref(), Some("Campaign is now paused."));
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadCampaigns));

        let mut app = with_campaigns(vec![with_status(CampaignStatus::Paused)]);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(
            sent(&app),
            vec![ApiRequest::UpdateCampaignStatus {
                id: RecordId::new("c1"),
                status: CampaignStatus::Active,
            }]
        );
    }

    #[test]
    fn test_pause_refused_for_draft_campaign() {
        let mut app = with_campaigns(vec![sale()]);
        press(&mut app, KeyCode::Char('p'));
        assert!(sent(&app).is_empty());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Only active or paused campaigns can be paused or resumed.")
        );
    }

    #[test]
    fn test_duplicate_campaign_reloads() {
        let mut app = with_campaigns(vec![sale()]);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            sent(&app),
            vec![ApiRequest::DuplicateCampaign(RecordId::new("c1"))]
        );
        finish_last(&mut app, Ok(ApiResponse::Campaign(sale())));
        assert_eq!(app.status_message.as_deref(), Some("Campaign duplicated."));
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadCampaigns));
    }

    #[test]
    fn test_delete_campaign_after_confirmation() {
        let mut app = with_campaigns(vec![sale()]);
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(
            app.modals.top(),
            Some(Modal::Confirm(ConfirmPurpose::DeleteCampaign { .. }))
        ));
        assert!(sent(&app).is_empty());

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(
            sent(&app),
            vec![ApiRequest::DeleteCampaign(RecordId::new("c1"))]
        );
        finish_last(&mut app, Ok(ApiResponse::Ack(serde_json::Value::Null)));
        assert_eq!(app.status_message.as_deref(), Some("Campaign deleted."));
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadCampaigns));
    }

    #[test]
    fn test_failed_start_shows_blocking_alert() {
        let mut app = with_campaigns(vec![sale()]);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('y'));
        finish_last(
            &mut app,
            Err(ApiError::Status {
                status: 500,
                detail: Some("Failed to start campaign".to_string()),
            }),
        );

        let (title, message, is_error) = alert_text(&app);
        assert_eq!(title, "Could not start campaign");
        assert_eq!(message, "Failed to start campaign");
        assert!(is_error);
        assert_eq!(sent(&app).len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Import
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_import_success_alert_lists_results() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,phone_number").unwrap();
        writeln!(file, "Ada,+14155550123").unwrap();
        writeln!(file, "Grace,+14155550124").unwrap();
        writeln!(file, "Bob,").unwrap();

        let mut app = app();
        app.active_tab = Tab::Contacts;
        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, &file.path().display().to_string());
        press(&mut app, KeyCode::Enter);

        finish_last(
            &mut app,
            Ok(ApiResponse::Imported(BatchImportResult {
                created: 1,
                errors: 1,
                error_details: vec!["Phone +14155550124 already exists".to_string()],
            })),
        );

        let (title, message, is_error) = alert_text(&app);
        assert_eq!(title, "Import Finished");
        assert!(!is_error);
        assert!(message.contains("Created 1 contacts."));
        assert!(message.contains("1 rows were rejected by the server."));
        assert!(message.contains("Phone +14155550124 already exists"));
        assert!(message.contains("1 rows were skipped:"));
        assert!(!app.modals.contains(|m| matches!(m, Modal::Form(_))));
        assert_eq!(sent(&app).last(), Some(&ApiRequest::LoadContacts));
    }

    #[test]
    fn test_import_over_batch_limit_is_refused() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,phone_number").unwrap();
        for i in 0..=MAX_BATCH_ROWS {
            writeln!(file, "Contact {},+1415555{:04}", i, i).unwrap();
        }

        let mut app = app();
        app.active_tab = Tab::Contacts;
        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, &file.path().display().to_string());
        press(&mut app, KeyCode::Enter);

        assert!(sent(&app).is_empty());
        assert_eq!(app.modals.top(), Some(&Modal::Form(FormKind::ImportContacts)));
        let error = app.form_dialog.error.clone().unwrap_or_default();
        assert!(error.contains("1001 valid rows"));
        assert!(error.contains("at most 1000"));
        assert!(!app.form_dialog.submitting);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Campaign detail
    // ─────────────────────────────────────────────────────────────────────────

    fn grouped_sale() -> Campaign {
        let mut campaign = sale();
        campaign.campaign_group_id = Some(RecordId::new("g1"));
        campaign
    }

    fn call(id: &str) -> CallRecord {
        CallRecord {
            call_id: id.to_string(),
            to_phone: Some("+14155550123".to_string()),
            completed: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_detail_loads_calls_analytics_and_history() {
        let mut app = with_campaigns(vec![grouped_sale()]);
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.modals.top(), Some(&Modal::CampaignDetail));
        assert_eq!(
            sent(&app),
            vec![
                ApiRequest::LoadCampaignCalls(RecordId::new("c1")),
                ApiRequest::LoadCampaignAnalytics(RecordId::new("c1")),
                ApiRequest::LoadCampaignHistory(RecordId::new("g1")),
            ]
        );

        let mut older = grouped_sale();
        older.campaign_id = RecordId::new("c0");
        older.version = 0;
        finish_at(&mut app, 0, Ok(ApiResponse::Calls(vec![call("CA1")])));
        finish_at(
            &mut app,
            1,
            Ok(ApiResponse::Metrics(vec![Metric {
                name: "total_calls".to_string(),
                value: "1".to_string(),
            }])),
        );
        finish_at(
            &mut app,
            2,
            Ok(ApiResponse::History(vec![grouped_sale(), older])),
        );

        let detail = &app.domain.detail;
        assert_eq!(detail.calls.items, vec![call("CA1")]);
        assert_eq!(detail.metrics.items.len(), 1);
        assert_eq!(detail.history.items.len(), 2);
    }

    #[test]
    fn test_detail_without_group_lists_only_itself() {
        let mut app = with_campaigns(vec![sale()]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(sent(&app).len(), 2);
        assert_eq!(app.domain.detail.history.items, vec![sale()]);
    }

    #[test]
    fn test_detail_failure_is_inline_and_stale_reload_dropped() {
        let mut app = with_campaigns(vec![grouped_sale()]);
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(sent(&app).len(), 6);

        finish_at(&mut app, 3, Ok(ApiResponse::Calls(vec![call("CA2")])));
        finish_at(&mut app, 0, Ok(ApiResponse::Calls(vec![call("CA1")])));
        assert_eq!(app.domain.detail.calls.items, vec![call("CA2")]);

        finish_at(
            &mut app,
            4,
            Err(ApiError::Status {
                status: 500,
                detail: Some("Failed to get analytics".to_string()),
            }),
        );
        assert_eq!(app.domain.detail.metrics.error(), Some("Failed to get analytics"));
        assert_eq!(app.modals.top(), Some(&Modal::CampaignDetail));
    }

    #[test]
    fn test_recording_of_focused_call() {
        let mut app = with_campaigns(vec![grouped_sale()]);
        press(&mut app, KeyCode::Char('v'));
        finish_at(&mut app, 0, Ok(ApiResponse::Calls(vec![call("CA1"), call("CA2")])));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            sent(&app).last(),
            Some(&ApiRequest::FetchRecording("CA2".to_string()))
        );

        finish_last(
            &mut app,
            Ok(ApiResponse::Recording(json!({"url": "https://rec.example/CA2.mp3"}))),
        );
        let (title, message, is_error) = alert_text(&app);
        assert_eq!(title, "Call Recording");
        assert!(message.contains("https://rec.example/CA2.mp3"));
        assert!(!is_error);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.modals.top(), Some(&Modal::CampaignDetail));
    }

    #[test]
    fn test_recording_of_last_test_call() {
        let mut app = app();
        app.active_tab = Tab::VoiceTest;
        press(&mut app, KeyCode::Char('R'));
        assert!(sent(&app).is_empty());
        assert!(matches!(
            app.domain.voice.notice,
            Some(ref n) if n.kind == NoticeKind::Info
        ));

        app.domain.voice.select_voice("v1");
        app.domain.voice.phone = "+14155550123".to_string();
        app.update(Action::TestVoice).unwrap();
        finish_last(
            &mut app,
            Ok(ApiResponse::VoiceTest(VoiceTestReply {
                message: None,
                call_id: Some("CA9".to_string()),
                status: None,
            })),
        );

        press(&mut app, KeyCode::Char('R'));
        assert_eq!(
            sent(&app).last(),
            Some(&ApiRequest::FetchRecording("CA9".to_string()))
        );
        finish_last(
            &mut app,
            Err(ApiError::Status {
                status: 404,
                detail: Some("Failed to fetch recording: not found".to_string()),
            }),
        );
        let (title, _, is_error) = alert_text(&app);
        assert_eq!(title, "Could not fetch recording");
        assert!(is_error);
    }

    #[test]
    fn test_detail_renders_over_dashboard() {
        let mut app = with_campaigns(vec![grouped_sale()]);
        press(&mut app, KeyCode::Char('v'));
        finish_at(&mut app, 0, Ok(ApiResponse::Calls(vec![call("CA1")])));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Analytics"));
        assert!(text.contains("CA1"));
    }
}
