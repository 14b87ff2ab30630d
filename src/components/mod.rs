//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod alert_dialog;
pub mod campaign_detail;
pub mod campaigns;
pub mod confirm_dialog;
pub mod contact_selector;
pub mod contacts;
pub mod form_dialog;
pub mod help_dialog;
pub mod layout;
pub mod list_cursor;
pub mod panel;
pub mod table;
pub mod users;
pub mod voice;

pub use alert_dialog::{draw_alert_dialog, AlertDialog};
pub use campaign_detail::{draw_campaign_detail, CampaignDetailDialog};
pub use campaigns::{draw_campaigns_panel, CampaignsPanel};
pub use confirm_dialog::{draw_confirm_dialog, ConfirmDialog};
pub use contact_selector::{draw_contact_selector, ContactSelector};
pub use contacts::{draw_contacts_panel, ContactsPanel};
pub use form_dialog::FormDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use panel::PanelContext;
pub use users::{draw_users_panel, UsersPanel};
pub use voice::{draw_voice_panel, VoicePanel};
