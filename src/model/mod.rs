//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - cached backend lists, selection set, voice panel state
//! - `ModalStack` - modal overlay management
//! - `RequestSequencer` - per-channel request tickets
//! - `Form` - editable form fields and their payloads

pub mod domain;
pub mod form;
pub mod modal;
pub mod records;
pub mod selection;
pub mod sequence;
pub mod ui;
pub mod voice;

// Re-export commonly used types
pub use domain::{Cache, CampaignDetail, DomainState, LoadState};
pub use form::{Form, FormKind};
pub use modal::{ConfirmPurpose, Modal, ModalStack};
pub use records::{
    AudioClip, BatchImportResult, CallRecord, Campaign, CampaignStatus, Contact, Metric,
    NewCampaign, RecordId, User, VoiceOption, VoiceTestReply,
};
pub use selection::SelectionSet;
pub use sequence::{Channel, RequestSequencer, Ticket};
pub use ui::{SearchState, Tab};
pub use voice::{NoticeKind, VoiceField, VoiceTestState};
