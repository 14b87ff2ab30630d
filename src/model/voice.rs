//! Voice test panel state
//!
//! Holds the chosen voice, the phone/text inputs, the in-flight flags of the
//! two voice actions and the inline notice shown under them.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long a success notice stays on screen
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Editable input of the voice panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceField {
    Phone,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: Instant,
}

/// Rejections raised before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceInputError {
    #[error("Please enter your phone number.")]
    MissingPhone,
    #[error("Phone number must be in international format, starting with + (e.g. +14155550123).")]
    MissingPlusPrefix,
    #[error("Please select a voice first.")]
    NoVoiceSelected,
    #[error("Please enter some text to synthesize.")]
    MissingText,
}

#[derive(Debug, Default)]
pub struct VoiceTestState {
    /// Id of the single active voice; the last selection wins
    pub active_voice: Option<String>,
    pub phone: String,
    pub text: String,
    pub testing: bool,
    pub generating: bool,
    pub notice: Option<Notice>,
    /// Most recently saved audio clip
    pub last_audio: Option<PathBuf>,
    /// Call placed by the last successful test
    pub last_call_id: Option<String>,
}

impl VoiceTestState {
    pub fn select_voice(&mut self, id: &str) {
        self.active_voice = Some(id.to_string());
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_voice.as_deref() == Some(id)
    }

    /// The test action starts disabled and is enabled once a voice is chosen
    pub fn can_test(&self) -> bool {
        self.active_voice.is_some() && !self.testing
    }

    pub fn can_generate(&self) -> bool {
        self.active_voice.is_some() && !self.generating
    }

    pub fn test_label(&self) -> &'static str {
        if self.testing {
            "Calling..."
        } else {
            "Test Voice"
        }
    }

    pub fn generate_label(&self) -> &'static str {
        if self.generating {
            "Generating..."
        } else {
            "Generate Audio"
        }
    }

    pub fn field_mut(&mut self, field: VoiceField) -> &mut String {
        match field {
            VoiceField::Phone => &mut self.phone,
            VoiceField::Text => &mut self.text,
        }
    }

    /// Check the test-call inputs, returning `(phone, voice)`
    pub fn validate_test_call(&self) -> Result<(String, String), VoiceInputError> {
        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(VoiceInputError::MissingPhone);
        }
        if !phone.starts_with('+') {
            return Err(VoiceInputError::MissingPlusPrefix);
        }
        let voice = self
            .active_voice
            .clone()
            .ok_or(VoiceInputError::NoVoiceSelected)?;
        Ok((phone.to_string(), voice))
    }

    /// Check the audio generation inputs, returning `(text, voice)`
    pub fn validate_generate(&self) -> Result<(String, String), VoiceInputError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(VoiceInputError::MissingText);
        }
        let voice = self
            .active_voice
            .clone()
            .ok_or(VoiceInputError::NoVoiceSelected)?;
        Ok((text.to_string(), voice))
    }

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drop a success notice once it has been visible for the fixed delay
    pub fn expire_notice(&mut self, now: Instant) {
        let expired = self.notice.as_ref().is_some_and(|n| {
            n.kind == NoticeKind::Success && now.duration_since(n.shown_at) >= SUCCESS_NOTICE_TTL
        });
        if expired {
            self.notice = None;
        }
    }
}
