//! Backend records
//!
//! Records are decoded leniently and otherwise passed through unchanged.
//! The dashboard never treats them as authoritative.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ═══════════════════════════════════════════════════════════════════════════════

/// Opaque record identifier
///
/// The backend uses integer keys for contacts and users and UUIDs for
/// campaigns. Both decode into the same type; purely numeric ids are written
/// back as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Only canonical integers become numbers so "007" survives a round trip
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => RecordId(n.to_string()),
            Raw::Str(s) => RecordId(s),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Campaigns
// ═══════════════════════════════════════════════════════════════════════════════

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
    #[serde(other)]
    Unknown,
}

impl CampaignStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Unknown => "unknown",
        }
    }

    /// Status a pause/resume toggle moves to, if the toggle applies
    pub fn toggled(&self) -> Option<CampaignStatus> {
        match self {
            CampaignStatus::Active => Some(CampaignStatus::Paused),
            CampaignStatus::Paused => Some(CampaignStatus::Active),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: RecordId,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_list: Vec<RecordId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub batch_id: Option<String>,
    /// Shared by every version of the same campaign
    #[serde(default)]
    pub campaign_group_id: Option<RecordId>,
}

fn default_version() -> u32 {
    1
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RecordId>, D::Error> {
    Ok(Option::<Vec<RecordId>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Campaign {
    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    /// Creation date as `YYYY-MM-DD`, or the raw value when it doesn't parse
    pub fn created_date(&self) -> Option<String> {
        self.created_at.as_deref().map(format_date)
    }
}

/// Payload for `POST /api/campaigns/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCampaign {
    pub campaign_name: String,
    pub agent_name: String,
    pub task: String,
    pub contact_list: Vec<RecordId>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Campaign detail
// ═══════════════════════════════════════════════════════════════════════════════

/// One call placed for a campaign
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CallRecord {
    #[serde(default)]
    pub call_id: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub to_phone: Option<String>,
    #[serde(default)]
    pub from_phone: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub call_transcript: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CallRecord {
    pub fn outcome(&self) -> &'static str {
        match self.completed {
            Some(true) => "completed",
            Some(false) => "not completed",
            None => "pending",
        }
    }
}

/// Envelope of `GET /api/campaigns/{id}/calls`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallList {
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

/// Envelope of `GET /api/campaigns/{id}/analytics`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub analytics: Value,
}

/// One analytics figure, with nested keys joined by dots
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: String,
}

/// Flatten an analytics object into display rows
///
/// The shape of the report is not fixed, so every leaf becomes a row.
pub fn flatten_metrics(value: &Value) -> Vec<Metric> {
    let mut metrics = Vec::new();
    match value {
        Value::Null => {}
        Value::Object(_) => collect_metrics("", value, &mut metrics),
        other => metrics.push(Metric {
            name: "value".to_string(),
            value: metric_text(other),
        }),
    }
    metrics
}

fn collect_metrics(prefix: &str, value: &Value, out: &mut Vec<Metric>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_metrics(&name, inner, out);
            }
        }
        leaf => out.push(Metric {
            name: prefix.to_string(),
            value: metric_text(leaf),
        }),
    }
}

fn metric_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Playback link in a recording lookup, when the provider sent one
pub fn recording_link(value: &Value) -> Option<&str> {
    ["recording_url", "url"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .or_else(|| value.get("data").and_then(recording_link))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Contacts & Users
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_details: Option<String>,
}

/// Response of `POST /api/contacts/batch`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BatchImportResult {
    #[serde(default)]
    pub created: usize,
    #[serde(default)]
    pub errors: usize,
    #[serde(default)]
    pub error_details: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Voice features
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceOption {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub description: String,
}

/// Envelope of `GET /api/features/available-voices`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceCatalog {
    #[serde(default)]
    pub voices: Vec<VoiceOption>,
}

/// Reply of `POST /api/features/test-voice`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VoiceTestReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub call_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl VoiceTestReply {
    pub fn summary(&self) -> String {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "Test call initiated.".to_string());
        match self.call_id {
            Some(ref id) => format!("{} (call {})", message, id),
            None => message,
        }
    }
}

/// Binary body of `POST /api/features/generate-audio`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Format a backend timestamp as a calendar date
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}
