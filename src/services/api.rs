//! Backend REST client
//!
//! One method per endpoint. `execute` maps an [`ApiRequest`] onto the matching
//! method so requests can be described as plain values and run elsewhere.

use super::error::ApiError;
use crate::model::records::{flatten_metrics, AnalyticsReport, CallList, VoiceCatalog};
use crate::model::{
    AudioClip, BatchImportResult, CallRecord, Campaign, CampaignStatus, Contact, Metric,
    NewCampaign, RecordId, User, VoiceOption, VoiceTestReply,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::fmt;
use std::time::Duration;

/// Raw form fields, posted as-is
pub type FieldMap = Map<String, Value>;

/// Page requested from the campaign calls endpoint
const CALLS_PAGE: (usize, usize) = (0, 100);

// ═══════════════════════════════════════════════════════════════════════════════
// Requests & responses
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    LoadCampaigns,
    LoadContacts,
    LoadUsers,
    LoadVoices,
    CreateCampaign(NewCampaign),
    StartCampaign { campaign_id: RecordId },
    UpdateCampaignStatus { id: RecordId, status: CampaignStatus },
    DuplicateCampaign(RecordId),
    DeleteCampaign(RecordId),
    LoadCampaignCalls(RecordId),
    LoadCampaignAnalytics(RecordId),
    /// Keyed by the campaign group, not the version id
    LoadCampaignHistory(RecordId),
    CreateContact(FieldMap),
    UpdateContact { id: RecordId, fields: FieldMap },
    DeleteContact(RecordId),
    ImportContacts(Vec<FieldMap>),
    CreateUser(FieldMap),
    UpdateUser { id: RecordId, fields: FieldMap },
    DeleteUser(RecordId),
    TestVoice { phone: String, voice: String },
    GenerateAudio { text: String, voice: String },
    FetchRecording(String),
}

impl ApiRequest {
    /// Short name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::LoadCampaigns => "load campaigns",
            ApiRequest::LoadContacts => "load contacts",
            ApiRequest::LoadUsers => "load users",
            ApiRequest::LoadVoices => "load voices",
            ApiRequest::CreateCampaign(_) => "create campaign",
            ApiRequest::StartCampaign { .. } => "start campaign",
            ApiRequest::UpdateCampaignStatus { .. } => "update campaign status",
            ApiRequest::DuplicateCampaign(_) => "duplicate campaign",
            ApiRequest::DeleteCampaign(_) => "delete campaign",
            ApiRequest::LoadCampaignCalls(_) => "load campaign calls",
            ApiRequest::LoadCampaignAnalytics(_) => "load campaign analytics",
            ApiRequest::LoadCampaignHistory(_) => "load campaign history",
            ApiRequest::CreateContact(_) => "create contact",
            ApiRequest::UpdateContact { .. } => "update contact",
            ApiRequest::DeleteContact(_) => "delete contact",
            ApiRequest::ImportContacts(_) => "import contacts",
            ApiRequest::CreateUser(_) => "create user",
            ApiRequest::UpdateUser { .. } => "update user",
            ApiRequest::DeleteUser(_) => "delete user",
            ApiRequest::TestVoice { .. } => "test voice",
            ApiRequest::GenerateAudio { .. } => "generate audio",
            ApiRequest::FetchRecording(_) => "fetch recording",
        }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Campaigns(Vec<Campaign>),
    Contacts(Vec<Contact>),
    Users(Vec<User>),
    Voices(Vec<VoiceOption>),
    Calls(Vec<CallRecord>),
    Metrics(Vec<Metric>),
    History(Vec<Campaign>),
    Campaign(Campaign),
    Contact(Contact),
    User(User),
    /// Acknowledgement whose body is not used beyond logging
    Ack(Value),
    Imported(BatchImportResult),
    VoiceTest(VoiceTestReply),
    Audio(AudioClip),
    /// Provider recording data, passed through untouched
    Recording(Value),
}

// ═══════════════════════════════════════════════════════════════════════════════
// Client
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`; no timeout unless one is given
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send and turn a non-2xx status into `ApiError::Status`
    async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.bytes().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ApiError> {
        let bytes = Self::send(req).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like `json` but an empty body decodes as `null`
    async fn ack(req: RequestBuilder) -> Result<Value, ApiError> {
        let bytes = Self::send(req).await?.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Campaigns
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        Self::json(self.request(Method::GET, "/api/campaigns/")).await
    }

    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, ApiError> {
        Self::json(self.request(Method::POST, "/api/campaigns/").json(campaign)).await
    }

    pub async fn start_campaign(&self, campaign_id: &RecordId) -> Result<Value, ApiError> {
        let body = json!({ "campaign_id": campaign_id });
        Self::ack(self.request(Method::POST, "/start_campaign").json(&body)).await
    }

    pub async fn update_campaign_status(
        &self,
        id: &RecordId,
        status: CampaignStatus,
    ) -> Result<Campaign, ApiError> {
        let path = format!("/api/campaigns/{}/status", id);
        let body = json!({ "status": status });
        Self::json(self.request(Method::PATCH, &path).json(&body)).await
    }

    pub async fn duplicate_campaign(&self, id: &RecordId) -> Result<Campaign, ApiError> {
        let path = format!("/api/campaigns/{}/duplicate", id);
        Self::json(self.request(Method::POST, &path)).await
    }

    pub async fn delete_campaign(&self, id: &RecordId) -> Result<Value, ApiError> {
        let path = format!("/api/campaigns/{}", id);
        Self::ack(self.request(Method::DELETE, &path)).await
    }

    pub async fn campaign_calls(&self, id: &RecordId) -> Result<Vec<CallRecord>, ApiError> {
        let (skip, limit) = CALLS_PAGE;
        let path = format!("/api/campaigns/{}/calls?skip={}&limit={}", id, skip, limit);
        let list: CallList = Self::json(self.request(Method::GET, &path)).await?;
        Ok(list.calls)
    }

    pub async fn campaign_analytics(&self, id: &RecordId) -> Result<Vec<Metric>, ApiError> {
        let path = format!("/api/campaigns/{}/analytics", id);
        let report: AnalyticsReport = Self::json(self.request(Method::GET, &path)).await?;
        Ok(flatten_metrics(&report.analytics))
    }

    /// Every version sharing `group_id`, newest first
    pub async fn campaign_history(&self, group_id: &RecordId) -> Result<Vec<Campaign>, ApiError> {
        let path = format!("/api/campaigns/{}/history", group_id);
        let mut versions: Vec<Campaign> = Self::json(self.request(Method::GET, &path)).await?;
        sort_newest_first(&mut versions);
        Ok(versions)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Contacts
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        Self::json(self.request(Method::GET, "/api/contacts/")).await
    }

    pub async fn create_contact(&self, fields: &FieldMap) -> Result<Contact, ApiError> {
        Self::json(self.request(Method::POST, "/api/contacts/").json(fields)).await
    }

    pub async fn update_contact(
        &self,
        id: &RecordId,
        fields: &FieldMap,
    ) -> Result<Contact, ApiError> {
        let path = format!("/api/contacts/{}", id);
        Self::json(self.request(Method::PUT, &path).json(fields)).await
    }

    pub async fn delete_contact(&self, id: &RecordId) -> Result<Value, ApiError> {
        let path = format!("/api/contacts/{}", id);
        Self::ack(self.request(Method::DELETE, &path)).await
    }

    pub async fn import_contacts(&self, rows: &[FieldMap]) -> Result<BatchImportResult, ApiError> {
        Self::json(self.request(Method::POST, "/api/contacts/batch").json(rows)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Self::json(self.request(Method::GET, "/api/users/")).await
    }

    pub async fn create_user(&self, fields: &FieldMap) -> Result<User, ApiError> {
        Self::json(self.request(Method::POST, "/api/users/").json(fields)).await
    }

    pub async fn update_user(&self, id: &RecordId, fields: &FieldMap) -> Result<User, ApiError> {
        let path = format!("/api/users/{}", id);
        Self::json(self.request(Method::PUT, &path).json(fields)).await
    }

    pub async fn delete_user(&self, id: &RecordId) -> Result<Value, ApiError> {
        let path = format!("/api/users/{}", id);
        Self::ack(self.request(Method::DELETE, &path)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Voice features
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn available_voices(&self) -> Result<Vec<VoiceOption>, ApiError> {
        let catalog: VoiceCatalog =
            Self::json(self.request(Method::GET, "/api/features/available-voices")).await?;
        Ok(catalog.voices)
    }

    pub async fn test_voice(&self, phone: &str, voice: &str) -> Result<VoiceTestReply, ApiError> {
        let body = json!({ "user_phone_number": phone, "voice": voice });
        Self::json(self.request(Method::POST, "/api/features/test-voice").json(&body)).await
    }

    pub async fn generate_audio(&self, text: &str, voice: &str) -> Result<AudioClip, ApiError> {
        let body = json!({ "text": text, "voice": voice });
        let resp = Self::send(self.request(Method::POST, "/api/features/generate-audio").json(&body))
            .await?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp.bytes().await?;
        Ok(AudioClip {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    pub async fn call_recording(&self, call_id: &str) -> Result<Value, ApiError> {
        let path = format!("/api/features/calls/{}/recording", call_id);
        Self::ack(self.request(Method::GET, &path)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Run `request` and wrap the typed result
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        Ok(match request {
            ApiRequest::LoadCampaigns => ApiResponse::Campaigns(self.list_campaigns().await?),
            ApiRequest::LoadContacts => ApiResponse::Contacts(self.list_contacts().await?),
            ApiRequest::LoadUsers => ApiResponse::Users(self.list_users().await?),
            ApiRequest::LoadVoices => ApiResponse::Voices(self.available_voices().await?),
            ApiRequest::CreateCampaign(campaign) => {
                ApiResponse::Campaign(self.create_campaign(campaign).await?)
            }
            ApiRequest::StartCampaign { campaign_id } => {
                ApiResponse::Ack(self.start_campaign(campaign_id).await?)
            }
            ApiRequest::UpdateCampaignStatus { id, status } => {
                ApiResponse::Campaign(self.update_campaign_status(id, *status).await?)
            }
            ApiRequest::DuplicateCampaign(id) => {
                ApiResponse::Campaign(self.duplicate_campaign(id).await?)
            }
            ApiRequest::DeleteCampaign(id) => ApiResponse::Ack(self.delete_campaign(id).await?),
            ApiRequest::LoadCampaignCalls(id) => ApiResponse::Calls(self.campaign_calls(id).await?),
            ApiRequest::LoadCampaignAnalytics(id) => {
                ApiResponse::Metrics(self.campaign_analytics(id).await?)
            }
            ApiRequest::LoadCampaignHistory(group_id) => {
                ApiResponse::History(self.campaign_history(group_id).await?)
            }
            ApiRequest::CreateContact(fields) => {
                ApiResponse::Contact(self.create_contact(fields).await?)
            }
            ApiRequest::UpdateContact { id, fields } => {
                ApiResponse::Contact(self.update_contact(id, fields).await?)
            }
            ApiRequest::DeleteContact(id) => ApiResponse::Ack(self.delete_contact(id).await?),
            ApiRequest::ImportContacts(rows) => {
                ApiResponse::Imported(self.import_contacts(rows).await?)
            }
            ApiRequest::CreateUser(fields) => ApiResponse::User(self.create_user(fields).await?),
            ApiRequest::UpdateUser { id, fields } => {
                ApiResponse::User(self.update_user(id, fields).await?)
            }
            ApiRequest::DeleteUser(id) => ApiResponse::Ack(self.delete_user(id).await?),
            ApiRequest::TestVoice { phone, voice } => {
                ApiResponse::VoiceTest(self.test_voice(phone, voice).await?)
            }
            ApiRequest::GenerateAudio { text, voice } => {
                ApiResponse::Audio(self.generate_audio(text, voice).await?)
            }
            ApiRequest::FetchRecording(call_id) => {
                ApiResponse::Recording(self.call_recording(call_id).await?)
            }
        })
    }
}

/// Order campaign versions newest first
pub fn sort_newest_first(versions: &mut [Campaign]) {
    versions.sort_by(|a, b| b.version.cmp(&a.version));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/users/"), "http://localhost:8000/api/users/");
    }

    #[test]
    fn test_request_names() {
        assert_eq!(ApiRequest::LoadCampaigns.to_string(), "load campaigns");
        let req = ApiRequest::StartCampaign {
            campaign_id: RecordId::new("c1"),
        };
        assert_eq!(req.name(), "start campaign");
    }

    #[test]
    fn test_detail_request_names() {
        let id = RecordId::new("c1");
        assert_eq!(ApiRequest::LoadCampaignCalls(id.clone()).name(), "load campaign calls");
        assert_eq!(
            ApiRequest::LoadCampaignAnalytics(id.clone()).name(),
            "load campaign analytics"
        );
        assert_eq!(ApiRequest::LoadCampaignHistory(id).name(), "load campaign history");
        assert_eq!(
            ApiRequest::FetchRecording("CA1".to_string()).to_string(),
            "fetch recording"
        );
    }

    #[test]
    fn test_history_sorted_by_version_desc() {
        let mut versions: Vec<Campaign> = serde_json::from_value(json!([
            {"campaign_id": "a", "version": 1},
            {"campaign_id": "c", "version": 3},
            {"campaign_id": "b", "version": 2}
        ]))
        .unwrap();
        sort_newest_first(&mut versions);
        let order: Vec<u32> = versions.iter().map(|c| c.version).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn test_status_body_serialises_lowercase() {
        let body = json!({ "status": CampaignStatus::Paused });
        assert_eq!(body, json!({ "status": "paused" }));
    }
}
