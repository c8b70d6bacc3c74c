//! Wire types for the backend contract. Response DTOs are deliberately
//! lenient: the store behind the backend is schemaless enough that optional
//! columns go missing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthDto {
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub search_url: String,
    #[serde(default)]
    pub profile_count: u64,
    /// RFC 3339 string; parsed (and possibly rejected) at the platform
    /// boundary, never here.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProspectDto {
    pub profile_url: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form status string; unknown values are tolerated downstream.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub list_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SenderDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    /// Opaque serialized cookie-jar state; only its presence matters to
    /// the dashboard.
    #[serde(default)]
    pub storage_state: Option<serde_json::Value>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Generic `{ ok, message? }` acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AckDto {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendOutcomeDto {
    pub ok: bool,
    pub attempted: u64,
    pub sent: u64,
    pub errors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyOutcomeDto {
    pub ok: bool,
    pub checked: u64,
    pub connected: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToggleDto {
    pub id: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SenderAckDto {
    pub id: String,
    pub ok: bool,
}

/// Body of `POST /lists/populate`. `sender_rotation` is omitted from the
/// wire when the caller keeps the backend default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulateRequest {
    pub search_url: String,
    pub profile_limit: u32,
    pub collect_only: bool,
    pub send_note: bool,
    pub note_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_rotation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RenameBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dm: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct VerifyBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SenderBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_state: Option<&'a serde_json::Value>,
}
