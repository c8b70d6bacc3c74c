use chrono::{DateTime, Utc};

pub type ListId = String;
pub type SenderId = String;
pub type CampaignId = u64;

/// Default `profile_limit` for a population request, matching the backend.
pub const DEFAULT_PROFILE_LIMIT: u32 = 20;

/// A named collection of scraped prospects tied to one search query.
///
/// Owned by the backend; the dashboard only ever holds a read-only copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub id: ListId,
    pub name: String,
    pub search_url: String,
    pub profile_count: u64,
    /// Parsed at the platform boundary; `None` when the backend sent no
    /// usable timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    New,
    Invited,
    Connected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prospect {
    /// The profile URL doubles as the natural key.
    pub profile_url: String,
    pub name: Option<String>,
    pub status: ConnectionStatus,
    pub note: Option<String>,
    pub list_id: ListId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: SenderId,
    pub name: String,
    pub enabled: bool,
    /// Whether a storage-state blob is present server-side. The blob itself
    /// never enters core state.
    pub has_session: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SenderRotation {
    #[default]
    RoundRobin,
    OneSender,
}

/// Input for a population request. Doubles as the persisted "last used
/// form" so the next session starts from familiar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateDraft {
    pub search_url: String,
    pub profile_limit: u32,
    pub collect_only: bool,
    pub send_note: bool,
    pub note_text: String,
    pub rotation: SenderRotation,
}

impl Default for PopulateDraft {
    fn default() -> Self {
        Self {
            search_url: String::new(),
            profile_limit: DEFAULT_PROFILE_LIMIT,
            collect_only: false,
            send_note: false,
            note_text: String::new(),
            rotation: SenderRotation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignStatus {
    #[default]
    Draft,
    Running,
    Completed,
}

/// Backend-reported outcome of a campaign send run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOutcome {
    pub attempted: u64,
    pub sent: u64,
    pub errors: u64,
}

/// Backend-reported outcome of a connection verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub checked: u64,
    pub connected: u64,
}

/// A campaign exists only inside the dashboard; the backend exposes no
/// campaign CRUD. Ids are local and reassigned on restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub template: String,
    pub limit: u32,
    pub list_ids: Vec<ListId>,
    pub sender_id: Option<SenderId>,
    pub status: CampaignStatus,
    pub outcome: Option<SendOutcome>,
}

/// Restart-safe snapshot of a campaign. A campaign that was mid-send at
/// shutdown comes back as a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSnapshot {
    pub name: String,
    pub template: String,
    pub limit: u32,
    pub list_ids: Vec<ListId>,
    pub sender_id: Option<SenderId>,
    pub completed: bool,
    pub outcome: Option<SendOutcome>,
}

/// Everything the dashboard persists between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preferences {
    pub campaigns: Vec<CampaignSnapshot>,
    pub last_populate: Option<PopulateDraft>,
}
