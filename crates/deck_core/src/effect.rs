use crate::{CampaignId, ListId, PopulateDraft, SenderId};

/// Why a lists fetch was issued. Poll fetches are compared against the
/// active session and may be discarded; refresh fetches are accepted
/// wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    Refresh,
    Poll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CheckHealth,
    FetchLists {
        generation: u64,
        purpose: FetchPurpose,
    },
    FetchProspects {
        list_id: ListId,
    },
    SubmitPopulate {
        draft: PopulateDraft,
    },
    RenameList {
        id: ListId,
        name: String,
    },
    DeleteList {
        id: ListId,
    },
    FetchSenders,
    ToggleSender {
        id: SenderId,
    },
    /// Create (`id: None`) or update (`id: Some`) a sender. The storage
    /// state is an opaque, already-validated JSON string.
    SaveSender {
        id: Option<SenderId>,
        name: String,
        storage_state: Option<String>,
    },
    SendCampaign {
        campaign_id: CampaignId,
        limit: u32,
        default_dm: String,
    },
    VerifyConnections {
        limit: u32,
    },
    /// Start the 5-second poll timer, replacing any previous cadence.
    StartPollTimer,
    CancelPollTimer,
    /// Snapshot `AppState::preferences()` to disk.
    SavePreferences,
}
