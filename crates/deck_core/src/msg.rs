use chrono::{DateTime, Utc};

use crate::{
    CampaignId, FetchPurpose, List, ListId, Page, PopulateDraft, Preferences, Prospect,
    SendOutcome, Sender, SenderId, VerifyOutcome,
};

/// Everything that can happen to the dashboard. Results arrive as plain
/// `Result<_, String>`: the error is already a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application start: restore preferences first, then kick off the
    /// initial fetches.
    Started,
    /// User switched to another page.
    PageSelected(Page),
    /// Health probe response.
    HealthChecked { ok: bool },
    /// A lists fetch resolved. Stamped with the generation it was issued
    /// under; stale generations are discarded without touching state.
    ListsFetched {
        generation: u64,
        purpose: FetchPurpose,
        result: Result<Vec<List>, String>,
        now: DateTime<Utc>,
    },
    /// User submitted the populate form.
    PopulateSubmitted { draft: PopulateDraft },
    /// Backend acknowledged (or rejected) the population request.
    PopulateAcked { result: Result<(), String> },
    /// The 5-second poll timer fired.
    PollTicked,
    /// User selected a list row; its prospects panel loads.
    ListSelected { id: ListId },
    ProspectsFetched {
        list_id: ListId,
        result: Result<Vec<Prospect>, String>,
    },
    /// User confirmed the rename dialog.
    RenameConfirmed { id: ListId, name: String },
    ListRenamed { result: Result<(), String> },
    /// User confirmed the delete dialog.
    DeleteConfirmed { id: ListId },
    ListDeleted {
        id: ListId,
        result: Result<(), String>,
    },
    SendersFetched {
        result: Result<Vec<Sender>, String>,
    },
    /// User clicked the refresh action for the current page.
    RefreshClicked,
    /// User flipped a sender's enabled switch.
    SenderToggleClicked { id: SenderId },
    SenderToggled {
        result: Result<(SenderId, bool), String>,
    },
    /// User submitted the sender dialog; `id: None` creates, `Some` updates.
    /// The storage state has already passed JSON validation in the shell.
    SenderFormSubmitted {
        id: Option<SenderId>,
        name: String,
        storage_state: Option<String>,
    },
    SenderSaved { result: Result<(), String> },
    /// User saved a new campaign draft.
    CampaignDrafted {
        name: String,
        template: String,
        limit: u32,
        list_ids: Vec<ListId>,
        sender_id: Option<SenderId>,
    },
    CampaignSendClicked { id: CampaignId },
    CampaignSendFinished {
        id: CampaignId,
        result: Result<SendOutcome, String>,
    },
    CampaignDiscarded { id: CampaignId },
    VerifyClicked { limit: u32 },
    VerifyFinished {
        result: Result<VerifyOutcome, String>,
    },
    /// Preferences restored from disk.
    PreferencesLoaded(Preferences),
    /// User dismissed the status-bar error.
    ErrorDismissed,
}
