use chrono::{DateTime, Utc};

use crate::{
    is_processing, AppState, CampaignId, CampaignStatus, ConnectionStatus, ListId, Page,
    PopulateDraft, PopulateStage, SendOutcome, VerifyOutcome,
};

/// Everything the shell needs to draw one frame, derived from `AppState`
/// at a given instant. Form buffers live in the shell, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    pub page: Page,
    pub health: Option<bool>,
    pub error: Option<String>,
    pub lists: Vec<ListRowView>,
    pub lists_loaded: bool,
    pub poll_active: bool,
    pub populate_stage: PopulateStage,
    pub populate_in_flight: bool,
    pub last_populate: PopulateDraft,
    pub selected_list: Option<ListId>,
    pub prospects: Vec<ProspectRowView>,
    pub prospects_loaded: bool,
    pub senders: Vec<SenderRowView>,
    pub senders_loaded: bool,
    pub campaigns: Vec<CampaignRowView>,
    pub verify: Option<VerifyOutcome>,
    pub verify_in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRowView {
    pub id: ListId,
    pub name: String,
    pub search_url: String,
    pub profile_count: u64,
    /// Show the "Processing…" placeholder instead of the count.
    pub processing: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProspectRowView {
    pub profile_url: String,
    pub name: Option<String>,
    pub status: ConnectionStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderRowView {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub has_session: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRowView {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub limit: u32,
    /// List names resolved against the cached collection; a vanished list
    /// falls back to its id.
    pub list_names: Vec<String>,
    pub sender_name: Option<String>,
    pub outcome: Option<SendOutcome>,
}

impl AppState {
    pub fn view(&self, now: DateTime<Utc>) -> DashboardViewModel {
        DashboardViewModel {
            page: self.page(),
            health: self.health(),
            error: self.last_error().map(ToOwned::to_owned),
            lists: self
                .lists()
                .iter()
                .map(|list| ListRowView {
                    id: list.id.clone(),
                    name: list.name.clone(),
                    search_url: list.search_url.clone(),
                    profile_count: list.profile_count,
                    processing: is_processing(list, now),
                    created_at: list.created_at,
                })
                .collect(),
            lists_loaded: self.lists_loaded(),
            poll_active: self.poll_active(),
            populate_stage: self.populate_stage(),
            populate_in_flight: self.populate_stage() == PopulateStage::Submitting,
            last_populate: self.last_populate().clone(),
            selected_list: self.selected_list().cloned(),
            prospects: self
                .prospects()
                .iter()
                .map(|prospect| ProspectRowView {
                    profile_url: prospect.profile_url.clone(),
                    name: prospect.name.clone(),
                    status: prospect.status,
                    note: prospect.note.clone(),
                })
                .collect(),
            prospects_loaded: self.prospects_loaded(),
            senders: self
                .senders()
                .iter()
                .map(|sender| SenderRowView {
                    id: sender.id.clone(),
                    name: sender.name.clone(),
                    enabled: sender.enabled,
                    has_session: sender.has_session,
                    updated_at: sender.updated_at,
                })
                .collect(),
            senders_loaded: self.senders_loaded(),
            campaigns: self
                .campaigns()
                .map(|campaign| CampaignRowView {
                    id: campaign.id,
                    name: campaign.name.clone(),
                    status: campaign.status,
                    limit: campaign.limit,
                    list_names: campaign
                        .list_ids
                        .iter()
                        .map(|id| self.list_name(id).unwrap_or_else(|| id.clone()))
                        .collect(),
                    sender_name: campaign
                        .sender_id
                        .as_ref()
                        .map(|id| self.sender_name(id).unwrap_or_else(|| id.clone())),
                    outcome: campaign.outcome,
                })
                .collect(),
            verify: self.verify_outcome(),
            verify_in_flight: self.verify_in_flight(),
        }
    }

    fn list_name(&self, id: &str) -> Option<String> {
        self.lists()
            .iter()
            .find(|list| list.id == id)
            .map(|list| list.name.clone())
    }

    fn sender_name(&self, id: &str) -> Option<String> {
        self.senders()
            .iter()
            .find(|sender| sender.id == id)
            .map(|sender| sender.name.clone())
    }
}
