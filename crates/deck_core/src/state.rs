use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    Campaign, CampaignId, CampaignSnapshot, CampaignStatus, Effect, List, ListId, PollSession,
    PopulateDraft, Preferences, Prospect, Sender, VerifyOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Lists,
    Senders,
    Campaigns,
}

/// Where the populate workflow currently stands. Independent of whether a
/// poll session exists: opening the lists view while the backend is busy
/// can start a session without any submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopulateStage {
    #[default]
    Idle,
    Submitting,
    Polling,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: Page,
    health: Option<bool>,
    lists: Vec<List>,
    lists_loaded: bool,
    /// Bumped whenever the lists view is torn down; responses stamped with
    /// an older generation are discarded before any state is touched.
    generation: u64,
    /// Forces the next accepted refresh to re-evaluate the poll session,
    /// regardless of whether the collection length changed.
    session_stale: bool,
    poll: Option<PollSession>,
    populate_stage: PopulateStage,
    last_populate: PopulateDraft,
    selected_list: Option<ListId>,
    prospects: Vec<Prospect>,
    prospects_loaded: bool,
    senders: Vec<Sender>,
    senders_loaded: bool,
    campaigns: BTreeMap<CampaignId, Campaign>,
    next_campaign_id: CampaignId,
    verify: Option<VerifyOutcome>,
    verify_in_flight: bool,
    last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            next_campaign_id: 1,
            ..Self::default()
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn poll_active(&self) -> bool {
        self.poll.is_some()
    }

    pub fn populate_stage(&self) -> PopulateStage {
        self.populate_stage
    }

    pub fn last_populate(&self) -> &PopulateDraft {
        &self.last_populate
    }

    /// Snapshot of everything worth keeping across restarts.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            campaigns: self
                .campaigns
                .values()
                .map(|campaign| CampaignSnapshot {
                    name: campaign.name.clone(),
                    template: campaign.template.clone(),
                    limit: campaign.limit,
                    list_ids: campaign.list_ids.clone(),
                    sender_id: campaign.sender_id.clone(),
                    // A campaign mid-send at shutdown is restored as a draft.
                    completed: campaign.status == CampaignStatus::Completed,
                    outcome: campaign.outcome,
                })
                .collect(),
            last_populate: Some(self.last_populate.clone()),
        }
    }

    pub(crate) fn restore_preferences(&mut self, prefs: Preferences) {
        if let Some(draft) = prefs.last_populate {
            self.last_populate = draft;
        }
        for snapshot in prefs.campaigns {
            let id = self.allocate_campaign_id();
            self.campaigns.insert(
                id,
                Campaign {
                    id,
                    name: snapshot.name,
                    template: snapshot.template,
                    limit: snapshot.limit,
                    list_ids: snapshot.list_ids,
                    sender_id: snapshot.sender_id,
                    status: if snapshot.completed {
                        CampaignStatus::Completed
                    } else {
                        CampaignStatus::Draft
                    },
                    outcome: snapshot.outcome,
                },
            );
        }
    }

    pub(crate) fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    pub(crate) fn set_health(&mut self, ok: bool) {
        self.health = Some(ok);
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn mark_session_stale(&mut self) {
        self.session_stale = true;
    }

    pub(crate) fn set_populate_stage(&mut self, stage: PopulateStage) {
        self.populate_stage = stage;
    }

    pub(crate) fn remember_populate(&mut self, draft: PopulateDraft) {
        self.last_populate = draft;
    }

    /// Tears down the lists view: drops the poll session and invalidates
    /// every in-flight lists fetch. Returns true when a timer was running.
    pub(crate) fn teardown_lists_view(&mut self) -> bool {
        self.generation += 1;
        self.selected_list = None;
        self.prospects.clear();
        self.prospects_loaded = false;
        self.poll.take().is_some()
    }

    /// Accepts a wholesale refresh of the list collection and re-evaluates
    /// the poll session when warranted. The session is keyed off the
    /// *count* of lists: content-only changes never restart the loop.
    pub(crate) fn accept_lists_refresh(
        &mut self,
        fetched: Vec<List>,
        now: DateTime<Utc>,
    ) -> Vec<Effect> {
        let count_changed = !self.lists_loaded || fetched.len() != self.lists.len();
        self.lists = fetched;
        self.lists_loaded = true;

        let mut effects = Vec::new();
        if self.page == Page::Lists && (self.session_stale || count_changed) {
            let had_session = self.poll.is_some();
            self.poll = PollSession::from_lists(&self.lists, now);
            self.session_stale = false;
            match (had_session, self.poll.is_some()) {
                (false, true) => effects.push(Effect::StartPollTimer),
                (true, true) => {
                    // Fresh snapshot, fresh cadence.
                    effects.push(Effect::CancelPollTimer);
                    effects.push(Effect::StartPollTimer);
                }
                (true, false) => effects.push(Effect::CancelPollTimer),
                (false, false) => {}
            }
        }

        match self.populate_stage {
            PopulateStage::Submitting | PopulateStage::Polling => {
                self.populate_stage = if self.poll.is_some() {
                    PopulateStage::Polling
                } else {
                    PopulateStage::Settled
                };
            }
            PopulateStage::Idle | PopulateStage::Settled => {}
        }

        effects
    }

    /// Applies one poll tick's fetch. While any watched list is still
    /// processing the data is discarded outright, so the view never shows
    /// an intermediate count. The first settled tick replaces the
    /// collection exactly once and ends the session.
    pub(crate) fn apply_poll_fetch(&mut self, fetched: Vec<List>, now: DateTime<Utc>) -> Vec<Effect> {
        let Some(session) = &self.poll else {
            return Vec::new();
        };
        if session.any_still_processing(&fetched, now) {
            return Vec::new();
        }

        self.lists = fetched;
        self.poll = None;
        if self.populate_stage == PopulateStage::Polling {
            self.populate_stage = PopulateStage::Settled;
        }
        vec![Effect::CancelPollTimer]
    }

    pub(crate) fn select_list(&mut self, id: ListId) {
        self.selected_list = Some(id);
        self.prospects.clear();
        self.prospects_loaded = false;
    }

    pub(crate) fn selected_list(&self) -> Option<&ListId> {
        self.selected_list.as_ref()
    }

    pub(crate) fn set_prospects(&mut self, prospects: Vec<Prospect>) {
        self.prospects = prospects;
        self.prospects_loaded = true;
    }

    pub(crate) fn forget_list(&mut self, id: &ListId) {
        if self.selected_list.as_ref() == Some(id) {
            self.selected_list = None;
            self.prospects.clear();
            self.prospects_loaded = false;
        }
    }

    pub(crate) fn set_senders(&mut self, senders: Vec<Sender>) {
        self.senders = senders;
        self.senders_loaded = true;
    }

    pub(crate) fn insert_campaign(
        &mut self,
        name: String,
        template: String,
        limit: u32,
        list_ids: Vec<ListId>,
        sender_id: Option<String>,
    ) -> CampaignId {
        let id = self.allocate_campaign_id();
        self.campaigns.insert(
            id,
            Campaign {
                id,
                name,
                template,
                limit,
                list_ids,
                sender_id,
                status: CampaignStatus::Draft,
                outcome: None,
            },
        );
        id
    }

    pub(crate) fn campaign(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns.get(&id)
    }

    pub(crate) fn campaign_mut(&mut self, id: CampaignId) -> Option<&mut Campaign> {
        self.campaigns.get_mut(&id)
    }

    pub(crate) fn remove_campaign(&mut self, id: CampaignId) -> Option<Campaign> {
        self.campaigns.remove(&id)
    }

    pub(crate) fn any_campaign_running(&self) -> bool {
        self.campaigns
            .values()
            .any(|campaign| campaign.status == CampaignStatus::Running)
    }

    pub(crate) fn verify_in_flight(&self) -> bool {
        self.verify_in_flight
    }

    pub(crate) fn set_verify_in_flight(&mut self, in_flight: bool) {
        self.verify_in_flight = in_flight;
    }

    pub(crate) fn set_verify_outcome(&mut self, outcome: VerifyOutcome) {
        self.verify = Some(outcome);
    }

    fn allocate_campaign_id(&mut self) -> CampaignId {
        let id = self.next_campaign_id.max(1);
        self.next_campaign_id = id + 1;
        id
    }

    // Read access for the view model.
    pub(crate) fn health(&self) -> Option<bool> {
        self.health
    }

    pub(crate) fn lists(&self) -> &[List] {
        &self.lists
    }

    pub(crate) fn lists_loaded(&self) -> bool {
        self.lists_loaded
    }

    pub(crate) fn prospects(&self) -> &[Prospect] {
        &self.prospects
    }

    pub(crate) fn prospects_loaded(&self) -> bool {
        self.prospects_loaded
    }

    pub(crate) fn senders(&self) -> &[Sender] {
        &self.senders
    }

    pub(crate) fn senders_loaded(&self) -> bool {
        self.senders_loaded
    }

    pub(crate) fn campaigns(&self) -> impl Iterator<Item = &Campaign> {
        self.campaigns.values()
    }

    pub(crate) fn verify_outcome(&self) -> Option<VerifyOutcome> {
        self.verify
    }

    pub(crate) fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
