//! Deck core: pure state machine and view-model helpers.
mod domain;
mod effect;
mod msg;
mod poll;
mod state;
mod update;
mod view_model;

pub use domain::{
    Campaign, CampaignId, CampaignSnapshot, CampaignStatus, ConnectionStatus, List, ListId,
    PopulateDraft, Preferences, Prospect, SendOutcome, Sender, SenderId, SenderRotation,
    VerifyOutcome, DEFAULT_PROFILE_LIMIT,
};
pub use effect::{Effect, FetchPurpose};
pub use msg::Msg;
pub use poll::{is_processing, PollSession, POLL_INTERVAL, PROCESSING_WINDOW_MINUTES};
pub use state::{AppState, Page, PopulateStage};
pub use update::update;
pub use view_model::{
    CampaignRowView, DashboardViewModel, ListRowView, ProspectRowView, SenderRowView,
};
