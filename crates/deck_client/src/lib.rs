//! Deck client: typed wrapper over the automation backend's HTTP contract.
mod backend;
mod dto;
mod error;
mod handle;
mod http;

pub use backend::Backend;
pub use dto::{
    AckDto, HealthDto, ListDto, PopulateRequest, ProspectDto, SendOutcomeDto, SenderAckDto,
    SenderDto, ToggleDto, VerifyOutcomeDto,
};
pub use error::{ApiError, ApiErrorKind};
pub use handle::{ClientEvent, ClientHandle, ClientOutcome, ClientRequest, RequestId};
pub use http::{ApiClient, ClientSettings};
