use std::sync::{mpsc, Arc};
use std::thread;

use deck_logging::deck_debug;
use tokio_util::sync::CancellationToken;

use crate::{
    AckDto, ApiClient, ApiError, Backend, ClientSettings, ListDto, PopulateRequest, ProspectDto,
    SendOutcomeDto, SenderAckDto, SenderDto, ToggleDto, VerifyOutcomeDto,
};

/// Correlates a submitted request with the event it produces.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    Health,
    ListLists,
    GetList {
        id: String,
    },
    ListProspects {
        list_id: String,
    },
    RenameList {
        id: String,
        name: String,
    },
    DeleteList {
        id: String,
    },
    Populate(PopulateRequest),
    SendCampaign {
        limit: Option<u32>,
        default_dm: Option<String>,
    },
    VerifyConnections {
        limit: Option<u32>,
    },
    ListSenders,
    ToggleSender {
        id: String,
    },
    CreateSender {
        name: String,
        storage_state: Option<serde_json::Value>,
    },
    UpdateSender {
        id: String,
        name: String,
        storage_state: Option<serde_json::Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEvent {
    pub id: RequestId,
    pub outcome: ClientOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOutcome {
    Health(Result<bool, ApiError>),
    Lists(Result<Vec<ListDto>, ApiError>),
    List(Result<ListDto, ApiError>),
    Prospects {
        list_id: String,
        result: Result<Vec<ProspectDto>, ApiError>,
    },
    Renamed(Result<ListDto, ApiError>),
    Deleted(Result<AckDto, ApiError>),
    PopulateAck(Result<AckDto, ApiError>),
    CampaignSent(Result<SendOutcomeDto, ApiError>),
    Verified(Result<VerifyOutcomeDto, ApiError>),
    Senders(Result<Vec<SenderDto>, ApiError>),
    Toggled(Result<ToggleDto, ApiError>),
    SenderSaved(Result<SenderAckDto, ApiError>),
}

/// Worker-thread wrapper around a [`Backend`]: commands go in over a
/// channel, typed events come back out. The tokio runtime lives entirely
/// inside the worker so the caller stays synchronous.
///
/// Requests run as independent tasks; one slow or failing call never blocks
/// or cancels another.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<(RequestId, ClientRequest)>,
    event_rx: mpsc::Receiver<ClientEvent>,
    shutdown: CancellationToken,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        Ok(Self::with_backend(Arc::new(ApiClient::new(settings)?)))
    }

    /// Spawns the worker over any backend implementation. Tests use this
    /// to drive the handle without a live HTTP endpoint.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<(RequestId, ClientRequest)>();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();

        let worker_token = shutdown.clone();
        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok((id, request)) = cmd_rx.recv() {
                if worker_token.is_cancelled() {
                    break;
                }
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                let token = worker_token.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            deck_debug!("request {id} dropped during shutdown");
                        }
                        outcome = run_request(backend.as_ref(), request) => {
                            let _ = event_tx.send(ClientEvent { id, outcome });
                        }
                    }
                });
            }
        });

        Self {
            cmd_tx,
            event_rx,
            shutdown,
        }
    }

    pub fn submit(&self, id: RequestId, request: ClientRequest) {
        let _ = self.cmd_tx.send((id, request));
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Cancels every in-flight request. The worker thread exits once the
    /// command channel is dropped with the handle.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

async fn run_request(backend: &dyn Backend, request: ClientRequest) -> ClientOutcome {
    match request {
        ClientRequest::Health => ClientOutcome::Health(backend.health().await),
        ClientRequest::ListLists => ClientOutcome::Lists(backend.list_lists().await),
        ClientRequest::GetList { id } => ClientOutcome::List(backend.get_list(&id).await),
        ClientRequest::ListProspects { list_id } => {
            let result = backend.list_prospects(&list_id).await;
            ClientOutcome::Prospects { list_id, result }
        }
        ClientRequest::RenameList { id, name } => {
            ClientOutcome::Renamed(backend.rename_list(&id, &name).await)
        }
        ClientRequest::DeleteList { id } => ClientOutcome::Deleted(backend.delete_list(&id).await),
        ClientRequest::Populate(request) => {
            ClientOutcome::PopulateAck(backend.populate_list(&request).await)
        }
        ClientRequest::SendCampaign { limit, default_dm } => {
            ClientOutcome::CampaignSent(backend.send_campaign(limit, default_dm.as_deref()).await)
        }
        ClientRequest::VerifyConnections { limit } => {
            ClientOutcome::Verified(backend.verify_connections(limit).await)
        }
        ClientRequest::ListSenders => ClientOutcome::Senders(backend.list_senders().await),
        ClientRequest::ToggleSender { id } => {
            ClientOutcome::Toggled(backend.toggle_sender(&id).await)
        }
        ClientRequest::CreateSender {
            name,
            storage_state,
        } => ClientOutcome::SenderSaved(backend.create_sender(&name, storage_state.as_ref()).await),
        ClientRequest::UpdateSender {
            id,
            name,
            storage_state,
        } => ClientOutcome::SenderSaved(
            backend
                .update_sender(&id, &name, storage_state.as_ref())
                .await,
        ),
    }
}
