use crate::{
    AckDto, ApiClient, ApiError, ListDto, PopulateRequest, ProspectDto, SendOutcomeDto,
    SenderAckDto, SenderDto, ToggleDto, VerifyOutcomeDto,
};

/// The backend contract, one method per consumed operation. The seam
/// exists so tests and tooling can stand in for the real HTTP client.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn health(&self) -> Result<bool, ApiError>;
    async fn list_lists(&self) -> Result<Vec<ListDto>, ApiError>;
    async fn get_list(&self, id: &str) -> Result<ListDto, ApiError>;
    async fn list_prospects(&self, list_id: &str) -> Result<Vec<ProspectDto>, ApiError>;
    async fn rename_list(&self, id: &str, name: &str) -> Result<ListDto, ApiError>;
    async fn delete_list(&self, id: &str) -> Result<AckDto, ApiError>;
    async fn populate_list(&self, request: &PopulateRequest) -> Result<AckDto, ApiError>;
    async fn send_campaign(
        &self,
        limit: Option<u32>,
        default_dm: Option<&str>,
    ) -> Result<SendOutcomeDto, ApiError>;
    async fn verify_connections(&self, limit: Option<u32>) -> Result<VerifyOutcomeDto, ApiError>;
    async fn list_senders(&self) -> Result<Vec<SenderDto>, ApiError>;
    async fn toggle_sender(&self, id: &str) -> Result<ToggleDto, ApiError>;
    async fn create_sender(
        &self,
        name: &str,
        storage_state: Option<&serde_json::Value>,
    ) -> Result<SenderAckDto, ApiError>;
    async fn update_sender(
        &self,
        id: &str,
        name: &str,
        storage_state: Option<&serde_json::Value>,
    ) -> Result<SenderAckDto, ApiError>;
}

#[async_trait::async_trait]
impl Backend for ApiClient {
    async fn health(&self) -> Result<bool, ApiError> {
        ApiClient::health(self).await
    }

    async fn list_lists(&self) -> Result<Vec<ListDto>, ApiError> {
        ApiClient::list_lists(self).await
    }

    async fn get_list(&self, id: &str) -> Result<ListDto, ApiError> {
        ApiClient::get_list(self, id).await
    }

    async fn list_prospects(&self, list_id: &str) -> Result<Vec<ProspectDto>, ApiError> {
        ApiClient::list_prospects(self, list_id).await
    }

    async fn rename_list(&self, id: &str, name: &str) -> Result<ListDto, ApiError> {
        ApiClient::rename_list(self, id, name).await
    }

    async fn delete_list(&self, id: &str) -> Result<AckDto, ApiError> {
        ApiClient::delete_list(self, id).await
    }

    async fn populate_list(&self, request: &PopulateRequest) -> Result<AckDto, ApiError> {
        ApiClient::populate_list(self, request).await
    }

    async fn send_campaign(
        &self,
        limit: Option<u32>,
        default_dm: Option<&str>,
    ) -> Result<SendOutcomeDto, ApiError> {
        ApiClient::send_campaign(self, limit, default_dm).await
    }

    async fn verify_connections(&self, limit: Option<u32>) -> Result<VerifyOutcomeDto, ApiError> {
        ApiClient::verify_connections(self, limit).await
    }

    async fn list_senders(&self) -> Result<Vec<SenderDto>, ApiError> {
        ApiClient::list_senders(self).await
    }

    async fn toggle_sender(&self, id: &str) -> Result<ToggleDto, ApiError> {
        ApiClient::toggle_sender(self, id).await
    }

    async fn create_sender(
        &self,
        name: &str,
        storage_state: Option<&serde_json::Value>,
    ) -> Result<SenderAckDto, ApiError> {
        ApiClient::create_sender(self, name, storage_state).await
    }

    async fn update_sender(
        &self,
        id: &str,
        name: &str,
        storage_state: Option<&serde_json::Value>,
    ) -> Result<SenderAckDto, ApiError> {
        ApiClient::update_sender(self, id, name, storage_state).await
    }
}
