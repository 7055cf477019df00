//! DU processor interface (F1AP)

use nextgsim_f1ap::{F1apUeContextModificationRequest, F1apUeContextModificationResponse};

/// F1AP UE context procedures towards the DU serving a UE.
#[async_trait::async_trait]
pub trait F1apUeContextManager: Send + Sync {
    /// Sends a UE Context Modification Request and waits for the response
    /// or failure.
    async fn handle_ue_context_modification_request(
        &self,
        request: F1apUeContextModificationRequest,
    ) -> F1apUeContextModificationResponse;
}
