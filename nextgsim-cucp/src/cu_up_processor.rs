//! CU-UP processor interface (E1AP)

use nextgsim_e1ap::{E1apBearerContextModificationRequest, E1apBearerContextModificationResponse};

/// E1AP bearer context procedures towards the CU-UP serving a UE.
#[async_trait::async_trait]
pub trait E1apBearerContextManager: Send + Sync {
    /// Sends a Bearer Context Modification Request and waits for the
    /// response or failure. Transport errors are reported as a failure
    /// response.
    async fn handle_bearer_context_modification_request(
        &self,
        request: E1apBearerContextModificationRequest,
    ) -> E1apBearerContextModificationResponse;
}
