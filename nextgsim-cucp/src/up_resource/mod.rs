//! UP resource management
//!
//! The UP resource manager owns the UP configuration of a UE (PDU sessions,
//! DRBs and QoS flows). Procedures ask it to validate requests, compute the
//! next configuration and commit it once every peer agreed.

mod config_update;

pub use config_update::{
    UpConfigUpdate, UpConfigUpdateResult, UpDrbContext, UpPduSessionContextUpdate,
    UpQosFlowContext,
};

use nextgsim_ngap::procedures::PduSessionResourceModifyRequest;

/// UP resource manager of one UE.
pub trait UpResourceManager: Send + Sync {
    /// Returns true if the modify request can be served with the current
    /// UP configuration.
    fn validate_request(&self, request: &PduSessionResourceModifyRequest) -> bool;

    /// Computes the next configuration for the modify request.
    fn calculate_update(&self, request: &PduSessionResourceModifyRequest) -> UpConfigUpdate;

    /// Commits a configuration after the procedure succeeded.
    fn apply_config_update(&self, result: &UpConfigUpdateResult);
}
