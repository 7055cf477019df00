//! CU-CP notifier for UE context release

use nextgsim_ngap::procedures::UeContextReleaseRequest;

use crate::tasks::UeTask;

/// Handles release requests raised by UE procedures.
pub trait CuCpUeContextReleaseHandler: Send + Sync {
    /// Builds the task that sends the UE Context Release Request to the AMF.
    /// The caller decides on which queue the task runs.
    fn handle_ue_context_release(&self, request: UeContextReleaseRequest) -> UeTask;
}
