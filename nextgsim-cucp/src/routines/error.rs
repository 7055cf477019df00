//! Errors of the UE routines

use nextgsim_common::{DrbId, PduSessionId, QosFlowId};
use thiserror::Error;

/// A response or plan that does not line up with what was requested.
///
/// Any of these ends the routine with every requested PDU session failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutineError {
    /// A planned or reported session is not part of the NGAP request
    #[error("{0} not in the modify request")]
    SessionNotInRequest(PduSessionId),

    /// A reported session is not part of the sessions planned for modification
    #[error("{0} not in the planned modifications")]
    SessionNotInPlan(PduSessionId),

    /// A DRB set up by the CU-UP is not among the DRBs to add
    #[error("{drb_id} of {psi} not in the DRBs to add")]
    DrbNotInPlan {
        /// PDU session
        psi: PduSessionId,
        /// Reported DRB
        drb_id: DrbId,
    },

    /// A QoS flow is not in the request transfer of its session
    #[error("{qfi} of {drb_id} not in the request")]
    QosFlowNotInRequest {
        /// DRB the flow is mapped to
        drb_id: DrbId,
        /// QoS flow
        qfi: QosFlowId,
    },

    /// A QoS flow reported by the CU-UP is not mapped to the DRB in the plan
    #[error("{qfi} not mapped to {drb_id}")]
    QosFlowNotInDrb {
        /// DRB
        drb_id: DrbId,
        /// QoS flow
        qfi: QosFlowId,
    },

    /// The CU-UP failed some DRBs of a session
    #[error("CU-UP failed {count} DRB(s) of {psi}")]
    DrbFailuresReported {
        /// PDU session
        psi: PduSessionId,
        /// Number of failed DRBs
        count: usize,
    },

    /// The CU-UP failed some QoS flows of a DRB it set up
    #[error("CU-UP failed {count} QoS flow(s) of {drb_id}")]
    QosFlowFailuresReported {
        /// DRB
        drb_id: DrbId,
        /// Number of failed flows
        count: usize,
    },

    /// The DU failed to set up DRBs
    #[error("DU failed to set up {0:?}")]
    DuDrbSetupFailed(Vec<DrbId>),

    /// A DRB set up by the DU belongs to no session planned for modification
    #[error("{0} set up by the DU belongs to no planned session")]
    DrbNotInAnySession(DrbId),

    /// A DRB would be configured at the UE without any QoS flow
    #[error("{0} has no mapped QoS flows")]
    NoMappedQosFlows(DrbId),
}
