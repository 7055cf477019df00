//! UE Context Release Request (3GPP TS 38.413 Section 8.3.2)
//!
//! Raised by the NG-RAN node when it needs the AMF to release a UE, for
//! instance after the UE rejected a reconfiguration it could not apply.

use nextgsim_common::{PduSessionId, UeIndex};

use crate::cause::{NgapCause, RadioNetworkCause};

// ============================================================================
// UE Context Release Request
// ============================================================================

/// UE Context Release Request towards the AMF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeContextReleaseRequest {
    /// UE to release
    pub ue_index: UeIndex,
    /// PDU sessions with active resources (may be empty)
    pub pdu_session_res_list_cxt_rel_req: Vec<PduSessionId>,
    /// Cause of the release request
    pub cause: NgapCause,
}

impl UeContextReleaseRequest {
    /// Creates a release request with an empty PDU session list.
    pub fn new(ue_index: UeIndex, cause: NgapCause) -> Self {
        Self {
            ue_index,
            pdu_session_res_list_cxt_rel_req: Vec::new(),
            cause,
        }
    }

    /// Release request for a reason detected inside the NG-RAN node.
    pub fn ngran_generated(ue_index: UeIndex) -> Self {
        Self::new(
            ue_index,
            NgapCause::RadioNetwork(RadioNetworkCause::ReleaseDueToNgranGeneratedReason),
        )
    }
}
