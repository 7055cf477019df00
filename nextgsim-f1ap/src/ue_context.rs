//! UE Context Modification (3GPP TS 38.473 Section 8.3.4)
//!
//! Request sent by the CU-CP to the DU to set up, modify or release DRBs of
//! a UE, and the response carrying the DL tunnel endpoints and the updated
//! cell group configuration.

use std::collections::BTreeMap;

use bytes::Bytes;
use nextgsim_common::{
    DrbId, PdcpSnSize, QosFlowId, QosFlowLevelQosParams, RlcMode, SNssai, UeIndex,
    UpTransportLayerInfo,
};

use crate::cause::F1apCause;

// ============================================================================
// DRB information
// ============================================================================

/// Flow mapped to a DRB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F1apFlowsMappedToDrbItem {
    /// QoS Flow Identifier
    pub qos_flow_id: QosFlowId,
    /// QoS parameters of the flow
    pub qos_flow_level_qos_params: QosFlowLevelQosParams,
}

/// DRB Information (QoS of the DRB and the flows mapped to it)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct F1apDrbInfo {
    /// DRB-wide QoS
    pub drb_qos: QosFlowLevelQosParams,
    /// Slice of the PDU session the DRB belongs to
    pub s_nssai: SNssai,
    /// Flows mapped to the DRB
    pub flows_mapped_to_drb_list: BTreeMap<QosFlowId, F1apFlowsMappedToDrbItem>,
}

// ============================================================================
// UE Context Modification Request
// ============================================================================

/// DRBs To Be Setup Mod Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct F1apDrbsToBeSetupModItem {
    /// DRB ID
    pub drb_id: DrbId,
    /// DRB QoS information
    pub qos_info: F1apDrbInfo,
    /// UL tunnel endpoints at the CU-UP
    pub uluptnl_info_list: Vec<UpTransportLayerInfo>,
    /// RLC mode
    pub mode: RlcMode,
    /// PDCP SN length
    pub pdcp_sn_len: PdcpSnSize,
}

/// DRBs To Be Modified Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct F1apDrbsToBeModifiedItem {
    /// DRB ID
    pub drb_id: DrbId,
    /// Updated DRB QoS information, if changed
    pub qos_info: Option<F1apDrbInfo>,
    /// New UL tunnel endpoints at the CU-UP
    pub uluptnl_info_list: Vec<UpTransportLayerInfo>,
}

/// CU to DU RRC Information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct F1apCuToDuRrcInfo {
    /// Packed CG-ConfigInfo (may be empty)
    pub cg_cfg_info: Bytes,
    /// Packed UE capability RAT container list (may be empty)
    pub ue_cap_rat_container_list: Bytes,
    /// Packed MeasConfig of the UE (may be empty)
    pub meas_cfg: Bytes,
}

/// UE Context Modification Request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct F1apUeContextModificationRequest {
    /// UE the context belongs to
    pub ue_index: UeIndex,
    /// RRC information for the DU
    pub cu_to_du_rrc_info: F1apCuToDuRrcInfo,
    /// DRBs to set up
    pub drbs_to_be_setup_mod_list: BTreeMap<DrbId, F1apDrbsToBeSetupModItem>,
    /// DRBs to modify
    pub drbs_to_be_modified_list: BTreeMap<DrbId, F1apDrbsToBeModifiedItem>,
    /// DRBs to release
    pub drbs_to_be_released_list: Vec<DrbId>,
}

impl F1apUeContextModificationRequest {
    /// Creates a request with empty DRB lists.
    pub fn new(ue_index: UeIndex) -> Self {
        Self {
            ue_index,
            cu_to_du_rrc_info: F1apCuToDuRrcInfo::default(),
            drbs_to_be_setup_mod_list: BTreeMap::new(),
            drbs_to_be_modified_list: BTreeMap::new(),
            drbs_to_be_released_list: Vec::new(),
        }
    }
}

// ============================================================================
// UE Context Modification Response
// ============================================================================

/// DRBs Setup Mod Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct F1apDrbsSetupModItem {
    /// DRB ID
    pub drb_id: DrbId,
    /// Logical channel ID assigned by the DU
    pub lcid: Option<u8>,
    /// DL tunnel endpoints at the DU
    pub dl_up_tnl_info_to_be_setup_list: Vec<UpTransportLayerInfo>,
}

/// DRBs Modified Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct F1apDrbsModifiedItem {
    /// DRB ID
    pub drb_id: DrbId,
    /// Logical channel ID assigned by the DU
    pub lcid: Option<u8>,
    /// DL tunnel endpoints at the DU
    pub dl_up_tnl_info_to_be_setup_list: Vec<UpTransportLayerInfo>,
}

/// DRBs Failed To Be Setup/Modified Item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F1apDrbsFailedItem {
    /// DRB ID
    pub drb_id: DrbId,
    /// Failure cause
    pub cause: Option<F1apCause>,
}

/// DU to CU RRC Information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct F1apDuToCuRrcInfo {
    /// Packed CellGroupConfig (empty when unchanged)
    pub cell_group_cfg: Bytes,
    /// Packed MeasGapConfig (may be empty)
    pub meas_gap_cfg: Bytes,
    /// Packed P-MaxFR1 request (may be empty)
    pub requested_p_max_fr1: Bytes,
}

/// UE Context Modification Response (or Failure when `success` is false)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct F1apUeContextModificationResponse {
    /// True for a response, false for a failure message
    pub success: bool,
    /// RRC information from the DU
    pub du_to_cu_rrc_info: F1apDuToCuRrcInfo,
    /// DRBs set up
    pub drbs_setup_mod_list: BTreeMap<DrbId, F1apDrbsSetupModItem>,
    /// DRBs modified
    pub drbs_modified_list: BTreeMap<DrbId, F1apDrbsModifiedItem>,
    /// DRBs that failed to be set up
    pub drbs_failed_to_be_setup_mod_list: BTreeMap<DrbId, F1apDrbsFailedItem>,
    /// DRBs that failed to be modified
    pub drbs_failed_to_be_modified_list: BTreeMap<DrbId, F1apDrbsFailedItem>,
    /// Cause of a failure message
    pub cause: Option<F1apCause>,
}

impl F1apUeContextModificationResponse {
    /// Creates a successful response with empty lists.
    pub fn success() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    /// Creates a failure message with the given cause.
    pub fn failure(cause: F1apCause) -> Self {
        Self {
            success: false,
            cause: Some(cause),
            ..Default::default()
        }
    }

    /// Returns true if the DU neither set up nor modified any DRB.
    pub fn no_drbs_changed(&self) -> bool {
        self.drbs_setup_mod_list.is_empty() && self.drbs_modified_list.is_empty()
    }
}
