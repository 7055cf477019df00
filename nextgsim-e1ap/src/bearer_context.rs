//! Bearer Context Modification (3GPP TS 37.483 Section 8.3.2)
//!
//! Request sent by the CU-CP to the CU-UP to add, modify or remove DRBs of
//! existing PDU sessions, and the response carrying the UL tunnel endpoints
//! the CU-UP allocated.

use std::collections::BTreeMap;

use nextgsim_common::{
    DrbId, PdcpSnSize, PduSessionId, QosFlowId, QosFlowLevelQosParams, RlcMode, UeIndex,
    UpTransportLayerInfo,
};

use crate::cause::E1apCause;

// ============================================================================
// Shared items
// ============================================================================

/// QoS flow mapped to a DRB, with its flow level QoS parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E1apQosFlowQosParamItem {
    /// QoS Flow Identifier
    pub qos_flow_id: QosFlowId,
    /// QoS parameters of the flow
    pub qos_flow_level_qos_params: QosFlowLevelQosParams,
}

/// PDCP configuration of a DRB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct E1apPdcpConfig {
    /// PDCP SN size uplink
    pub pdcp_sn_size_ul: PdcpSnSize,
    /// PDCP SN size downlink
    pub pdcp_sn_size_dl: PdcpSnSize,
    /// RLC mode of the bearer
    pub rlc_mode: RlcMode,
}

/// UP parameters item (tunnel endpoint plus cell group)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E1apUpParamsItem {
    /// Tunnel endpoint
    pub up_tnl_info: UpTransportLayerInfo,
    /// Cell group ID (0 for the master cell group)
    pub cell_group_id: u8,
}

// ============================================================================
// Bearer Context Modification Request
// ============================================================================

/// DRB To Setup Item NG-RAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E1apDrbToSetupItemNgRan {
    /// DRB ID
    pub drb_id: DrbId,
    /// PDCP configuration
    pub pdcp_cfg: E1apPdcpConfig,
    /// QoS flows to map to the new DRB
    pub qos_flow_info_to_be_setup: BTreeMap<QosFlowId, E1apQosFlowQosParamItem>,
}

impl E1apDrbToSetupItemNgRan {
    /// Creates an item with default PDCP configuration and no flows.
    pub fn new(drb_id: DrbId) -> Self {
        Self {
            drb_id,
            pdcp_cfg: E1apPdcpConfig::default(),
            qos_flow_info_to_be_setup: BTreeMap::new(),
        }
    }
}

/// DRB To Modify Item NG-RAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E1apDrbToModifyItemNgRan {
    /// DRB ID
    pub drb_id: DrbId,
    /// Flows remapped onto the DRB
    pub flow_map_info: BTreeMap<QosFlowId, E1apQosFlowQosParamItem>,
    /// DL tunnel endpoints allocated by the DU
    pub dl_up_params: Vec<E1apUpParamsItem>,
}

impl E1apDrbToModifyItemNgRan {
    /// Creates an item without flows or tunnel endpoints.
    pub fn new(drb_id: DrbId) -> Self {
        Self {
            drb_id,
            flow_map_info: BTreeMap::new(),
            dl_up_params: Vec::new(),
        }
    }
}

/// PDU Session Resource To Modify Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E1apPduSessionResToModifyItem {
    /// PDU Session ID
    pub pdu_session_id: PduSessionId,
    /// DRBs to add
    pub drb_to_setup_list_ng_ran: BTreeMap<DrbId, E1apDrbToSetupItemNgRan>,
    /// DRBs to modify
    pub drb_to_modify_list_ng_ran: BTreeMap<DrbId, E1apDrbToModifyItemNgRan>,
    /// DRBs to remove
    pub drb_to_rem_list_ng_ran: Vec<DrbId>,
}

impl E1apPduSessionResToModifyItem {
    /// Creates an item with empty DRB lists.
    pub fn new(pdu_session_id: PduSessionId) -> Self {
        Self {
            pdu_session_id,
            drb_to_setup_list_ng_ran: BTreeMap::new(),
            drb_to_modify_list_ng_ran: BTreeMap::new(),
            drb_to_rem_list_ng_ran: Vec::new(),
        }
    }
}

/// NG-RAN Bearer Context Modification Request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct E1apNgRanBearerContextModRequest {
    /// PDU sessions to modify
    pub pdu_session_res_to_modify_list: BTreeMap<PduSessionId, E1apPduSessionResToModifyItem>,
    /// PDU sessions to remove
    pub pdu_session_res_to_remove_list: Vec<PduSessionId>,
}

impl E1apNgRanBearerContextModRequest {
    /// Returns true if the payload neither modifies nor removes anything.
    pub fn is_empty(&self) -> bool {
        self.pdu_session_res_to_modify_list.is_empty()
            && self.pdu_session_res_to_remove_list.is_empty()
    }
}

/// Bearer Context Modification Request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E1apBearerContextModificationRequest {
    /// UE the bearer context belongs to
    pub ue_index: UeIndex,
    /// NG-RAN bearer context changes
    pub ng_ran_bearer_context_mod_request: Option<E1apNgRanBearerContextModRequest>,
}

impl E1apBearerContextModificationRequest {
    /// Creates a request without NG-RAN payload.
    pub fn new(ue_index: UeIndex) -> Self {
        Self {
            ue_index,
            ng_ran_bearer_context_mod_request: None,
        }
    }

    /// Returns the NG-RAN payload, creating an empty one if needed.
    pub fn ng_ran_mut(&mut self) -> &mut E1apNgRanBearerContextModRequest {
        self.ng_ran_bearer_context_mod_request
            .get_or_insert_with(E1apNgRanBearerContextModRequest::default)
    }
}

// ============================================================================
// Bearer Context Modification Response
// ============================================================================

/// QoS flow successfully set up by the CU-UP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E1apQosFlowItem {
    /// QoS Flow Identifier
    pub qos_flow_id: QosFlowId,
}

/// QoS flow the CU-UP failed to set up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E1apQosFlowFailedItem {
    /// QoS Flow Identifier
    pub qos_flow_id: QosFlowId,
    /// Failure cause
    pub cause: E1apCause,
}

/// DRB Setup Item NG-RAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E1apDrbSetupItemNgRan {
    /// DRB ID
    pub drb_id: DrbId,
    /// UL tunnel endpoints allocated by the CU-UP
    pub ul_up_transport_params: Vec<E1apUpParamsItem>,
    /// Flows set up on the DRB
    pub flow_setup_list: BTreeMap<QosFlowId, E1apQosFlowItem>,
    /// Flows that failed on the DRB
    pub flow_failed_list: BTreeMap<QosFlowId, E1apQosFlowFailedItem>,
}

impl E1apDrbSetupItemNgRan {
    /// Creates an item without tunnel endpoints or flows.
    pub fn new(drb_id: DrbId) -> Self {
        Self {
            drb_id,
            ul_up_transport_params: Vec::new(),
            flow_setup_list: BTreeMap::new(),
            flow_failed_list: BTreeMap::new(),
        }
    }
}

/// DRB Modified Item NG-RAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E1apDrbModifiedItemNgRan {
    /// DRB ID
    pub drb_id: DrbId,
    /// New UL tunnel endpoints
    pub ul_up_transport_params: Vec<E1apUpParamsItem>,
    /// Flows set up on the DRB
    pub flow_setup_list: BTreeMap<QosFlowId, E1apQosFlowItem>,
    /// Flows that failed on the DRB
    pub flow_failed_list: BTreeMap<QosFlowId, E1apQosFlowFailedItem>,
}

impl E1apDrbModifiedItemNgRan {
    /// Creates an item without tunnel endpoints or flows.
    pub fn new(drb_id: DrbId) -> Self {
        Self {
            drb_id,
            ul_up_transport_params: Vec::new(),
            flow_setup_list: BTreeMap::new(),
            flow_failed_list: BTreeMap::new(),
        }
    }
}

/// DRB Failed Item NG-RAN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E1apDrbFailedItemNgRan {
    /// DRB ID
    pub drb_id: DrbId,
    /// Failure cause
    pub cause: E1apCause,
}

/// PDU Session Resource Modified Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E1apPduSessionResourceModifiedItem {
    /// PDU Session ID
    pub pdu_session_id: PduSessionId,
    /// DRBs set up
    pub drb_setup_list_ng_ran: BTreeMap<DrbId, E1apDrbSetupItemNgRan>,
    /// DRBs modified
    pub drb_modified_list_ng_ran: BTreeMap<DrbId, E1apDrbModifiedItemNgRan>,
    /// DRBs that failed
    pub drb_failed_list_ng_ran: BTreeMap<DrbId, E1apDrbFailedItemNgRan>,
}

impl E1apPduSessionResourceModifiedItem {
    /// Creates an item with empty DRB lists.
    pub fn new(pdu_session_id: PduSessionId) -> Self {
        Self {
            pdu_session_id,
            drb_setup_list_ng_ran: BTreeMap::new(),
            drb_modified_list_ng_ran: BTreeMap::new(),
            drb_failed_list_ng_ran: BTreeMap::new(),
        }
    }
}

/// PDU Session Resource Failed Item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E1apPduSessionResourceFailedItem {
    /// PDU Session ID
    pub pdu_session_id: PduSessionId,
    /// Failure cause
    pub cause: E1apCause,
}

/// Bearer Context Modification Response (or Failure when `success` is false)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct E1apBearerContextModificationResponse {
    /// True for a response, false for a failure message
    pub success: bool,
    /// PDU sessions modified
    pub pdu_session_resource_modified_list:
        BTreeMap<PduSessionId, E1apPduSessionResourceModifiedItem>,
    /// PDU sessions that failed to be modified
    pub pdu_session_resource_failed_list: BTreeMap<PduSessionId, E1apPduSessionResourceFailedItem>,
    /// Cause of a failure message
    pub cause: Option<E1apCause>,
}

impl E1apBearerContextModificationResponse {
    /// Creates a successful response with empty lists.
    pub fn success() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    /// Creates a failure message with the given cause.
    pub fn failure(cause: E1apCause) -> Self {
        Self {
            success: false,
            cause: Some(cause),
            ..Default::default()
        }
    }
}
