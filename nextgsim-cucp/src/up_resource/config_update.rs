//! UP resource configuration update (the "next configuration" plan)
//!
//! Computed by the UP resource manager from a PDU session request and then
//! refined by the procedure while the CU-UP and the DU answer.

use std::collections::BTreeMap;

use nextgsim_common::{
    DrbId, PdcpSnSize, PduSessionId, QosFlowId, QosFlowLevelQosParams, RlcMode, SNssai,
};

/// QoS flow mapped to a DRB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpQosFlowContext {
    /// QoS Flow Identifier
    pub qfi: QosFlowId,
    /// QoS parameters of the flow
    pub qos_params: QosFlowLevelQosParams,
}

/// DRB context as planned for a PDU session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpDrbContext {
    /// DRB ID
    pub drb_id: DrbId,
    /// PDU session the DRB belongs to
    pub pdu_session_id: PduSessionId,
    /// Slice of the PDU session
    pub s_nssai: SNssai,
    /// True if this is the default DRB of the session
    pub default_drb: bool,
    /// RLC mode
    pub rlc_mode: RlcMode,
    /// PDCP SN size, used in both directions
    pub pdcp_sn_size: PdcpSnSize,
    /// DRB-wide QoS
    pub qos_params: QosFlowLevelQosParams,
    /// Flows mapped to the DRB
    pub qos_flows: BTreeMap<QosFlowId, UpQosFlowContext>,
}

impl UpDrbContext {
    /// Creates a DRB context with default QoS and no flows.
    pub fn new(drb_id: DrbId, pdu_session_id: PduSessionId, s_nssai: SNssai) -> Self {
        Self {
            drb_id,
            pdu_session_id,
            s_nssai,
            default_drb: false,
            rlc_mode: RlcMode::default(),
            pdcp_sn_size: PdcpSnSize::default(),
            qos_params: QosFlowLevelQosParams::default(),
            qos_flows: BTreeMap::new(),
        }
    }

    /// Maps `qfi` to the DRB with the given parameters, replacing a previous mapping.
    pub fn map_qos_flow(&mut self, qfi: QosFlowId, qos_params: QosFlowLevelQosParams) {
        self.qos_flows.insert(qfi, UpQosFlowContext { qfi, qos_params });
    }

    /// Updates the parameters of a flow already mapped to the DRB.
    ///
    /// Returns false, leaving the DRB untouched, if `qfi` is not mapped here.
    pub fn update_qos_flow(&mut self, qfi: QosFlowId, qos_params: QosFlowLevelQosParams) -> bool {
        match self.qos_flows.get_mut(&qfi) {
            Some(flow) => {
                flow.qos_params = qos_params;
                true
            }
            None => false,
        }
    }
}

/// Planned changes for one PDU session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpPduSessionContextUpdate {
    /// PDU Session ID
    pub id: PduSessionId,
    /// Slice of the session
    pub s_nssai: SNssai,
    /// DRBs to add
    pub drb_to_add: BTreeMap<DrbId, UpDrbContext>,
    /// DRBs to modify
    pub drb_to_modify: BTreeMap<DrbId, UpDrbContext>,
    /// DRBs to remove
    pub drb_to_remove: Vec<DrbId>,
}

impl UpPduSessionContextUpdate {
    /// Creates an update without DRB changes.
    pub fn new(id: PduSessionId, s_nssai: SNssai) -> Self {
        Self {
            id,
            s_nssai,
            drb_to_add: BTreeMap::new(),
            drb_to_modify: BTreeMap::new(),
            drb_to_remove: Vec::new(),
        }
    }
}

/// Next UP configuration of a UE
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpConfigUpdate {
    /// True when the update creates the first UP context of the UE
    pub initial_context_creation: bool,
    /// Sessions to set up
    pub pdu_sessions_to_setup_list: BTreeMap<PduSessionId, UpPduSessionContextUpdate>,
    /// Sessions to modify
    pub pdu_sessions_to_modify_list: BTreeMap<PduSessionId, UpPduSessionContextUpdate>,
    /// Sessions to remove
    pub pdu_sessions_to_remove_list: Vec<PduSessionId>,
    /// Sessions the planner could not accommodate
    pub pdu_sessions_failed_to_modify_list: Vec<PduSessionId>,
}

impl UpConfigUpdate {
    /// Finds the session of the modify set that plans to add `drb_id`.
    pub fn find_session_adding_drb(&self, drb_id: DrbId) -> Option<PduSessionId> {
        self.pdu_sessions_to_modify_list
            .values()
            .find(|session| session.drb_to_add.contains_key(&drb_id))
            .map(|session| session.id)
    }
}

/// Configuration committed once a procedure completed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpConfigUpdateResult {
    /// Sessions added
    pub pdu_sessions_added_list: Vec<UpPduSessionContextUpdate>,
    /// Sessions modified
    pub pdu_sessions_modified_list: Vec<UpPduSessionContextUpdate>,
    /// Sessions removed
    pub pdu_sessions_removed_list: Vec<PduSessionId>,
}
