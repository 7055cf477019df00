//! PDU Session Resource Modify (3GPP TS 38.413 Section 8.2.3)
//!
//! CU-CP side representation of the PDU Session Resource Modify Request
//! received from the AMF and of the response sent back. The transfer IEs are
//! kept decoded, keyed by PDU session ID and QFI so that later stages can
//! cross-reference them.

use std::collections::BTreeMap;

use bytes::Bytes;
use nextgsim_common::{PduSessionId, QosFlowId, QosFlowLevelQosParams, UeIndex};

use crate::cause::NgapCause;

// ============================================================================
// PDU Session Resource Modify Request
// ============================================================================

/// QoS Flow Add or Modify Request Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QosFlowAddOrModifyRequestItem {
    /// QoS Flow Identifier
    pub qos_flow_id: QosFlowId,
    /// Requested QoS parameters for the flow
    pub qos_flow_level_qos_params: QosFlowLevelQosParams,
    /// E-RAB ID for EPS interworking (optional)
    pub erab_id: Option<u8>,
}

/// QoS flow to be released, with the release cause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QosFlowWithCause {
    /// QoS Flow Identifier
    pub qos_flow_id: QosFlowId,
    /// Release cause
    pub cause: NgapCause,
}

/// PDU Session Resource Modify Request Transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PduSessionResourceModifyRequestTransfer {
    /// QoS flows to add or modify, keyed by QFI
    pub qos_flow_add_or_modify_request_list: BTreeMap<QosFlowId, QosFlowAddOrModifyRequestItem>,
    /// QoS flows to release, keyed by QFI
    pub qos_flow_to_release_list: BTreeMap<QosFlowId, QosFlowWithCause>,
}

impl PduSessionResourceModifyRequestTransfer {
    /// Adds a QoS flow to the add-or-modify list, replacing any previous entry.
    pub fn add_qos_flow(&mut self, qos_flow_id: QosFlowId, params: QosFlowLevelQosParams) {
        self.qos_flow_add_or_modify_request_list.insert(
            qos_flow_id,
            QosFlowAddOrModifyRequestItem {
                qos_flow_id,
                qos_flow_level_qos_params: params,
                erab_id: None,
            },
        );
    }
}

/// PDU Session Resource Modify Item (per session)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionResourceModifyItem {
    /// PDU Session ID
    pub pdu_session_id: PduSessionId,
    /// NAS PDU to relay to the UE (may be empty)
    pub nas_pdu: Bytes,
    /// Decoded request transfer
    pub transfer: PduSessionResourceModifyRequestTransfer,
}

impl PduSessionResourceModifyItem {
    /// Creates an item without NAS PDU and without QoS flows.
    pub fn new(pdu_session_id: PduSessionId) -> Self {
        Self {
            pdu_session_id,
            nas_pdu: Bytes::new(),
            transfer: PduSessionResourceModifyRequestTransfer::default(),
        }
    }
}

/// PDU Session Resource Modify Request as handed to the CU-CP procedures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionResourceModifyRequest {
    /// UE the request applies to
    pub ue_index: UeIndex,
    /// Items keyed by PDU session ID
    pub pdu_session_res_modify_items: BTreeMap<PduSessionId, PduSessionResourceModifyItem>,
}

impl PduSessionResourceModifyRequest {
    /// Creates an empty request for the given UE.
    pub fn new(ue_index: UeIndex) -> Self {
        Self {
            ue_index,
            pdu_session_res_modify_items: BTreeMap::new(),
        }
    }

    /// Adds an item. Returns false (and leaves the request untouched) if the
    /// PDU session ID is already present.
    pub fn add_item(&mut self, item: PduSessionResourceModifyItem) -> bool {
        if self.pdu_session_res_modify_items.contains_key(&item.pdu_session_id) {
            return false;
        }
        self.pdu_session_res_modify_items.insert(item.pdu_session_id, item);
        true
    }

    /// Returns true if the request carries an item for `psi`.
    pub fn contains(&self, psi: PduSessionId) -> bool {
        self.pdu_session_res_modify_items.contains_key(&psi)
    }

    /// Returns the item for `psi`, if any.
    pub fn item(&self, psi: PduSessionId) -> Option<&PduSessionResourceModifyItem> {
        self.pdu_session_res_modify_items.get(&psi)
    }

    /// Iterates over the requested PDU session IDs in ascending order.
    pub fn session_ids(&self) -> impl Iterator<Item = PduSessionId> + '_ {
        self.pdu_session_res_modify_items.keys().copied()
    }

    /// Collects the non-empty NAS PDUs in session order.
    pub fn nas_pdus(&self) -> Vec<Bytes> {
        self.pdu_session_res_modify_items
            .values()
            .filter(|item| !item.nas_pdu.is_empty())
            .map(|item| item.nas_pdu.clone())
            .collect()
    }
}

// ============================================================================
// PDU Session Resource Modify Response
// ============================================================================

/// Acknowledged QoS flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QosFlowAddOrModifyResponseItem {
    /// QoS Flow Identifier
    pub qos_flow_id: QosFlowId,
}

/// PDU Session Resource Modify Response Transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PduSessionResourceModifyResponseTransfer {
    /// Acknowledged flows; absent until the first flow is acknowledged
    pub qos_flow_add_or_modify_response_list:
        Option<BTreeMap<QosFlowId, QosFlowAddOrModifyResponseItem>>,
}

/// Successfully modified PDU session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionResourceModifyResponseItem {
    /// PDU Session ID
    pub pdu_session_id: PduSessionId,
    /// Response transfer
    pub transfer: PduSessionResourceModifyResponseTransfer,
}

impl PduSessionResourceModifyResponseItem {
    /// Creates an item without acknowledged flows.
    pub fn new(pdu_session_id: PduSessionId) -> Self {
        Self {
            pdu_session_id,
            transfer: PduSessionResourceModifyResponseTransfer::default(),
        }
    }

    /// Records `qos_flow_id` as added or modified.
    pub fn ack_qos_flow(&mut self, qos_flow_id: QosFlowId) {
        self.transfer
            .qos_flow_add_or_modify_response_list
            .get_or_insert_with(BTreeMap::new)
            .insert(qos_flow_id, QosFlowAddOrModifyResponseItem { qos_flow_id });
    }

    /// Returns the acknowledged QFIs in ascending order.
    pub fn acked_qos_flows(&self) -> Vec<QosFlowId> {
        self.transfer
            .qos_flow_add_or_modify_response_list
            .as_ref()
            .map(|list| list.keys().copied().collect())
            .unwrap_or_default()
    }
}

/// PDU Session Resource Modify Unsuccessful Transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduSessionResourceModifyUnsuccessfulTransfer {
    /// Failure cause
    pub cause: NgapCause,
}

/// PDU session that failed to be modified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduSessionResourceFailedToModifyItem {
    /// PDU Session ID
    pub pdu_session_id: PduSessionId,
    /// Unsuccessful transfer
    pub unsuccessful_transfer: PduSessionResourceModifyUnsuccessfulTransfer,
}

/// PDU Session Resource Modify Response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PduSessionResourceModifyResponse {
    /// Successfully modified sessions
    pub pdu_session_res_modify_list: BTreeMap<PduSessionId, PduSessionResourceModifyResponseItem>,
    /// Sessions that failed to be modified
    pub pdu_session_res_failed_to_modify_list:
        BTreeMap<PduSessionId, PduSessionResourceFailedToModifyItem>,
}

impl PduSessionResourceModifyResponse {
    /// Returns the success item for `psi`, inserting an empty one if needed.
    pub fn modify_item_mut(&mut self, psi: PduSessionId) -> &mut PduSessionResourceModifyResponseItem {
        self.pdu_session_res_modify_list
            .entry(psi)
            .or_insert_with(|| PduSessionResourceModifyResponseItem::new(psi))
    }

    /// Records `psi` as failed with `cause`, replacing a previous cause.
    pub fn set_failed(&mut self, psi: PduSessionId, cause: NgapCause) {
        self.pdu_session_res_failed_to_modify_list
            .insert(psi, failed_item(psi, cause));
    }

    /// Records `psi` as failed with `cause` unless it is already failed.
    pub fn set_failed_if_absent(&mut self, psi: PduSessionId, cause: NgapCause) {
        self.pdu_session_res_failed_to_modify_list
            .entry(psi)
            .or_insert_with(|| failed_item(psi, cause));
    }

    /// Returns the recorded failure cause of `psi`, if any.
    pub fn failure_cause(&self, psi: PduSessionId) -> Option<NgapCause> {
        self.pdu_session_res_failed_to_modify_list
            .get(&psi)
            .map(|item| item.unsuccessful_transfer.cause)
    }

    /// Successfully modified session IDs in ascending order.
    pub fn modified_ids(&self) -> Vec<PduSessionId> {
        self.pdu_session_res_modify_list.keys().copied().collect()
    }

    /// Failed session IDs in ascending order.
    pub fn failed_ids(&self) -> Vec<PduSessionId> {
        self.pdu_session_res_failed_to_modify_list.keys().copied().collect()
    }

    /// Returns true if the two lists share no session.
    pub fn is_disjoint(&self) -> bool {
        self.pdu_session_res_modify_list
            .keys()
            .all(|psi| !self.pdu_session_res_failed_to_modify_list.contains_key(psi))
    }
}

fn failed_item(psi: PduSessionId, cause: NgapCause) -> PduSessionResourceFailedToModifyItem {
    PduSessionResourceFailedToModifyItem {
        pdu_session_id: psi,
        unsuccessful_transfer: PduSessionResourceModifyUnsuccessfulTransfer { cause },
    }
}
