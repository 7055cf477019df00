//! Request builders shared by the PDU session routines
//!
//! Each helper turns the plan and the answer of one peer into the request for
//! the next peer. A reference to an entity that is not where it should be is
//! reported as a [`RoutineError`] instead of being skipped.

use std::collections::BTreeMap;

use bytes::Bytes;
use nextgsim_common::{DrbId, DrbQosPolicy, PduSessionId, QosFlowId};
use nextgsim_e1ap::{
    E1apDrbModifiedItemNgRan, E1apDrbSetupItemNgRan, E1apDrbToModifyItemNgRan,
    E1apDrbToSetupItemNgRan, E1apNgRanBearerContextModRequest, E1apPdcpConfig,
    E1apPduSessionResToModifyItem, E1apQosFlowQosParamItem, E1apUpParamsItem,
};
use nextgsim_f1ap::{
    F1apDrbInfo, F1apDrbsSetupModItem, F1apDrbsToBeModifiedItem, F1apDrbsToBeSetupModItem,
    F1apDuToCuRrcInfo, F1apFlowsMappedToDrbItem,
};
use nextgsim_ngap::procedures::QosFlowAddOrModifyRequestItem;

use super::error::RoutineError;
use crate::rrc::{
    RrcDrbToAddMod, RrcMeasConfig, RrcPdcpConfig, RrcRadioBearerConfig, RrcReconfigNonCritExt,
    RrcReconfigurationProcedureRequest, RrcSdapConfig,
};
use crate::up_resource::{UpConfigUpdate, UpDrbContext, UpPduSessionContextUpdate};

/// QoS flows of one session's request transfer, keyed by QFI.
pub type RequestQosFlows = BTreeMap<QosFlowId, QosFlowAddOrModifyRequestItem>;

// ============================================================================
// E1AP Bearer Context Modification Request
// ============================================================================

fn e1ap_flow_map(
    drb: &UpDrbContext,
    request_flows: &RequestQosFlows,
) -> Result<BTreeMap<QosFlowId, E1apQosFlowQosParamItem>, RoutineError> {
    let mut flows = BTreeMap::new();
    for qfi in drb.qos_flows.keys() {
        let requested = request_flows.get(qfi).ok_or(RoutineError::QosFlowNotInRequest {
            drb_id: drb.drb_id,
            qfi: *qfi,
        })?;
        flows.insert(
            *qfi,
            E1apQosFlowQosParamItem {
                qos_flow_id: *qfi,
                qos_flow_level_qos_params: requested.qos_flow_level_qos_params,
            },
        );
    }
    Ok(flows)
}

/// Builds the E1AP DRBs to set up of a session from its planned DRBs to add.
pub fn fill_drb_to_setup_list(
    session: &UpPduSessionContextUpdate,
    request_flows: &RequestQosFlows,
) -> Result<BTreeMap<DrbId, E1apDrbToSetupItemNgRan>, RoutineError> {
    let mut list = BTreeMap::new();
    for (drb_id, drb) in &session.drb_to_add {
        let mut item = E1apDrbToSetupItemNgRan::new(*drb_id);
        item.pdcp_cfg = E1apPdcpConfig {
            pdcp_sn_size_ul: drb.pdcp_sn_size,
            pdcp_sn_size_dl: drb.pdcp_sn_size,
            rlc_mode: drb.rlc_mode,
        };
        item.qos_flow_info_to_be_setup = e1ap_flow_map(drb, request_flows)?;
        list.insert(*drb_id, item);
    }
    Ok(list)
}

/// Builds the E1AP DRBs to modify of a session from its planned DRBs to modify.
pub fn fill_drb_to_modify_list(
    session: &UpPduSessionContextUpdate,
    request_flows: &RequestQosFlows,
) -> Result<BTreeMap<DrbId, E1apDrbToModifyItemNgRan>, RoutineError> {
    let mut list = BTreeMap::new();
    for (drb_id, drb) in &session.drb_to_modify {
        let mut item = E1apDrbToModifyItemNgRan::new(*drb_id);
        item.flow_map_info = e1ap_flow_map(drb, request_flows)?;
        list.insert(*drb_id, item);
    }
    Ok(list)
}

/// Builds the E1AP DRBs to remove of a session.
pub fn fill_drb_to_remove_list(drb_to_remove: &[DrbId]) -> Vec<DrbId> {
    let mut list = drb_to_remove.to_vec();
    list.sort_unstable();
    list.dedup();
    list
}

/// Builds the second E1AP payload that hands the DL tunnels of the DRBs the
/// DU set up to the CU-UP.
pub fn fill_e1ap_bearer_context_list(
    drbs_setup_mod_list: &BTreeMap<DrbId, F1apDrbsSetupModItem>,
    next_config: &UpConfigUpdate,
) -> Result<E1apNgRanBearerContextModRequest, RoutineError> {
    let mut payload = E1apNgRanBearerContextModRequest::default();
    for (drb_id, du_item) in drbs_setup_mod_list {
        let psi = next_config
            .find_session_adding_drb(*drb_id)
            .ok_or(RoutineError::DrbNotInAnySession(*drb_id))?;

        let mut item = E1apDrbToModifyItemNgRan::new(*drb_id);
        item.dl_up_params = du_item
            .dl_up_tnl_info_to_be_setup_list
            .iter()
            .map(|tnl| E1apUpParamsItem {
                up_tnl_info: *tnl,
                cell_group_id: 0,
            })
            .collect();

        payload
            .pdu_session_res_to_modify_list
            .entry(psi)
            .or_insert_with(|| E1apPduSessionResToModifyItem::new(psi))
            .drb_to_modify_list_ng_ran
            .insert(*drb_id, item);
    }
    Ok(payload)
}

// ============================================================================
// F1AP UE Context Modification Request
// ============================================================================

fn f1ap_flows_of(drb: &UpDrbContext) -> BTreeMap<QosFlowId, F1apFlowsMappedToDrbItem> {
    drb.qos_flows
        .values()
        .map(|flow| {
            (
                flow.qfi,
                F1apFlowsMappedToDrbItem {
                    qos_flow_id: flow.qfi,
                    qos_flow_level_qos_params: flow.qos_params,
                },
            )
        })
        .collect()
}

/// Builds the F1AP DRB to set up from a planned DRB and the CU-UP's answer.
pub fn fill_f1ap_drb_setup_mod_item(
    drb: &UpDrbContext,
    e1ap_item: &E1apDrbSetupItemNgRan,
    request_flows: &RequestQosFlows,
) -> Result<F1apDrbsToBeSetupModItem, RoutineError> {
    if !e1ap_item.flow_failed_list.is_empty() {
        return Err(RoutineError::QosFlowFailuresReported {
            drb_id: drb.drb_id,
            count: e1ap_item.flow_failed_list.len(),
        });
    }

    let mut flows_mapped_to_drb_list = BTreeMap::new();
    for qfi in e1ap_item.flow_setup_list.keys() {
        let requested = request_flows.get(qfi).ok_or(RoutineError::QosFlowNotInRequest {
            drb_id: drb.drb_id,
            qfi: *qfi,
        })?;
        if !drb.qos_flows.contains_key(qfi) {
            return Err(RoutineError::QosFlowNotInDrb {
                drb_id: drb.drb_id,
                qfi: *qfi,
            });
        }
        flows_mapped_to_drb_list.insert(
            *qfi,
            F1apFlowsMappedToDrbItem {
                qos_flow_id: *qfi,
                qos_flow_level_qos_params: requested.qos_flow_level_qos_params,
            },
        );
    }

    Ok(F1apDrbsToBeSetupModItem {
        drb_id: drb.drb_id,
        qos_info: F1apDrbInfo {
            drb_qos: drb.qos_params,
            s_nssai: drb.s_nssai,
            flows_mapped_to_drb_list,
        },
        uluptnl_info_list: e1ap_item
            .ul_up_transport_params
            .iter()
            .map(|p| p.up_tnl_info)
            .collect(),
        mode: drb.rlc_mode,
        pdcp_sn_len: drb.pdcp_sn_size,
    })
}

/// Builds the F1AP DRB to modify from a planned DRB (QoS already updated)
/// and the new UL tunnels reported by the CU-UP.
pub fn fill_f1ap_drb_to_modify_item(
    drb: &UpDrbContext,
    e1ap_item: &E1apDrbModifiedItemNgRan,
) -> F1apDrbsToBeModifiedItem {
    F1apDrbsToBeModifiedItem {
        drb_id: drb.drb_id,
        qos_info: Some(F1apDrbInfo {
            drb_qos: drb.qos_params,
            s_nssai: drb.s_nssai,
            flows_mapped_to_drb_list: f1ap_flows_of(drb),
        }),
        uluptnl_info_list: e1ap_item
            .ul_up_transport_params
            .iter()
            .map(|p| p.up_tnl_info)
            .collect(),
    }
}

/// Derives the DRB-wide QoS from the acknowledged flows of the DRB.
///
/// Does nothing if no acknowledged flow is mapped to the DRB.
pub fn apply_drb_qos_policy(drb: &mut UpDrbContext, acked: &[QosFlowId], policy: DrbQosPolicy) {
    let mut flows = acked.iter().filter_map(|qfi| drb.qos_flows.get(qfi));
    let Some(first) = flows.next() else {
        return;
    };

    let mut qos_params = first.qos_params;
    if policy == DrbQosPolicy::AggregateGbr {
        qos_params.gbr_qos_info = flows.fold(first.qos_params.gbr_qos_info, |sum, flow| {
            match (sum, flow.qos_params.gbr_qos_info) {
                (Some(a), Some(b)) => Some(a.saturating_add(&b)),
                (a, b) => a.or(b),
            }
        });
    }
    drb.qos_params = qos_params;
}

// ============================================================================
// RRC Reconfiguration
// ============================================================================

fn rrc_drb_to_add_mod(drb: &UpDrbContext) -> Result<RrcDrbToAddMod, RoutineError> {
    if drb.qos_flows.is_empty() {
        return Err(RoutineError::NoMappedQosFlows(drb.drb_id));
    }
    Ok(RrcDrbToAddMod {
        drb_id: drb.drb_id,
        sdap_cfg: RrcSdapConfig {
            pdu_session: drb.pdu_session_id,
            default_drb: drb.default_drb,
            mapped_ul_qos_flows_to_add: drb.qos_flows.keys().copied().collect(),
            mapped_ul_qos_flows_to_release: Vec::new(),
        },
        pdcp_cfg: RrcPdcpConfig {
            sn_size_ul: drb.pdcp_sn_size,
            sn_size_dl: drb.pdcp_sn_size,
        },
    })
}

/// Builds the RRC Reconfiguration arguments.
///
/// The cell group configuration returned by the DU takes precedence; when
/// the DU returned none, the configuration it reported at UE setup is used.
pub fn fill_rrc_reconfig_args(
    pdu_sessions_to_modify: &BTreeMap<PduSessionId, UpPduSessionContextUpdate>,
    du_to_cu_rrc_info: &F1apDuToCuRrcInfo,
    reported_du_config: &Bytes,
    nas_pdus: Vec<Bytes>,
    meas_cfg: Option<RrcMeasConfig>,
) -> Result<RrcReconfigurationProcedureRequest, RoutineError> {
    let mut radio_bearer_cfg = RrcRadioBearerConfig::default();
    for session in pdu_sessions_to_modify.values() {
        for drb in session.drb_to_add.values().chain(session.drb_to_modify.values()) {
            radio_bearer_cfg
                .drb_to_add_mod_list
                .insert(drb.drb_id, rrc_drb_to_add_mod(drb)?);
        }
        radio_bearer_cfg
            .drb_to_release_list
            .extend(session.drb_to_remove.iter().copied());
    }

    let master_cell_group = if du_to_cu_rrc_info.cell_group_cfg.is_empty() {
        reported_du_config.clone()
    } else {
        du_to_cu_rrc_info.cell_group_cfg.clone()
    };
    let non_crit_ext = RrcReconfigNonCritExt {
        master_cell_group,
        ded_nas_msg_list: nas_pdus,
    };

    Ok(RrcReconfigurationProcedureRequest {
        radio_bearer_cfg: (!radio_bearer_cfg.is_empty()).then_some(radio_bearer_cfg),
        non_crit_ext: (!non_crit_ext.is_empty()).then_some(non_crit_ext),
        meas_cfg,
    })
}
