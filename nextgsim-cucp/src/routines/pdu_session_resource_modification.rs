//! PDU Session Resource Modification routine
//!
//! Handles a PDU Session Resource Modify Request from the AMF
//! (3GPP TS 38.413 Section 8.2.3, TS 38.401 Section 8.9.3). The change is
//! applied by three peers in a fixed order:
//!
//! ```text
//!  AMF        CU-CP                 CU-UP        DU          UE
//!   │ modify ──▶│                     │           │           │
//!   │           │── BearerCtxMod ────▶│           │           │
//!   │           │◀─────────────────── │           │           │
//!   │           │── UeCtxMod ─────────────────────▶│           │
//!   │           │◀──────────────────────────────── │           │
//!   │           │── BearerCtxMod (DL tunnels) ───▶│  (only if the DU set up DRBs)
//!   │           │◀─────────────────── │           │           │
//!   │           │── RRCReconfiguration ──────────────────────▶│
//!   │           │◀────────────────────────────────────────────│
//!   │◀ response │                     │           │           │
//! ```
//!
//! Each answer is checked against the request and the plan before the next
//! request is built from it. Any inconsistency ends the routine with every
//! requested session failed.

use std::fmt;

use nextgsim_common::{log_interface_message, Direction, DrbQosPolicy, Interface, UeIndex};
use nextgsim_e1ap::{
    E1apBearerContextModificationRequest, E1apBearerContextModificationResponse,
    E1apPduSessionResToModifyItem,
};
use nextgsim_f1ap::{F1apUeContextModificationRequest, F1apUeContextModificationResponse};
use nextgsim_ngap::procedures::{
    PduSessionResourceModifyRequest, PduSessionResourceModifyResponse, UeContextReleaseRequest,
};
use nextgsim_ngap::NgapCause;
use tracing::{debug, info, warn};

use super::error::RoutineError;
use super::helpers::{
    apply_drb_qos_policy, fill_drb_to_modify_list, fill_drb_to_remove_list,
    fill_drb_to_setup_list, fill_e1ap_bearer_context_list, fill_f1ap_drb_setup_mod_item,
    fill_f1ap_drb_to_modify_item, fill_rrc_reconfig_args,
};
use super::UeRoutineContext;
use crate::cause_converters::e1ap_to_ngap_cause;
use crate::up_resource::{UpConfigUpdate, UpConfigUpdateResult};

const ROUTINE_NAME: &str = "PDU Session Resource Modification";

/// Progress of the routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineState {
    /// Nothing done yet
    Start,
    /// The UP resource manager accepted the request
    Validated,
    /// The next configuration is computed
    PlanComputed,
    /// The CU-UP modified the bearer context
    BearerModDone,
    /// The DU modified the UE context
    UeContextModDone,
    /// The CU-UP received the DU tunnels
    SecondBearerModDone,
    /// The UE completed the reconfiguration
    RrcReconfigDone,
    /// Terminal, configuration committed
    Succeeded,
    /// Terminal, every requested session failed
    Failed,
}

impl fmt::Display for RoutineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoutineState::Start => "start",
            RoutineState::Validated => "validated",
            RoutineState::PlanComputed => "plan-computed",
            RoutineState::BearerModDone => "bearer-mod-done",
            RoutineState::UeContextModDone => "ue-context-mod-done",
            RoutineState::SecondBearerModDone => "second-bearer-mod-done",
            RoutineState::RrcReconfigDone => "rrc-reconfig-done",
            RoutineState::Succeeded => "succeeded",
            RoutineState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Requests and response staged while the routine runs.
struct ModificationContext {
    next_config: UpConfigUpdate,
    bearer_context_modification_request: E1apBearerContextModificationRequest,
    ue_context_mod_request: F1apUeContextModificationRequest,
    response_msg: PduSessionResourceModifyResponse,
}

impl ModificationContext {
    fn new(ue_index: UeIndex) -> Self {
        Self {
            next_config: UpConfigUpdate::default(),
            bearer_context_modification_request: E1apBearerContextModificationRequest::new(
                ue_index,
            ),
            ue_context_mod_request: F1apUeContextModificationRequest::new(ue_index),
            response_msg: PduSessionResourceModifyResponse::default(),
        }
    }
}

/// PDU Session Resource Modification of one UE.
///
/// Must run on the UE's task queue so that no other procedure of the UE
/// interleaves with it.
pub struct PduSessionResourceModificationRoutine {
    modify_request: PduSessionResourceModifyRequest,
    ctx: UeRoutineContext,
    drb_qos_policy: DrbQosPolicy,
    state: RoutineState,
}

impl PduSessionResourceModificationRoutine {
    /// Creates the routine for `modify_request`.
    pub fn new(
        modify_request: PduSessionResourceModifyRequest,
        ctx: UeRoutineContext,
        drb_qos_policy: DrbQosPolicy,
    ) -> Self {
        Self {
            modify_request,
            ctx,
            drb_qos_policy,
            state: RoutineState::Start,
        }
    }

    /// Current state.
    pub fn state(&self) -> RoutineState {
        self.state
    }

    fn ue_index(&self) -> UeIndex {
        self.modify_request.ue_index
    }

    fn advance(&mut self, next: RoutineState) {
        debug!("ue={}: \"{}\" {} -> {}", self.ue_index(), ROUTINE_NAME, self.state, next);
        self.state = next;
    }

    /// Runs the routine to completion and returns the response for the AMF.
    ///
    /// Every requested PDU session ends up either in the modify list or in
    /// the failed to modify list of the response, never in both.
    pub async fn run(mut self) -> PduSessionResourceModifyResponse {
        info!(
            "ue={}: \"{}\" started for {} PDU session(s)",
            self.ue_index(),
            ROUTINE_NAME,
            self.modify_request.pdu_session_res_modify_items.len()
        );
        log_interface_message(
            Interface::Ngap,
            Direction::Rx,
            self.ue_index().0,
            "PDUSessionResourceModifyRequest",
            &[],
        );
        let mut mctx = ModificationContext::new(self.ue_index());

        if !self.ctx.up_resource_mng.validate_request(&self.modify_request) {
            warn!("ue={}: \"{}\" invalid modify request", self.ue_index(), ROUTINE_NAME);
            return self.generate_pdu_session_resource_modify_response(mctx, false);
        }
        self.advance(RoutineState::Validated);

        mctx.next_config = self.ctx.up_resource_mng.calculate_update(&self.modify_request);
        self.advance(RoutineState::PlanComputed);

        let success = match self.execute(&mut mctx).await {
            Ok(success) => success,
            Err(e) => {
                warn!(
                    "ue={}: \"{}\" aborted in state {}: {}",
                    self.ue_index(),
                    ROUTINE_NAME,
                    self.state,
                    e
                );
                false
            }
        };
        self.generate_pdu_session_resource_modify_response(mctx, success)
    }

    async fn execute(&mut self, mctx: &mut ModificationContext) -> Result<bool, RoutineError> {
        let ue_index = self.ue_index();

        // Bearer context modification at the CU-UP
        self.fill_initial_e1ap_request(mctx)?;
        log_interface_message(
            Interface::E1ap,
            Direction::Tx,
            ue_index.0,
            "BearerContextModificationRequest",
            &[],
        );
        let e1ap_resp = self
            .ctx
            .e1ap_ctrl
            .handle_bearer_context_modification_request(
                mctx.bearer_context_modification_request.clone(),
            )
            .await;
        if !self.handle_bearer_context_modification_response(mctx, &e1ap_resp)? {
            warn!(
                "ue={}: \"{}\" failed to modify bearer context at CU-UP (cause: {:?})",
                ue_index, ROUTINE_NAME, e1ap_resp.cause
            );
            return Ok(false);
        }
        self.advance(RoutineState::BearerModDone);

        // UE context modification at the DU
        mctx.ue_context_mod_request.cu_to_du_rrc_info.meas_cfg =
            self.ctx.rrc_ue.get_packed_meas_config();
        log_interface_message(
            Interface::F1ap,
            Direction::Tx,
            ue_index.0,
            "UEContextModificationRequest",
            &mctx.ue_context_mod_request.cu_to_du_rrc_info.meas_cfg,
        );
        let f1ap_resp = self
            .ctx
            .f1ap_ue_ctxt
            .handle_ue_context_modification_request(mctx.ue_context_mod_request.clone())
            .await;
        log_interface_message(
            Interface::F1ap,
            Direction::Rx,
            ue_index.0,
            "UEContextModificationResponse",
            &f1ap_resp.du_to_cu_rrc_info.cell_group_cfg,
        );
        if !self.handle_ue_context_modification_response(mctx, &f1ap_resp)? {
            warn!(
                "ue={}: \"{}\" failed to modify UE context at DU (cause: {:?})",
                ue_index, ROUTINE_NAME, f1ap_resp.cause
            );
            return Ok(false);
        }
        self.advance(RoutineState::UeContextModDone);

        // Hand the DU tunnels to the CU-UP
        if mctx
            .bearer_context_modification_request
            .ng_ran_bearer_context_mod_request
            .is_some()
        {
            log_interface_message(
                Interface::E1ap,
                Direction::Tx,
                ue_index.0,
                "BearerContextModificationRequest",
                &[],
            );
            let e1ap_resp = self
                .ctx
                .e1ap_ctrl
                .handle_bearer_context_modification_request(
                    mctx.bearer_context_modification_request.clone(),
                )
                .await;
            if !self.handle_bearer_context_modification_response(mctx, &e1ap_resp)? {
                warn!(
                    "ue={}: \"{}\" failed to update bearer context at CU-UP (cause: {:?})",
                    ue_index, ROUTINE_NAME, e1ap_resp.cause
                );
                return Ok(false);
            }
            self.advance(RoutineState::SecondBearerModDone);
        }

        // RRC reconfiguration of the UE
        let rrc_request = fill_rrc_reconfig_args(
            &mctx.next_config.pdu_sessions_to_modify_list,
            &f1ap_resp.du_to_cu_rrc_info,
            &self.ctx.rrc_ue.get_reported_du_config(),
            self.modify_request.nas_pdus(),
            self.ctx.rrc_ue.generate_meas_config(),
        )?;
        if let Some(ext) = &rrc_request.non_crit_ext {
            log_interface_message(
                Interface::Rrc,
                Direction::Tx,
                ue_index.0,
                "RRCReconfiguration",
                &ext.master_cell_group,
            );
        }
        if !self.ctx.rrc_ue.handle_rrc_reconfiguration_request(rrc_request).await {
            warn!("ue={}: \"{}\" UE rejected the RRC reconfiguration", ue_index, ROUTINE_NAME);
            mark_all_sessions_as_failed(
                &mut mctx.response_msg,
                &self.modify_request,
                NgapCause::MISC_UNSPECIFIED,
            );
            self.schedule_ue_context_release();
            return Ok(false);
        }
        self.advance(RoutineState::RrcReconfigDone);

        Ok(true)
    }

    /// Fills the first bearer context modification from the plan.
    fn fill_initial_e1ap_request(&self, mctx: &mut ModificationContext) -> Result<(), RoutineError> {
        let ng_ran = mctx.bearer_context_modification_request.ng_ran_mut();
        for (psi, session) in &mctx.next_config.pdu_sessions_to_modify_list {
            let request_item = self
                .modify_request
                .item(*psi)
                .ok_or(RoutineError::SessionNotInRequest(*psi))?;
            let request_flows = &request_item.transfer.qos_flow_add_or_modify_request_list;

            let mut item = E1apPduSessionResToModifyItem::new(*psi);
            item.drb_to_setup_list_ng_ran = fill_drb_to_setup_list(session, request_flows)?;
            item.drb_to_modify_list_ng_ran = fill_drb_to_modify_list(session, request_flows)?;
            item.drb_to_rem_list_ng_ran = fill_drb_to_remove_list(&session.drb_to_remove);
            ng_ran.pdu_session_res_to_modify_list.insert(*psi, item);
        }
        ng_ran.pdu_session_res_to_remove_list = mctx.next_config.pdu_sessions_to_remove_list.clone();
        Ok(())
    }

    /// Reconciles a bearer context modification response with the request
    /// and the plan, and stages the DU request.
    ///
    /// Returns the response's success flag.
    fn handle_bearer_context_modification_response(
        &self,
        mctx: &mut ModificationContext,
        resp: &E1apBearerContextModificationResponse,
    ) -> Result<bool, RoutineError> {
        let ue_index = self.ue_index();

        for (psi, modified) in &resp.pdu_session_resource_modified_list {
            let request_item = self
                .modify_request
                .item(*psi)
                .ok_or(RoutineError::SessionNotInRequest(*psi))?;
            let request_flows = &request_item.transfer.qos_flow_add_or_modify_request_list;
            let session = mctx
                .next_config
                .pdu_sessions_to_modify_list
                .get_mut(psi)
                .ok_or(RoutineError::SessionNotInPlan(*psi))?;
            let response_item = mctx.response_msg.modify_item_mut(*psi);

            for (drb_id, e1ap_drb) in &modified.drb_setup_list_ng_ran {
                let drb = session
                    .drb_to_add
                    .get(drb_id)
                    .ok_or(RoutineError::DrbNotInPlan { psi: *psi, drb_id: *drb_id })?;
                let f1ap_item = fill_f1ap_drb_setup_mod_item(drb, e1ap_drb, request_flows)?;
                for qfi in e1ap_drb.flow_setup_list.keys() {
                    response_item.ack_qos_flow(*qfi);
                }
                mctx.ue_context_mod_request
                    .drbs_to_be_setup_mod_list
                    .insert(*drb_id, f1ap_item);
            }

            for (drb_id, e1ap_drb) in &modified.drb_modified_list_ng_ran {
                let Some(drb) = session.drb_to_modify.get_mut(drb_id) else {
                    warn!(
                        "ue={}: \"{}\" {} of {} modified by CU-UP is not planned for modification",
                        ue_index, ROUTINE_NAME, drb_id, psi
                    );
                    continue;
                };

                let mut acked = Vec::new();
                for qfi in e1ap_drb.flow_setup_list.keys() {
                    let Some(requested) = request_flows.get(qfi) else {
                        warn!(
                            "ue={}: \"{}\" {} on {} not in the request, ignored",
                            ue_index, ROUTINE_NAME, qfi, drb_id
                        );
                        continue;
                    };
                    if !drb.update_qos_flow(*qfi, requested.qos_flow_level_qos_params) {
                        return Err(RoutineError::QosFlowNotInDrb {
                            drb_id: *drb_id,
                            qfi: *qfi,
                        });
                    }
                    response_item.ack_qos_flow(*qfi);
                    acked.push(*qfi);
                }
                apply_drb_qos_policy(drb, &acked, self.drb_qos_policy);

                match drb.qos_params.gbr_qos_info {
                    Some(gbr) => info!(
                        "ue={}: \"{}\" {} 5QI={} GFBR DL={:.3}/UL={:.3} Mbps MFBR DL={:.3}/UL={:.3} Mbps",
                        ue_index,
                        ROUTINE_NAME,
                        drb_id,
                        drb.qos_params.qos_desc.get_5qi(),
                        mbps(gbr.gbr_dl),
                        mbps(gbr.gbr_ul),
                        mbps(gbr.max_br_dl),
                        mbps(gbr.max_br_ul)
                    ),
                    None => debug!(
                        "ue={}: \"{}\" {} 5QI={} non-GBR",
                        ue_index,
                        ROUTINE_NAME,
                        drb_id,
                        drb.qos_params.qos_desc.get_5qi()
                    ),
                }

                let f1ap_item = fill_f1ap_drb_to_modify_item(drb, e1ap_drb);
                mctx.ue_context_mod_request
                    .drbs_to_be_modified_list
                    .insert(*drb_id, f1ap_item);
            }

            let released = &mut mctx.ue_context_mod_request.drbs_to_be_released_list;
            for drb_id in &session.drb_to_remove {
                if !released.contains(drb_id) {
                    released.push(*drb_id);
                }
            }

            if !modified.drb_failed_list_ng_ran.is_empty() {
                return Err(RoutineError::DrbFailuresReported {
                    psi: *psi,
                    count: modified.drb_failed_list_ng_ran.len(),
                });
            }
        }

        for (psi, failed) in &resp.pdu_session_resource_failed_list {
            self.modify_request
                .item(*psi)
                .ok_or(RoutineError::SessionNotInRequest(*psi))?;
            let cause = e1ap_to_ngap_cause(failed.cause);
            warn!(
                "ue={}: \"{}\" CU-UP failed {} with {}",
                ue_index, ROUTINE_NAME, psi, failed.cause
            );
            mctx.next_config.pdu_sessions_to_setup_list.remove(psi);
            mctx.next_config.pdu_sessions_to_modify_list.remove(psi);
            mctx.response_msg.pdu_session_res_modify_list.remove(psi);
            mctx.response_msg.set_failed(*psi, cause);
        }

        Ok(resp.success)
    }

    /// Reconciles the UE context modification response and prepares the
    /// bearer context update carrying the DU tunnels.
    ///
    /// Returns the response's success flag.
    fn handle_ue_context_modification_response(
        &self,
        mctx: &mut ModificationContext,
        resp: &F1apUeContextModificationResponse,
    ) -> Result<bool, RoutineError> {
        if !resp.drbs_failed_to_be_setup_mod_list.is_empty() {
            return Err(RoutineError::DuDrbSetupFailed(
                resp.drbs_failed_to_be_setup_mod_list.keys().copied().collect(),
            ));
        }

        if resp.no_drbs_changed() {
            mctx.bearer_context_modification_request
                .ng_ran_bearer_context_mod_request = None;
            return Ok(resp.success);
        }

        if !resp.drbs_modified_list.is_empty() {
            // TODO: relay the DL tunnels of DRBs modified by the DU to the CU-UP
            debug!(
                "ue={}: \"{}\" {} DRB(s) modified by the DU not relayed to the CU-UP",
                self.ue_index(),
                ROUTINE_NAME,
                resp.drbs_modified_list.len()
            );
        }

        let payload = fill_e1ap_bearer_context_list(&resp.drbs_setup_mod_list, &mctx.next_config)?;
        mctx.bearer_context_modification_request
            .ng_ran_bearer_context_mod_request = Some(payload);
        Ok(resp.success)
    }

    fn schedule_ue_context_release(&self) {
        let request = UeContextReleaseRequest::ngran_generated(self.ue_index());
        let task = self.ctx.cu_cp_notifier.handle_ue_context_release(request);
        if !self.ctx.ue_task_sched.schedule_async_task(task) {
            warn!(
                "ue={}: \"{}\" could not schedule UE context release",
                self.ue_index(),
                ROUTINE_NAME
            );
        }
    }

    fn generate_pdu_session_resource_modify_response(
        mut self,
        mut mctx: ModificationContext,
        success: bool,
    ) -> PduSessionResourceModifyResponse {
        let response = &mut mctx.response_msg;

        if success {
            let result = UpConfigUpdateResult {
                pdu_sessions_added_list: Vec::new(),
                pdu_sessions_modified_list: mctx
                    .next_config
                    .pdu_sessions_to_modify_list
                    .values()
                    .cloned()
                    .collect(),
                pdu_sessions_removed_list: mctx.next_config.pdu_sessions_to_remove_list.clone(),
            };
            self.ctx.up_resource_mng.apply_config_update(&result);

            for psi in &mctx.next_config.pdu_sessions_failed_to_modify_list {
                if self.modify_request.contains(*psi) {
                    response.set_failed_if_absent(*psi, NgapCause::RADIO_NETWORK_UNSPECIFIED);
                }
            }

            // A planned session the CU-UP did not mention has nothing left
            // to change on the UP side and is reported as modified.
            for psi in self.modify_request.session_ids() {
                if response.failure_cause(psi).is_some() {
                    response.pdu_session_res_modify_list.remove(&psi);
                } else if !response.pdu_session_res_modify_list.contains_key(&psi) {
                    if mctx.next_config.pdu_sessions_to_modify_list.contains_key(&psi) {
                        response.modify_item_mut(psi);
                    } else {
                        response.set_failed(psi, NgapCause::RADIO_NETWORK_UNSPECIFIED);
                    }
                }
            }

            self.advance(RoutineState::Succeeded);
            info!(
                "ue={}: \"{}\" finished successfully ({} modified, {} failed)",
                self.ue_index(),
                ROUTINE_NAME,
                response.pdu_session_res_modify_list.len(),
                response.pdu_session_res_failed_to_modify_list.len()
            );
        } else {
            mark_all_sessions_as_failed(
                response,
                &self.modify_request,
                NgapCause::RADIO_NETWORK_UNSPECIFIED,
            );
            self.advance(RoutineState::Failed);
            warn!(
                "ue={}: \"{}\" failed ({} PDU session(s) failed)",
                self.ue_index(),
                ROUTINE_NAME,
                response.pdu_session_res_failed_to_modify_list.len()
            );
        }

        mctx.response_msg
    }
}

/// Moves every requested session to the failed list. Sessions that already
/// carry a cause keep it.
fn mark_all_sessions_as_failed(
    response: &mut PduSessionResourceModifyResponse,
    request: &PduSessionResourceModifyRequest,
    cause: NgapCause,
) {
    response.pdu_session_res_modify_list.clear();
    for psi in request.session_ids() {
        response.set_failed_if_absent(psi, cause);
    }
}

fn mbps(bit_rate: u64) -> f64 {
    bit_rate as f64 / 1_000_000.0
}
