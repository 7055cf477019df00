//! PDU Session Resource Modification integration tests
//!
//! Drives the modification routine against scripted CU-UP, DU and UE peers
//! and checks both the messages exchanged and the response for the AMF.

use bytes::Bytes;
use integration_tests::test_fixtures::*;
use integration_tests::{
    assert_all_sessions_accounted, init_test_logging, MockCuUp, MockDu, MockPeers, MockRrcUe,
    MockUpResourceManager,
};
use integration_tests::mock_peers::{MOCK_PACKED_MEAS_CFG, MOCK_REPORTED_DU_CFG};
use nextgsim_common::{DrbId, DrbQosPolicy, PduSessionId, QosFlowId};
use nextgsim_cucp::PduSessionResourceModificationRoutine;
use nextgsim_e1ap::{E1apBearerContextModificationResponse, E1apCause, E1apTransportCause};
use nextgsim_f1ap::F1apDuToCuRrcInfo;
use nextgsim_ngap::procedures::{PduSessionResourceModifyRequest, PduSessionResourceModifyResponse};
use nextgsim_ngap::{NgapCause, RadioNetworkCause, TransportCause};

async fn run_routine(
    peers: &MockPeers,
    request: PduSessionResourceModifyRequest,
    policy: DrbQosPolicy,
) -> PduSessionResourceModifyResponse {
    let routine = PduSessionResourceModificationRoutine::new(request, peers.context(), policy);
    routine.run().await
}

fn standard_peers() -> MockPeers {
    MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            E1apBearerContextModificationResponse::success(),
        ]),
        MockDu::new(standard_f1ap_response()),
    )
}

fn assert_all_failed_with(response: &PduSessionResourceModifyResponse, psis: &[u8], cause: NgapCause) {
    assert!(response.pdu_session_res_modify_list.is_empty());
    for psi in psis {
        assert_eq!(response.failure_cause(PduSessionId(*psi)), Some(cause), "psi={}", psi);
    }
}

/// Test a full modification with a new DRB and a modified DRB
#[tokio::test]
async fn test_modification_success() {
    init_test_logging();

    let peers = standard_peers();
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    let item = &response.pdu_session_res_modify_list[&PduSessionId(1)];
    assert_eq!(item.acked_qos_flows(), vec![QosFlowId(1), QosFlowId(2)]);
    assert!(response.pdu_session_res_failed_to_modify_list.is_empty());

    // Plan committed once, nothing released
    let applied = peers.up.applied();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].pdu_sessions_modified_list.len(), 1);
    assert_eq!(applied[0].pdu_sessions_modified_list[0].id, PduSessionId(1));
    assert_eq!(peers.ngap.tasks_built(), 0);
    assert_eq!(peers.sched.nof_pending(), 0);
}

/// Test the first bearer context modification sent to the CU-UP
#[tokio::test]
async fn test_modification_initial_e1ap_request() {
    init_test_logging();

    let peers = standard_peers();
    run_routine(&peers, standard_request(), DrbQosPolicy::FirstFlow).await;

    let requests = peers.cu_up.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].ue_index, TEST_UE);

    let ng_ran = requests[0].ng_ran_bearer_context_mod_request.as_ref().unwrap();
    let session = &ng_ran.pdu_session_res_to_modify_list[&PduSessionId(1)];

    let setup = &session.drb_to_setup_list_ng_ran[&DrbId(2)];
    assert_eq!(
        setup.qos_flow_info_to_be_setup[&QosFlowId(2)].qos_flow_level_qos_params,
        non_gbr_params(9)
    );
    let modify = &session.drb_to_modify_list_ng_ran[&DrbId(1)];
    assert_eq!(
        modify.flow_map_info[&QosFlowId(1)].qos_flow_level_qos_params,
        voice_params()
    );
    assert_eq!(session.drb_to_rem_list_ng_ran, vec![DrbId(3)]);
}

/// Test the UE context modification sent to the DU
#[tokio::test]
async fn test_modification_f1ap_request() {
    init_test_logging();

    let peers = standard_peers();
    run_routine(&peers, standard_request(), DrbQosPolicy::FirstFlow).await;

    let requests = peers.du.requests();
    assert_eq!(requests.len(), 1);
    let du_req = &requests[0];

    assert_eq!(du_req.cu_to_du_rrc_info.meas_cfg, Bytes::from_static(MOCK_PACKED_MEAS_CFG));

    let setup = &du_req.drbs_to_be_setup_mod_list[&DrbId(2)];
    assert_eq!(setup.uluptnl_info_list, vec![tnl(0x1002)]);
    assert!(setup.qos_info.flows_mapped_to_drb_list.contains_key(&QosFlowId(2)));

    let modify = &du_req.drbs_to_be_modified_list[&DrbId(1)];
    assert_eq!(modify.uluptnl_info_list, vec![tnl(0x1001)]);

    assert_eq!(du_req.drbs_to_be_released_list, vec![DrbId(3)]);
}

/// Test that the DL tunnels of the DU are handed to the CU-UP
#[tokio::test]
async fn test_modification_second_e1ap_request() {
    init_test_logging();

    let peers = standard_peers();
    run_routine(&peers, standard_request(), DrbQosPolicy::FirstFlow).await;

    let requests = peers.cu_up.requests();
    assert_eq!(requests.len(), 2);

    let ng_ran = requests[1].ng_ran_bearer_context_mod_request.as_ref().unwrap();
    let session = &ng_ran.pdu_session_res_to_modify_list[&PduSessionId(1)];
    assert_eq!(session.drb_to_modify_list_ng_ran.len(), 1);
    let drb = &session.drb_to_modify_list_ng_ran[&DrbId(2)];
    assert_eq!(drb.dl_up_params.len(), 1);
    assert_eq!(drb.dl_up_params[0].up_tnl_info, tnl(0x2002));
}

/// Test the RRC reconfiguration sent to the UE
#[tokio::test]
async fn test_modification_rrc_reconfiguration() {
    init_test_logging();

    let peers = standard_peers();
    run_routine(&peers, standard_request(), DrbQosPolicy::FirstFlow).await;

    let requests = peers.rrc.requests();
    assert_eq!(requests.len(), 1);
    let rrc_req = &requests[0];

    let bearers = rrc_req.radio_bearer_cfg.as_ref().unwrap();
    assert_eq!(
        bearers.drb_to_add_mod_list.keys().copied().collect::<Vec<_>>(),
        vec![DrbId(1), DrbId(2)]
    );
    assert_eq!(bearers.drb_to_release_list, vec![DrbId(3)]);
    assert_eq!(
        bearers.drb_to_add_mod_list[&DrbId(2)].sdap_cfg.mapped_ul_qos_flows_to_add,
        vec![QosFlowId(2)]
    );

    let ext = rrc_req.non_crit_ext.as_ref().unwrap();
    assert_eq!(ext.master_cell_group, Bytes::from_static(TEST_CELL_GROUP_CFG));
    assert_eq!(ext.ded_nas_msg_list, vec![Bytes::from_static(TEST_NAS_PDU)]);
    assert!(rrc_req.meas_cfg.is_some());
}

/// Test that the reported DU configuration is used when the DU returns no cell group
#[tokio::test]
async fn test_modification_falls_back_to_reported_du_config() {
    init_test_logging();

    let mut f1ap_resp = standard_f1ap_response();
    f1ap_resp.du_to_cu_rrc_info = F1apDuToCuRrcInfo::default();
    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            E1apBearerContextModificationResponse::success(),
        ]),
        MockDu::new(f1ap_resp),
    );
    run_routine(&peers, standard_request(), DrbQosPolicy::FirstFlow).await;

    let requests = peers.rrc.requests();
    let ext = requests[0].non_crit_ext.as_ref().unwrap();
    assert_eq!(ext.master_cell_group, Bytes::from_static(MOCK_REPORTED_DU_CFG));
}

/// Test that the requested QoS ends up in the plan and in the DU request
#[tokio::test]
async fn test_modification_qos_round_trip() {
    init_test_logging();

    let peers = standard_peers();
    run_routine(&peers, standard_request(), DrbQosPolicy::FirstFlow).await;

    let applied = peers.up.applied();
    let drb = &applied[0].pdu_sessions_modified_list[0].drb_to_modify[&DrbId(1)];
    assert_eq!(drb.qos_params, voice_params());
    assert_eq!(drb.qos_flows[&QosFlowId(1)].qos_params, voice_params());

    let du_requests = peers.du.requests();
    let du_req = &du_requests[0];
    let qos_info = du_req.drbs_to_be_modified_list[&DrbId(1)]
        .qos_info
        .as_ref()
        .unwrap();
    assert_eq!(qos_info.drb_qos, voice_params());
    assert_eq!(qos_info.s_nssai, TEST_SNSSAI);
    assert_eq!(
        qos_info.flows_mapped_to_drb_list[&QosFlowId(1)].qos_flow_level_qos_params,
        voice_params()
    );
}

/// Test the DRB QoS of a modified DRB carrying two GBR flows under both policies
#[tokio::test]
async fn test_modification_drb_qos_policy() {
    init_test_logging();

    let video = gbr_params(2, 64_000, 32_000, 128_000, 64_000);
    let make_peers = || {
        MockPeers::new(
            MockUpResourceManager::new(plan(vec![planned_session(
                1,
                Vec::new(),
                vec![planned_drb(1, 1, &[1, 3])],
                &[],
            )])),
            MockCuUp::new(vec![e1ap_response(
                vec![e1ap_session_modified(
                    1,
                    Vec::new(),
                    vec![e1ap_drb_modified(1, &[1, 3], 0x1001)],
                )],
                Vec::new(),
            )]),
            MockDu::new(f1ap_response(&[], &[])),
        )
    };
    let request = modify_request(vec![modify_item(
        1,
        &[(1, voice_params()), (3, video)],
        TEST_NAS_PDU,
    )]);

    let peers = make_peers();
    run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;
    let drb_qos = peers.up.applied()[0].pdu_sessions_modified_list[0].drb_to_modify[&DrbId(1)].qos_params;
    assert_eq!(drb_qos, voice_params());

    let peers = make_peers();
    run_routine(&peers, request, DrbQosPolicy::AggregateGbr).await;
    let drb_qos = peers.up.applied()[0].pdu_sessions_modified_list[0].drb_to_modify[&DrbId(1)].qos_params;
    assert_eq!(drb_qos.qos_desc, voice_params().qos_desc);
    let gbr = drb_qos.gbr_qos_info.unwrap();
    assert_eq!(gbr.gbr_dl, 192_000);
    assert_eq!(gbr.gbr_ul, 160_000);
    assert_eq!(gbr.max_br_dl, 384_000);
    assert_eq!(gbr.max_br_ul, 320_000);
}

/// Test that no second bearer context modification is sent when the DU set up nothing
#[tokio::test]
async fn test_modification_without_du_drb_changes() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(plan(vec![planned_session(
            1,
            Vec::new(),
            vec![planned_drb(1, 1, &[1])],
            &[],
        )])),
        MockCuUp::new(vec![e1ap_response(
            vec![e1ap_session_modified(
                1,
                Vec::new(),
                vec![e1ap_drb_modified(1, &[1], 0x1001)],
            )],
            Vec::new(),
        )]),
        MockDu::new(f1ap_response(&[], &[])),
    );
    let request = modify_request(vec![modify_item(1, &[(1, voice_params())], TEST_NAS_PDU)]);
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_eq!(response.modified_ids(), vec![PduSessionId(1)]);
    assert_eq!(peers.cu_up.requests().len(), 1);
    assert_eq!(peers.rrc.requests().len(), 1);
}

/// Test that a rejected request fails every session without contacting any peer
#[tokio::test]
async fn test_modification_invalid_request() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::rejecting(),
        MockCuUp::new(Vec::new()),
        MockDu::new(standard_f1ap_response()),
    );
    let request = modify_request(vec![
        modify_item(1, &[(1, voice_params())], TEST_NAS_PDU),
        modify_item(2, &[(5, non_gbr_params(9))], &[]),
    ]);
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1, 2], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert_eq!(peers.up.calculate_calls(), 0);
    assert!(peers.cu_up.requests().is_empty());
    assert!(peers.du.requests().is_empty());
    assert!(peers.rrc.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test a bearer context modification failure at the CU-UP
#[tokio::test]
async fn test_modification_e1ap_failure() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(Vec::new()),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert_eq!(peers.cu_up.requests().len(), 1);
    assert!(peers.du.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test that a DRB failed at the CU-UP aborts the modification
#[tokio::test]
async fn test_modification_e1ap_drb_failed() {
    init_test_logging();

    let e1ap_resp = e1ap_response(
        vec![with_failed_drb(
            e1ap_session_modified(1, Vec::new(), vec![e1ap_drb_modified(1, &[1], 0x1001)]),
            2,
        )],
        Vec::new(),
    );
    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![e1ap_resp]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert!(peers.du.requests().is_empty());
    assert!(peers.rrc.requests().is_empty());
}

/// Test that a session the CU-UP reports but the plan lacks aborts the modification
#[tokio::test]
async fn test_modification_session_not_in_plan() {
    init_test_logging();

    let e1ap_resp = e1ap_response(
        vec![
            e1ap_session_modified(
                1,
                vec![e1ap_drb_setup(2, &[2], 0x1002)],
                vec![e1ap_drb_modified(1, &[1], 0x1001)],
            ),
            e1ap_session_modified(2, Vec::new(), vec![e1ap_drb_modified(4, &[5], 0x1004)]),
        ],
        Vec::new(),
    );
    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![e1ap_resp]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = modify_request(vec![
        modify_item(1, &[(1, voice_params()), (2, non_gbr_params(9))], TEST_NAS_PDU),
        modify_item(2, &[(5, non_gbr_params(9))], &[]),
    ]);
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1, 2], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert!(peers.du.requests().is_empty());
}

/// Test that a session failed by the CU-UP keeps its converted cause while others succeed
#[tokio::test]
async fn test_modification_partial_e1ap_failure() {
    init_test_logging();

    let e1ap_cause = E1apCause::Transport(E1apTransportCause::TransportResourceUnavailable);
    let mut e1ap_resp = standard_e1ap_response();
    e1ap_resp.pdu_session_resource_failed_list =
        e1ap_response(Vec::new(), vec![(2, e1ap_cause)]).pdu_session_resource_failed_list;

    let peers = MockPeers::new(
        MockUpResourceManager::new(plan(vec![
            planned_session(1, vec![planned_drb(1, 2, &[2])], vec![planned_drb(1, 1, &[1])], &[3]),
            planned_session(2, Vec::new(), vec![planned_drb(2, 4, &[5])], &[]),
        ])),
        MockCuUp::new(vec![e1ap_resp, E1apBearerContextModificationResponse::success()]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = modify_request(vec![
        modify_item(1, &[(1, voice_params()), (2, non_gbr_params(9))], TEST_NAS_PDU),
        modify_item(2, &[(5, non_gbr_params(9))], &[]),
    ]);
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_eq!(response.modified_ids(), vec![PduSessionId(1)]);
    assert_eq!(
        response.failure_cause(PduSessionId(2)),
        Some(NgapCause::Transport(TransportCause::TransportResourceUnavailable))
    );

    // The failed session is neither reconfigured nor committed
    let bearers = peers.rrc.requests()[0].radio_bearer_cfg.clone().unwrap();
    assert!(!bearers.drb_to_add_mod_list.contains_key(&DrbId(4)));
    let applied = peers.up.applied();
    assert_eq!(applied.len(), 1);
    let committed: Vec<_> = applied[0].pdu_sessions_modified_list.iter().map(|s| s.id).collect();
    assert_eq!(committed, vec![PduSessionId(1)]);
}

/// Test that sessions the planner could not modify are reported as failed
#[tokio::test]
async fn test_modification_planner_failed_session() {
    init_test_logging();

    let mut next_config = standard_plan();
    next_config.pdu_sessions_failed_to_modify_list = vec![PduSessionId(2)];
    let peers = MockPeers::new(
        MockUpResourceManager::new(next_config),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            E1apBearerContextModificationResponse::success(),
        ]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = modify_request(vec![
        modify_item(1, &[(1, voice_params()), (2, non_gbr_params(9))], TEST_NAS_PDU),
        modify_item(2, &[(5, non_gbr_params(9))], &[]),
    ]);
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_eq!(response.modified_ids(), vec![PduSessionId(1)]);
    assert_eq!(
        response.failure_cause(PduSessionId(2)),
        Some(NgapCause::RADIO_NETWORK_UNSPECIFIED)
    );
}

/// Test a DRB setup failure at the DU
#[tokio::test]
async fn test_modification_f1ap_drb_setup_failed() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![standard_e1ap_response()]),
        MockDu::new(f1ap_response_with_failed_setup(&[2])),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert_eq!(peers.cu_up.requests().len(), 1);
    assert_eq!(peers.du.requests().len(), 1);
    assert!(peers.rrc.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test that a modified DRB without QoS flows cannot be reconfigured
#[tokio::test]
async fn test_modification_drb_without_flows() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(plan(vec![planned_session(
            1,
            Vec::new(),
            vec![planned_drb(1, 1, &[])],
            &[],
        )])),
        MockCuUp::new(vec![e1ap_response(
            vec![e1ap_session_modified(1, Vec::new(), vec![e1ap_drb_modified(1, &[], 0x1001)])],
            Vec::new(),
        )]),
        MockDu::new(f1ap_response(&[], &[])),
    );
    let request = modify_request(vec![modify_item(1, &[(1, voice_params())], TEST_NAS_PDU)]);
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert!(peers.rrc.requests().is_empty());
    assert_eq!(peers.ngap.tasks_built(), 0);
}

/// Test that a UE rejecting the reconfiguration gets released
#[tokio::test]
async fn test_modification_rrc_reconfiguration_rejected() {
    init_test_logging();

    let peers = standard_peers().with_rrc(MockRrcUe::rejecting());
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::MISC_UNSPECIFIED);
    assert!(peers.up.applied().is_empty());

    // Exactly one release, queued behind the routine
    assert_eq!(peers.ngap.tasks_built(), 1);
    assert_eq!(peers.sched.nof_pending(), 1);
    assert!(peers.ngap.releases().is_empty());

    peers.sched.run_pending().await;
    let releases = peers.ngap.releases();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].ue_index, TEST_UE);
    assert_eq!(
        releases[0].cause,
        NgapCause::RadioNetwork(RadioNetworkCause::ReleaseDueToNgranGeneratedReason)
    );
}

/// Test that a flow the CU-UP reports on a DRB it is not planned for aborts the modification
#[tokio::test]
async fn test_modification_flow_reported_on_wrong_drb() {
    init_test_logging();

    // Flow 2 is planned on the new DRB 2, not on DRB 1
    let e1ap_resp = e1ap_response(
        vec![e1ap_session_modified(
            1,
            vec![e1ap_drb_setup(2, &[2], 0x1002)],
            vec![e1ap_drb_modified(1, &[1, 2], 0x1001)],
        )],
        Vec::new(),
    );
    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![e1ap_resp]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert!(peers.du.requests().is_empty());
    assert!(peers.rrc.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test that a failed session the AMF never asked for aborts the modification
#[tokio::test]
async fn test_modification_failed_session_not_in_request() {
    init_test_logging();

    let mut e1ap_resp = standard_e1ap_response();
    e1ap_resp.pdu_session_resource_failed_list =
        e1ap_response(Vec::new(), vec![(7, E1apCause::default())]).pdu_session_resource_failed_list;
    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![e1ap_resp, E1apBearerContextModificationResponse::success()]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert_eq!(response.failure_cause(PduSessionId(7)), None);
    assert!(peers.du.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test that a modified session the AMF never asked for aborts the modification
#[tokio::test]
async fn test_modification_modified_session_not_in_request() {
    init_test_logging();

    let mut e1ap_resp = standard_e1ap_response();
    e1ap_resp.pdu_session_resource_modified_list.insert(
        PduSessionId(5),
        e1ap_session_modified(5, Vec::new(), vec![e1ap_drb_modified(4, &[5], 0x1004)]),
    );
    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![e1ap_resp]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert_eq!(response.failure_cause(PduSessionId(5)), None);
    assert!(peers.du.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test that a DRB set up by the CU-UP but not planned for addition aborts the modification
#[tokio::test]
async fn test_modification_setup_drb_not_in_plan() {
    init_test_logging();

    let e1ap_resp = e1ap_response(
        vec![e1ap_session_modified(
            1,
            vec![e1ap_drb_setup(2, &[2], 0x1002), e1ap_drb_setup(9, &[2], 0x1009)],
            vec![e1ap_drb_modified(1, &[1], 0x1001)],
        )],
        Vec::new(),
    );
    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![e1ap_resp]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert!(peers.du.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test a failure of the bearer context update carrying the DU tunnels
#[tokio::test]
async fn test_modification_second_e1ap_failure() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            E1apBearerContextModificationResponse::failure(E1apCause::default()),
        ]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert_eq!(peers.cu_up.requests().len(), 2);
    assert!(peers.rrc.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test a DRB failure reported in the bearer context update carrying the DU tunnels
#[tokio::test]
async fn test_modification_second_e1ap_drb_failed() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            e1ap_response(
                vec![with_failed_drb(e1ap_session_modified(1, Vec::new(), Vec::new()), 2)],
                Vec::new(),
            ),
        ]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = standard_request();
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_all_failed_with(&response, &[1], NgapCause::RADIO_NETWORK_UNSPECIFIED);
    assert_eq!(peers.cu_up.requests().len(), 2);
    assert!(peers.rrc.requests().is_empty());
    assert!(peers.up.applied().is_empty());
}

/// Test that a planned session the CU-UP does not mention is reported as modified
#[tokio::test]
async fn test_modification_session_not_reported_by_cu_up() {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(plan(vec![
            planned_session(1, vec![planned_drb(1, 2, &[2])], vec![planned_drb(1, 1, &[1])], &[3]),
            planned_session(2, Vec::new(), vec![planned_drb(2, 4, &[5])], &[]),
        ])),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            E1apBearerContextModificationResponse::success(),
        ]),
        MockDu::new(standard_f1ap_response()),
    );
    let request = modify_request(vec![
        modify_item(1, &[(1, voice_params()), (2, non_gbr_params(9))], TEST_NAS_PDU),
        modify_item(2, &[(5, non_gbr_params(9))], &[]),
    ]);
    let response = run_routine(&peers, request.clone(), DrbQosPolicy::FirstFlow).await;

    assert_all_sessions_accounted(&request, &response);
    assert_eq!(response.modified_ids(), vec![PduSessionId(1), PduSessionId(2)]);
    assert!(response.pdu_session_res_modify_list[&PduSessionId(2)]
        .acked_qos_flows()
        .is_empty());
}
