//! UE task scheduling integration tests
//!
//! Runs the modification routine on the per-UE task queues and checks that
//! work of one UE is serialized while different UEs proceed independently.

use std::sync::Arc;
use std::time::Duration;

use integration_tests::test_fixtures::*;
use integration_tests::{
    assert_all_sessions_accounted, init_test_logging, wait_for_condition, MockCuUp, MockDu,
    MockPeers, MockRrcUe, MockUpResourceManager, TestResult, DEFAULT_POLL_INTERVAL,
    DEFAULT_TEST_TIMEOUT,
};
use nextgsim_common::{DrbId, DrbQosPolicy, PduSessionId, UeIndex};
use nextgsim_cucp::app::{load_cucp_config_from_str, validate_cucp_config};
use nextgsim_cucp::UeTaskSchedulerImpl;
use nextgsim_e1ap::E1apBearerContextModificationResponse;
use nextgsim_ngap::NgapCause;
use tokio::time::timeout;

const E1AP_DELAY: Duration = Duration::from_millis(50);

fn delayed_peers() -> MockPeers {
    MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::always(standard_e1ap_response()).with_delay(E1AP_DELAY),
        MockDu::new(standard_f1ap_response()),
    )
}

/// Test a modification queued on the UE task queue
#[tokio::test]
async fn test_modification_on_ue_task_queue() -> TestResult {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            E1apBearerContextModificationResponse::success(),
        ]),
        MockDu::new(standard_f1ap_response()),
    );
    let mut sched = UeTaskSchedulerImpl::new(8);
    let ctx = peers.context_with_scheduler(Arc::new(sched.handle_for(TEST_UE)));

    let request = standard_request();
    let rx = sched.handle_pdu_session_resource_modify(request.clone(), ctx, DrbQosPolicy::FirstFlow)?;
    let response = timeout(DEFAULT_TEST_TIMEOUT, rx).await??;

    assert_all_sessions_accounted(&request, &response);
    assert_eq!(response.modified_ids(), vec![PduSessionId(1)]);
    assert_eq!(sched.nof_ues(), 1);

    sched.shutdown_all().await?;
    Ok(())
}

/// Test that the release requested by a failed reconfiguration runs on the UE queue
#[tokio::test]
async fn test_release_scheduled_on_ue_task_queue() -> TestResult {
    init_test_logging();

    let peers = MockPeers::new(
        MockUpResourceManager::new(standard_plan()),
        MockCuUp::new(vec![
            standard_e1ap_response(),
            E1apBearerContextModificationResponse::success(),
        ]),
        MockDu::new(standard_f1ap_response()),
    )
    .with_rrc(MockRrcUe::rejecting());
    let mut sched = UeTaskSchedulerImpl::new(8);
    let ctx = peers.context_with_scheduler(Arc::new(sched.handle_for(TEST_UE)));

    let rx = sched.handle_pdu_session_resource_modify(standard_request(), ctx, DrbQosPolicy::FirstFlow)?;
    let response = timeout(DEFAULT_TEST_TIMEOUT, rx).await??;
    assert_eq!(
        response.failure_cause(PduSessionId(1)),
        Some(NgapCause::MISC_UNSPECIFIED)
    );

    let ngap = peers.ngap.clone();
    wait_for_condition(
        || {
            let ngap = ngap.clone();
            async move { ngap.releases().len() == 1 }
        },
        DEFAULT_TEST_TIMEOUT,
        DEFAULT_POLL_INTERVAL,
    )
    .await?;
    assert_eq!(peers.ngap.releases()[0].ue_index, TEST_UE);

    sched.shutdown_all().await?;
    assert_eq!(peers.ngap.releases().len(), 1);
    Ok(())
}

/// Test that two modifications of the same UE never overlap
#[tokio::test]
async fn test_modifications_of_same_ue_are_serialized() -> TestResult {
    init_test_logging();

    let peers = delayed_peers();
    let mut sched = UeTaskSchedulerImpl::new(8);
    let handle = Arc::new(sched.handle_for(TEST_UE));

    let rx1 = sched.handle_pdu_session_resource_modify(
        standard_request(),
        peers.context_with_scheduler(handle.clone()),
        DrbQosPolicy::FirstFlow,
    )?;
    let rx2 = sched.handle_pdu_session_resource_modify(
        standard_request(),
        peers.context_with_scheduler(handle),
        DrbQosPolicy::FirstFlow,
    )?;

    let first = timeout(DEFAULT_TEST_TIMEOUT, rx1).await??;
    let second = timeout(DEFAULT_TEST_TIMEOUT, rx2).await??;
    assert_eq!(first.modified_ids(), vec![PduSessionId(1)]);
    assert_eq!(second.modified_ids(), vec![PduSessionId(1)]);

    assert_eq!(peers.cu_up.requests().len(), 4);
    assert_eq!(peers.cu_up.max_in_flight(), 1);

    sched.shutdown_all().await?;
    Ok(())
}

/// Test that modifications of different UEs proceed concurrently
#[tokio::test]
async fn test_modifications_of_different_ues_overlap() -> TestResult {
    init_test_logging();

    let peers = delayed_peers();
    let mut sched = UeTaskSchedulerImpl::new(8);
    let other_ue = UeIndex(2);

    let mut other_request = standard_request();
    other_request.ue_index = other_ue;

    let ctx1 = peers.context_with_scheduler(Arc::new(sched.handle_for(TEST_UE)));
    let ctx2 = peers.context_with_scheduler(Arc::new(sched.handle_for(other_ue)));
    let rx1 = sched.handle_pdu_session_resource_modify(standard_request(), ctx1, DrbQosPolicy::FirstFlow)?;
    let rx2 = sched.handle_pdu_session_resource_modify(other_request, ctx2, DrbQosPolicy::FirstFlow)?;

    timeout(DEFAULT_TEST_TIMEOUT, rx1).await??;
    timeout(DEFAULT_TEST_TIMEOUT, rx2).await??;

    assert_eq!(sched.nof_ues(), 2);
    assert_eq!(peers.cu_up.max_in_flight(), 2);
    let ues: Vec<_> = peers.cu_up.requests().iter().map(|r| r.ue_index).collect();
    assert!(ues.contains(&TEST_UE));
    assert!(ues.contains(&other_ue));

    sched.shutdown_all().await?;
    Ok(())
}

/// Test that clearing a UE queue drops a modification that has not run
#[tokio::test]
async fn test_cleared_queue_drops_modification() -> TestResult {
    init_test_logging();

    let peers = delayed_peers();
    let mut sched = UeTaskSchedulerImpl::new(8);
    let ctx = peers.context_with_scheduler(Arc::new(sched.handle_for(TEST_UE)));

    let rx = sched.handle_pdu_session_resource_modify(standard_request(), ctx, DrbQosPolicy::FirstFlow)?;
    assert!(sched.clear_pending_tasks(TEST_UE));
    assert_eq!(sched.nof_ues(), 0);

    let result = timeout(DEFAULT_TEST_TIMEOUT, rx).await?;
    assert!(result.is_err(), "response sender should be dropped");
    assert!(peers.up.applied().is_empty());
    Ok(())
}

/// Test a modification driven by a loaded CU-CP configuration
#[tokio::test]
async fn test_modification_with_loaded_config() -> TestResult {
    init_test_logging();

    let config = load_cucp_config_from_str(
        "ue_task_queue_capacity: 4\npdu_session:\n  drb_qos_policy: aggregate_gbr\n",
    )?;
    validate_cucp_config(&config)?;

    let video = gbr_params(2, 64_000, 64_000, 128_000, 128_000);
    let peers = MockPeers::new(
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
    );
    let request = modify_request(vec![modify_item(
        1,
        &[(1, voice_params()), (3, video)],
        TEST_NAS_PDU,
    )]);

    let mut sched = UeTaskSchedulerImpl::from_config(&config);
    let ctx = peers.context_with_scheduler(Arc::new(sched.handle_for(TEST_UE)));
    let rx = sched.handle_pdu_session_resource_modify(
        request,
        ctx,
        config.pdu_session.drb_qos_policy,
    )?;
    let response = timeout(DEFAULT_TEST_TIMEOUT, rx).await??;
    assert_eq!(response.modified_ids(), vec![PduSessionId(1)]);

    let applied = peers.up.applied();
    let gbr = applied[0].pdu_sessions_modified_list[0].drb_to_modify[&DrbId(1)]
        .qos_params
        .gbr_qos_info
        .unwrap();
    assert_eq!(gbr.gbr_dl, 192_000);
    assert_eq!(gbr.gbr_ul, 192_000);

    sched.shutdown_all().await?;
    Ok(())
}
