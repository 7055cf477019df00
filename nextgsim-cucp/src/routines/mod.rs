//! UE routines of the CU-CP
//!
//! A routine drives one UE procedure across the peers of the CU-CP. It runs
//! on the UE task queue and talks to the peers through the handles bundled
//! in [`UeRoutineContext`].

mod error;
pub mod helpers;
mod pdu_session_resource_modification;

use std::sync::Arc;

pub use error::RoutineError;
pub use pdu_session_resource_modification::{
    PduSessionResourceModificationRoutine, RoutineState,
};

use crate::cu_up_processor::E1apBearerContextManager;
use crate::du_processor::F1apUeContextManager;
use crate::ngap_notifier::CuCpUeContextReleaseHandler;
use crate::rrc::RrcUeInterface;
use crate::tasks::UeTaskScheduler;
use crate::up_resource::UpResourceManager;

/// Handles to everything a UE routine talks to.
///
/// Cloning is cheap; every handle is shared.
#[derive(Clone)]
pub struct UeRoutineContext {
    /// UP resource manager of the UE
    pub up_resource_mng: Arc<dyn UpResourceManager>,
    /// E1AP towards the CU-UP serving the UE
    pub e1ap_ctrl: Arc<dyn E1apBearerContextManager>,
    /// F1AP towards the DU serving the UE
    pub f1ap_ue_ctxt: Arc<dyn F1apUeContextManager>,
    /// RRC entity of the UE
    pub rrc_ue: Arc<dyn RrcUeInterface>,
    /// Release requests towards the AMF
    pub cu_cp_notifier: Arc<dyn CuCpUeContextReleaseHandler>,
    /// Task queue of the UE
    pub ue_task_sched: Arc<dyn UeTaskScheduler>,
}
