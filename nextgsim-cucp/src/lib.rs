//! nextgsim-cucp - CU-CP UE procedures
//!
//! This crate holds the UE procedures of the CU-CP (central unit, control
//! plane) of a split gNB. A procedure coordinates three peers that answer
//! asynchronously:
//!
//! - the CU-UP over E1AP (bearer contexts, UL tunnels)
//! - the DU over F1AP (UE contexts, DL tunnels, cell group configuration)
//! - the UE over RRC (reconfiguration)
//!
//! ```text
//!                ┌──────────────────────────────┐
//!   AMF ◀─NGAP──▶│            CU-CP             │
//!                │  UeTaskSchedulerImpl          │
//!                │   └─ UE queue ─▶ routine      │
//!                └────┬──────────┬─────────┬────┘
//!                   E1AP       F1AP       RRC
//!                     ▼          ▼         ▼
//!                   CU-UP        DU        UE
//! ```
//!
//! Peers are reached through the traits in `cu_up_processor`,
//! `du_processor`, `rrc` and `ngap_notifier`; the UP configuration is owned
//! by an [`up_resource::UpResourceManager`].

pub mod app;
pub mod cause_converters;
pub mod cu_up_processor;
pub mod du_processor;
pub mod ngap_notifier;
pub mod routines;
pub mod rrc;
pub mod tasks;
pub mod up_resource;

pub use cu_up_processor::E1apBearerContextManager;
pub use du_processor::F1apUeContextManager;
pub use ngap_notifier::CuCpUeContextReleaseHandler;
pub use routines::{
    PduSessionResourceModificationRoutine, RoutineError, RoutineState, UeRoutineContext,
};
pub use rrc::RrcUeInterface;
pub use tasks::{SchedulerError, UeTask, UeTaskHandle, UeTaskScheduler, UeTaskSchedulerImpl};
pub use up_resource::UpResourceManager;
