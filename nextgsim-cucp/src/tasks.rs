//! UE Task Framework
//!
//! Every UE gets its own FIFO worker. Procedures of the same UE are queued
//! and run strictly one after the other, while procedures of different UEs
//! interleave on the tokio runtime. This is what lets a UE procedure own its
//! state without locking.
//!
//! # Architecture
//!
//! ```text
//!  UeTaskSchedulerImpl
//!  ┌──────────────────────────────────────────────┐
//!  │  UE 0: UeTaskHandle ──mpsc──▶ worker (FIFO)  │
//!  │  UE 1: UeTaskHandle ──mpsc──▶ worker (FIFO)  │
//!  │  ...                                         │
//!  └──────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use nextgsim_common::{CuCpConfig, DrbQosPolicy, UeIndex};
use nextgsim_ngap::procedures::{PduSessionResourceModifyRequest, PduSessionResourceModifyResponse};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::routines::{PduSessionResourceModificationRoutine, UeRoutineContext};

/// A unit of work queued on a UE.
pub type UeTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

// ============================================================================
// Task Message Envelope
// ============================================================================

/// Task message envelope wrapping queued work with control signals.
#[derive(Debug)]
pub enum TaskMessage<T> {
    /// Regular message payload
    Message(T),
    /// Shutdown signal - worker should terminate after the queued work
    Shutdown,
}

impl<T> TaskMessage<T> {
    /// Returns true if this is a shutdown signal.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, TaskMessage::Shutdown)
    }
}

/// Errors raised when queueing UE work.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The UE queue has no room left
    #[error("task queue of UE {0} is full")]
    QueueFull(UeIndex),

    /// The UE worker is gone
    #[error("task queue of UE {0} is closed")]
    QueueClosed(UeIndex),

    /// The UE worker ended abnormally
    #[error("task worker of UE {ue_index} failed: {reason}")]
    WorkerFailed {
        /// UE whose worker failed
        ue_index: UeIndex,
        /// Join error description
        reason: String,
    },
}

// ============================================================================
// UE Task Scheduler
// ============================================================================

/// Queue on which a UE procedure schedules follow-up work.
pub trait UeTaskScheduler: Send + Sync {
    /// Queues `task` without waiting. Returns false if it was not queued.
    fn schedule_async_task(&self, task: UeTask) -> bool;
}

/// Handle for sending work to the worker of one UE.
#[derive(Clone)]
pub struct UeTaskHandle {
    ue_index: UeIndex,
    tx: mpsc::Sender<TaskMessage<UeTask>>,
}

impl UeTaskHandle {
    /// UE served by this handle.
    pub fn ue_index(&self) -> UeIndex {
        self.ue_index
    }

    /// Queues `task` without waiting.
    pub fn try_schedule(&self, task: UeTask) -> Result<(), SchedulerError> {
        self.tx.try_send(TaskMessage::Message(task)).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SchedulerError::QueueFull(self.ue_index),
            mpsc::error::TrySendError::Closed(_) => SchedulerError::QueueClosed(self.ue_index),
        })
    }

    /// Asks the worker to stop once the already queued work is done.
    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        self.tx
            .send(TaskMessage::Shutdown)
            .await
            .map_err(|_| SchedulerError::QueueClosed(self.ue_index))
    }

    /// Returns true if the worker is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl UeTaskScheduler for UeTaskHandle {
    fn schedule_async_task(&self, task: UeTask) -> bool {
        match self.try_schedule(task) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to schedule UE task: {}", e);
                false
            }
        }
    }
}

struct UeWorker {
    handle: UeTaskHandle,
    join_handle: JoinHandle<()>,
}

/// Per-UE FIFO task scheduler.
pub struct UeTaskSchedulerImpl {
    /// Queue capacity of every UE worker
    queue_capacity: usize,
    /// Workers keyed by UE index
    workers: HashMap<UeIndex, UeWorker>,
}

impl UeTaskSchedulerImpl {
    /// Creates a scheduler whose UE queues hold `queue_capacity` tasks.
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            queue_capacity: queue_capacity.max(1),
            workers: HashMap::new(),
        }
    }

    /// Creates a scheduler sized from the CU-CP configuration.
    pub fn from_config(config: &CuCpConfig) -> Self {
        Self::new(config.ue_task_queue_capacity)
    }

    /// Returns the handle of the UE worker, spawning the worker if needed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle_for(&mut self, ue_index: UeIndex) -> UeTaskHandle {
        if let Some(worker) = self.workers.get(&ue_index) {
            if !worker.handle.is_closed() {
                return worker.handle.clone();
            }
        }

        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let handle = UeTaskHandle { ue_index, tx };
        let join_handle = tokio::spawn(run_ue_worker(ue_index, rx));
        debug!("UE {} task worker created (capacity {})", ue_index, self.queue_capacity);
        self.workers.insert(
            ue_index,
            UeWorker {
                handle: handle.clone(),
                join_handle,
            },
        );
        handle
    }

    /// Queues `task` on the UE worker. Returns false if it was not queued.
    pub fn schedule_async_task(&mut self, ue_index: UeIndex, task: UeTask) -> bool {
        self.handle_for(ue_index).schedule_async_task(task)
    }

    /// Stops the UE worker. Queued work is dropped and a running task is
    /// cancelled at its next suspension point. Returns false if the UE had
    /// no worker.
    pub fn clear_pending_tasks(&mut self, ue_index: UeIndex) -> bool {
        match self.workers.remove(&ue_index) {
            Some(worker) => {
                worker.join_handle.abort();
                debug!("UE {} task worker cleared", ue_index);
                true
            }
            None => false,
        }
    }

    /// Number of UEs with a worker.
    pub fn nof_ues(&self) -> usize {
        self.workers.len()
    }

    /// Stops all workers after their queued work and waits for them.
    pub async fn shutdown_all(&mut self) -> Result<(), SchedulerError> {
        let mut first_error = None;
        for (ue_index, worker) in self.workers.drain() {
            // A closed queue means the worker already stopped
            let _ = worker.handle.shutdown().await;
            if let Err(e) = worker.join_handle.await {
                warn!("UE {} task worker ended abnormally: {}", ue_index, e);
                first_error.get_or_insert(SchedulerError::WorkerFailed {
                    ue_index,
                    reason: e.to_string(),
                });
            }
        }
        info!("All UE task workers stopped");
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Queues a PDU Session Resource Modification on the UE of `request`.
    ///
    /// The response is delivered on the returned channel once the procedure
    /// ran. `ctx` must schedule follow-up work on the same UE queue.
    pub fn handle_pdu_session_resource_modify(
        &mut self,
        request: PduSessionResourceModifyRequest,
        ctx: UeRoutineContext,
        drb_qos_policy: DrbQosPolicy,
    ) -> Result<oneshot::Receiver<PduSessionResourceModifyResponse>, SchedulerError> {
        let ue_index = request.ue_index;
        let (resp_tx, resp_rx) = oneshot::channel();
        let routine = PduSessionResourceModificationRoutine::new(request, ctx, drb_qos_policy);
        let task: UeTask = Box::pin(async move {
            let response = routine.run().await;
            if resp_tx.send(response).is_err() {
                debug!("UE {} modify response dropped, requester went away", ue_index);
            }
        });
        self.handle_for(ue_index).try_schedule(task)?;
        Ok(resp_rx)
    }
}

async fn run_ue_worker(ue_index: UeIndex, mut rx: mpsc::Receiver<TaskMessage<UeTask>>) {
    debug!("UE {} task worker started", ue_index);
    while let Some(msg) = rx.recv().await {
        match msg {
            TaskMessage::Message(task) => task.await,
            TaskMessage::Shutdown => break,
        }
    }
    debug!("UE {} task worker stopped", ue_index);
}
