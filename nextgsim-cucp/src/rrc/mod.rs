//! RRC UE interface
//!
//! What the CU-CP procedures need from the RRC entity of a UE: its
//! measurement configuration, the cell group configuration the DU reported
//! and the ability to run an RRC Reconfiguration.

mod reconfiguration;

pub use reconfiguration::{
    RrcDrbToAddMod, RrcMeasConfig, RrcPdcpConfig, RrcRadioBearerConfig, RrcReconfigNonCritExt,
    RrcReconfigurationProcedureRequest, RrcSdapConfig,
};

use bytes::Bytes;

/// RRC entity of one UE.
#[async_trait::async_trait]
pub trait RrcUeInterface: Send + Sync {
    /// Packed MeasConfig currently configured at the UE (may be empty).
    fn get_packed_meas_config(&self) -> Bytes;

    /// Measurement configuration to send with the next reconfiguration.
    fn generate_meas_config(&self) -> Option<RrcMeasConfig>;

    /// Packed CellGroupConfig the DU reported when the UE was set up.
    fn get_reported_du_config(&self) -> Bytes;

    /// Runs an RRC Reconfiguration and returns true once the UE completed it.
    async fn handle_rrc_reconfiguration_request(
        &self,
        request: RrcReconfigurationProcedureRequest,
    ) -> bool;
}
