//! RRC Reconfiguration procedure request (3GPP TS 38.331 Section 5.3.5)
//!
//! The CU-CP side view of what goes into an RRCReconfiguration: radio bearer
//! changes, the DU's cell group configuration, dedicated NAS messages and
//! the measurement configuration. ASN.1 packing happens in the RRC entity.

use std::collections::BTreeMap;

use bytes::Bytes;
use nextgsim_common::{DrbId, PdcpSnSize, PduSessionId, QosFlowId};

/// SDAP configuration of a DRB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrcSdapConfig {
    /// PDU session the DRB belongs to
    pub pdu_session: PduSessionId,
    /// True for the default DRB of the session
    pub default_drb: bool,
    /// UL QoS flows mapped to the DRB
    pub mapped_ul_qos_flows_to_add: Vec<QosFlowId>,
    /// UL QoS flows no longer mapped to the DRB
    pub mapped_ul_qos_flows_to_release: Vec<QosFlowId>,
}

/// PDCP configuration of a DRB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RrcPdcpConfig {
    /// PDCP SN size uplink
    pub sn_size_ul: PdcpSnSize,
    /// PDCP SN size downlink
    pub sn_size_dl: PdcpSnSize,
}

/// DRB-ToAddMod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrcDrbToAddMod {
    /// DRB identity
    pub drb_id: DrbId,
    /// CN association (SDAP configuration)
    pub sdap_cfg: RrcSdapConfig,
    /// PDCP configuration
    pub pdcp_cfg: RrcPdcpConfig,
}

/// RadioBearerConfig
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RrcRadioBearerConfig {
    /// DRBs to add or modify
    pub drb_to_add_mod_list: BTreeMap<DrbId, RrcDrbToAddMod>,
    /// DRBs to release
    pub drb_to_release_list: Vec<DrbId>,
}

impl RrcRadioBearerConfig {
    /// Returns true if the configuration carries no change.
    pub fn is_empty(&self) -> bool {
        self.drb_to_add_mod_list.is_empty() && self.drb_to_release_list.is_empty()
    }
}

/// RRCReconfiguration-v1530-IEs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RrcReconfigNonCritExt {
    /// Packed CellGroupConfig of the master cell group (may be empty)
    pub master_cell_group: Bytes,
    /// Dedicated NAS messages
    pub ded_nas_msg_list: Vec<Bytes>,
}

impl RrcReconfigNonCritExt {
    /// Returns true if the extension carries nothing.
    pub fn is_empty(&self) -> bool {
        self.master_cell_group.is_empty() && self.ded_nas_msg_list.is_empty()
    }
}

/// MeasConfig, reduced to the measurement objects and report configurations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RrcMeasConfig {
    /// SSB ARFCN of each measurement object
    pub meas_obj_ssb_arfcns: Vec<u32>,
    /// Report configuration IDs
    pub report_cfg_ids: Vec<u8>,
}

/// Arguments of an RRC Reconfiguration procedure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RrcReconfigurationProcedureRequest {
    /// Radio bearer changes
    pub radio_bearer_cfg: Option<RrcRadioBearerConfig>,
    /// Cell group configuration and NAS messages
    pub non_crit_ext: Option<RrcReconfigNonCritExt>,
    /// Measurement configuration
    pub meas_cfg: Option<RrcMeasConfig>,
}
