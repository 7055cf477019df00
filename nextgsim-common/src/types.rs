//! Core CU-CP types: UE index, PDU session / DRB / QoS flow identifiers,
//! QoS parameters and UP transport layer information.
//!
//! These are shared by the NGAP, E1AP and F1AP message crates so that the
//! three dialects speak about the same entities with the same key types.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// CU-CP internal UE index.
///
/// Unlike the NGAP/E1AP/F1AP UE IDs, the UE index is stable for the lifetime
/// of the UE inside the CU-CP and is used to key per-UE state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UeIndex(pub u64);

impl fmt::Display for UeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// PDU Session ID (TS 24.007, 1-15 in practice, 0-255 on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PduSessionId(pub u8);

impl fmt::Display for PduSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "psi={}", self.0)
    }
}

/// Data Radio Bearer identity (TS 38.331, 1-32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DrbId(pub u8);

impl DrbId {
    /// Smallest valid DRB identity
    pub const MIN: u8 = 1;
    /// Largest valid DRB identity
    pub const MAX: u8 = 32;

    /// Returns true if the identity lies in the range allowed by TS 38.331.
    pub fn is_valid(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl fmt::Display for DrbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drb{}", self.0)
    }
}

/// QoS Flow Identifier (TS 38.413, 0-63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QosFlowId(pub u8);

impl QosFlowId {
    /// Largest valid QFI
    pub const MAX: u8 = 63;

    /// Returns true if the QFI fits in 6 bits.
    pub fn is_valid(&self) -> bool {
        self.0 <= Self::MAX
    }
}

impl fmt::Display for QosFlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qfi={}", self.0)
    }
}

/// 5G QoS Identifier (TS 23.501 Table 5.7.4-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiveQi(pub u16);

impl fmt::Display for FiveQi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single Network Slice Selection Assistance Information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SNssai {
    /// Slice/Service Type (8-bit)
    pub sst: u8,
    /// Slice Differentiator (optional 24-bit value)
    pub sd: Option<u32>,
}

impl SNssai {
    /// Creates a new S-NSSAI with only SST (no SD).
    pub const fn new(sst: u8) -> Self {
        Self { sst, sd: None }
    }

    /// Creates a new S-NSSAI with SST and SD (lower 24 bits used).
    pub const fn with_sd(sst: u8, sd: u32) -> Self {
        Self {
            sst,
            sd: Some(sd & 0x00FF_FFFF),
        }
    }
}

impl fmt::Display for SNssai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sd {
            Some(sd) => write!(f, "sst={} sd=0x{:06x}", self.sst, sd),
            None => write!(f, "sst={}", self.sst),
        }
    }
}

/// QoS characteristics of a flow or bearer.
///
/// Only the standardized (non-dynamic) 5QI form is carried; dynamic 5QI
/// descriptors are signalled by the core with a 5QI value as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosCharacteristics {
    /// 5QI value
    pub five_qi: FiveQi,
    /// Priority level override (1-127), if signalled
    pub prio_level: Option<u8>,
}

impl QosCharacteristics {
    /// Creates non-dynamic QoS characteristics for the given 5QI.
    pub const fn non_dyn(five_qi: u16) -> Self {
        Self {
            five_qi: FiveQi(five_qi),
            prio_level: None,
        }
    }

    /// Returns the 5QI of these characteristics.
    pub fn get_5qi(&self) -> FiveQi {
        self.five_qi
    }
}

impl Default for QosCharacteristics {
    fn default() -> Self {
        // 5QI 9: default best-effort bearer
        Self::non_dyn(9)
    }
}

/// Allocation and Retention Priority (TS 23.501 5.7.2.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRetentionPriority {
    /// Priority level (1-15, lower is higher priority)
    pub prio_level_arp: u8,
    /// Pre-emption capability
    pub may_trigger_preemption: bool,
    /// Pre-emption vulnerability
    pub is_preemptable: bool,
}

impl Default for AllocationRetentionPriority {
    fn default() -> Self {
        Self {
            prio_level_arp: 15,
            may_trigger_preemption: false,
            is_preemptable: true,
        }
    }
}

/// GBR QoS flow information, all bit rates in bit/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GbrQosFlowInfo {
    /// Maximum flow bit rate downlink
    pub max_br_dl: u64,
    /// Maximum flow bit rate uplink
    pub max_br_ul: u64,
    /// Guaranteed flow bit rate downlink
    pub gbr_dl: u64,
    /// Guaranteed flow bit rate uplink
    pub gbr_ul: u64,
}

impl GbrQosFlowInfo {
    /// Component-wise saturating sum of two GBR descriptions.
    pub fn saturating_add(&self, other: &GbrQosFlowInfo) -> GbrQosFlowInfo {
        GbrQosFlowInfo {
            max_br_dl: self.max_br_dl.saturating_add(other.max_br_dl),
            max_br_ul: self.max_br_ul.saturating_add(other.max_br_ul),
            gbr_dl: self.gbr_dl.saturating_add(other.gbr_dl),
            gbr_ul: self.gbr_ul.saturating_add(other.gbr_ul),
        }
    }
}

/// QoS Flow Level QoS Parameters (TS 38.413 9.3.1.12).
///
/// The same structure describes DRB-wide QoS in E1AP and F1AP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QosFlowLevelQosParams {
    /// QoS characteristics (5QI)
    pub qos_desc: QosCharacteristics,
    /// Allocation and retention priority
    pub alloc_retention_prio: AllocationRetentionPriority,
    /// GBR information, only present for GBR flows
    pub gbr_qos_info: Option<GbrQosFlowInfo>,
}

impl QosFlowLevelQosParams {
    /// Returns true if the flow carries guaranteed bit rates.
    pub fn is_gbr(&self) -> bool {
        self.gbr_qos_info.is_some()
    }
}

/// UP transport layer information (GTP tunnel endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpTransportLayerInfo {
    /// Transport layer address of the endpoint
    pub transport_layer_address: IpAddr,
    /// GTP-U tunnel endpoint identifier
    pub gtp_teid: u32,
}

impl UpTransportLayerInfo {
    /// Creates a new tunnel endpoint.
    pub fn new(transport_layer_address: IpAddr, gtp_teid: u32) -> Self {
        Self {
            transport_layer_address,
            gtp_teid,
        }
    }
}

impl fmt::Display for UpTransportLayerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:teid=0x{:08x}", self.transport_layer_address, self.gtp_teid)
    }
}

/// RLC mode of a DRB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RlcMode {
    /// Acknowledged mode
    #[default]
    Am,
    /// Unacknowledged mode, bidirectional
    UmBidir,
    /// Unacknowledged mode, uplink only
    UmUniDirUl,
    /// Unacknowledged mode, downlink only
    UmUniDirDl,
}

/// PDCP sequence number length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PdcpSnSize {
    /// 12-bit SN
    Size12Bits,
    /// 18-bit SN
    #[default]
    Size18Bits,
}

impl PdcpSnSize {
    /// Returns the SN length in bits.
    pub fn bits(&self) -> u8 {
        match self {
            PdcpSnSize::Size12Bits => 12,
            PdcpSnSize::Size18Bits => 18,
        }
    }
}
