//! NGAP Procedures
//!
//! CU-CP side message structures for the NGAP procedures handled by the
//! PDU session routines (3GPP TS 38.413).

pub mod pdu_session_resource;
pub mod ue_context_release;

pub use pdu_session_resource::*;
pub use ue_context_release::*;
