//! NGAP (NG Application Protocol) library
//!
//! Message structures exchanged between the CU-CP and the AMF, in decoded
//! form. Encoding to ASN.1 PER is done at the NG interface boundary and is
//! not part of this crate.
//!
//! # Modules
//!
//! - `cause` - NGAP cause taxonomy
//! - `procedures` - PDU Session Resource Modify and UE Context Release messages

pub mod cause;
pub mod procedures;

pub use cause::{MiscCause, NasCause, NgapCause, ProtocolCause, RadioNetworkCause, TransportCause};
