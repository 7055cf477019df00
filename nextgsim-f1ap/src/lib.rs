//! F1AP (F1 Application Protocol) library
//!
//! Decoded message structures exchanged between the CU-CP and the DU
//! (3GPP TS 38.473) for the UE Context Modification procedure.
//!
//! # Modules
//!
//! - `cause` - F1AP cause taxonomy
//! - `ue_context` - UE Context Modification request and response

pub mod cause;
pub mod ue_context;

pub use cause::{F1apCause, F1apMiscCause, F1apProtocolCause, F1apRadioNetworkCause, F1apTransportCause};
pub use ue_context::*;
