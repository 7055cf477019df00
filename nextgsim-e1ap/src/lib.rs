//! E1AP (E1 Application Protocol) library
//!
//! Decoded message structures exchanged between the CU-CP and the CU-UP
//! (3GPP TS 37.483). Only the bearer context procedures used by the PDU
//! session routines are modelled.
//!
//! # Modules
//!
//! - `cause` - E1AP cause taxonomy
//! - `bearer_context` - Bearer Context Modification request and response

pub mod bearer_context;
pub mod cause;

pub use bearer_context::*;
pub use cause::{
    E1apCause, E1apMiscCause, E1apProtocolCause, E1apRadioNetworkCause, E1apTransportCause,
};
