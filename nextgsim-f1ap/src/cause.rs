//! F1AP Cause (3GPP TS 38.473 Section 9.3.1.2)

use std::fmt;

/// Radio Network Layer causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum F1apRadioNetworkCause {
    Unspecified,
    RlFailureRlc,
    UnknownOrAlreadyAllocatedGnbCuUeF1apId,
    UnknownOrAlreadyAllocatedGnbDuUeF1apId,
    UnknownOrInconsistentPairOfUeF1apId,
    InteractionWithOtherProcedure,
    NotSupportedQciValue,
    ActionDesirableForRadioReasons,
    NoRadioResourcesAvailable,
    ProcedureCancelled,
    NormalRelease,
    CellNotAvailable,
    RlFailureOthers,
    UeRejection,
    ResourcesNotAvailableForTheSlice,
}

/// Transport Layer causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum F1apTransportCause {
    Unspecified,
    TransportResourceUnavailable,
}

/// Protocol causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum F1apProtocolCause {
    TransferSyntaxError,
    AbstractSyntaxErrorReject,
    AbstractSyntaxErrorIgnoreAndNotify,
    MessageNotCompatibleWithReceiverState,
    SemanticError,
    AbstractSyntaxErrorFalselyConstructedMessage,
    Unspecified,
}

/// Miscellaneous causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum F1apMiscCause {
    ControlProcessingOverload,
    NotEnoughUserPlaneProcessingResources,
    HardwareFailure,
    OmIntervention,
    Unspecified,
}

/// F1AP cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum F1apCause {
    /// Radio Network Layer cause
    RadioNetwork(F1apRadioNetworkCause),
    /// Transport Layer cause
    Transport(F1apTransportCause),
    /// Protocol cause
    Protocol(F1apProtocolCause),
    /// Miscellaneous cause
    Misc(F1apMiscCause),
}

impl fmt::Display for F1apCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            F1apCause::RadioNetwork(c) => write!(f, "radio-network/{:?}", c),
            F1apCause::Transport(c) => write!(f, "transport/{:?}", c),
            F1apCause::Protocol(c) => write!(f, "protocol/{:?}", c),
            F1apCause::Misc(c) => write!(f, "misc/{:?}", c),
        }
    }
}
