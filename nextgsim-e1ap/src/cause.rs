//! E1AP Cause (3GPP TS 37.483 Section 9.3.1.2)

use std::fmt;

/// Radio Network Layer causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E1apRadioNetworkCause {
    Unspecified,
    UnknownOrAlreadyAllocatedGnbCuCpUeE1apId,
    UnknownOrAlreadyAllocatedGnbCuUpUeE1apId,
    UnknownOrInconsistentPairOfUeE1apId,
    InteractionWithOtherProcedure,
    PdcpCountWrapAround,
    NotSupportedQciValue,
    NotSupported5qiValue,
    EncryptionAlgorithmsNotSupported,
    IntegrityProtectionAlgorithmsNotSupported,
    UpIntegrityProtectionNotPossible,
    UpConfidentialityProtectionNotPossible,
    MultiplePduSessionIdInstances,
    UnknownPduSessionId,
    MultipleQosFlowIdInstances,
    UnknownQosFlowId,
    MultipleDrbIdInstances,
    UnknownDrbId,
    InvalidQosCombination,
    ProcedureCancelled,
    NormalRelease,
    NoRadioResourcesAvailable,
    ActionDesirableForRadioReasons,
    ResourcesNotAvailableForTheSlice,
    PdcpConfigurationNotSupported,
    UeDlMaxIpDataRateReason,
    UpIntegrityProtectionFailure,
    ReleaseDueToPreEmption,
}

/// Transport Layer causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E1apTransportCause {
    Unspecified,
    TransportResourceUnavailable,
}

/// Protocol causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E1apProtocolCause {
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
pub enum E1apMiscCause {
    ControlProcessingOverload,
    NotEnoughUserPlaneProcessingResources,
    HardwareFailure,
    OmIntervention,
    Unspecified,
}

/// E1AP cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E1apCause {
    /// Radio Network Layer cause
    RadioNetwork(E1apRadioNetworkCause),
    /// Transport Layer cause
    Transport(E1apTransportCause),
    /// Protocol cause
    Protocol(E1apProtocolCause),
    /// Miscellaneous cause
    Misc(E1apMiscCause),
}

impl Default for E1apCause {
    fn default() -> Self {
        E1apCause::Misc(E1apMiscCause::Unspecified)
    }
}

impl fmt::Display for E1apCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            E1apCause::RadioNetwork(c) => write!(f, "radio-network/{:?}", c),
            E1apCause::Transport(c) => write!(f, "transport/{:?}", c),
            E1apCause::Protocol(c) => write!(f, "protocol/{:?}", c),
            E1apCause::Misc(c) => write!(f, "misc/{:?}", c),
        }
    }
}
