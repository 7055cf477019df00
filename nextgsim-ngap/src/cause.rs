//! NGAP Cause (3GPP TS 38.413 Section 9.3.1.2)
//!
//! The cause taxonomy reported to the AMF. Causes coming from other
//! interfaces (E1AP, F1AP) are translated into these groups before they are
//! put into an NGAP response.

use std::fmt;

/// Radio Network Layer causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioNetworkCause {
    Unspecified,
    TxnrelocoverallExpiry,
    SuccessfulHandover,
    ReleaseDueToNgranGeneratedReason,
    ReleaseDueTo5gcGeneratedReason,
    HandoverCancelled,
    PartialHandover,
    HoFailureInTarget5gcNgranNodeOrTargetSystem,
    HoTargetNotAllowed,
    TngrelocOverallExpiry,
    TngrelocPrepExpiry,
    CellNotAvailable,
    UnknownTargetId,
    NoRadioResourcesAvailableInTargetCell,
    UnknownLocalUeNgapId,
    InconsistentRemoteUeNgapId,
    HandoverDesirableForRadioReason,
    TimeCriticalHandover,
    ResourceOptimisationHandover,
    ReduceLoadInServingCell,
    UserInactivity,
    RadioConnectionWithUeLost,
    RadioResourcesNotAvailable,
    InvalidQosCombination,
    FailureInRadioInterfaceProcedure,
    InteractionWithOtherProcedure,
    UnknownPduSessionId,
    UnknownQosFlowId,
    MultiplePduSessionIdInstances,
    MultipleQosFlowIdInstances,
    EncryptionAndOrIntegrityProtectionAlgorithmsNotSupported,
    NgIntraSystemHandoverTriggered,
    NgInterSystemHandoverTriggered,
    XnHandoverTriggered,
    NotSupported5qiValue,
    UeContextTransfer,
    ImsVoiceEpsFallbackOrRatFallbackTriggered,
    UpIntegrityProtectionNotPossible,
    UpConfidentialityProtectionNotPossible,
    SliceNotSupported,
    UeInRrcInactiveStateNotReachable,
    Redirection,
    ResourcesNotAvailableForTheSlice,
    UeMaxIntegrityProtectedDataRateReason,
    ReleaseDueToCnDetectedMobility,
}

/// Transport Layer causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCause {
    TransportResourceUnavailable,
    Unspecified,
}

/// NAS causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NasCause {
    NormalRelease,
    AuthenticationFailure,
    Deregister,
    Unspecified,
}

/// Protocol causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolCause {
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
pub enum MiscCause {
    ControlProcessingOverload,
    NotEnoughUserPlaneProcessingResources,
    HardwareFailure,
    OmIntervention,
    UnknownPlmnOrSnpn,
    Unspecified,
}

/// NGAP cause, one value out of one of the five cause groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NgapCause {
    /// Radio Network Layer cause
    RadioNetwork(RadioNetworkCause),
    /// Transport Layer cause
    Transport(TransportCause),
    /// NAS cause
    Nas(NasCause),
    /// Protocol cause
    Protocol(ProtocolCause),
    /// Miscellaneous cause
    Misc(MiscCause),
}

impl NgapCause {
    /// Radio network / unspecified, used when a whole procedure fails.
    pub const RADIO_NETWORK_UNSPECIFIED: NgapCause =
        NgapCause::RadioNetwork(RadioNetworkCause::Unspecified);

    /// Misc / unspecified.
    pub const MISC_UNSPECIFIED: NgapCause = NgapCause::Misc(MiscCause::Unspecified);

    /// Returns the name of the cause group.
    pub fn group(&self) -> &'static str {
        match self {
            NgapCause::RadioNetwork(_) => "radio-network",
            NgapCause::Transport(_) => "transport",
            NgapCause::Nas(_) => "nas",
            NgapCause::Protocol(_) => "protocol",
            NgapCause::Misc(_) => "misc",
        }
    }
}

impl From<RadioNetworkCause> for NgapCause {
    fn from(cause: RadioNetworkCause) -> Self {
        NgapCause::RadioNetwork(cause)
    }
}

impl From<TransportCause> for NgapCause {
    fn from(cause: TransportCause) -> Self {
        NgapCause::Transport(cause)
    }
}

impl From<ProtocolCause> for NgapCause {
    fn from(cause: ProtocolCause) -> Self {
        NgapCause::Protocol(cause)
    }
}

impl From<MiscCause> for NgapCause {
    fn from(cause: MiscCause) -> Self {
        NgapCause::Misc(cause)
    }
}

impl fmt::Display for NgapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NgapCause::RadioNetwork(c) => write!(f, "{}/{:?}", self.group(), c),
            NgapCause::Transport(c) => write!(f, "{}/{:?}", self.group(), c),
            NgapCause::Nas(c) => write!(f, "{}/{:?}", self.group(), c),
            NgapCause::Protocol(c) => write!(f, "{}/{:?}", self.group(), c),
            NgapCause::Misc(c) => write!(f, "{}/{:?}", self.group(), c),
        }
    }
}
