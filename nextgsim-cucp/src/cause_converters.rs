//! Cause conversion between interfaces
//!
//! Failures reported by the CU-UP over E1AP are forwarded to the AMF, so the
//! E1AP cause is translated into the closest NGAP cause of the same group.

use nextgsim_e1ap::{
    E1apCause, E1apMiscCause, E1apProtocolCause, E1apRadioNetworkCause, E1apTransportCause,
};
use nextgsim_ngap::{MiscCause, NgapCause, ProtocolCause, RadioNetworkCause, TransportCause};

/// Converts an E1AP cause into an NGAP cause.
pub fn e1ap_to_ngap_cause(cause: E1apCause) -> NgapCause {
    match cause {
        E1apCause::RadioNetwork(c) => NgapCause::RadioNetwork(radio_network_cause(c)),
        E1apCause::Transport(c) => NgapCause::Transport(match c {
            E1apTransportCause::TransportResourceUnavailable => {
                TransportCause::TransportResourceUnavailable
            }
            E1apTransportCause::Unspecified => TransportCause::Unspecified,
        }),
        E1apCause::Protocol(c) => NgapCause::Protocol(match c {
            E1apProtocolCause::TransferSyntaxError => ProtocolCause::TransferSyntaxError,
            E1apProtocolCause::AbstractSyntaxErrorReject => ProtocolCause::AbstractSyntaxErrorReject,
            E1apProtocolCause::AbstractSyntaxErrorIgnoreAndNotify => {
                ProtocolCause::AbstractSyntaxErrorIgnoreAndNotify
            }
            E1apProtocolCause::MessageNotCompatibleWithReceiverState => {
                ProtocolCause::MessageNotCompatibleWithReceiverState
            }
            E1apProtocolCause::SemanticError => ProtocolCause::SemanticError,
            E1apProtocolCause::AbstractSyntaxErrorFalselyConstructedMessage => {
                ProtocolCause::AbstractSyntaxErrorFalselyConstructedMessage
            }
            E1apProtocolCause::Unspecified => ProtocolCause::Unspecified,
        }),
        E1apCause::Misc(c) => NgapCause::Misc(match c {
            E1apMiscCause::ControlProcessingOverload => MiscCause::ControlProcessingOverload,
            E1apMiscCause::NotEnoughUserPlaneProcessingResources => {
                MiscCause::NotEnoughUserPlaneProcessingResources
            }
            E1apMiscCause::HardwareFailure => MiscCause::HardwareFailure,
            E1apMiscCause::OmIntervention => MiscCause::OmIntervention,
            E1apMiscCause::Unspecified => MiscCause::Unspecified,
        }),
    }
}

fn radio_network_cause(cause: E1apRadioNetworkCause) -> RadioNetworkCause {
    use E1apRadioNetworkCause as E1;
    match cause {
        E1::InteractionWithOtherProcedure => RadioNetworkCause::InteractionWithOtherProcedure,
        E1::NotSupported5qiValue => RadioNetworkCause::NotSupported5qiValue,
        E1::EncryptionAlgorithmsNotSupported | E1::IntegrityProtectionAlgorithmsNotSupported => {
            RadioNetworkCause::EncryptionAndOrIntegrityProtectionAlgorithmsNotSupported
        }
        E1::UpIntegrityProtectionNotPossible => RadioNetworkCause::UpIntegrityProtectionNotPossible,
        E1::UpConfidentialityProtectionNotPossible => {
            RadioNetworkCause::UpConfidentialityProtectionNotPossible
        }
        E1::MultiplePduSessionIdInstances => RadioNetworkCause::MultiplePduSessionIdInstances,
        E1::UnknownPduSessionId => RadioNetworkCause::UnknownPduSessionId,
        E1::MultipleQosFlowIdInstances => RadioNetworkCause::MultipleQosFlowIdInstances,
        E1::UnknownQosFlowId => RadioNetworkCause::UnknownQosFlowId,
        E1::InvalidQosCombination => RadioNetworkCause::InvalidQosCombination,
        E1::NoRadioResourcesAvailable => RadioNetworkCause::RadioResourcesNotAvailable,
        E1::ActionDesirableForRadioReasons => RadioNetworkCause::HandoverDesirableForRadioReason,
        E1::ResourcesNotAvailableForTheSlice => RadioNetworkCause::ResourcesNotAvailableForTheSlice,
        E1::UeDlMaxIpDataRateReason => RadioNetworkCause::UeMaxIntegrityProtectedDataRateReason,
        E1::Unspecified
        | E1::UnknownOrAlreadyAllocatedGnbCuCpUeE1apId
        | E1::UnknownOrAlreadyAllocatedGnbCuUpUeE1apId
        | E1::UnknownOrInconsistentPairOfUeE1apId
        | E1::PdcpCountWrapAround
        | E1::NotSupportedQciValue
        | E1::MultipleDrbIdInstances
        | E1::UnknownDrbId
        | E1::ProcedureCancelled
        | E1::NormalRelease
        | E1::PdcpConfigurationNotSupported
        | E1::UpIntegrityProtectionFailure
        | E1::ReleaseDueToPreEmption => RadioNetworkCause::Unspecified,
    }
}
