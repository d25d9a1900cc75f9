use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    //Transceiver lookup
    /// ErrTransceiverNotFound indicates that no transceiver matched the
    /// requested media kind or track.
    #[error("RTCRtpTransceiver for {0} not found")]
    ErrTransceiverNotFound(String),

    /// ErrReplaceTrackFailed indicates that no transceiver could be resolved
    /// for a replace track operation.
    #[error("replace track failed")]
    ErrReplaceTrackFailed,

    /// ErrNoUnusedTransceiver indicates that add_track found no recvonly slot
    /// to attach to and the transport refused to create a new one.
    #[error("no unused transceiver available for the track")]
    ErrNoUnusedTransceiver,

    /// ErrTrackNotExisted indicates a sending transceiver was requested
    /// without a track.
    #[error("track does not exist")]
    ErrTrackNotExisted,

    /// ErrRTPTransceiverStopped indicates an operation on a stopped transceiver.
    #[error("RTCRtpTransceiver has been stopped")]
    ErrRTPTransceiverStopped,

    //Sender
    /// ErrRTPSenderNewTrackHasIncorrectKind indicates that the new track is of
    /// a different kind than the previous/original
    #[error("new track must be of the same kind as previous")]
    ErrRTPSenderNewTrackHasIncorrectKind,

    /// ErrRTPSenderStaleParameters indicates set_parameters was called with a
    /// transaction id not issued by the latest get_parameters.
    #[error("parameters transaction id {0} is stale")]
    ErrRTPSenderStaleParameters(String),

    /// ErrRTPSenderEncodingCountMismatch indicates set_parameters tried to
    /// change the number of encodings.
    #[error("encodings count mismatch: expected {expected}, actual {actual}")]
    ErrRTPSenderEncodingCountMismatch { expected: usize, actual: usize },

    /// ErrRTPSenderInvalidScaleResolutionDownBy indicates an encoding with a
    /// scale factor below 1.0.
    #[error("scale_resolution_down_by must be >= 1.0, got {0}")]
    ErrRTPSenderInvalidScaleResolutionDownBy(f64),

    //SDP
    #[error("SdpInvalidSyntax: {0}")]
    SdpInvalidSyntax(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_messages() {
        let tests = vec![
            (
                Error::ErrTransceiverNotFound("video".to_owned()),
                "RTCRtpTransceiver for video not found",
            ),
            (Error::ErrReplaceTrackFailed, "replace track failed"),
            (
                Error::ErrRTPSenderEncodingCountMismatch {
                    expected: 3,
                    actual: 1,
                },
                "encodings count mismatch: expected 3, actual 1",
            ),
        ];

        for (err, expected) in tests {
            assert_eq!(err.to_string(), expected);
        }
    }
}
