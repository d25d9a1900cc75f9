use crate::rtp_transceiver::rtp_sender::rtp_encoding_parameters::RTCRtpEncodingParameters;

/// RTP send parameters for configuring senders.
///
/// Obtained from [`RTCRtpSender::get_parameters`](super::RTCRtpSender::get_parameters),
/// modified by the caller and committed back with
/// [`RTCRtpSender::set_parameters`](super::RTCRtpSender::set_parameters).
/// Fields other than `encodings` are managed by the transport and must be
/// handed back untouched.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RTCRtpSendParameters {
    /// Unique identifier for tracking parameter changes
    pub transaction_id: String,
    /// Encoding parameters for each simulcast/layered stream
    pub encodings: Vec<RTCRtpEncodingParameters>,
    /// Degradation preference chosen by the transport
    pub degradation_preference: Option<String>,
}
