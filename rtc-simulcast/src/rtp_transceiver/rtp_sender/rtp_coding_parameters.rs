use crate::rtp_transceiver::RtpStreamId;

/// Identification shared by every encoding of a sender.
///
/// [W3C](https://w3c.github.io/webrtc-pc/#dom-rtcrtpcodingparameters)
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RTCRtpCodingParameters {
    /// Empty for a sender without simulcast.
    pub rid: RtpStreamId,
}
