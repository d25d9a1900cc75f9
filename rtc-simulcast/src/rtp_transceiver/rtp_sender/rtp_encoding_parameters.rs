use crate::rtp_transceiver::rtp_sender::rtp_coding_parameters::RTCRtpCodingParameters;
use crate::rtp_transceiver::RtpStreamId;

/// RTP encoding parameters for individual encodings in a simulcast or layered stream.
///
/// Every field except `active` is optional, so a single unlayered encoding
/// can leave bitrate and scaling to the transport.
///
/// ## Specifications
///
/// * [W3C](https://w3c.github.io/webrtc-pc/#dom-rtcrtpencodingparameters)
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RTCRtpEncodingParameters {
    /// Base coding parameters (RID)
    pub rtp_coding_parameters: RTCRtpCodingParameters,
    /// Whether this encoding is actively being transmitted
    pub active: bool,
    /// Maximum bitrate in bits per second
    pub max_bitrate: Option<u32>,
    /// Resolution scaling factor (must be >= 1.0)
    pub scale_resolution_down_by: Option<f64>,
}

impl RTCRtpEncodingParameters {
    pub fn rid(&self) -> &RtpStreamId {
        &self.rtp_coding_parameters.rid
    }
}
