use std::fmt;

use crate::constants::UNSPECIFIED_STR;

/// Desired or negotiated media flow of a transceiver.
///
/// [W3C](https://www.w3.org/TR/webrtc/#dom-rtcrtptransceiverdirection)
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCRtpTransceiverDirection {
    /// Current direction of a transceiver that was never negotiated.
    #[default]
    Unspecified,
    Sendrecv,
    Sendonly,
    Recvonly,
    Inactive,
    /// Terminal, only the transport stops a transceiver.
    Stopped,
}

const DIRECTIONS: [(RTCRtpTransceiverDirection, &str); 5] = [
    (RTCRtpTransceiverDirection::Sendrecv, "sendrecv"),
    (RTCRtpTransceiverDirection::Sendonly, "sendonly"),
    (RTCRtpTransceiverDirection::Recvonly, "recvonly"),
    (RTCRtpTransceiverDirection::Inactive, "inactive"),
    (RTCRtpTransceiverDirection::Stopped, "stopped"),
];

impl From<&str> for RTCRtpTransceiverDirection {
    fn from(raw: &str) -> Self {
        DIRECTIONS
            .iter()
            .find(|(_, name)| *name == raw)
            .map_or(RTCRtpTransceiverDirection::Unspecified, |(d, _)| *d)
    }
}

impl fmt::Display for RTCRtpTransceiverDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = DIRECTIONS
            .iter()
            .find(|(d, _)| d == self)
            .map_or(UNSPECIFIED_STR, |(_, name)| *name);
        write!(f, "{s}")
    }
}

impl RTCRtpTransceiverDirection {
    pub fn has_send(&self) -> bool {
        matches!(self, Self::Sendrecv | Self::Sendonly)
    }
}
