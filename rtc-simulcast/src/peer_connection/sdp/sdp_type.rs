use std::fmt;

use crate::constants::UNSPECIFIED_STR;
use serde::{Deserialize, Serialize};

/// Type of a session description in the offer/answer model.
///
/// Serialized in lowercase, as signaling channels carry it in the JSON `type` field.
///
/// ```
/// use rtc_simulcast::peer_connection::sdp::RTCSdpType;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(serde_json::to_string(&RTCSdpType::Offer)?, "\"offer\"");
/// let parsed: RTCSdpType = serde_json::from_str("\"answer\"")?;
/// assert_eq!(parsed, RTCSdpType::Answer);
/// # Ok(())
/// # }
/// ```
///
/// [W3C](https://w3c.github.io/webrtc-pc/#dom-rtcsessiondescription-type)
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCSdpType {
    #[default]
    Unspecified = 0,

    #[serde(rename = "offer")]
    Offer,

    /// Provisional answer, may be followed by further pranswers or a final answer.
    #[serde(rename = "pranswer")]
    Pranswer,

    #[serde(rename = "answer")]
    Answer,

    /// Cancels the in-progress negotiation.
    #[serde(rename = "rollback")]
    Rollback,
}

const SDP_TYPE_OFFER_STR: &str = "offer";
const SDP_TYPE_PRANSWER_STR: &str = "pranswer";
const SDP_TYPE_ANSWER_STR: &str = "answer";
const SDP_TYPE_ROLLBACK_STR: &str = "rollback";

impl From<&str> for RTCSdpType {
    fn from(raw: &str) -> Self {
        match raw {
            SDP_TYPE_OFFER_STR => RTCSdpType::Offer,
            SDP_TYPE_PRANSWER_STR => RTCSdpType::Pranswer,
            SDP_TYPE_ANSWER_STR => RTCSdpType::Answer,
            SDP_TYPE_ROLLBACK_STR => RTCSdpType::Rollback,
            _ => RTCSdpType::Unspecified,
        }
    }
}

impl fmt::Display for RTCSdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCSdpType::Offer => SDP_TYPE_OFFER_STR,
            RTCSdpType::Pranswer => SDP_TYPE_PRANSWER_STR,
            RTCSdpType::Answer => SDP_TYPE_ANSWER_STR,
            RTCSdpType::Rollback => SDP_TYPE_ROLLBACK_STR,
            RTCSdpType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}
