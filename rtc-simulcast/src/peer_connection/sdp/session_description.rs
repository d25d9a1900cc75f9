use std::io::Cursor;

use sdp::description::session::SessionDescription;
use serde::{Deserialize, Serialize};
use shared::error::{Error, Result};

use super::sdp_type::RTCSdpType;

/// A session description as exchanged over the signaling channel.
///
/// Serializes to `{"type":"offer","sdp":"..."}`. The parsed view is kept
/// alongside the text when the description was built by one of the
/// validating constructors, and is never serialized.
///
/// ```
/// use rtc_simulcast::peer_connection::sdp::{RTCSdpType, RTCSessionDescription};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let offer = RTCSessionDescription::offer(
///     "v=0\r\no=- 123 456 IN IP4 0.0.0.0\r\ns=-\r\nt=0 0\r\n".to_owned(),
/// )?;
/// assert_eq!(offer.sdp_type, RTCSdpType::Offer);
/// assert!(offer.parsed().is_some());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct RTCSessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: RTCSdpType,

    pub sdp: String,

    #[serde(skip)]
    pub(crate) parsed: Option<SessionDescription>,
}

/// Comparing the wire form is enough, the parsed view is derived from it.
impl PartialEq for RTCSessionDescription {
    fn eq(&self, other: &Self) -> bool {
        self.sdp_type == other.sdp_type && self.sdp == other.sdp
    }
}

impl RTCSessionDescription {
    fn validated(sdp_type: RTCSdpType, sdp: String) -> Result<Self> {
        let mut desc = RTCSessionDescription {
            sdp_type,
            sdp,
            parsed: None,
        };

        let parsed = desc.unmarshal()?;
        desc.parsed = Some(parsed);

        Ok(desc)
    }

    /// Builds an offer, failing if the text does not parse.
    pub fn offer(sdp: String) -> Result<Self> {
        Self::validated(RTCSdpType::Offer, sdp)
    }

    /// Builds an answer, failing if the text does not parse.
    pub fn answer(sdp: String) -> Result<Self> {
        Self::validated(RTCSdpType::Answer, sdp)
    }

    /// Builds a provisional answer, failing if the text does not parse.
    pub fn pranswer(sdp: String) -> Result<Self> {
        Self::validated(RTCSdpType::Pranswer, sdp)
    }

    /// Serializes a structural view back into a description of `sdp_type`.
    pub fn from_parsed(sdp_type: RTCSdpType, parsed: &SessionDescription) -> Self {
        RTCSessionDescription {
            sdp_type,
            sdp: parsed.marshal(),
            parsed: Some(parsed.clone()),
        }
    }

    /// Parsed view cached by the validating constructors.
    pub fn parsed(&self) -> Option<&SessionDescription> {
        self.parsed.as_ref()
    }

    /// Parses the SDP text. A description received over signaling carries no
    /// cached view, so this always goes back to the text.
    pub fn unmarshal(&self) -> Result<SessionDescription> {
        let mut reader = Cursor::new(self.sdp.as_bytes());
        SessionDescription::unmarshal(&mut reader)
            .map_err(|e| Error::SdpInvalidSyntax(e.to_string()))
    }
}
