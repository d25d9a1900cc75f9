use shared::error::Result;

use crate::media_stream::track::MediaStreamTrack;
use crate::media_stream::MediaStream;
use crate::rtp_transceiver::{RTCRtpTransceiver, RTCRtpTransceiverId, RTCRtpTransceiverInit};

/// The peer connection that owns the transceivers.
///
/// Transceivers are listed in creation order, which is also the order of
/// their media sections.
pub trait RtpTransport {
    fn transceivers(&self) -> &[RTCRtpTransceiver];

    fn transceivers_mut(&mut self) -> &mut [RTCRtpTransceiver];

    /// Creates a transceiver for `track` and returns its id.
    fn add_transceiver(
        &mut self,
        track: MediaStreamTrack,
        init: RTCRtpTransceiverInit,
    ) -> Result<RTCRtpTransceiverId>;

    /// Attaches `track` to an unused transceiver of its kind, creating one if
    /// there is none, and returns the id of the transceiver it landed on.
    fn add_track(&mut self, track: MediaStreamTrack) -> Result<RTCRtpTransceiverId>;

    /// Attaches every track of `stream` the legacy way.
    fn add_stream(&mut self, stream: &MediaStream) -> Result<()>;

    fn transceiver_mut(&mut self, id: RTCRtpTransceiverId) -> Option<&mut RTCRtpTransceiver> {
        self.transceivers_mut().iter_mut().find(|t| t.id() == id)
    }
}
