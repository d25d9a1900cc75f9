use crate::media_stream::track::MediaStreamTrack;
use crate::media_stream::MediaStreamId;
use crate::rtp_transceiver::direction::RTCRtpTransceiverDirection;
use crate::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;
use crate::rtp_transceiver::rtp_sender::rtp_encoding_parameters::RTCRtpEncodingParameters;
use crate::rtp_transceiver::rtp_sender::RTCRtpSender;
use log::trace;
use shared::error::{Error, Result};
use shared::util::math_rand_alpha;
use std::fmt;

pub mod direction;
pub mod rtp_sender;

/// SSRC represents a synchronization source
/// A synchronization source is a randomly chosen
/// value meant to be globally unique within a particular
/// RTP session. Used to identify a single stream of media.
/// <https://tools.ietf.org/html/rfc3550#section-3>
#[allow(clippy::upper_case_acronyms)]
pub type SSRC = u32;

/// RtpStreamId identifies one encoding of a simulcast sender, the `rid` of RFC 8851.
pub type RtpStreamId = String;

/// Position of a transceiver in the transport's transceiver list.
pub type RTCRtpTransceiverId = usize;

/// RTPTransceiverInit dictionary is used when calling the WebRTC function addTransceiver() to provide configuration options for the new transceiver.
#[derive(Default, Debug, Clone)]
pub struct RTCRtpTransceiverInit {
    pub direction: RTCRtpTransceiverDirection,
    pub streams: Vec<MediaStreamId>,
    pub send_encodings: Vec<RTCRtpEncodingParameters>,
}

/// RTPReceiver exposes the remote track a transceiver receives into.
#[derive(Default, Debug, Clone)]
pub struct RTCRtpReceiver {
    track: MediaStreamTrack,
}

impl RTCRtpReceiver {
    pub fn new(track: MediaStreamTrack) -> Self {
        Self { track }
    }

    pub fn track(&self) -> &MediaStreamTrack {
        &self.track
    }
}

/// RTPTransceiver represents a combination of an RTPSender and an RTPReceiver that share a common mid.
///
/// Transceivers are owned by the transport; everything in this crate only
/// borrows them to change the direction or the sender.
#[derive(Default, Clone)]
pub struct RTCRtpTransceiver {
    id: RTCRtpTransceiverId,
    mid: Option<String>,
    kind: RtpCodecKind,
    sender: RTCRtpSender,
    receiver: RTCRtpReceiver,
    direction: RTCRtpTransceiverDirection,
    current_direction: RTCRtpTransceiverDirection,
}

impl fmt::Debug for RTCRtpTransceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RTCRtpTransceiver")
            .field("id", &self.id)
            .field("mid", &self.mid)
            .field("kind", &self.kind)
            .field("sender", &self.sender)
            .field("direction", &self.direction)
            .field("current_direction", &self.current_direction)
            .finish()
    }
}

impl RTCRtpTransceiver {
    pub fn new(
        id: RTCRtpTransceiverId,
        kind: RtpCodecKind,
        track: Option<MediaStreamTrack>,
        init: RTCRtpTransceiverInit,
    ) -> Result<Self> {
        if init.direction.has_send() && track.is_none() {
            return Err(Error::ErrTrackNotExisted);
        }

        Ok(Self {
            id,
            mid: None,
            kind,
            sender: RTCRtpSender::new(kind, track, init.streams, init.send_encodings),
            receiver: RTCRtpReceiver::new(MediaStreamTrack::new(
                math_rand_alpha(16),
                kind,
                format!("remote {kind}"),
            )),
            direction: init.direction,
            current_direction: RTCRtpTransceiverDirection::Unspecified,
        })
    }

    pub fn id(&self) -> RTCRtpTransceiverId {
        self.id
    }

    /// mid gets the Transceiver's mid value, assigned once the transceiver is negotiated.
    pub fn mid(&self) -> Option<&str> {
        self.mid.as_deref()
    }

    /// set_mid sets the mid of a freshly negotiated transceiver.
    pub fn set_mid(&mut self, mid: String) {
        self.mid = Some(mid);
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.kind
    }

    pub fn sender(&self) -> &RTCRtpSender {
        &self.sender
    }

    pub fn sender_mut(&mut self) -> &mut RTCRtpSender {
        &mut self.sender
    }

    pub fn receiver(&self) -> &RTCRtpReceiver {
        &self.receiver
    }

    /// direction returns the RTPTransceiver's desired direction.
    pub fn direction(&self) -> RTCRtpTransceiverDirection {
        self.direction
    }

    /// Set the direction of this transceiver. This might trigger a renegotiation.
    pub fn set_direction(&mut self, direction: RTCRtpTransceiverDirection) -> Result<()> {
        if self.stopped() {
            return Err(Error::ErrRTPTransceiverStopped);
        }

        let previous_direction = self.direction;
        self.direction = direction;

        if direction != previous_direction {
            trace!(
                "Changing direction of transceiver {} from {previous_direction} to {direction}",
                self.id
            );
        }

        Ok(())
    }

    /// current_direction returns the RTPTransceiver's current direction as negotiated.
    ///
    /// If this transceiver has never been negotiated this returns [`RTCRtpTransceiverDirection::Unspecified`].
    pub fn current_direction(&self) -> RTCRtpTransceiverDirection {
        self.current_direction
    }

    pub fn set_current_direction(&mut self, d: RTCRtpTransceiverDirection) {
        let previous = self.current_direction;
        self.current_direction = d;

        if d != previous {
            trace!(
                "Changing current direction of transceiver {} from {previous} to {d}",
                self.id
            );
        }
    }

    /// stop irreversibly stops the RTPTransceiver
    pub fn stop(&mut self) {
        self.direction = RTCRtpTransceiverDirection::Stopped;
        self.current_direction = RTCRtpTransceiverDirection::Stopped;
    }

    pub fn stopped(&self) -> bool {
        self.direction == RTCRtpTransceiverDirection::Stopped
    }

    /// The receiving side matches `kind`.
    pub fn receives(&self, kind: RtpCodecKind) -> bool {
        self.receiver.track().kind() == kind
    }

    /// The sender currently carries a track of `kind`.
    pub fn sends(&self, kind: RtpCodecKind) -> bool {
        self.sender.track().is_some_and(|t| t.kind() == kind)
    }

    /// The sender currently carries exactly `track_id`.
    pub fn sends_track(&self, track_id: &str) -> bool {
        self.sender.track().is_some_and(|t| t.id() == track_id)
    }
}
