pub mod rtp_codec;
pub mod rtp_coding_parameters;
pub mod rtp_encoding_parameters;
pub mod rtp_send_parameters;
pub mod simulcast_layers;

use crate::constants::TRANSACTION_ID_LEN;
use crate::media_stream::track::MediaStreamTrack;
use crate::media_stream::MediaStreamId;
use crate::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;
use crate::rtp_transceiver::rtp_sender::rtp_encoding_parameters::RTCRtpEncodingParameters;
use crate::rtp_transceiver::rtp_sender::rtp_send_parameters::RTCRtpSendParameters;
use log::trace;
use shared::error::{Error, Result};
use shared::util::math_rand_alpha_number;

/// RTPSender allows an application to control how a given Track is encoded and transmitted to a remote peer
///
/// ## Specifications
///
/// * [MDN]
/// * [W3C]
///
/// [MDN]: https://developer.mozilla.org/en-US/docs/Web/API/RTCRtpSender
/// [W3C]: https://w3c.github.io/webrtc-pc/#rtcrtpsender-interface
#[derive(Default, Debug, Clone)]
pub struct RTCRtpSender {
    kind: RtpCodecKind,
    track: Option<MediaStreamTrack>,

    /// AssociatedMediaStreamIds from the WebRTC specifications
    associated_media_stream_ids: Vec<MediaStreamId>,

    parameters: RTCRtpSendParameters,
    /// Transaction id handed out by the latest get_parameters, consumed by set_parameters.
    pending_transaction_id: Option<String>,
}

impl RTCRtpSender {
    pub fn new(
        kind: RtpCodecKind,
        track: Option<MediaStreamTrack>,
        associated_media_stream_ids: Vec<MediaStreamId>,
        send_encodings: Vec<RTCRtpEncodingParameters>,
    ) -> Self {
        Self {
            kind,
            track,
            associated_media_stream_ids,
            parameters: RTCRtpSendParameters {
                encodings: send_encodings,
                ..Default::default()
            },
            pending_transaction_id: None,
        }
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.kind
    }

    /// track returns the RTCRtpSender track, or None
    pub fn track(&self) -> Option<&MediaStreamTrack> {
        self.track.as_ref()
    }

    pub fn associated_media_stream_ids(&self) -> &[MediaStreamId] {
        &self.associated_media_stream_ids
    }

    pub fn add_associated_media_stream_id(&mut self, stream_id: MediaStreamId) {
        if !self.associated_media_stream_ids.contains(&stream_id) {
            self.associated_media_stream_ids.push(stream_id);
        }
    }

    /// Currently committed encodings.
    pub fn encodings(&self) -> &[RTCRtpEncodingParameters] {
        &self.parameters.encodings
    }

    /// get_parameters describes the current configuration for the encoding and
    /// transmission of media on the sender's track.
    ///
    /// The returned copy carries a fresh transaction id; only the copy from the
    /// latest call can be committed with [`set_parameters`](Self::set_parameters).
    pub fn get_parameters(&mut self) -> RTCRtpSendParameters {
        let transaction_id = math_rand_alpha_number(TRANSACTION_ID_LEN);
        self.pending_transaction_id = Some(transaction_id.clone());

        RTCRtpSendParameters {
            transaction_id,
            ..self.parameters.clone()
        }
    }

    /// set_parameters commits parameters previously read with get_parameters.
    ///
    /// The number of encodings cannot change and every scale factor must be at least 1.0.
    pub fn set_parameters(&mut self, parameters: RTCRtpSendParameters) -> Result<()> {
        if self.pending_transaction_id.as_deref() != Some(parameters.transaction_id.as_str()) {
            return Err(Error::ErrRTPSenderStaleParameters(
                parameters.transaction_id,
            ));
        }

        if parameters.encodings.len() != self.parameters.encodings.len() {
            return Err(Error::ErrRTPSenderEncodingCountMismatch {
                expected: self.parameters.encodings.len(),
                actual: parameters.encodings.len(),
            });
        }

        if let Some(scale) = parameters
            .encodings
            .iter()
            .filter_map(|e| e.scale_resolution_down_by)
            .find(|scale| *scale < 1.0)
        {
            return Err(Error::ErrRTPSenderInvalidScaleResolutionDownBy(scale));
        }

        self.pending_transaction_id = None;
        trace!(
            "committing {} encodings for {} sender",
            parameters.encodings.len(),
            self.kind
        );
        self.parameters = RTCRtpSendParameters {
            transaction_id: String::new(),
            ..parameters
        };

        Ok(())
    }

    /// replace_track replaces the track currently being used as the sender's source with a new track.
    /// The new track must be of the same media kind (audio, video, etc) and switching the track should not
    /// require negotiation. Passing None detaches the source but keeps the sender.
    pub fn replace_track(&mut self, track: Option<MediaStreamTrack>) -> Result<()> {
        if let Some(t) = &track {
            if self.kind != t.kind() {
                return Err(Error::ErrRTPSenderNewTrackHasIncorrectKind);
            }
        }

        trace!(
            "replacing {} sender track {:?} with {:?}",
            self.kind,
            self.track.as_ref().map(|t| t.id()),
            track.as_ref().map(|t| t.id())
        );
        self.track = track;

        Ok(())
    }
}
