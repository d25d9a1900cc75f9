#![allow(dead_code)]

use rtc_simulcast::media_stream::local_track::{LocalTrack, LocalTrackId, VideoType};
use rtc_simulcast::media_stream::track::MediaStreamTrack;
use rtc_simulcast::media_stream::track_settings::MediaTrackSettings;
use rtc_simulcast::media_stream::MediaStream;
use rtc_simulcast::peer_connection::RtpTransport;
use rtc_simulcast::rtp_transceiver::direction::RTCRtpTransceiverDirection;
use rtc_simulcast::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;
use rtc_simulcast::rtp_transceiver::rtp_sender::rtp_coding_parameters::RTCRtpCodingParameters;
use rtc_simulcast::rtp_transceiver::rtp_sender::rtp_encoding_parameters::RTCRtpEncodingParameters;
use rtc_simulcast::rtp_transceiver::rtp_sender::simulcast_layers::SIM_LAYER_RIDS;
use rtc_simulcast::rtp_transceiver::{RTCRtpTransceiver, RTCRtpTransceiverId, RTCRtpTransceiverInit};
use rtc_simulcast::shared::error::Result;
use rtc_simulcast::shared::util::math_rand_alpha;

pub fn init_log() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init()
        .ok();
}

/// In-memory transport attaching tracks the way browsers do.
#[derive(Default, Debug)]
pub struct MockTransport {
    transceivers: Vec<RTCRtpTransceiver>,
    pub added_streams: Vec<String>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport after applying a remote offer with one recvonly media
    /// section per entry. Video sections advertise three receive rids.
    pub fn with_remote_offer(kinds: &[RtpCodecKind]) -> Self {
        let mut transport = Self::new();
        for kind in kinds {
            transport.push_remote_section(*kind, RTCRtpTransceiverDirection::Recvonly);
        }
        transport
    }

    pub fn push_remote_section(
        &mut self,
        kind: RtpCodecKind,
        current_direction: RTCRtpTransceiverDirection,
    ) -> RTCRtpTransceiverId {
        let send_encodings = match kind {
            RtpCodecKind::Video => SIM_LAYER_RIDS
                .iter()
                .map(|rid| RTCRtpEncodingParameters {
                    rtp_coding_parameters: RTCRtpCodingParameters {
                        rid: (*rid).to_owned(),
                        ..Default::default()
                    },
                    active: true,
                    ..Default::default()
                })
                .collect(),
            _ => vec![RTCRtpEncodingParameters {
                active: true,
                ..Default::default()
            }],
        };

        let id = self.transceivers.len();
        let mut transceiver = RTCRtpTransceiver::new(
            id,
            kind,
            None,
            RTCRtpTransceiverInit {
                direction: RTCRtpTransceiverDirection::Recvonly,
                streams: vec![],
                send_encodings,
            },
        )
        .expect("recvonly transceiver needs no track");
        transceiver.set_mid(id.to_string());
        transceiver.set_current_direction(current_direction);
        self.transceivers.push(transceiver);
        id
    }

    pub fn transceiver(&self, id: RTCRtpTransceiverId) -> &RTCRtpTransceiver {
        &self.transceivers[id]
    }

    pub fn directions(&self) -> Vec<RTCRtpTransceiverDirection> {
        self.transceivers.iter().map(|t| t.direction()).collect()
    }

    pub fn sent_track_ids(&self) -> Vec<Option<String>> {
        self.transceivers
            .iter()
            .map(|t| t.sender().track().map(|track| track.id().clone()))
            .collect()
    }
}

impl RtpTransport for MockTransport {
    fn transceivers(&self) -> &[RTCRtpTransceiver] {
        &self.transceivers
    }

    fn transceivers_mut(&mut self) -> &mut [RTCRtpTransceiver] {
        &mut self.transceivers
    }

    fn add_transceiver(
        &mut self,
        track: MediaStreamTrack,
        init: RTCRtpTransceiverInit,
    ) -> Result<RTCRtpTransceiverId> {
        let id = self.transceivers.len();
        let kind = track.kind();
        self.transceivers
            .push(RTCRtpTransceiver::new(id, kind, Some(track), init)?);
        Ok(id)
    }

    fn add_track(&mut self, track: MediaStreamTrack) -> Result<RTCRtpTransceiverId> {
        let kind = track.kind();
        let unused = self
            .transceivers
            .iter_mut()
            .find(|t| t.receives(kind) && !t.stopped() && t.sender().track().is_none());

        if let Some(transceiver) = unused {
            transceiver.sender_mut().replace_track(Some(track))?;
            let direction = match transceiver.direction() {
                RTCRtpTransceiverDirection::Recvonly => RTCRtpTransceiverDirection::Sendrecv,
                RTCRtpTransceiverDirection::Inactive => RTCRtpTransceiverDirection::Sendonly,
                direction => direction,
            };
            transceiver.set_direction(direction)?;
            return Ok(transceiver.id());
        }

        self.add_transceiver(
            track,
            RTCRtpTransceiverInit {
                direction: RTCRtpTransceiverDirection::Sendrecv,
                streams: vec![math_rand_alpha(8)],
                send_encodings: vec![],
            },
        )
    }

    fn add_stream(&mut self, stream: &MediaStream) -> Result<()> {
        self.added_streams.push(stream.stream_id().clone());
        for track in stream.get_tracks() {
            let id = self.add_track(track.clone())?;
            self.transceivers[id]
                .sender_mut()
                .add_associated_media_stream_id(stream.stream_id().clone());
        }
        Ok(())
    }
}

pub fn camera(rtc_id: LocalTrackId, height: u32) -> LocalTrack {
    local_video(rtc_id, VideoType::Camera, height)
}

pub fn desktop(rtc_id: LocalTrackId, height: u32) -> LocalTrack {
    local_video(rtc_id, VideoType::Desktop, height)
}

fn local_video(rtc_id: LocalTrackId, video_type: VideoType, height: u32) -> LocalTrack {
    let track = MediaStreamTrack::new(
        format!("{video_type}-{rtc_id}"),
        RtpCodecKind::Video,
        video_type.to_string(),
    )
    .with_settings(MediaTrackSettings::with_resolution(height * 16 / 9, height));
    let stream = MediaStream::new(format!("stream-{rtc_id}"), vec![track.clone()]);

    LocalTrack::new(rtc_id, track)
        .with_video_type(video_type)
        .with_original_stream(stream)
}

pub fn microphone(rtc_id: LocalTrackId) -> LocalTrack {
    let track = MediaStreamTrack::new(
        format!("audio-{rtc_id}"),
        RtpCodecKind::Audio,
        "microphone".to_owned(),
    );
    let stream = MediaStream::new(format!("stream-{rtc_id}"), vec![track.clone()]);

    LocalTrack::new(rtc_id, track).with_original_stream(stream)
}
