use std::fmt;

use crate::constants::UNSPECIFIED_STR;
use crate::media_stream::track::{MediaStreamTrack, MediaStreamTrackId};
use crate::media_stream::{MediaStream, MediaStreamId};
use crate::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;

/// Identifier the session manager assigns to each local track.
pub type LocalTrackId = usize;

/// Source a video track is captured from.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum VideoType {
    #[default]
    Unspecified,

    /// Camera capture.
    Camera,

    /// Screen, window or tab capture.
    Desktop,
}

const VIDEO_TYPE_CAMERA_STR: &str = "camera";
const VIDEO_TYPE_DESKTOP_STR: &str = "desktop";

impl From<&str> for VideoType {
    fn from(raw: &str) -> Self {
        match raw {
            VIDEO_TYPE_CAMERA_STR => VideoType::Camera,
            VIDEO_TYPE_DESKTOP_STR => VideoType::Desktop,
            _ => VideoType::Unspecified,
        }
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            VideoType::Camera => VIDEO_TYPE_CAMERA_STR,
            VideoType::Desktop => VIDEO_TYPE_DESKTOP_STR,
            VideoType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// A local audio or video source as seen by the peer connection.
///
/// The session manager owns the source and hands a snapshot of it to every
/// transceiver operation.
#[derive(Debug, Clone)]
pub struct LocalTrack {
    rtc_id: LocalTrackId,
    track: MediaStreamTrack,
    muted: bool,
    video_type: VideoType,
    original_stream: Option<MediaStream>,
    stream_id: Option<MediaStreamId>,
    source_name: Option<String>,
}

impl LocalTrack {
    pub fn new(rtc_id: LocalTrackId, track: MediaStreamTrack) -> Self {
        Self {
            rtc_id,
            track,
            muted: false,
            video_type: VideoType::Unspecified,
            original_stream: None,
            stream_id: None,
            source_name: None,
        }
    }

    pub fn with_video_type(mut self, video_type: VideoType) -> Self {
        self.video_type = video_type;
        self
    }

    /// Sets the stream the track was captured into. The sending stream id
    /// defaults to the same stream.
    pub fn with_original_stream(mut self, stream: MediaStream) -> Self {
        if self.stream_id.is_none() {
            self.stream_id = Some(stream.stream_id().clone());
        }
        self.original_stream = Some(stream);
        self
    }

    /// Sets the id of the stream actually being sent, which differs from the
    /// original stream when an effect composites a second source on top.
    pub fn with_stream_id(mut self, stream_id: MediaStreamId) -> Self {
        self.stream_id = Some(stream_id);
        self
    }

    pub fn with_source_name(mut self, source_name: String) -> Self {
        self.source_name = Some(source_name);
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn rtc_id(&self) -> LocalTrackId {
        self.rtc_id
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.track.kind()
    }

    pub fn is_video_track(&self) -> bool {
        self.kind() == RtpCodecKind::Video
    }

    pub fn is_audio_track(&self) -> bool {
        self.kind() == RtpCodecKind::Audio
    }

    pub fn track(&self) -> &MediaStreamTrack {
        &self.track
    }

    pub fn track_id(&self) -> &MediaStreamTrackId {
        self.track.id()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn video_type(&self) -> VideoType {
        self.video_type
    }

    pub fn original_stream(&self) -> Option<&MediaStream> {
        self.original_stream.as_ref()
    }

    pub fn stream_id(&self) -> Option<&MediaStreamId> {
        self.stream_id.as_ref()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Height the source is currently captured at, if the platform reports it.
    pub fn capture_height(&self) -> Option<u32> {
        self.track.get_settings().height()
    }

    /// A presenter overlay is active when the stream being sent is not the
    /// stream the track was originally captured into.
    pub fn is_presenter_overlay_active(&self) -> bool {
        match &self.original_stream {
            Some(original) => self.stream_id.as_ref() != Some(original.stream_id()),
            None => false,
        }
    }

    /// Index encoded in the source name, see [`parse_source_index`].
    pub fn source_index(&self) -> Option<usize> {
        self.source_name.as_deref().and_then(parse_source_index)
    }
}

impl fmt::Display for LocalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LocalTrack[{},{},{}]",
            self.rtc_id,
            self.kind(),
            self.source_name.as_deref().unwrap_or("-")
        )
    }
}

/// Parses the source index out of a source name of the form
/// `<endpoint>-<a|v><index>`, e.g. `"3c1ab5f0-v1"` yields `Some(1)`.
///
/// The endpoint may itself contain hyphens, the index is always taken from
/// the last segment. Anything else, including a trailing segment after the
/// index (`"3c1ab5f0-v2-extra"`), yields `None`.
pub fn parse_source_index(source_name: &str) -> Option<usize> {
    let (_, segment) = source_name.rsplit_once('-')?;
    let digits = segment
        .strip_prefix('v')
        .or_else(|| segment.strip_prefix('a'))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
