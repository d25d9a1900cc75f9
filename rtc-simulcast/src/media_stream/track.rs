use crate::media_stream::track_settings::MediaTrackSettings;
use crate::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;

pub type MediaStreamTrackId = String;

/// Platform handle of a single audio or video source.
///
/// Two handles are the same track iff their ids match.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MediaStreamTrack {
    id: MediaStreamTrackId,
    kind: RtpCodecKind,
    label: String,
    settings: MediaTrackSettings,
}

impl MediaStreamTrack {
    pub fn new(id: MediaStreamTrackId, kind: RtpCodecKind, label: String) -> Self {
        Self {
            id,
            kind,
            label,
            settings: MediaTrackSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: MediaTrackSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn id(&self) -> &MediaStreamTrackId {
        &self.id
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.kind
    }

    pub fn label(&self) -> &String {
        &self.label
    }

    pub fn get_settings(&self) -> &MediaTrackSettings {
        &self.settings
    }
}
