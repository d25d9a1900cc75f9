pub mod local_track;
pub mod track;
pub mod track_settings;

use crate::media_stream::track::{MediaStreamTrack, MediaStreamTrackId};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// <https://www.w3.org/TR/mediacapture-streams/#stream-api>
////////////////////////////////////////////////////////////////////////////////////////////////////
pub type MediaStreamId = String;
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MediaStream {
    stream_id: MediaStreamId,
    tracks: Vec<MediaStreamTrack>,
}

impl MediaStream {
    pub fn new(stream_id: MediaStreamId, tracks: Vec<MediaStreamTrack>) -> Self {
        Self { stream_id, tracks }
    }

    pub fn stream_id(&self) -> &MediaStreamId {
        &self.stream_id
    }

    pub fn get_tracks(&self) -> impl Iterator<Item = &MediaStreamTrack> {
        self.tracks.iter()
    }

    pub fn get_track_by_id(&self, track_id: &MediaStreamTrackId) -> Option<&MediaStreamTrack> {
        self.tracks.iter().find(|track| track.id() == track_id)
    }

    pub fn add_track(&mut self, track: MediaStreamTrack) {
        if self.get_track_by_id(track.id()).is_none() {
            self.tracks.push(track);
        }
    }
}
