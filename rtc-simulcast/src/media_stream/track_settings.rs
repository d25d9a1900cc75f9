//! MediaStreamTrack Settings
//!
//! Settings represent the current configuration values of a track, which may
//! differ from requested constraints based on hardware limitations and system
//! conditions. Restricted platforms may not report some of them at all, hence
//! every value is optional.
//!
//! # Specification
//!
//! See [MediaStreamTrack.getSettings()](https://www.w3.org/TR/mediacapture-streams/#dom-mediastreamtrack-getsettings).

/// Represents the actual settings of a media track.
///
/// # Specification
///
/// See [MediaTrackSettings](https://www.w3.org/TR/mediacapture-streams/#dom-mediatracksettings)
/// in the W3C Media Capture and Streams specification.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MediaTrackSettings {
    /// Actual video width in pixels.
    pub width: Option<u32>,

    /// Actual video height in pixels.
    pub height: Option<u32>,
}

impl MediaTrackSettings {
    /// Settings of a video source capturing at `width`x`height`.
    pub fn with_resolution(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }
}
