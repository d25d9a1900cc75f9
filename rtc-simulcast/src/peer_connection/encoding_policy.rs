//! Decides which simulcast layers a local track sends and at what bitrate.

use log::debug;

use crate::constants::FIREFOX_DEFAULT_CAPTURE_HEIGHT;
use crate::media_stream::local_track::{LocalTrack, VideoType};
use crate::peer_connection::configuration::{BrowserCapabilities, SimulcastConfig};
use crate::rtp_transceiver::rtp_sender::rtp_encoding_parameters::RTCRtpEncodingParameters;
use crate::rtp_transceiver::rtp_sender::rtp_send_parameters::RTCRtpSendParameters;
use crate::rtp_transceiver::rtp_sender::simulcast_layers::{
    build_startup_encodings, HD_BITRATE, HD_SCALE_FACTOR, LD_SCALE_FACTOR,
};

/// Snapshot of everything the policy looks at for one track.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct EncodingPolicyInput {
    pub video_type: VideoType,
    /// Height the receivers asked for, 0 turns the track off.
    pub requested_height: u32,
    pub is_low_fps_screen_share: bool,
    pub is_presenter_overlay_active: bool,
    pub current_capture_height: Option<u32>,
}

/// Encoding policy of one peer connection.
///
/// The three simulcast layers are built once from the browser capabilities
/// and the configured bitrates; every decision is then made against them.
#[derive(Debug, Clone)]
pub struct EncodingPolicy {
    caps: BrowserCapabilities,
    config: SimulcastConfig,
    simulcast_encodings: [RTCRtpEncodingParameters; 3],
    low_fps_screen_share: bool,
}

impl EncodingPolicy {
    pub fn new(caps: BrowserCapabilities, config: SimulcastConfig) -> Self {
        let simulcast_encodings =
            build_startup_encodings(caps.is_firefox(), config.video_bitrates());
        Self {
            caps,
            config,
            simulcast_encodings,
            low_fps_screen_share: false,
        }
    }

    pub fn capabilities(&self) -> &BrowserCapabilities {
        &self.caps
    }

    pub fn config(&self) -> &SimulcastConfig {
        &self.config
    }

    /// The configured simulcast layers in rid order.
    pub fn simulcast_encodings(&self) -> &[RTCRtpEncodingParameters] {
        &self.simulcast_encodings
    }

    pub fn is_low_fps_screen_share(&self) -> bool {
        self.low_fps_screen_share
    }

    pub fn set_low_fps_screen_share(&mut self, low_fps_screen_share: bool) {
        self.low_fps_screen_share = low_fps_screen_share;
    }

    pub fn encoding_policy_input(
        &self,
        track: &LocalTrack,
        requested_height: u32,
    ) -> EncodingPolicyInput {
        EncodingPolicyInput {
            video_type: track.video_type(),
            requested_height,
            is_low_fps_screen_share: self.low_fps_screen_share,
            is_presenter_overlay_active: track.is_presenter_overlay_active(),
            current_capture_height: track.capture_height(),
        }
    }

    /// Encodings a new sender for `track` starts with.
    pub fn select_encodings(&self, track: &LocalTrack) -> Vec<RTCRtpEncodingParameters> {
        if !track.is_video_track() {
            return vec![RTCRtpEncodingParameters {
                active: true,
                ..Default::default()
            }];
        }

        if self.config.simulcast() {
            return self.simulcast_encodings.to_vec();
        }

        vec![RTCRtpEncodingParameters {
            active: true,
            max_bitrate: Some(self.config.video_bitrates().high),
            ..Default::default()
        }]
    }

    /// Active flag of every simulcast layer for a video track and the height
    /// its receivers requested.
    ///
    /// Returns None for audio tracks and for camera tracks whose capture
    /// height is unknown.
    pub fn compute_active_flags(
        &self,
        track: &LocalTrack,
        requested_height: u32,
    ) -> Option<Vec<bool>> {
        if !track.is_video_track() {
            return None;
        }
        self.active_flags(&self.encoding_policy_input(track, requested_height))
    }

    pub fn active_flags(&self, input: &EncodingPolicyInput) -> Option<Vec<bool>> {
        let mut flags = if input.video_type == VideoType::Camera {
            let Some(capture_height) = input.current_capture_height else {
                debug!("no capture height for camera track, leaving layers as they are");
                return None;
            };

            let requested = f64::from(input.requested_height);
            self.simulcast_encodings
                .iter()
                .map(|encoding| {
                    let scale = layer_scale(encoding);
                    f64::from(capture_height) / scale <= requested
                        || (scale == LD_SCALE_FACTOR && input.requested_height > 0)
                })
                .collect::<Vec<bool>>()
        } else {
            vec![true; self.simulcast_encodings.len()]
        };

        // Only the full resolution layer is kept for a low fps screenshare;
        // WebKit stops sending the desktop stream unless every layer stays enabled.
        if input.is_low_fps_screen_share
            && input.video_type == VideoType::Desktop
            && self.config.uses_unified_plan()
            && !self.caps.is_webkit_based()
        {
            for (flag, encoding) in flags.iter_mut().zip(&self.simulcast_encodings) {
                if layer_scale(encoding) != HD_SCALE_FACTOR {
                    *flag = false;
                }
            }
        }

        Some(flags)
    }

    /// Max bitrate of every simulcast layer for `track`.
    pub fn compute_bitrates(&self, track: &LocalTrack) -> Vec<Option<u32>> {
        self.bitrates(&self.encoding_policy_input(track, 0))
    }

    pub fn bitrates(&self, input: &EncodingPolicyInput) -> Vec<Option<u32>> {
        if input.is_low_fps_screen_share && !self.caps.is_webkit_based() {
            let flat_rate = if input.is_presenter_overlay_active {
                HD_BITRATE
            } else {
                self.config.desktop_bitrate()
            };
            return vec![Some(flat_rate); self.simulcast_encodings.len()];
        }

        // Chromium in plan-b refuses to send a desktop stream with capped layers.
        if input.video_type == VideoType::Desktop
            && self.caps.is_chromium_based()
            && !self.config.uses_unified_plan()
        {
            return vec![None; self.simulcast_encodings.len()];
        }

        self.simulcast_encodings
            .iter()
            .map(|encoding| encoding.max_bitrate)
            .collect()
    }

    /// WebKit resets every layer to the same scale factor after a track is
    /// replaced. When it did, put the configured factors back.
    pub fn update_encodings_resolution(&self, parameters: &mut RTCRtpSendParameters) {
        if !self.caps.is_webkit_based()
            || parameters.encodings.len() != self.simulcast_encodings.len()
        {
            return;
        }

        let first = parameters.encodings[0].scale_resolution_down_by;
        let all_equal = first.is_some()
            && parameters
                .encodings
                .iter()
                .all(|e| e.scale_resolution_down_by == first);
        if !all_equal {
            return;
        }

        debug!("restoring simulcast scale factors");
        for (encoding, configured) in parameters
            .encodings
            .iter_mut()
            .zip(&self.simulcast_encodings)
        {
            encoding.scale_resolution_down_by = configured.scale_resolution_down_by;
        }
    }

    /// Heights the local video tracks are captured at.
    ///
    /// Firefox reports no height for desktop tracks, so 720 is assumed first.
    pub fn local_stream_height_constraints(&self, tracks: &[LocalTrack]) -> Vec<u32> {
        let mut constraints = vec![];
        if self.caps.is_firefox() {
            constraints.push(FIREFOX_DEFAULT_CAPTURE_HEIGHT);
        }
        constraints.extend(
            tracks
                .iter()
                .filter(|t| t.is_video_track())
                .filter_map(|t| t.capture_height()),
        );
        constraints
    }
}

fn layer_scale(encoding: &RTCRtpEncodingParameters) -> f64 {
    encoding.scale_resolution_down_by.unwrap_or(HD_SCALE_FACTOR)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::media_stream::track::MediaStreamTrack;
    use crate::media_stream::track_settings::MediaTrackSettings;
    use crate::media_stream::MediaStream;
    use crate::peer_connection::configuration::{RTCSdpSemantics, SimulcastConfigBuilder};
    use crate::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;
    use crate::rtp_transceiver::rtp_sender::simulcast_layers::{
        DESKTOP_SHARE_RATE, LD_BITRATE, SD_BITRATE, SD_SCALE_FACTOR,
    };

    fn video(video_type: VideoType, height: Option<u32>) -> LocalTrack {
        let mut track =
            MediaStreamTrack::new("v0".to_owned(), RtpCodecKind::Video, "video".to_owned());
        if let Some(height) = height {
            let settings = MediaTrackSettings::with_resolution(height * 16 / 9, height);
            track = track.with_settings(settings);
        }
        LocalTrack::new(1, track).with_video_type(video_type)
    }

    fn audio() -> LocalTrack {
        LocalTrack::new(
            2,
            MediaStreamTrack::new("a0".to_owned(), RtpCodecKind::Audio, "mic".to_owned()),
        )
    }

    fn policy(caps: BrowserCapabilities) -> EncodingPolicy {
        EncodingPolicy::new(caps, SimulcastConfig::default())
    }

    #[test]
    fn test_select_encodings() {
        let simulcast = policy(BrowserCapabilities::chrome(110));
        let encodings = simulcast.select_encodings(&video(VideoType::Camera, Some(720)));
        assert_eq!(
            encodings.iter().map(|e| e.rid().as_str()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        assert_eq!(
            encodings
                .iter()
                .map(|e| e.scale_resolution_down_by)
                .collect::<Vec<_>>(),
            vec![Some(LD_SCALE_FACTOR), Some(SD_SCALE_FACTOR), Some(HD_SCALE_FACTOR)]
        );

        let audio_encodings = simulcast.select_encodings(&audio());
        assert_eq!(audio_encodings.len(), 1);
        assert!(audio_encodings[0].active);
        assert_eq!(audio_encodings[0].max_bitrate, None);

        let single = EncodingPolicy::new(
            BrowserCapabilities::chrome(110),
            SimulcastConfigBuilder::new().with_simulcast(false).build(),
        );
        let encodings = single.select_encodings(&video(VideoType::Camera, Some(720)));
        assert_eq!(encodings.len(), 1);
        assert!(encodings[0].active);
        assert_eq!(encodings[0].max_bitrate, Some(HD_BITRATE));
        assert!(encodings[0].rid().is_empty());
    }

    #[test]
    fn test_compute_active_flags_camera() {
        let policy = policy(BrowserCapabilities::chrome(110));
        let camera = video(VideoType::Camera, Some(720));

        let tests = vec![
            (0, vec![false, false, false]),
            (90, vec![true, false, false]),
            (180, vec![true, false, false]),
            (360, vec![true, true, false]),
            (720, vec![true, true, true]),
            (1080, vec![true, true, true]),
        ];

        for (requested_height, expected) in tests {
            assert_eq!(
                policy.compute_active_flags(&camera, requested_height),
                Some(expected),
                "requested {requested_height}"
            );
        }
    }

    #[test]
    fn test_compute_active_flags_follows_firefox_layer_order() {
        let policy = policy(BrowserCapabilities::firefox(115));
        let camera = video(VideoType::Camera, Some(720));

        assert_eq!(
            policy.compute_active_flags(&camera, 180),
            Some(vec![false, false, true])
        );
    }

    #[test]
    fn test_compute_active_flags_degenerate_input() {
        let policy = policy(BrowserCapabilities::chrome(110));

        assert_eq!(
            policy.compute_active_flags(&video(VideoType::Camera, None), 720),
            None
        );
        assert_eq!(policy.compute_active_flags(&audio(), 720), None);
        assert_eq!(
            policy.compute_active_flags(&video(VideoType::Desktop, None), 0),
            Some(vec![true, true, true])
        );
    }

    #[test]
    fn test_compute_active_flags_low_fps_screen_share() {
        let tests = vec![
            (
                BrowserCapabilities::chrome(110),
                RTCSdpSemantics::UnifiedPlan,
                vec![false, false, true],
            ),
            (
                BrowserCapabilities::firefox(115),
                RTCSdpSemantics::UnifiedPlan,
                vec![true, false, false],
            ),
            (
                BrowserCapabilities::safari(16),
                RTCSdpSemantics::UnifiedPlan,
                vec![true, true, true],
            ),
            (
                BrowserCapabilities::chrome(110),
                RTCSdpSemantics::PlanB,
                vec![true, true, true],
            ),
        ];

        for (caps, sdp_semantics, expected) in tests {
            let mut policy = EncodingPolicy::new(
                caps,
                SimulcastConfigBuilder::new()
                    .with_sdp_semantics(sdp_semantics)
                    .build(),
            );
            policy.set_low_fps_screen_share(true);

            assert_eq!(
                policy.compute_active_flags(&video(VideoType::Desktop, Some(1080)), 1080),
                Some(expected),
                "{caps:?} {sdp_semantics}"
            );
        }
    }

    #[test]
    fn test_compute_bitrates() {
        let desktop = video(VideoType::Desktop, Some(1080));
        let stream = MediaStream::new("original".to_owned(), vec![desktop.track().clone()]);
        let presenter = desktop
            .clone()
            .with_stream_id("composited".to_owned())
            .with_original_stream(stream);

        let mut low_fps = policy(BrowserCapabilities::chrome(110));
        low_fps.set_low_fps_screen_share(true);
        assert_eq!(low_fps.compute_bitrates(&presenter), vec![Some(HD_BITRATE); 3]);
        assert_eq!(
            low_fps.compute_bitrates(&desktop),
            vec![Some(DESKTOP_SHARE_RATE); 3]
        );

        let mut custom_rate = EncodingPolicy::new(
            BrowserCapabilities::chrome(110),
            SimulcastConfigBuilder::new()
                .with_desktop_bitrate(800_000)
                .build(),
        );
        custom_rate.set_low_fps_screen_share(true);
        assert_eq!(custom_rate.compute_bitrates(&desktop), vec![Some(800_000); 3]);

        let mut webkit = policy(BrowserCapabilities::safari(16));
        webkit.set_low_fps_screen_share(true);
        assert_eq!(
            webkit.compute_bitrates(&desktop),
            vec![Some(LD_BITRATE), Some(SD_BITRATE), Some(HD_BITRATE)]
        );

        let plan_b = EncodingPolicy::new(
            BrowserCapabilities::chrome(110),
            SimulcastConfigBuilder::new()
                .with_sdp_semantics(RTCSdpSemantics::PlanB)
                .build(),
        );
        assert_eq!(plan_b.compute_bitrates(&desktop), vec![None; 3]);
        assert_eq!(
            plan_b.compute_bitrates(&video(VideoType::Camera, Some(720))),
            vec![Some(LD_BITRATE), Some(SD_BITRATE), Some(HD_BITRATE)]
        );
    }

    #[test]
    fn test_update_encodings_resolution() {
        let equal_scales = |scale: Option<f64>| RTCRtpSendParameters {
            encodings: (0..3)
                .map(|_| RTCRtpEncodingParameters {
                    active: true,
                    scale_resolution_down_by: scale,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        let tests = vec![
            (
                BrowserCapabilities::safari(16),
                equal_scales(Some(1.0)),
                vec![Some(LD_SCALE_FACTOR), Some(SD_SCALE_FACTOR), Some(HD_SCALE_FACTOR)],
            ),
            (
                BrowserCapabilities::safari(16),
                equal_scales(None),
                vec![None, None, None],
            ),
            (
                BrowserCapabilities::chrome(110),
                equal_scales(Some(1.0)),
                vec![Some(1.0), Some(1.0), Some(1.0)],
            ),
        ];

        for (caps, mut parameters, expected) in tests {
            policy(caps).update_encodings_resolution(&mut parameters);
            assert_eq!(
                parameters
                    .encodings
                    .iter()
                    .map(|e| e.scale_resolution_down_by)
                    .collect::<Vec<_>>(),
                expected,
                "{caps:?}"
            );
        }

        let safari = policy(BrowserCapabilities::safari(16));
        let mut mixed = safari.select_encodings(&video(VideoType::Camera, Some(720)));
        mixed[0].scale_resolution_down_by = Some(3.0);
        let mut parameters = RTCRtpSendParameters {
            encodings: mixed.clone(),
            ..Default::default()
        };
        safari.update_encodings_resolution(&mut parameters);
        assert_eq!(parameters.encodings, mixed);
    }

    #[test]
    fn test_local_stream_height_constraints() {
        let tracks = vec![
            video(VideoType::Camera, Some(360)),
            audio(),
            video(VideoType::Desktop, None),
            video(VideoType::Desktop, Some(1080)),
        ];

        assert_eq!(
            policy(BrowserCapabilities::firefox(115)).local_stream_height_constraints(&tracks),
            vec![720, 360, 1080]
        );
        assert_eq!(
            policy(BrowserCapabilities::chrome(110)).local_stream_height_constraints(&tracks),
            vec![360, 1080]
        );
    }

    #[test]
    fn test_encoding_policy_input() {
        let mut policy = policy(BrowserCapabilities::chrome(110));
        policy.set_low_fps_screen_share(true);

        let input = policy.encoding_policy_input(&video(VideoType::Desktop, Some(1080)), 540);
        assert_eq!(
            input,
            EncodingPolicyInput {
                video_type: VideoType::Desktop,
                requested_height: 540,
                is_low_fps_screen_share: true,
                is_presenter_overlay_active: false,
                current_capture_height: Some(1080),
            }
        );
    }
}
