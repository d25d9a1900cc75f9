pub mod browser_capabilities;
pub mod sdp_semantics;

use serde::Deserialize;

use crate::rtp_transceiver::rtp_sender::simulcast_layers::{VideoBitrates, DESKTOP_SHARE_RATE};
pub use browser_capabilities::{BrowserCapabilities, BrowserFamily};
pub use sdp_semantics::RTCSdpSemantics;

/// A SimulcastConfig defines how local tracks are encoded and bound to
/// transceivers for the lifetime of one peer connection.
/// Configurations may be set up once and reused across multiple connections.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulcastConfig {
    /// simulcast enables three spatial layers for video tracks.
    pub(crate) simulcast: bool,

    /// sdp_semantics is the plan the connection negotiates with.
    pub(crate) sdp_semantics: RTCSdpSemantics,

    /// video_bitrates are the max bitrates of the low, standard and high layers.
    pub(crate) video_bitrates: VideoBitrates,

    /// desktop_bitrate overrides the max bitrate of low fps screensharing.
    pub(crate) desktop_bitrate: Option<u32>,

    /// p2p marks a direct connection to one remote peer as opposed to an SFU.
    pub(crate) p2p: bool,

    /// multi_stream allows more than one local source per media kind.
    pub(crate) multi_stream: bool,
}

impl Default for SimulcastConfig {
    fn default() -> Self {
        Self {
            simulcast: true,
            sdp_semantics: RTCSdpSemantics::UnifiedPlan,
            video_bitrates: VideoBitrates::default(),
            desktop_bitrate: None,
            p2p: false,
            multi_stream: false,
        }
    }
}

impl SimulcastConfig {
    pub fn simulcast(&self) -> bool {
        self.simulcast
    }

    pub fn sdp_semantics(&self) -> RTCSdpSemantics {
        self.sdp_semantics
    }

    pub fn uses_unified_plan(&self) -> bool {
        self.sdp_semantics.is_unified_plan()
    }

    pub fn video_bitrates(&self) -> &VideoBitrates {
        &self.video_bitrates
    }

    /// Max bitrate of low fps screensharing, falling back to [`DESKTOP_SHARE_RATE`].
    pub fn desktop_bitrate(&self) -> u32 {
        self.desktop_bitrate.unwrap_or(DESKTOP_SHARE_RATE)
    }

    pub fn p2p(&self) -> bool {
        self.p2p
    }

    pub fn multi_stream(&self) -> bool {
        self.multi_stream
    }
}

#[derive(Default, Debug, Clone)]
pub struct SimulcastConfigBuilder {
    config: SimulcastConfig,
}

impl SimulcastConfigBuilder {
    pub fn new() -> Self {
        SimulcastConfigBuilder::default()
    }

    pub fn with_simulcast(mut self, simulcast: bool) -> Self {
        self.config.simulcast = simulcast;
        self
    }

    pub fn with_sdp_semantics(mut self, sdp_semantics: RTCSdpSemantics) -> Self {
        self.config.sdp_semantics = sdp_semantics;
        self
    }

    pub fn with_video_bitrates(mut self, video_bitrates: VideoBitrates) -> Self {
        self.config.video_bitrates = video_bitrates;
        self
    }

    pub fn with_desktop_bitrate(mut self, desktop_bitrate: u32) -> Self {
        self.config.desktop_bitrate = Some(desktop_bitrate);
        self
    }

    pub fn with_p2p(mut self, p2p: bool) -> Self {
        self.config.p2p = p2p;
        self
    }

    pub fn with_multi_stream(mut self, multi_stream: bool) -> Self {
        self.config.multi_stream = multi_stream;
        self
    }

    pub fn build(self) -> SimulcastConfig {
        self.config
    }
}
