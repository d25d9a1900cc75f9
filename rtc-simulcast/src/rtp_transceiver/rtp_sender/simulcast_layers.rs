//! Static description of the three simulcast spatial layers.
//!
//! Applications reason about "low", "standard" and "high" bitrates, while
//! browsers disagree on which rid carries which resolution. Chromium and
//! WebKit send rid "1" as the lowest resolution; Firefox sends it as the
//! highest. [`build_startup_encodings`] maps the application bitrates onto
//! rids so that the scale factor and bitrate of every layer stay paired
//! regardless of the browser convention.

use serde::{Deserialize, Serialize};

use crate::rtp_transceiver::rtp_sender::rtp_coding_parameters::RTCRtpCodingParameters;
use crate::rtp_transceiver::rtp_sender::rtp_encoding_parameters::RTCRtpEncodingParameters;

pub const SIM_LAYER_1_RID: &str = "1";
pub const SIM_LAYER_2_RID: &str = "2";
pub const SIM_LAYER_3_RID: &str = "3";

/// Rids in order of highest to lowest spatial quality as advertised on the receive side.
pub const SIM_LAYER_RIDS: [&str; 3] = [SIM_LAYER_1_RID, SIM_LAYER_2_RID, SIM_LAYER_3_RID];

pub const HD_SCALE_FACTOR: f64 = 1.0;
pub const SD_SCALE_FACTOR: f64 = 2.0;
pub const LD_SCALE_FACTOR: f64 = 4.0;

pub const LD_BITRATE: u32 = 200_000;
pub const SD_BITRATE: u32 = 700_000;
pub const HD_BITRATE: u32 = 2_500_000;

/// Max bitrate of a low fps screenshare without presenter overlay.
pub const DESKTOP_SHARE_RATE: u32 = 500_000;

/// Per-quality max bitrates in bits per second.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoBitrates {
    pub low: u32,
    pub standard: u32,
    pub high: u32,
}

impl Default for VideoBitrates {
    fn default() -> Self {
        Self {
            low: LD_BITRATE,
            standard: SD_BITRATE,
            high: HD_BITRATE,
        }
    }
}

fn layer(rid: &str, max_bitrate: u32, scale_resolution_down_by: f64) -> RTCRtpEncodingParameters {
    RTCRtpEncodingParameters {
        rtp_coding_parameters: RTCRtpCodingParameters {
            rid: rid.to_owned(),
            ..Default::default()
        },
        active: true,
        max_bitrate: Some(max_bitrate),
        scale_resolution_down_by: Some(scale_resolution_down_by),
        ..Default::default()
    }
}

/// Builds the simulcast sender configuration used for the lifetime of a connection.
///
/// Layer "2" is always the standard definition layer. Layers "1" and "3" swap
/// their scale factor and bitrate on Firefox.
pub fn build_startup_encodings(
    is_firefox_like: bool,
    bitrates: &VideoBitrates,
) -> [RTCRtpEncodingParameters; 3] {
    let (outer_low, outer_high) = if is_firefox_like {
        ((bitrates.high, HD_SCALE_FACTOR), (bitrates.low, LD_SCALE_FACTOR))
    } else {
        ((bitrates.low, LD_SCALE_FACTOR), (bitrates.high, HD_SCALE_FACTOR))
    };

    [
        layer(SIM_LAYER_1_RID, outer_low.0, outer_low.1),
        layer(SIM_LAYER_2_RID, bitrates.standard, SD_SCALE_FACTOR),
        layer(SIM_LAYER_3_RID, outer_high.0, outer_high.1),
    ]
}
