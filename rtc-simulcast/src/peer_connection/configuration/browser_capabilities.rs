use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FIREFOX_LEGACY_SIMULCAST_MAX_VERSION, UNSPECIFIED_STR};

/// Engine family of the browser at the other end of the transport.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowserFamily {
    #[default]
    Unspecified,

    /// Chrome, Edge, Electron and other Blink based browsers.
    #[serde(rename = "chromium")]
    Chromium,

    /// Firefox and Gecko based browsers.
    #[serde(rename = "firefox")]
    Firefox,

    /// Safari and every browser on iOS.
    #[serde(rename = "webkit")]
    WebKit,
}

const BROWSER_FAMILY_CHROMIUM_STR: &str = "chromium";
const BROWSER_FAMILY_FIREFOX_STR: &str = "firefox";
const BROWSER_FAMILY_WEBKIT_STR: &str = "webkit";

impl From<&str> for BrowserFamily {
    fn from(raw: &str) -> Self {
        match raw {
            BROWSER_FAMILY_CHROMIUM_STR => BrowserFamily::Chromium,
            BROWSER_FAMILY_FIREFOX_STR => BrowserFamily::Firefox,
            BROWSER_FAMILY_WEBKIT_STR => BrowserFamily::WebKit,
            _ => BrowserFamily::Unspecified,
        }
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            BrowserFamily::Chromium => BROWSER_FAMILY_CHROMIUM_STR,
            BrowserFamily::Firefox => BROWSER_FAMILY_FIREFOX_STR,
            BrowserFamily::WebKit => BROWSER_FAMILY_WEBKIT_STR,
            BrowserFamily::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// Feature predicates of the running browser, injected at construction time.
///
/// # Examples
///
/// ```
/// use rtc_simulcast::peer_connection::configuration::browser_capabilities::BrowserCapabilities;
///
/// let firefox = BrowserCapabilities::firefox(91);
/// assert!(firefox.is_firefox());
/// assert!(!firefox.uses_sdp_munging_for_simulcast());
/// assert!(firefox.supports_rid_free_simulcast_attribute());
///
/// let chrome = BrowserCapabilities::chrome(110);
/// assert!(chrome.uses_sdp_munging_for_simulcast());
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BrowserCapabilitiesConfig")]
pub struct BrowserCapabilities {
    pub family: BrowserFamily,

    /// Major version.
    pub version: u32,

    /// Simulcast is set up by rewriting the SDP with extra ssrcs rather than
    /// by send encodings with rids.
    pub sdp_munging_simulcast: bool,
}

/// Serialized form of [`BrowserCapabilities`]. A missing
/// `sdp_munging_simulcast` falls back to the default of the family.
#[derive(Default, Deserialize)]
#[serde(default)]
struct BrowserCapabilitiesConfig {
    family: BrowserFamily,
    version: u32,
    sdp_munging_simulcast: Option<bool>,
}

impl From<BrowserCapabilitiesConfig> for BrowserCapabilities {
    fn from(config: BrowserCapabilitiesConfig) -> Self {
        let caps = BrowserCapabilities::new(config.family, config.version);
        match config.sdp_munging_simulcast {
            Some(sdp_munging_simulcast) => caps.with_sdp_munging_simulcast(sdp_munging_simulcast),
            None => caps,
        }
    }
}

impl BrowserCapabilities {
    pub fn new(family: BrowserFamily, version: u32) -> Self {
        Self {
            family,
            version,
            sdp_munging_simulcast: matches!(
                family,
                BrowserFamily::Chromium | BrowserFamily::WebKit
            ),
        }
    }

    pub fn chrome(version: u32) -> Self {
        Self::new(BrowserFamily::Chromium, version)
    }

    pub fn firefox(version: u32) -> Self {
        Self::new(BrowserFamily::Firefox, version)
    }

    pub fn safari(version: u32) -> Self {
        Self::new(BrowserFamily::WebKit, version)
    }

    pub fn with_sdp_munging_simulcast(mut self, sdp_munging_simulcast: bool) -> Self {
        self.sdp_munging_simulcast = sdp_munging_simulcast;
        self
    }

    pub fn is_firefox(&self) -> bool {
        self.family == BrowserFamily::Firefox
    }

    pub fn is_chromium_based(&self) -> bool {
        self.family == BrowserFamily::Chromium
    }

    pub fn is_webkit_based(&self) -> bool {
        self.family == BrowserFamily::WebKit
    }

    pub fn is_version_greater_than(&self, version: u32) -> bool {
        self.version > version
    }

    pub fn uses_sdp_munging_for_simulcast(&self) -> bool {
        self.sdp_munging_simulcast
    }

    /// Firefox 72 stopped parsing the legacy `rid=` token inside a=simulcast.
    pub fn supports_rid_free_simulcast_attribute(&self) -> bool {
        self.is_firefox() && self.is_version_greater_than(FIREFOX_LEGACY_SIMULCAST_MAX_VERSION)
    }
}
