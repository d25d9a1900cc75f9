pub(crate) const UNSPECIFIED_STR: &str = "Unspecified";

pub(crate) const SDP_ATTRIBUTE_RID: &str = "rid";
pub(crate) const SDP_ATTRIBUTE_SIMULCAST: &str = "simulcast";
pub(crate) const SDP_ATTRIBUTE_SSRC: &str = "ssrc";
pub(crate) const SDP_ATTRIBUTE_SSRC_GROUP: &str = "ssrc-group";

pub(crate) const MEDIA_SECTION_AUDIO: &str = "audio";
pub(crate) const MEDIA_SECTION_VIDEO: &str = "video";

/// Length of the transaction id stamped by RTCRtpSender::get_parameters.
pub(crate) const TRANSACTION_ID_LEN: usize = 16;

/// Firefox has no reliable desktop track height, assume 720p.
pub(crate) const FIREFOX_DEFAULT_CAPTURE_HEIGHT: u32 = 720;

/// Last Firefox release that still parsed `rid=` inside a=simulcast.
pub(crate) const FIREFOX_LEGACY_SIMULCAST_MAX_VERSION: u32 = 71;
