use sdp::description::media::MediaDescription;

use crate::constants::{
    SDP_ATTRIBUTE_RID, SDP_ATTRIBUTE_SIMULCAST, SDP_ATTRIBUTE_SSRC, SDP_ATTRIBUTE_SSRC_GROUP,
};
use crate::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;
use crate::rtp_transceiver::SSRC;

/// One `a=ssrc:<id> <attribute>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsrcEntry {
    /// None when the id is not a valid 32 bit number.
    pub ssrc: Option<SSRC>,
    pub attribute: String,
}

/// One `a=ssrc-group:<semantics> <id>...` line, e.g. a FID group pairing a
/// primary ssrc with its RTX companion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsrcGroup {
    pub semantics: String,
    pub ssrcs: Vec<SSRC>,
}

/// One `a=rid:<id> <direction> [restrictions]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RidEntry {
    pub id: String,
    pub direction: String,
}

/// Structural view of the simulcast related attributes of one media section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSectionView {
    pub kind: RtpCodecKind,
    pub ssrcs: Vec<SsrcEntry>,
    pub ssrc_groups: Vec<SsrcGroup>,
    pub rids: Vec<RidEntry>,
    /// Value of the simulcast attribute without the leading space of the draft 03 form.
    pub simulcast: Option<String>,
    /// The simulcast attribute was written as `a=simulcast: <value>` (draft 03).
    pub simulcast_draft_03: bool,
}

impl MediaSectionView {
    pub fn new(media: &MediaDescription) -> Self {
        let mut view = MediaSectionView {
            kind: RtpCodecKind::from(media.media_name.media.as_str()),
            ssrcs: vec![],
            ssrc_groups: vec![],
            rids: vec![],
            simulcast: None,
            simulcast_draft_03: false,
        };

        for attr in &media.attributes {
            let value = attr.value.as_deref().unwrap_or_default();
            match attr.key.as_str() {
                SDP_ATTRIBUTE_SSRC => view.ssrcs.push(parse_ssrc_entry(value)),
                SDP_ATTRIBUTE_SSRC_GROUP => {
                    if let Some(group) = parse_ssrc_group(value) {
                        view.ssrc_groups.push(group);
                    }
                }
                SDP_ATTRIBUTE_RID => {
                    let mut fields = value.split_whitespace();
                    if let Some(id) = fields.next() {
                        view.rids.push(RidEntry {
                            id: id.to_owned(),
                            direction: fields.next().unwrap_or_default().to_owned(),
                        });
                    }
                }
                SDP_ATTRIBUTE_SIMULCAST => {
                    if view.simulcast.is_none() {
                        view.simulcast_draft_03 = value.starts_with(' ');
                        view.simulcast = Some(value.trim_start().to_owned());
                    }
                }
                _ => {}
            }
        }

        view
    }

    /// Ids referenced by any ssrc-group, in first appearance order without duplicates.
    pub fn grouped_ssrcs(&self) -> Vec<SSRC> {
        let mut ordered: Vec<SSRC> = vec![];
        for ssrc in self.ssrc_groups.iter().flat_map(|g| g.ssrcs.iter()) {
            if !ordered.contains(ssrc) {
                ordered.push(*ssrc);
            }
        }
        ordered
    }

    /// The section already negotiates simulcast with rids.
    pub fn has_rid_simulcast(&self) -> bool {
        !self.rids.is_empty() && self.simulcast.is_some()
    }
}

pub(crate) fn is_simulcast_key(key: &str) -> bool {
    matches!(key, SDP_ATTRIBUTE_RID | SDP_ATTRIBUTE_SIMULCAST)
}

pub(crate) fn parse_ssrc_entry(value: &str) -> SsrcEntry {
    let (id, attribute) = value.split_once(' ').unwrap_or((value, ""));
    SsrcEntry {
        ssrc: id.parse().ok(),
        attribute: attribute.to_owned(),
    }
}

fn parse_ssrc_group(value: &str) -> Option<SsrcGroup> {
    let mut fields = value.split_whitespace();
    let semantics = fields.next()?.to_owned();
    let ssrcs = fields.filter_map(|f| f.parse().ok()).collect();
    Some(SsrcGroup { semantics, ssrcs })
}
