//! Post-processing of negotiated session descriptions.
//!
//! Both passes parse the description, rewrite the affected media sections
//! and serialize it again. A description that needs no rewrite is handed
//! back untouched, so applying a pass twice yields the same text.

pub mod media_section;
pub mod sdp_type;
pub mod session_description;

use log::trace;
use sdp::description::common::Attribute;
use sdp::description::media::MediaDescription;
use shared::error::Result;

use crate::constants::{
    MEDIA_SECTION_AUDIO, MEDIA_SECTION_VIDEO, SDP_ATTRIBUTE_RID, SDP_ATTRIBUTE_SIMULCAST,
    SDP_ATTRIBUTE_SSRC,
};
use crate::peer_connection::configuration::BrowserCapabilities;
use crate::rtp_transceiver::rtp_sender::simulcast_layers::SIM_LAYER_RIDS;
use media_section::{is_simulcast_key, MediaSectionView};
pub use sdp_type::RTCSdpType;
pub use session_description::RTCSessionDescription;

/// Reorders the ssrc lines of every video section so the members of each
/// ssrc-group are contiguous, in the order the groups first mention them.
///
/// The primary ssrc of a FID group then always precedes its RTX ssrc.
/// Lines of ssrcs no group mentions follow in their original order.
/// Audio sections and sections without groups are left alone.
pub fn ensure_correct_order_of_ssrcs(
    desc: &RTCSessionDescription,
) -> Result<RTCSessionDescription> {
    let mut parsed = desc.unmarshal()?;

    let mut changed = false;
    for media in parsed
        .media_descriptions
        .iter_mut()
        .filter(|m| m.media_name.media != MEDIA_SECTION_AUDIO)
    {
        changed |= reorder_ssrc_lines(media);
    }

    if !changed {
        return Ok(desc.clone());
    }

    trace!("reordered ssrc lines of {} description", desc.sdp_type);
    Ok(RTCSessionDescription::from_parsed(desc.sdp_type, &parsed))
}

/// Returns whether any line moved.
fn reorder_ssrc_lines(media: &mut MediaDescription) -> bool {
    let view = MediaSectionView::new(media);
    if view.ssrc_groups.is_empty() {
        return false;
    }

    // view.ssrcs[i] describes the attribute at slots[i]
    let slots: Vec<usize> = media
        .attributes
        .iter()
        .enumerate()
        .filter(|(_, attr)| attr.key == SDP_ATTRIBUTE_SSRC)
        .map(|(i, _)| i)
        .collect();

    let mut order: Vec<usize> = Vec::with_capacity(slots.len());
    for ssrc in view.grouped_ssrcs() {
        order.extend(
            view.ssrcs
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.ssrc == Some(ssrc))
                .map(|(i, _)| i),
        );
    }
    let ungrouped: Vec<usize> = (0..slots.len()).filter(|i| !order.contains(i)).collect();
    order.extend(ungrouped);

    if order.iter().enumerate().all(|(position, i)| position == *i) {
        return false;
    }

    let lines: Vec<Attribute> = slots
        .iter()
        .map(|slot| media.attributes[*slot].clone())
        .collect();
    for (slot, i) in slots.iter().zip(order) {
        media.attributes[*slot] = lines[i].clone();
    }

    true
}

/// Advertises simulcast reception on the first video section.
///
/// Adds `a=rid:1 recv`, `a=rid:2 recv`, `a=rid:3 recv` and a matching
/// `a=simulcast` line unless the section already negotiates rid simulcast.
/// Only one video section may carry simulcast, so rid and simulcast lines
/// are stripped from every later video section. Browsers that set up
/// simulcast by munging ssrcs get the description back unchanged.
pub fn insert_unified_plan_simulcast_receive(
    desc: &RTCSessionDescription,
    caps: &BrowserCapabilities,
) -> Result<RTCSessionDescription> {
    if caps.uses_sdp_munging_for_simulcast() {
        return Ok(desc.clone());
    }

    let mut parsed = desc.unmarshal()?;
    let Some(first_video) = parsed
        .media_descriptions
        .iter()
        .position(|m| m.media_name.media == MEDIA_SECTION_VIDEO)
    else {
        return Ok(desc.clone());
    };

    let mut changed = false;
    let media = &mut parsed.media_descriptions[first_video];
    if !MediaSectionView::new(media).has_rid_simulcast() {
        media.attributes.retain(|attr| !is_simulcast_key(&attr.key));
        for rid in SIM_LAYER_RIDS {
            media.attributes.push(Attribute {
                key: SDP_ATTRIBUTE_RID.to_owned(),
                value: Some(format!("{rid} recv")),
            });
        }
        media.attributes.push(Attribute {
            key: SDP_ATTRIBUTE_SIMULCAST.to_owned(),
            value: Some(simulcast_receive_value(caps)),
        });
        changed = true;
    }

    for media in parsed
        .media_descriptions
        .iter_mut()
        .skip(first_video + 1)
        .filter(|m| m.media_name.media == MEDIA_SECTION_VIDEO)
    {
        let before = media.attributes.len();
        media.attributes.retain(|attr| !is_simulcast_key(&attr.key));
        changed |= media.attributes.len() != before;
    }

    if !changed {
        return Ok(desc.clone());
    }

    trace!(
        "inserted simulcast receive lines into {} description",
        desc.sdp_type
    );
    Ok(RTCSessionDescription::from_parsed(desc.sdp_type, &parsed))
}

/// `recv rid=1;2;3`, or `recv 1;2;3` where the `rid=` token was dropped.
fn simulcast_receive_value(caps: &BrowserCapabilities) -> String {
    let prefix = if caps.supports_rid_free_simulcast_attribute() {
        ""
    } else {
        "rid="
    };
    format!("recv {prefix}{}", SIM_LAYER_RIDS.join(";"))
}

#[cfg(test)]
mod test {
    use super::*;

    fn description(media: &[&str]) -> RTCSessionDescription {
        let mut sdp = "v=0\r\no=- 4611734 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n".to_owned();
        for section in media {
            sdp.push_str(section);
        }
        RTCSessionDescription {
            sdp_type: RTCSdpType::Offer,
            sdp,
            parsed: None,
        }
    }

    fn attribute_values(desc: &RTCSessionDescription, section: usize, key: &str) -> Vec<String> {
        desc.unmarshal().unwrap().media_descriptions[section]
            .attributes
            .iter()
            .filter(|a| a.key == key)
            .map(|a| a.value.clone().unwrap_or_default())
            .collect()
    }

    const VIDEO_RTX_REVERSED: &str = "m=video 9 UDP/TLS/RTP/SAVPF 96 97\r\n\
a=mid:1\r\n\
a=ssrc-group:FID 1111 2222\r\n\
a=ssrc:2222 cname:camera\r\n\
a=ssrc:2222 msid:stream track\r\n\
a=ssrc:1111 cname:camera\r\n\
a=ssrc:1111 msid:stream track\r\n";

    #[test]
    fn test_ensure_correct_order_of_ssrcs() -> Result<()> {
        let desc = description(&[VIDEO_RTX_REVERSED]);

        let normalized = ensure_correct_order_of_ssrcs(&desc)?;
        assert_eq!(
            attribute_values(&normalized, 0, "ssrc"),
            vec![
                "1111 cname:camera",
                "1111 msid:stream track",
                "2222 cname:camera",
                "2222 msid:stream track",
            ]
        );

        assert_eq!(ensure_correct_order_of_ssrcs(&normalized)?, normalized);

        Ok(())
    }

    #[test]
    fn test_ensure_correct_order_of_ssrcs_pass_through() -> Result<()> {
        let tests = vec![
            // audio sections are never reordered
            "m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
a=ssrc-group:FID 1111 2222\r\n\
a=ssrc:2222 cname:mic\r\n\
a=ssrc:1111 cname:mic\r\n",
            // no groups
            "m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
a=ssrc:2222 cname:camera\r\n\
a=ssrc:1111 cname:camera\r\n",
            // already ordered
            "m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
a=ssrc-group:FID 1111 2222\r\n\
a=ssrc:1111 cname:camera\r\n\
a=ssrc:2222 cname:camera\r\n",
        ];

        for section in tests {
            let desc = description(&[section]);
            assert_eq!(ensure_correct_order_of_ssrcs(&desc)?.sdp, desc.sdp);
        }

        Ok(())
    }

    #[test]
    fn test_ungrouped_ssrcs_follow_grouped() -> Result<()> {
        let desc = description(&["m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
a=ssrc:9999 cname:other\r\n\
a=ssrc:2222 cname:camera\r\n\
a=ssrc-group:FID 1111 2222\r\n\
a=ssrc:1111 cname:camera\r\n"]);

        let normalized = ensure_correct_order_of_ssrcs(&desc)?;
        assert_eq!(
            attribute_values(&normalized, 0, "ssrc"),
            vec!["1111 cname:camera", "2222 cname:camera", "9999 cname:other"]
        );

        Ok(())
    }

    #[test]
    fn test_insert_simulcast_receive() -> Result<()> {
        let tests = vec![
            (BrowserCapabilities::firefox(68), "recv rid=1;2;3"),
            (BrowserCapabilities::firefox(71), "recv rid=1;2;3"),
            (BrowserCapabilities::firefox(72), "recv 1;2;3"),
            (
                BrowserCapabilities::chrome(110).with_sdp_munging_simulcast(false),
                "recv rid=1;2;3",
            ),
        ];

        for (caps, expected_simulcast) in tests {
            let desc = description(&[VIDEO_RTX_REVERSED]);
            let inserted = insert_unified_plan_simulcast_receive(&desc, &caps)?;

            assert_eq!(
                attribute_values(&inserted, 0, "rid"),
                vec!["1 recv", "2 recv", "3 recv"],
                "{caps:?}"
            );
            assert_eq!(
                attribute_values(&inserted, 0, "simulcast"),
                vec![expected_simulcast],
                "{caps:?}"
            );
            assert_eq!(
                insert_unified_plan_simulcast_receive(&inserted, &caps)?,
                inserted
            );
        }

        Ok(())
    }

    #[test]
    fn test_insert_simulcast_receive_pass_through() -> Result<()> {
        let audio_only = description(&["m=audio 9 UDP/TLS/RTP/SAVPF 111\r\na=mid:0\r\n"]);
        let caps = BrowserCapabilities::firefox(91);
        assert_eq!(
            insert_unified_plan_simulcast_receive(&audio_only, &caps)?.sdp,
            audio_only.sdp
        );

        let video = description(&[VIDEO_RTX_REVERSED]);
        let munging = BrowserCapabilities::chrome(110);
        assert_eq!(
            insert_unified_plan_simulcast_receive(&video, &munging)?.sdp,
            video.sdp
        );

        Ok(())
    }

    #[test]
    fn test_simulcast_stripped_from_later_video_sections() -> Result<()> {
        let desc = description(&[
            "m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
a=mid:1\r\n\
a=rid:1 recv\r\n\
a=rid:2 recv\r\n\
a=simulcast: recv rid=1;2\r\n",
            "m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
a=mid:2\r\n\
a=rid:1 recv\r\n\
a=simulcast:recv 1\r\n",
        ]);

        let caps = BrowserCapabilities::firefox(91);
        let stripped = insert_unified_plan_simulcast_receive(&desc, &caps)?;

        assert_eq!(attribute_values(&stripped, 0, "rid"), vec!["1 recv", "2 recv"]);
        assert_eq!(
            attribute_values(&stripped, 0, "simulcast"),
            vec![" recv rid=1;2"]
        );
        assert!(attribute_values(&stripped, 1, "rid").is_empty());
        assert!(attribute_values(&stripped, 1, "simulcast").is_empty());
        assert_eq!(attribute_values(&stripped, 1, "mid"), vec!["2"]);

        Ok(())
    }

    #[test]
    fn test_invalid_description_is_rejected() {
        let desc = RTCSessionDescription {
            sdp_type: RTCSdpType::Answer,
            sdp: "garbage".to_owned(),
            parsed: None,
        };

        assert!(ensure_correct_order_of_ssrcs(&desc).is_err());
        assert!(
            insert_unified_plan_simulcast_receive(&desc, &BrowserCapabilities::firefox(91))
                .is_err()
        );
    }
}
