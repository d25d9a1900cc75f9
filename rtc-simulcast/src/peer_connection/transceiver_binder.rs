//! Binds local tracks to the transceivers of the transport.
//!
//! The transport owns the transceivers. The binder only picks one, changes
//! its direction and swaps the track or encodings of its sender.
//!
//! A media kind may have several local sources when multi-stream is on.
//! Which transceiver belongs to which source is then reconstructed from the
//! order of the transceivers and the index in the source name.

use log::{debug, info, warn};
use shared::error::{Error, Result};

use crate::media_stream::local_track::{parse_source_index, LocalTrack, LocalTrackId};
use crate::peer_connection::configuration::{BrowserCapabilities, SimulcastConfig};
use crate::peer_connection::encoding_policy::EncodingPolicy;
use crate::peer_connection::transport::RtpTransport;
use crate::rtp_transceiver::direction::RTCRtpTransceiverDirection;
use crate::rtp_transceiver::rtp_sender::rtp_codec::RtpCodecKind;
use crate::rtp_transceiver::{RTCRtpTransceiver, RTCRtpTransceiverId, RTCRtpTransceiverInit};

#[derive(Debug, Clone)]
pub struct TransceiverBinder {
    policy: EncodingPolicy,
    /// Local tracks currently sent on the connection.
    local_tracks: Vec<(LocalTrackId, RtpCodecKind)>,
    p2p: bool,
    multi_stream: bool,
}

impl TransceiverBinder {
    pub fn new(caps: BrowserCapabilities, config: SimulcastConfig) -> Self {
        let p2p = config.p2p();
        let multi_stream = config.multi_stream();
        Self {
            policy: EncodingPolicy::new(caps, config),
            local_tracks: vec![],
            p2p,
            multi_stream,
        }
    }

    pub fn policy(&self) -> &EncodingPolicy {
        &self.policy
    }

    pub fn is_p2p(&self) -> bool {
        self.p2p
    }

    pub fn is_multi_stream(&self) -> bool {
        self.multi_stream
    }

    pub fn set_sharing_low_fps_screen(&mut self, low_fps: bool) {
        debug!("low fps screensharing {}", if low_fps { "on" } else { "off" });
        self.policy.set_low_fps_screen_share(low_fps);
    }

    pub fn is_sharing_low_fps_screen(&self) -> bool {
        self.policy.is_low_fps_screen_share()
    }

    pub fn register_local_track(&mut self, track: &LocalTrack) {
        if !self.has_local_track(track.rtc_id()) {
            self.local_tracks.push((track.rtc_id(), track.kind()));
        }
    }

    pub fn unregister_local_track(&mut self, rtc_id: LocalTrackId) {
        self.local_tracks.retain(|(id, _)| *id != rtc_id);
    }

    pub fn has_local_track(&self, rtc_id: LocalTrackId) -> bool {
        self.local_tracks.iter().any(|(id, _)| *id == rtc_id)
    }

    pub fn local_track_count(&self, kind: RtpCodecKind) -> usize {
        self.local_tracks.iter().filter(|(_, k)| *k == kind).count()
    }

    /// Adds `track` to the connection.
    ///
    /// The initiator creates a sendrecv transceiver carrying the startup
    /// encodings. Firefox cannot take send encodings at creation time, so
    /// they are left out there. The responder reuses the recvonly
    /// transceiver the remote offer created.
    pub fn add_track(
        &mut self,
        transport: &mut impl RtpTransport,
        track: &LocalTrack,
        is_initiator: bool,
    ) -> Result<RTCRtpTransceiverId> {
        let id = if is_initiator {
            let init = RTCRtpTransceiverInit {
                direction: RTCRtpTransceiverDirection::Sendrecv,
                streams: track
                    .original_stream()
                    .map(|s| vec![s.stream_id().clone()])
                    .unwrap_or_default(),
                send_encodings: if self.policy.capabilities().is_firefox() {
                    vec![]
                } else {
                    self.policy.select_encodings(track)
                },
            };
            transport.add_transceiver(track.track().clone(), init)?
        } else {
            transport.add_track(track.track().clone())?
        };

        debug!("added {track} on transceiver {id}");
        self.register_local_track(track);

        Ok(id)
    }

    /// Starts sending `track` again after an unmute.
    ///
    /// The first transceiver of the track's kind is assumed to belong to it.
    /// When the session started muted that transceiver is still recvonly and
    /// gets promoted to sendrecv once the stream is attached.
    pub fn add_track_unmute(
        &mut self,
        transport: &mut impl RtpTransport,
        track: &LocalTrack,
    ) -> Result<()> {
        let kind = track.kind();
        let (id, direction) = transport
            .transceivers()
            .iter()
            .find(|t| t.receives(kind))
            .map(|t| (t.id(), t.direction()))
            .ok_or_else(|| Error::ErrTransceiverNotFound(kind.to_string()))?;

        debug!("adding {track} on transceiver {id}");

        if direction == RTCRtpTransceiverDirection::Recvonly {
            let Some(stream) = track.original_stream() else {
                return Ok(());
            };

            transport.add_stream(stream)?;
            self.set_encodings(transport, track)?;
            self.register_local_track(track);

            return transceiver_by_id(transport, id)?
                .set_direction(RTCRtpTransceiverDirection::Sendrecv);
        }

        transceiver_by_id(transport, id)?
            .sender_mut()
            .replace_track(Some(track.track().clone()))
    }

    /// Stops sending `track` on mute.
    ///
    /// The sender keeps its transceiver so the media section can be reused.
    pub fn remove_track_mute(
        &mut self,
        transport: &mut impl RtpTransport,
        track: &LocalTrack,
    ) -> Result<()> {
        let transceiver = transport
            .transceivers_mut()
            .iter_mut()
            .find(|t| t.sends_track(track.track_id()))
            .ok_or_else(|| Error::ErrTransceiverNotFound(track.kind().to_string()))?;

        debug!("removing {track} from transceiver {}", transceiver.id());
        transceiver.sender_mut().replace_track(None)
    }

    /// Replaces `old_track` with `new_track` on the sender of the transceiver
    /// that belongs to them and returns that transceiver.
    pub fn replace_track(
        &mut self,
        transport: &mut impl RtpTransport,
        old_track: Option<&LocalTrack>,
        new_track: Option<&LocalTrack>,
    ) -> Result<RTCRtpTransceiverId> {
        let Some(kind) = new_track.or(old_track).map(|t| t.kind()) else {
            return Err(Error::ErrReplaceTrackFailed);
        };

        let id = self
            .find_replace_transceiver(transport.transceivers(), kind, old_track, new_track)
            .ok_or(Error::ErrReplaceTrackFailed)?;

        debug!(
            "replacing {} with {} on transceiver {id}",
            describe(old_track),
            describe(new_track)
        );

        transceiver_by_id(transport, id)?
            .sender_mut()
            .replace_track(new_track.map(|t| t.track().clone()))?;

        if let Some(old) = old_track {
            self.unregister_local_track(old.rtc_id());
        }
        if let Some(new) = new_track {
            self.register_local_track(new);
        }

        Ok(id)
    }

    fn find_replace_transceiver(
        &self,
        transceivers: &[RTCRtpTransceiver],
        kind: RtpCodecKind,
        old_track: Option<&LocalTrack>,
        new_track: Option<&LocalTrack>,
    ) -> Option<RTCRtpTransceiverId> {
        if let Some(old) = old_track.filter(|t| !t.is_muted()) {
            return transceivers
                .iter()
                .find(|t| t.sends_track(old.track_id()))
                .map(|t| t.id());
        }

        let is_new_local_source = self.multi_stream
            && self.local_track_count(kind) > 0
            && old_track.is_none()
            && new_track.is_some_and(|t| !self.has_local_track(t.rtc_id()));

        if is_new_local_source {
            // The last negotiation added a recvonly media section for the new source.
            return transceivers
                .iter()
                .find(|t| {
                    t.receives(kind)
                        && t.direction() == RTCRtpTransceiverDirection::Recvonly
                        && ((self.p2p
                            && t.current_direction() == RTCRtpTransceiverDirection::Recvonly)
                            || (t.current_direction() == RTCRtpTransceiverDirection::Inactive
                                && !t.stopped()))
                })
                .map(|t| t.id());
        }

        let first_of_kind = transceivers.iter().find(|t| t.receives(kind)).map(|t| t.id());

        let Some(source_name) = new_track.or(old_track).and_then(|t| t.source_name()) else {
            return first_of_kind;
        };
        let Some(index) = parse_source_index(source_name) else {
            warn!("no source index in {source_name}, using the first {kind} transceiver");
            return first_of_kind;
        };

        if self.p2p {
            transceivers
                .iter()
                .filter(|t| t.receives(kind))
                .nth(index)
                .map(|t| t.id())
        } else if index > 0 {
            transceivers
                .iter()
                .filter(|t| {
                    t.receives(kind) && t.direction() != RTCRtpTransceiverDirection::Recvonly
                })
                .nth(index)
                .map(|t| t.id())
        } else {
            first_of_kind
        }
    }

    /// Suspends or resumes sending all media of `kind`, independently of
    /// the mute state of the tracks.
    ///
    /// On resume every transceiver whose sender holds a local track goes back
    /// to sendrecv and the rest to recvonly.
    pub fn set_media_transfer_active(
        &mut self,
        transport: &mut impl RtpTransport,
        kind: RtpCodecKind,
        active: bool,
    ) -> Result<()> {
        info!(
            "{} {kind} media transfer",
            if active { "enabling" } else { "suspending" }
        );

        for transceiver in transport
            .transceivers_mut()
            .iter_mut()
            .filter(|t| t.receives(kind) && !t.stopped())
        {
            let direction = if !active {
                RTCRtpTransceiverDirection::Inactive
            } else if transceiver.sender().track().is_some() {
                RTCRtpTransceiverDirection::Sendrecv
            } else {
                RTCRtpTransceiverDirection::Recvonly
            };
            transceiver.set_direction(direction)?;
        }

        Ok(())
    }

    pub fn set_audio_transfer_active(
        &mut self,
        transport: &mut impl RtpTransport,
        active: bool,
    ) -> Result<()> {
        self.set_media_transfer_active(transport, RtpCodecKind::Audio, active)
    }

    pub fn set_video_transfer_active(
        &mut self,
        transport: &mut impl RtpTransport,
        active: bool,
    ) -> Result<()> {
        self.set_media_transfer_active(transport, RtpCodecKind::Video, active)
    }

    /// Pushes the encodings the policy selects for `track` to the sender
    /// carrying a track of the same kind.
    ///
    /// Until the transceiver is negotiated the sender reports no encodings;
    /// nothing is written then and the policy applies on the next call.
    pub fn set_encodings(
        &self,
        transport: &mut impl RtpTransport,
        track: &LocalTrack,
    ) -> Result<()> {
        let kind = track.kind();
        let Some(transceiver) = transport
            .transceivers_mut()
            .iter_mut()
            .find(|t| t.sends(kind))
        else {
            warn!("no {kind} sender for {track}, encodings not set");
            return Ok(());
        };

        let sender = transceiver.sender_mut();
        let mut parameters = sender.get_parameters();
        if parameters.encodings.is_empty() {
            warn!("{kind} sender has no encodings yet, encodings not set");
            return Ok(());
        }

        parameters.encodings = self.policy.select_encodings(track);
        self.policy.update_encodings_resolution(&mut parameters);
        sender.set_parameters(parameters)
    }

    /// Applies the height the receivers of `track` asked for to its sender.
    ///
    /// Every simulcast layer gets the active flag and bitrate the policy
    /// computes for the current mode. A sender with a single encoding is
    /// only switched off for a height of 0. Tracks the policy has no answer
    /// for, and tracks not sent on any transceiver, are left as they are.
    pub fn set_sender_video_constraints(
        &self,
        transport: &mut impl RtpTransport,
        track: &LocalTrack,
        requested_height: u32,
    ) -> Result<()> {
        let Some(active_flags) = self.policy.compute_active_flags(track, requested_height) else {
            return Ok(());
        };
        let bitrates = self.policy.compute_bitrates(track);

        let Some(transceiver) = transport
            .transceivers_mut()
            .iter_mut()
            .find(|t| t.sends_track(track.track_id()))
        else {
            warn!("{track} is not sent, ignoring requested height {requested_height}");
            return Ok(());
        };

        let sender = transceiver.sender_mut();
        let mut parameters = sender.get_parameters();
        if parameters.encodings.is_empty() {
            warn!("sender of {track} has no encodings yet, constraints not applied");
            return Ok(());
        }

        if parameters.encodings.len() == active_flags.len() {
            for ((encoding, active), max_bitrate) in parameters
                .encodings
                .iter_mut()
                .zip(active_flags)
                .zip(bitrates)
            {
                encoding.active = active;
                encoding.max_bitrate = max_bitrate;
            }
        } else {
            for encoding in parameters.encodings.iter_mut() {
                encoding.active = requested_height > 0;
            }
        }

        debug!(
            "{track} at requested height {requested_height}: active {:?}",
            parameters.encodings.iter().map(|e| e.active).collect::<Vec<_>>()
        );
        self.policy.update_encodings_resolution(&mut parameters);
        sender.set_parameters(parameters)
    }
}

fn transceiver_by_id(
    transport: &mut impl RtpTransport,
    id: RTCRtpTransceiverId,
) -> Result<&mut RTCRtpTransceiver> {
    transport
        .transceiver_mut(id)
        .ok_or_else(|| Error::ErrTransceiverNotFound(format!("id {id}")))
}

fn describe(track: Option<&LocalTrack>) -> String {
    track.map_or_else(|| "none".to_owned(), |t| t.to_string())
}
