use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::UNSPECIFIED_STR;

/// SDP semantics the remote browser negotiates with.
///
/// The encoding policy only cares whether the connection is unified plan:
/// Chromium in Plan B refuses to send a simulcast desktop stream when max
/// bitrates are set.
///
/// ```
/// use rtc_simulcast::peer_connection::configuration::RTCSdpSemantics;
///
/// let semantics = RTCSdpSemantics::from("plan-b");
/// assert_eq!(semantics, RTCSdpSemantics::PlanB);
/// assert!(!semantics.is_unified_plan());
/// ```
///
/// ## Specifications
///
/// * [Unified Plan](https://tools.ietf.org/html/draft-roach-mmusic-unified-plan-00)
/// * [Plan B](https://tools.ietf.org/html/draft-uberti-rtcweb-plan-00)
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCSdpSemantics {
    Unspecified = 0,

    /// One m= line per track.
    #[serde(rename = "unified-plan")]
    #[default]
    UnifiedPlan = 1,

    /// One m= line per media kind carrying every ssrc of that kind.
    #[serde(rename = "plan-b")]
    PlanB = 2,

    /// Unified Plan offers, Plan B answers to Plan B offers.
    #[serde(rename = "unified-plan-with-fallback")]
    UnifiedPlanWithFallback = 3,
}

const SDP_SEMANTICS_UNIFIED_PLAN_WITH_FALLBACK: &str = "unified-plan-with-fallback";
const SDP_SEMANTICS_UNIFIED_PLAN: &str = "unified-plan";
const SDP_SEMANTICS_PLAN_B: &str = "plan-b";

impl From<&str> for RTCSdpSemantics {
    fn from(raw: &str) -> Self {
        match raw {
            SDP_SEMANTICS_UNIFIED_PLAN_WITH_FALLBACK => RTCSdpSemantics::UnifiedPlanWithFallback,
            SDP_SEMANTICS_UNIFIED_PLAN => RTCSdpSemantics::UnifiedPlan,
            SDP_SEMANTICS_PLAN_B => RTCSdpSemantics::PlanB,
            _ => RTCSdpSemantics::Unspecified,
        }
    }
}

impl fmt::Display for RTCSdpSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCSdpSemantics::UnifiedPlanWithFallback => SDP_SEMANTICS_UNIFIED_PLAN_WITH_FALLBACK,
            RTCSdpSemantics::UnifiedPlan => SDP_SEMANTICS_UNIFIED_PLAN,
            RTCSdpSemantics::PlanB => SDP_SEMANTICS_PLAN_B,
            RTCSdpSemantics::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

impl RTCSdpSemantics {
    pub fn is_unified_plan(&self) -> bool {
        matches!(
            self,
            RTCSdpSemantics::UnifiedPlan | RTCSdpSemantics::UnifiedPlanWithFallback
        )
    }
}
