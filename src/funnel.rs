use serde::{Deserialize, Serialize};

/// Which view of the funnel is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FunnelStep {
    #[default]
    LeadCapture,
    Offer,
}

impl FunnelStep {
    /// The only transition. Applying it to `Offer` keeps `Offer`.
    pub fn advance(self) -> FunnelStep {
        FunnelStep::Offer
    }

    pub fn number(self) -> u8 {
        match self {
            FunnelStep::LeadCapture => 1,
            FunnelStep::Offer => 2,
        }
    }
}

/// Query string of `/video`; the name personalizes the greeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoQuery {
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funnel_only_moves_forward() {
        let start = FunnelStep::default();
        assert_eq!(start.number(), 1);
        let next = start.advance();
        assert_eq!(next, FunnelStep::Offer);
        assert_eq!(next.number(), 2);
        assert_eq!(next.advance(), FunnelStep::Offer);
        assert!(next > start);
    }

    #[test]
    fn video_query_tolerates_missing_name() {
        let query: VideoQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.name, "");
    }
}
