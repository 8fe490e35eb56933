//! Animation catalog
//!
//! The closed set of animations the rendering collaborator knows how to play.

use companion_core::{CompanionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One playable companion animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationId {
    /// Resting loop; the hub
    Idle,
    /// Smile and bounce
    Happy,
    /// Jumping, sparkles
    Excited,
    /// Head tilt, leaning in
    Curious,
    /// Question marks
    Confused,
    /// Startled jump
    Surprised,
    /// Worried look, paws together
    Concerned,
    /// Drooping ears
    Sad,
    /// Puffed up, stomping
    Angry,
}

impl AnimationId {
    /// Full catalog, also the fixed priority order for transition bridges
    pub const ALL: [AnimationId; 9] = [
        AnimationId::Idle,
        AnimationId::Happy,
        AnimationId::Excited,
        AnimationId::Curious,
        AnimationId::Confused,
        AnimationId::Surprised,
        AnimationId::Concerned,
        AnimationId::Sad,
        AnimationId::Angry,
    ];

    /// Universal hub every animation can fall back to
    pub const HUB: AnimationId = AnimationId::Idle;

    /// Stable lowercase identifier understood by the renderer
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationId::Idle => "idle",
            AnimationId::Happy => "happy",
            AnimationId::Excited => "excited",
            AnimationId::Curious => "curious",
            AnimationId::Confused => "confused",
            AnimationId::Surprised => "surprised",
            AnimationId::Concerned => "concerned",
            AnimationId::Sad => "sad",
            AnimationId::Angry => "angry",
        }
    }

    /// Position in the dominance ranking; a higher rank is a "stronger"
    /// animation for secondary-emotion blending
    pub fn strength_rank(self) -> u8 {
        match self {
            AnimationId::Idle => 0,
            AnimationId::Curious => 1,
            AnimationId::Happy => 2,
            AnimationId::Confused => 3,
            AnimationId::Sad => 4,
            AnimationId::Concerned => 5,
            AnimationId::Surprised => 6,
            AnimationId::Excited => 7,
            AnimationId::Angry => 8,
        }
    }

    /// Parse a caller-supplied identifier, substituting the hub for anything
    /// outside the catalog
    pub fn parse_or_hub(raw: &str) -> AnimationId {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                animation = raw,
                fallback = %AnimationId::HUB,
                "Unknown animation id supplied, falling back to hub"
            );
            AnimationId::HUB
        })
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationId {
    type Err = CompanionError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        AnimationId::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| CompanionError::validation(format!("unknown animation id '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known() {
        for animation in AnimationId::ALL {
            assert_eq!(animation.as_str().parse::<AnimationId>().unwrap(), animation);
        }
        assert_eq!(" Happy ".parse::<AnimationId>().unwrap(), AnimationId::Happy);
    }

    #[test]
    fn test_parse_unknown_falls_back() {
        assert!("dancing".parse::<AnimationId>().is_err());
        assert_eq!(AnimationId::parse_or_hub("dancing"), AnimationId::Idle);
        assert_eq!(AnimationId::parse_or_hub(""), AnimationId::Idle);
    }

    #[test]
    fn test_strength_rank_is_total_order() {
        let mut ranks: Vec<_> = AnimationId::ALL.iter().map(|a| a.strength_rank()).collect();
        ranks.sort_unstable();
        ranks.dedup();
        assert_eq!(ranks.len(), AnimationId::ALL.len());
        assert_eq!(AnimationId::HUB.strength_rank(), 0);
    }

    #[test]
    fn test_serde_identifier() {
        let json = serde_json::to_string(&AnimationId::Concerned).unwrap();
        assert_eq!(json, "\"concerned\"");
    }
}
