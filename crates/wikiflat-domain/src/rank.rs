//! Rank module - precedence tags attached to every claim

/// Rank of a claim
///
/// Ranks decide which claims survive reduction:
/// - Preferred: the statement the community marked as current
/// - Normal: the default rank
/// - Deprecated: known to be wrong or outdated, used only as a last resort
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Outranks every other claim on the property
    Preferred,

    /// Default rank
    Normal,

    /// Used only when nothing better exists
    Deprecated,
}

impl Rank {
    /// All ranks in priority order (highest first)
    pub const PRIORITY: [Rank; 3] = [Rank::Preferred, Rank::Normal, Rank::Deprecated];

    /// Get the rank name as it appears in dumps
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Preferred => "preferred",
            Rank::Normal => "normal",
            Rank::Deprecated => "deprecated",
        }
    }

    /// Parse a rank from its dump representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "preferred" => Some(Rank::Preferred),
            "normal" => Some(Rank::Normal),
            "deprecated" => Some(Rank::Deprecated),
            _ => None,
        }
    }

    /// Position of this rank in [`Rank::PRIORITY`]
    pub fn index(&self) -> usize {
        match self {
            Rank::Preferred => 0,
            Rank::Normal => 1,
            Rank::Deprecated => 2,
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid rank: {}", s))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_parse() {
        assert_eq!(Rank::parse("preferred"), Some(Rank::Preferred));
        assert_eq!(Rank::parse("normal"), Some(Rank::Normal));
        assert_eq!(Rank::parse("deprecated"), Some(Rank::Deprecated));
        assert_eq!(Rank::parse("Preferred"), None);
        assert!("bogus".parse::<Rank>().is_err());
    }

    #[test]
    fn test_priority_order() {
        assert!(Rank::Preferred < Rank::Normal);
        assert!(Rank::Normal < Rank::Deprecated);
        for (i, rank) in Rank::PRIORITY.iter().enumerate() {
            assert_eq!(rank.index(), i);
        }
    }
}
