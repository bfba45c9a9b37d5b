use std::str::FromStr;

/// Reserved words of the Sentience language.
///
/// Matching is exact and case-sensitive: `Agent` is an identifier, `agent` is
/// a keyword.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Agent,
    Mem,
    On,
    Input,
    Goal,
    Reflect,
    Train,
    Evolve,
    If,
    Enter,
    Embed,
    Link,
    Print,
}

impl Keyword {
    /// Keyword table lookup for a lexed word.
    pub fn lookup(word: &str) -> Option<Self> {
        Keyword::from_str(word).ok()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_lookup_exact_match() {
        assert_eq!(Keyword::lookup("agent"), Some(Keyword::Agent));
        assert_eq!(Keyword::lookup("evolve"), Some(Keyword::Evolve));
        assert_eq!(Keyword::lookup("Agent"), None);
        assert_eq!(Keyword::lookup("agents"), None);
        assert_eq!(Keyword::lookup("msg"), None);
    }

    #[test]
    fn test_display_round_trips_through_lookup() {
        for kw in Keyword::iter() {
            assert_eq!(Keyword::lookup(kw.as_ref()), Some(kw));
        }
        assert_eq!(Keyword::iter().count(), 13);
    }
}
