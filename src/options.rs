use strum::{Display, EnumString};

/// What to do with an INFO key that the header never declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum UnknownInfoPolicy {
    /// Fail with `Error::UnknownInfoField`.
    #[default]
    Fail,
    /// Drop the token and log a warning.
    Skip,
}

/// How FORMAT names are paired with ENCODING values when the two lists differ in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum FormatPairing {
    /// Pair up to the shorter list and drop the rest.
    #[default]
    Truncate,
    /// Fail with `Error::EncodingLengthMismatch`.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub unknown_info: UnknownInfoPolicy,
    pub format_pairing: FormatPairing,
}

impl DecodeOptions {
    /// Skips unknown INFO keys and tolerates ragged FORMAT/ENCODING pairs.
    pub fn lenient() -> Self {
        DecodeOptions {
            unknown_info: UnknownInfoPolicy::Skip,
            format_pairing: FormatPairing::Truncate,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fail", UnknownInfoPolicy::Fail)]
    #[case("skip", UnknownInfoPolicy::Skip)]
    fn test_unknown_info_policy_names(#[case] name: &str, #[case] policy: UnknownInfoPolicy) {
        assert_eq!(name.parse::<UnknownInfoPolicy>().unwrap(), policy);
        assert_eq!(policy.to_string(), name);
    }

    #[test]
    fn test_defaults_follow_source_behaviour() {
        let options = DecodeOptions::default();
        assert_eq!(options.unknown_info, UnknownInfoPolicy::Fail);
        assert_eq!(options.format_pairing, FormatPairing::Truncate);
        assert_eq!("strict".parse::<FormatPairing>().unwrap(), FormatPairing::Strict);
        assert!("lenient".parse::<FormatPairing>().is_err());
    }
}
