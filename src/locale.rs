use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::NamesError;

/// A validated locale identifier in its canonical, underscore-joined form.
///
/// Both `_` and `-` are accepted as separators, and each subtag is case-folded
/// the way CLDR file names spell it: `zh-hant-hk` becomes `zh_Hant_HK`.
///
/// ```
/// use cldr_names::LocaleTag;
///
/// let tag: LocaleTag = "pt-pt".parse().unwrap();
/// assert_eq!(tag.as_str(), "pt_PT");
/// assert_eq!(tag.region(), Some("PT"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    const ROOT: &'static str = "root";

    pub fn root() -> Self {
        LocaleTag(Self::ROOT.to_owned())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn language(&self) -> &str {
        self.subtags().next().unwrap_or(&self.0)
    }

    pub fn script(&self) -> Option<&str> {
        self.subtags().nth(1).filter(|subtag| is_script(subtag))
    }

    pub fn region(&self) -> Option<&str> {
        self.subtags()
            .skip(1)
            .take(2)
            .find(|subtag| is_region(subtag))
    }

    /// Variant subtags, such as `VALENCIA` in `ca_ES_VALENCIA`.
    pub fn variants(&self) -> impl Iterator<Item = &str> + '_ {
        self.subtags().skip(1).filter(|subtag| is_variant(subtag))
    }

    fn subtags(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('_')
    }
}

#[derive(PartialEq, PartialOrd)]
enum Stage {
    Language,
    Script,
    Region,
}

impl FromStr for LocaleTag {
    type Err = NamesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NamesError::InvalidLocaleTag(s.to_owned());

        let mut subtags = s.split(|c: char| c == '_' || c == '-');
        let language = subtags.next().ok_or_else(invalid)?;
        if language.eq_ignore_ascii_case(Self::ROOT) {
            return match subtags.next() {
                None => Ok(Self::root()),
                Some(_) => Err(invalid()),
            };
        }
        if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        let mut canonical = language.to_ascii_lowercase();
        let mut stage = Stage::Language;
        for subtag in subtags {
            canonical.push('_');
            if stage < Stage::Script && is_script(subtag) {
                let mut chars = subtag.chars();
                if let Some(first) = chars.next() {
                    canonical.push(first.to_ascii_uppercase());
                    canonical.push_str(&chars.as_str().to_ascii_lowercase());
                }
                stage = Stage::Script;
            } else if stage < Stage::Region && is_region(subtag) {
                canonical.push_str(&subtag.to_ascii_uppercase());
                stage = Stage::Region;
            } else if is_variant(subtag) {
                canonical.push_str(&subtag.to_ascii_uppercase());
                stage = Stage::Region;
            } else {
                return Err(invalid());
            }
        }
        Ok(LocaleTag(canonical))
    }
}

fn is_script(subtag: &str) -> bool {
    subtag.len() == 4 && subtag.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant(subtag: &str) -> bool {
    let bytes = subtag.as_bytes();
    match bytes.len() {
        4 => bytes[0].is_ascii_digit() && bytes.iter().all(u8::is_ascii_alphanumeric),
        5..=8 => bytes.iter().all(u8::is_ascii_alphanumeric),
        _ => false,
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = NamesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::LocaleTag;
    use test_case::test_case;

    #[test_case("agq", "agq")]
    #[test_case("en-au", "en_AU")]
    #[test_case("pt_PT", "pt_PT")]
    #[test_case("zh-hant-hk", "zh_Hant_HK")]
    #[test_case("ZH_HANS", "zh_Hans")]
    #[test_case("es-419", "es_419")]
    #[test_case("ca-es-valencia", "ca_ES_VALENCIA")]
    #[test_case("ROOT", "root")]
    fn test_canonical_form(input: &str, expected: &str) {
        assert_eq!(input.parse::<LocaleTag>().unwrap().as_str(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("e"; "short language")]
    #[test_case("engl"; "long language")]
    #[test_case("en__US"; "empty subtag")]
    #[test_case("en_US_Latn"; "script after region")]
    #[test_case("en_US_GB"; "two regions")]
    #[test_case("12"; "numeric language")]
    #[test_case("root_US"; "root with region")]
    #[test_case("en US"; "whitespace")]
    fn test_invalid_tag(input: &str) {
        assert!(input.parse::<LocaleTag>().is_err());
    }

    #[test]
    fn test_subtag_accessors() {
        let tag: LocaleTag = "zh_Hant_HK".parse().unwrap();
        assert_eq!(tag.language(), "zh");
        assert_eq!(tag.script(), Some("Hant"));
        assert_eq!(tag.region(), Some("HK"));
        assert_eq!(tag.variants().count(), 0);

        let tag: LocaleTag = "ca_ES_VALENCIA".parse().unwrap();
        assert_eq!(tag.script(), None);
        assert_eq!(tag.region(), Some("ES"));
        assert_eq!(tag.variants().collect::<Vec<_>>(), vec!["VALENCIA"]);

        assert!(LocaleTag::root().is_root());
        assert_eq!(LocaleTag::root().language(), "root");
        assert_eq!(LocaleTag::root().region(), None);
    }

    #[test]
    fn test_serde() {
        let tag: LocaleTag = serde_json::from_str("\"en-au\"").unwrap();
        assert_eq!(tag.as_str(), "en_AU");
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"en_AU\"");
        assert!(serde_json::from_str::<LocaleTag>("\"x\"").is_err());
    }
}
