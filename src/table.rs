use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    str::FromStr,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{NamesError, Result},
    locale::LocaleTag,
    zone::{NameValue, ZoneNames},
};

/// The resource kind of a name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Currency code to currency name (or symbol override).
    Currency,
    /// Language, script, region and CLDR type/key identifiers to display names.
    Locale,
    /// Zone id to zone name set, or `timezone.excity.*` to exemplar city.
    #[serde(rename = "timezone")]
    TimeZone,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Currency, TableKind::Locale, TableKind::TimeZone];

    /// The name used on the command line and as the data directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Currency => "currency",
            TableKind::Locale => "locale",
            TableKind::TimeZone => "timezone",
        }
    }
}

impl FromStr for TableKind {
    type Err = NamesError;

    fn from_str(s: &str) -> Result<Self> {
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NamesError::UnknownTableKind(s.to_owned()))
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a name table: one table per kind and locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId {
    pub kind: TableKind,
    pub locale: LocaleTag,
}

impl TableId {
    pub fn new(kind: TableKind, locale: LocaleTag) -> Self {
        TableId { kind, locale }
    }

    /// Relative path of the table document, such as `currency/agq.toml`.
    pub fn file_path(&self) -> String {
        format!("{}/{}.toml", self.kind, self.locale)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.locale)
    }
}

// The on-disk shape of a table document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDocument {
    #[serde(default)]
    metazones: BTreeMap<String, MetazoneDocument>,
    #[serde(default)]
    entries: BTreeMap<String, RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetazoneDocument {
    names: Vec<String>,
    zones: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Name(String),
    Names(Vec<String>),
}

/// An immutable set of localized names for one locale and one [`TableKind`].
///
/// Keys are matched exactly: `JPY` and `jpy` are distinct keys. A missing key
/// is reported as `None`; interpreting that absence (parent locale, raw key)
/// is up to the caller.
#[derive(Debug)]
pub struct NameTable {
    id: TableId,
    entries: HashMap<String, NameValue>,
    // Keys defined more than once across sections, last definition kept.
    shadowed: Vec<String>,
}

impl NameTable {
    /// Build a table from its TOML document.
    ///
    /// Metazones are applied in name order, then `[entries]`, so a key
    /// defined in several places resolves to its last definition.
    pub fn parse(id: TableId, text: &str) -> Result<Self> {
        let document: TableDocument =
            toml::from_str(text).map_err(|err| NamesError::invalid_table(&id, err))?;

        if id.kind != TableKind::TimeZone && !document.metazones.is_empty() {
            return Err(NamesError::invalid_table(
                &id,
                "`[metazones]` is only allowed in time-zone tables",
            ));
        }

        let capacity = document.entries.len()
            + document
                .metazones
                .values()
                .map(|metazone| metazone.zones.len())
                .sum::<usize>();
        let mut table = NameTable {
            id,
            entries: HashMap::with_capacity(capacity),
            shadowed: Vec::new(),
        };

        for (metazone_id, metazone) in document.metazones {
            let names = Arc::new(table.zone_names_from(metazone.names, &metazone_id)?);
            for zone in metazone.zones {
                table.insert(zone, NameValue::ZoneNames(Arc::clone(&names)));
            }
        }

        for (key, value) in document.entries {
            let value = match value {
                RawValue::Name(name) => NameValue::DisplayName(name),
                RawValue::Names(_) if table.id.kind != TableKind::TimeZone => {
                    return Err(NamesError::invalid_table(
                        &table.id,
                        format!("`{key}` must be a string"),
                    ));
                }
                RawValue::Names(names) => {
                    NameValue::ZoneNames(Arc::new(table.zone_names_from(names, &key)?))
                }
            };
            table.insert(key, value);
        }

        tracing::debug!(
            table = %table.id,
            entries = table.entries.len(),
            shadowed = table.shadowed.len(),
            "built name table"
        );
        Ok(table)
    }

    fn zone_names_from(&self, names: Vec<String>, owner: &str) -> Result<ZoneNames> {
        let len = names.len();
        let names: [String; 6] = names.try_into().map_err(|_| {
            NamesError::invalid_table(
                &self.id,
                format!("`{owner}` must have 6 zone names, found {len}"),
            )
        })?;
        Ok(ZoneNames::new(names))
    }

    fn insert(&mut self, key: String, value: NameValue) {
        if self.entries.insert(key.clone(), value).is_some() {
            self.shadowed.push(key);
        }
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    pub fn locale(&self) -> &LocaleTag {
        &self.id.locale
    }

    pub fn kind(&self) -> TableKind {
        self.id.kind
    }

    pub fn get(&self, key: &str) -> Option<&NameValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The plain display string stored under `key`, if it holds one.
    pub fn display_name(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(NameValue::as_display_name)
    }

    /// The zone name set stored under `key`, if it holds one.
    pub fn zone_names(&self, key: &str) -> Option<&ZoneNames> {
        self.get(key).and_then(NameValue::as_zone_names)
    }

    /// All pairs of the table, in no particular order.
    ///
    /// Each call starts a fresh enumeration.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &NameValue)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that were defined more than once in the document.
    pub fn shadowed_keys(&self) -> &[String] {
        &self.shadowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn id(kind: TableKind, locale: &str) -> TableId {
        TableId::new(kind, locale.parse().unwrap())
    }

    const DSB_CURRENCY: &str = r#"
[entries]
JPY = "¥"
jpy = "japański jen"
eur = "euro"
"#;

    const TIMEZONE: &str = r#"
[metazones.Japan]
names = ["Japan Standard Time", "JST", "Japan Summer Time", "JDT", "Japan Time", "JT"]
zones = ["Asia/Tokyo", "Japan"]

[entries]
"timezone.excity.Asia/Tokyo" = "Tokyo"
UTC = ["Coordinated Universal Time", "UTC", "Coordinated Universal Time", "UTC", "Coordinated Universal Time", "UTC"]
"#;

    #[test]
    fn test_case_sensitive_keys() {
        let table = NameTable::parse(id(TableKind::Currency, "dsb"), DSB_CURRENCY).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.display_name("JPY"), Some("¥"));
        assert_eq!(table.display_name("jpy"), Some("japański jen"));
        assert_eq!(table.get("Jpy"), None);
        assert_eq!(table.get("usd"), None);
        assert!(!table.contains_key(""));
        assert!(table.shadowed_keys().is_empty());
    }

    #[test]
    fn test_entries_restartable() {
        let table = NameTable::parse(id(TableKind::Currency, "dsb"), DSB_CURRENCY).unwrap();
        let mut first = table.entries().map(|(k, _)| k).collect::<Vec<_>>();
        let mut second = table.keys().collect::<Vec<_>>();
        first.sort_unstable();
        second.sort_unstable();
        assert_eq!(first, vec!["JPY", "eur", "jpy"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_metazone_sharing() {
        let table = NameTable::parse(id(TableKind::TimeZone, "en"), TIMEZONE).unwrap();
        assert_eq!(table.len(), 4);

        let (Some(NameValue::ZoneNames(tokyo)), Some(NameValue::ZoneNames(japan))) =
            (table.get("Asia/Tokyo"), table.get("Japan"))
        else {
            panic!("expected zone names");
        };
        assert!(Arc::ptr_eq(tokyo, japan));
        assert_eq!(
            tokyo.as_array(),
            &[
                "Japan Standard Time",
                "JST",
                "Japan Summer Time",
                "JDT",
                "Japan Time",
                "JT"
            ]
            .map(String::from)
        );

        assert_eq!(
            table.display_name("timezone.excity.Asia/Tokyo"),
            Some("Tokyo")
        );
        assert_eq!(
            table.zone_names("UTC").map(ZoneNames::short_generic),
            Some("UTC")
        );
        assert_eq!(table.zone_names("timezone.excity.Asia/Tokyo"), None);
    }

    #[test]
    fn test_last_definition_wins() {
        let text = r#"
[metazones.Alpha]
names = ["a", "b", "c", "d", "e", "f"]
zones = ["Zone/One", "Zone/Two"]

[metazones.Beta]
names = ["1", "2", "3", "4", "5", "6"]
zones = ["Zone/Two"]

[entries]
"Zone/One" = "overridden"
"#;
        let table = NameTable::parse(id(TableKind::TimeZone, "en"), text).unwrap();
        assert_eq!(table.display_name("Zone/One"), Some("overridden"));
        assert_eq!(
            table.zone_names("Zone/Two").map(ZoneNames::long_standard),
            Some("1")
        );
        let mut shadowed = table.shadowed_keys().to_vec();
        shadowed.sort();
        assert_eq!(shadowed, vec!["Zone/One", "Zone/Two"]);
    }

    #[test]
    fn test_values_kept_verbatim() {
        let text = "[entries]\nUS = \" Mílahaŋska Tȟamákȟočhe \"\n";
        let table = NameTable::parse(id(TableKind::Locale, "lkt"), text).unwrap();
        assert_eq!(table.display_name("US"), Some(" Mílahaŋska Tȟamákȟočhe "));
    }

    #[test]
    fn test_empty_document() {
        let table = NameTable::parse(id(TableKind::Locale, "agq"), "").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.entries().count(), 0);
    }

    #[test_case(TableKind::Currency, "[metazones.X]\nnames = []\nzones = []\n"; "metazone outside timezone")]
    #[test_case(TableKind::Locale, "[entries]\nUS = [\"a\", \"b\", \"c\", \"d\", \"e\", \"f\"]\n"; "array outside timezone")]
    #[test_case(TableKind::TimeZone, "[entries]\nUTC = [\"a\", \"b\"]\n"; "short zone names")]
    #[test_case(TableKind::TimeZone, "[metazones.X]\nnames = [\"a\"]\nzones = [\"Etc/X\"]\n"; "short metazone names")]
    #[test_case(TableKind::Currency, "[entries]\neur = \"a\"\neur = \"b\"\n"; "duplicate key")]
    #[test_case(TableKind::Currency, "[names]\neur = \"a\"\n"; "unknown section")]
    #[test_case(TableKind::Currency, "[entries]\neur = 1\n"; "non string value")]
    fn test_invalid_document(kind: TableKind, text: &str) {
        let err = NameTable::parse(id(kind, "en"), text).unwrap_err();
        assert!(matches!(err, NamesError::InvalidTable { .. }), "{err}");
    }

    #[test_case("currency", TableKind::Currency)]
    #[test_case("Locale", TableKind::Locale)]
    #[test_case("TIMEZONE", TableKind::TimeZone)]
    fn test_table_kind_from_str(input: &str, expected: TableKind) {
        assert_eq!(input.parse::<TableKind>().unwrap(), expected);
    }

    #[test]
    fn test_table_id() {
        let id = id(TableKind::TimeZone, "en-au");
        assert_eq!(id.to_string(), "timezone/en_AU");
        assert_eq!(id.file_path(), "timezone/en_AU.toml");
        assert!("zones".parse::<TableKind>().is_err());
    }
}
