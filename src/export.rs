use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::Result,
    locale::LocaleTag,
    table::{NameTable, TableKind},
    zone::NameValue,
};

#[derive(Serialize)]
struct ExportedTable<'a> {
    locale: &'a LocaleTag,
    kind: TableKind,
    entries: BTreeMap<&'a str, &'a NameValue>,
}

/// Export a table as pretty printed JSON, entries sorted by key.
pub fn to_json(table: &NameTable) -> Result<String> {
    let exported = ExportedTable {
        locale: table.locale(),
        kind: table.kind(),
        entries: table.entries().collect(),
    };
    Ok(serde_json::to_string_pretty(&exported)?)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::table::TableId;

    #[test]
    fn test_export_currency() {
        let table = NameTable::parse(
            TableId::new(TableKind::Currency, "dsb".parse().unwrap()),
            "[entries]\njpy = \"japański jen\"\nJPY = \"¥\"\n",
        )
        .unwrap();
        let json = to_json(&table).unwrap();
        assert!(json.find("\"JPY\"").unwrap() < json.find("\"jpy\"").unwrap());
        assert_eq!(
            serde_json::from_str::<Value>(&json).unwrap(),
            json!({
                "locale": "dsb",
                "kind": "currency",
                "entries": { "JPY": "¥", "jpy": "japański jen" },
            })
        );
    }

    #[test]
    fn test_export_timezone() {
        let table = NameTable::parse(
            TableId::new(TableKind::TimeZone, "en_AU".parse().unwrap()),
            r#"
[metazones.Australia_Western]
names = ["Australian Western Standard Time", "AWST", "Australian Western Daylight Time", "AWDT", "Australian Western Time", "AWT"]
zones = ["Australia/Perth"]

[entries]
"timezone.excity.Australia/Perth" = "Perth"
"#,
        )
        .unwrap();
        let json: Value = serde_json::from_str(&to_json(&table).unwrap()).unwrap();
        assert_eq!(json["kind"], "timezone");
        assert_eq!(json["locale"], "en_AU");
        assert_eq!(json["entries"]["Australia/Perth"][1], "AWST");
        assert_eq!(json["entries"]["timezone.excity.Australia/Perth"], "Perth");
    }
}
