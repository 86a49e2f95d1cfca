use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The six display strings CLDR keeps for a time zone or metazone.
///
/// Slots are ordered `[long standard, short standard, long daylight,
/// short daylight, long generic, short generic]`, which is also the
/// array layout used in the data files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneNames([String; 6]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneNameStyle {
    Standard,
    Daylight,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneNameLength {
    Long,
    Short,
}

impl ZoneNames {
    pub fn new(names: [String; 6]) -> Self {
        ZoneNames(names)
    }

    pub fn name(&self, style: ZoneNameStyle, length: ZoneNameLength) -> &str {
        let row = match style {
            ZoneNameStyle::Standard => 0,
            ZoneNameStyle::Daylight => 2,
            ZoneNameStyle::Generic => 4,
        };
        let column = match length {
            ZoneNameLength::Long => 0,
            ZoneNameLength::Short => 1,
        };
        &self.0[row + column]
    }

    pub fn long_standard(&self) -> &str {
        &self.0[0]
    }

    pub fn short_standard(&self) -> &str {
        &self.0[1]
    }

    pub fn long_daylight(&self) -> &str {
        &self.0[2]
    }

    pub fn short_daylight(&self) -> &str {
        &self.0[3]
    }

    pub fn long_generic(&self) -> &str {
        &self.0[4]
    }

    pub fn short_generic(&self) -> &str {
        &self.0[5]
    }

    pub fn as_array(&self) -> &[String; 6] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// A value slot of a [`NameTable`](crate::NameTable).
///
/// Currency and locale tables only ever hold [`NameValue::DisplayName`];
/// time-zone tables hold both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NameValue {
    DisplayName(String),
    // Zones of one metazone share the same allocation.
    ZoneNames(Arc<ZoneNames>),
}

impl NameValue {
    pub fn as_display_name(&self) -> Option<&str> {
        match self {
            NameValue::DisplayName(name) => Some(name),
            NameValue::ZoneNames(_) => None,
        }
    }

    pub fn as_zone_names(&self) -> Option<&ZoneNames> {
        match self {
            NameValue::DisplayName(_) => None,
            NameValue::ZoneNames(names) => Some(names),
        }
    }

    /// All strings of this value, in slot order.
    pub fn strings(&self) -> Vec<&str> {
        match self {
            NameValue::DisplayName(name) => vec![name.as_str()],
            NameValue::ZoneNames(names) => names.iter().collect(),
        }
    }
}

impl From<&str> for NameValue {
    fn from(name: &str) -> Self {
        NameValue::DisplayName(name.to_owned())
    }
}

impl From<ZoneNames> for NameValue {
    fn from(names: ZoneNames) -> Self {
        NameValue::ZoneNames(Arc::new(names))
    }
}
