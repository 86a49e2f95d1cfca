//! Localized currency, locale and time-zone display names from Unicode CLDR.
//!
//! Each [`NameTable`] holds the names of one [`TableKind`] for one
//! [`LocaleTag`]. Tables are immutable and shared; a [`Registry`] builds them
//! from a [`TableSource`] the first time they are asked for.
//!
//! ```
//! use cldr_names::{registry, TableKind};
//!
//! let agq = registry()
//!     .table(TableKind::Currency, &"agq".parse().unwrap())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(agq.display_name("eur"), Some("Yulù"));
//! assert_eq!(agq.get("xxx"), None);
//! ```
//!
//! Looking up a key that a table doesn't have is not an error. Falling back
//! to a parent locale, or to the key itself, is left to the caller.

mod config;
mod error;
pub mod export;
mod lint;
mod locale;
mod registry;
mod source;
mod table;
mod zone;

pub use config::{Config, DATA_DIR_ENV};
pub use error::{NamesError, Result};
pub use lint::{lint, IssueKind, LintIssue, LintReport};
pub use locale::LocaleTag;
pub use registry::{init, registry, Registry};
pub use source::{DirSource, EmbeddedSource, LayeredSource, TableSource};
pub use table::{NameTable, TableId, TableKind};
pub use zone::{NameValue, ZoneNameLength, ZoneNameStyle, ZoneNames};
