use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use crate::{
    config::Config,
    error::{NamesError, Result},
    locale::LocaleTag,
    source::{DirSource, EmbeddedSource, LayeredSource, TableSource},
    table::{NameTable, TableId, TableKind},
    zone::NameValue,
};

static REGISTRY: OnceCell<Registry> = OnceCell::new();

/// Install the process-wide registry built from `config`.
///
/// Fails with [`NamesError::AlreadyInstalled`] once a registry is installed,
/// whether by an earlier `init` or by [`registry`].
pub fn init(config: &Config) -> Result<&'static Registry> {
    let mut installed = false;
    let registry = REGISTRY.get_or_try_init(|| {
        installed = true;
        Registry::from_config(config)
    })?;
    if installed {
        Ok(registry)
    } else {
        Err(NamesError::AlreadyInstalled)
    }
}

/// The process-wide registry, serving the embedded data unless [`init`]
/// installed another one first.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::embedded)
}

/// Selects name tables by kind and locale, building each one on first use.
///
/// Tables are shared as `Arc<NameTable>`; a table missing from the source is
/// remembered as missing too.
pub struct Registry {
    source: Box<dyn TableSource>,
    tables: DashMap<TableId, Option<Arc<NameTable>>>,
}

impl Registry {
    pub fn new(source: impl TableSource + 'static) -> Self {
        Registry {
            source: Box::new(source),
            tables: DashMap::new(),
        }
    }

    pub fn embedded() -> Self {
        Self::new(EmbeddedSource)
    }

    /// The configured data directory is layered over the embedded data.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut source = LayeredSource::new();
        if let Some(data_dir) = config.data_dir() {
            tracing::debug!(data_dir = %data_dir.display(), "using on-disk name data");
            source = source.with(DirSource::new(data_dir));
        }
        if config.embedded {
            source = source.with(EmbeddedSource);
        }
        if source.is_empty() {
            tracing::warn!("no name data source configured, every lookup will miss");
        }
        Ok(Self::new(source))
    }

    pub fn source(&self) -> &dyn TableSource {
        self.source.as_ref()
    }

    /// The table of `kind` for `locale`, or `None` if the source has none.
    pub fn table(&self, kind: TableKind, locale: &LocaleTag) -> Result<Option<Arc<NameTable>>> {
        let id = TableId::new(kind, locale.clone());
        if let Some(table) = self.tables.get(&id) {
            return Ok(table.clone());
        }

        // The entry lock is held while building, so concurrent callers
        // wait for the first build instead of repeating it.
        let entry = self.tables.entry(id.clone()).or_try_insert_with(
            || -> Result<Option<Arc<NameTable>>> {
                match self.source.read(&id)? {
                    Some(text) => Ok(Some(Arc::new(NameTable::parse(id.clone(), &text)?))),
                    None => {
                        tracing::debug!(table = %id, "name table not found");
                        Ok(None)
                    }
                }
            },
        )?;
        Ok(entry.value().clone())
    }

    /// Point lookup of `key` in the table of `kind` for `locale`.
    pub fn lookup(
        &self,
        kind: TableKind,
        locale: &LocaleTag,
        key: &str,
    ) -> Result<Option<NameValue>> {
        Ok(self
            .table(kind, locale)?
            .and_then(|table| table.get(key).cloned()))
    }

    pub fn locales(&self, kind: TableKind) -> Result<Vec<LocaleTag>> {
        self.source.locales(kind)
    }

    /// Number of tables built (or found missing) so far.
    pub fn cached(&self) -> usize {
        self.tables.len()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("cached", &self.tables.len())
            .finish()
    }
}
