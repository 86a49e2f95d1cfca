use std::{
    borrow::Cow,
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use include_dir::{include_dir, Dir};
use walkdir::WalkDir;

use crate::{
    error::{NamesError, Result},
    locale::LocaleTag,
    table::{TableId, TableKind},
};

static DATA_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/data");

/// Where name table documents come from.
///
/// Documents are laid out as `<kind>/<locale>.toml`, see [`TableId::file_path`].
pub trait TableSource: Send + Sync {
    /// Read the raw document of a table, `None` if this source doesn't have it.
    fn read(&self, id: &TableId) -> Result<Option<Cow<'_, str>>>;

    /// Locales this source has a table of `kind` for, sorted.
    fn locales(&self, kind: TableKind) -> Result<Vec<LocaleTag>>;
}

fn locale_from_file_name(path: &Path) -> Option<LocaleTag> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
        tracing::warn!(path = %path.display(), "skipping non-toml file in name data");
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    match stem.parse::<LocaleTag>() {
        // Only canonical file names are reachable through `read`.
        Ok(tag) if tag.as_str() == stem => Some(tag),
        _ => {
            tracing::warn!(path = %path.display(), "skipping name data file with an invalid locale tag");
            None
        }
    }
}

/// The name data compiled into the crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSource;

impl TableSource for EmbeddedSource {
    fn read(&self, id: &TableId) -> Result<Option<Cow<'_, str>>> {
        let path = id.file_path();
        match DATA_DIR.get_file(&path) {
            Some(file) => file
                .contents_utf8()
                .map(|text| Some(Cow::Borrowed(text)))
                .ok_or(NamesError::NotUtf8 { path: path.into() }),
            None => Ok(None),
        }
    }

    fn locales(&self, kind: TableKind) -> Result<Vec<LocaleTag>> {
        let locales = DATA_DIR
            .get_dir(kind.as_str())
            .map(|dir| {
                dir.files()
                    .filter_map(|file| locale_from_file_name(file.path()))
                    .collect::<BTreeSet<_>>()
            })
            .unwrap_or_default();
        Ok(locales.into_iter().collect())
    }
}

/// Name data read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }
}

impl TableSource for DirSource {
    fn read(&self, id: &TableId) -> Result<Option<Cow<'_, str>>> {
        let path = self.root.join(id.file_path());
        match fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(|text| Some(Cow::Owned(text)))
                .map_err(|_| NamesError::NotUtf8 { path }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(NamesError::io(path, err)),
        }
    }

    fn locales(&self, kind: TableKind) -> Result<Vec<LocaleTag>> {
        let dir = self.root.join(kind.as_str());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut locales = BTreeSet::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(&dir).to_path_buf();
                NamesError::io(path, err.into())
            })?;
            if entry.file_type().is_file() {
                locales.extend(locale_from_file_name(entry.path()));
            }
        }
        Ok(locales.into_iter().collect())
    }
}

/// Several sources consulted in order; the first one that has a table wins.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn TableSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl TableSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl TableSource for LayeredSource {
    fn read(&self, id: &TableId) -> Result<Option<Cow<'_, str>>> {
        for layer in &self.layers {
            if let Some(text) = layer.read(id)? {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

    fn locales(&self, kind: TableKind) -> Result<Vec<LocaleTag>> {
        let mut locales = BTreeSet::new();
        for layer in &self.layers {
            locales.extend(layer.locales(kind)?);
        }
        Ok(locales.into_iter().collect())
    }
}
