use std::fmt;

use rayon::prelude::*;

use crate::{
    error::Result,
    source::TableSource,
    table::{NameTable, TableId, TableKind},
    zone::NameValue,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The document couldn't be read or parsed.
    Invalid(String),
    /// The key was defined more than once; the last definition is served.
    Shadowed(String),
    /// The key maps to an empty or whitespace-only name.
    BlankValue(String),
    /// The key doesn't look like a key of this table kind.
    UnexpectedKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub table: TableId,
    pub kind: IssueKind,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Invalid(reason) => write!(f, "{}: {reason}", self.table),
            IssueKind::Shadowed(key) => {
                write!(f, "{}: `{key}` is defined more than once", self.table)
            }
            IssueKind::BlankValue(key) => write!(f, "{}: `{key}` has a blank name", self.table),
            IssueKind::UnexpectedKey(key) => write!(
                f,
                "{}: `{key}` is not a valid {} key",
                self.table, self.table.kind
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct LintReport {
    pub tables: usize,
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Lint every table `source` provides.
///
/// Locale listing failures are returned as errors; per-table problems are
/// collected into the report.
pub fn lint(source: &dyn TableSource) -> Result<LintReport> {
    let mut ids = Vec::new();
    for kind in TableKind::ALL {
        ids.extend(
            source
                .locales(kind)?
                .into_iter()
                .map(|locale| TableId::new(kind, locale)),
        );
    }

    let mut issues = ids
        .par_iter()
        .flat_map_iter(|id| lint_table(source, id))
        .collect::<Vec<_>>();
    issues.sort_by(|a, b| a.table.cmp(&b.table));

    Ok(LintReport {
        tables: ids.len(),
        issues,
    })
}

fn lint_table(source: &dyn TableSource, id: &TableId) -> Vec<LintIssue> {
    let issue = |kind| LintIssue {
        table: id.clone(),
        kind,
    };

    let table = match source.read(id) {
        Ok(Some(text)) => NameTable::parse(id.clone(), &text),
        Ok(None) => return vec![issue(IssueKind::Invalid("listed but unreadable".into()))],
        Err(err) => Err(err),
    };
    let table = match table {
        Ok(table) => table,
        Err(err) => return vec![issue(IssueKind::Invalid(err.to_string()))],
    };

    let mut issues = table
        .shadowed_keys()
        .iter()
        .map(|key| issue(IssueKind::Shadowed(key.clone())))
        .collect::<Vec<_>>();

    let mut entries = table.entries().collect::<Vec<_>>();
    entries.sort_unstable_by_key(|(key, _)| *key);
    for (key, value) in entries {
        if !is_expected_key(id.kind, key) {
            issues.push(issue(IssueKind::UnexpectedKey(key.to_owned())));
        }
        if is_blank(value) {
            issues.push(issue(IssueKind::BlankValue(key.to_owned())));
        }
    }
    issues
}

fn is_expected_key(kind: TableKind, key: &str) -> bool {
    match kind {
        TableKind::Currency => key.len() == 3 && key.bytes().all(|b| b.is_ascii_alphabetic()),
        TableKind::Locale => {
            !key.is_empty()
                && key
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
        }
        TableKind::TimeZone => !key.is_empty() && !key.chars().any(char::is_whitespace),
    }
}

fn is_blank(value: &NameValue) -> bool {
    match value {
        NameValue::DisplayName(name) => name.trim().is_empty(),
        // A zone name set must at least have its long standard name.
        NameValue::ZoneNames(names) => names.long_standard().trim().is_empty(),
    }
}
