use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use cldr_names::{export, lint, Config, LocaleTag, NameValue, Registry, TableKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cldr-names")]
#[command(about = "Look up localized currency, locale and time-zone names.", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), "\n", env!("BUILD_INFO")))]
struct Cli {
    /// The config file. Default to `cldr-names.toml` in the current directory, if any.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Look up a single name.
    Get {
        /// The table kind: `currency`, `locale` or `timezone`.
        kind: TableKind,
        /// The locale tag, such as `pt_PT` or `zh-Hant-HK`.
        locale: LocaleTag,
        /// The key, such as `eur`, `US` or `Asia/Tokyo`.
        key: String,
        /// Print the key itself when no name is found.
        #[arg(long)]
        or_key: bool,
    },
    /// List the locales of a table kind, or the keys of one table.
    List {
        kind: TableKind,
        locale: Option<LocaleTag>,
    },
    /// Export a table as JSON.
    Export { kind: TableKind, locale: LocaleTag },
    /// Check every table for problems.
    Lint,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let registry = cldr_names::init(&config).context("Failed to set up the name registry")?;

    match cli.command {
        Commands::Get {
            kind,
            locale,
            key,
            or_key,
        } => get(registry, kind, &locale, &key, or_key)?
            .iter()
            .for_each(|line| println!("{line}")),
        Commands::List { kind, locale } => list(registry, kind, locale.as_ref())?,
        Commands::Export { kind, locale } => {
            let table = registry
                .table(kind, &locale)?
                .with_context(|| format!("No {kind} names for `{locale}`"))?;
            println!("{}", export::to_json(&table)?);
        }
        Commands::Lint => {
            let report = lint(registry.source())?;
            for issue in &report.issues {
                println!("- {issue}");
            }
            if !report.is_ok() {
                bail!(
                    "Found {} issues in {} tables",
                    report.issues.len(),
                    report.tables
                );
            }
            println!("{} tables checked, no issues found.", report.tables);
        }
    }

    Ok(())
}

// The lines `get` prints, one per zone name slot.
fn get(
    registry: &Registry,
    kind: TableKind,
    locale: &LocaleTag,
    key: &str,
    or_key: bool,
) -> Result<Vec<String>> {
    match registry.lookup(kind, locale, key)? {
        Some(NameValue::DisplayName(name)) => Ok(vec![name]),
        Some(NameValue::ZoneNames(names)) => Ok(names.iter().map(String::from).collect()),
        None if or_key => Ok(vec![key.to_owned()]),
        None => bail!("No {kind} name for `{key}` in `{locale}`"),
    }
}

fn list(registry: &Registry, kind: TableKind, locale: Option<&LocaleTag>) -> Result<()> {
    match locale {
        None => {
            for locale in registry.locales(kind)? {
                println!("{locale}");
            }
        }
        Some(locale) => {
            let table = registry
                .table(kind, locale)?
                .with_context(|| format!("No {kind} names for `{locale}`"))?;
            let mut keys = table.keys().collect::<Vec<_>>();
            keys.sort_unstable();
            keys.iter().for_each(|key| println!("{key}"));
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(Config::FILE_NAME);
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };
    tracing::debug!(config = %path.display(), "loading config");
    Config::load(&path).with_context(|| format!("Failed to load `{}`", path.display()))
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("cldr_names=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(TableKind::Currency, "dsb", "jpy", false, &["japański jen"]; "display name")]
    #[test_case(TableKind::Currency, "dsb", "JPY", true, &["¥"]; "symbol override")]
    #[test_case(TableKind::TimeZone, "en_AU", "Australia/Sydney", false, &[
        "Australian Eastern Standard Time",
        "AEST",
        "Australian Eastern Daylight Time",
        "AEDT",
        "Australian Eastern Time",
        "AET",
    ]; "zone names")]
    #[test_case(TableKind::Currency, "dsb", "xyz", true, &["xyz"]; "missing key shown raw")]
    #[test_case(TableKind::Currency, "xx", "eur", true, &["eur"]; "missing table shown raw")]
    fn test_get_lines(kind: TableKind, locale: &str, key: &str, or_key: bool, expected: &[&str]) {
        let registry = Registry::embedded();
        let lines = get(&registry, kind, &locale.parse().unwrap(), key, or_key).unwrap();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_get_missing_key() {
        let registry = Registry::embedded();
        let err = get(
            &registry,
            TableKind::Currency,
            &"dsb".parse().unwrap(),
            "xyz",
            false,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "No currency name for `xyz` in `dsb`");
    }
}
