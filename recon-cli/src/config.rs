use anyhow::{Context, Result, bail};
use recon_core::NormalizerConfig;
use recon_ingest::{CsvOptions, SourceKind};
use recon_ledger::{EntryColumns, TableSchema};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalizer: NormalizerConfig,
    pub cashbook: SourceSection,
    pub bank: SourceSection,
}

/// How to read and clean one side of the reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Single-character field delimiter.
    pub delimiter: char,
    pub infer_numbers: bool,
    /// Header cell used to skip banner rows above the real header.
    pub header_hint: Option<String>,
    pub schema: TableSchema,
    /// Entry roles; derived from the schema when absent.
    pub entries: Option<EntryColumns>,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            delimiter: ',',
            infer_numbers: true,
            header_hint: None,
            schema: TableSchema::default(),
            entries: None,
        }
    }
}

impl SourceSection {
    pub fn csv_options(&self) -> Result<CsvOptions> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        let mut opts = CsvOptions::default()
            .with_delimiter(self.delimiter as u8)
            .with_infer_numbers(self.infer_numbers);
        if let Some(hint) = &self.header_hint {
            opts = opts.with_header_hint(hint.clone());
        }
        Ok(opts)
    }

    pub fn entry_columns(&self) -> EntryColumns {
        self.entries
            .clone()
            .unwrap_or_else(|| EntryColumns::from_schema(&self.schema))
    }
}

impl Config {
    pub fn section(&self, source: SourceKind) -> &SourceSection {
        match source {
            SourceKind::Cashbook => &self.cashbook,
            SourceKind::Bank => &self.bank,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".recon").join("config.toml"))
}

/// Load from `explicit` if given, else `~/.recon/config.toml`, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => {
            if !p.exists() {
                bail!("config not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = config_path()?;
            if !p.exists() {
                tracing::debug!(path = %p.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

/// Write a default config to `explicit`, else `~/.recon/config.toml`.
/// An existing file is left untouched. Returns the path and whether it was written.
pub fn init_config(explicit: Option<&Path>) -> Result<(PathBuf, bool)> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        return Ok((p, false));
    }
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = render_config(&Config::default())?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    tracing::info!(path = %p.display(), "wrote default config");
    Ok((p, true))
}
