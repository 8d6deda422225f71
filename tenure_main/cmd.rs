use eyre::{Result, WrapErr as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read as _;
use std::path::Path;
use tenure_core::{DateStyle, Interval, format_grouped_with};
use tenure_roster::{Profile, Registry, YearReport};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Yaml,
}

impl Format {
    fn render(self, value: &(impl fmt::Display + Serialize)) -> Result<String> {
        Ok(match self {
            Format::Text => value.to_string(),
            Format::Yaml => serde_yml::to_string(value)?,
        })
    }
}

pub fn load_registry(path: &Path) -> Result<Registry> {
    let yaml = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read registry {}", path.display()))?;
    Registry::from_yaml_str(&yaml).wrap_err_with(|| format!("In {}", path.display()))
}

pub fn profile(
    registry: &Registry,
    member: &str,
    style: &DateStyle,
    format: Format,
) -> Result<String> {
    let member = registry.find_member(member)?;
    format.render(&Profile::build(registry, member.id, style)?)
}

pub fn year(registry: &Registry, year: i32, style: &DateStyle, format: Format) -> Result<String> {
    format.render(&YearReport::build(registry, year, style)?)
}

/// Grouping key of a merge entry. YAML keys may be plain numbers or strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Key {
    Number(i64),
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Number(n) => write!(f, "{n}"),
            Key::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
struct Entry {
    key: Key,
    #[serde(flatten)]
    tenure: Interval,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Merged {
    pub key: Key,
    pub durations: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct MergedList(pub Vec<Merged>);

impl fmt::Display for MergedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for merged in &self.0 {
            writeln!(f, "{}: {}", merged.key, merged.durations)?;
        }
        Ok(())
    }
}

/// Merges a YAML list of `{key, begin, end?}` entries, keys in order of first appearance.
pub fn merge_entries(yaml: &str, style: &DateStyle) -> Result<MergedList> {
    let entries: Vec<Entry> = if yaml.trim().is_empty() {
        Vec::new()
    } else {
        serde_yml::from_str(yaml).wrap_err("Expected a list of {key, begin, end} entries")?
    };
    tracing::debug!(entries = entries.len(), "Merging intervals");

    let merged = format_grouped_with(entries.into_iter().map(|e| (e.key, e.tenure)), style)
        .into_iter()
        .map(|(key, durations)| Merged { key, durations })
        .collect();
    Ok(MergedList(merged))
}

pub fn merge(file: Option<&Path>, style: &DateStyle, format: Format) -> Result<String> {
    let yaml = match file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut yaml = String::new();
            std::io::stdin().read_to_string(&mut yaml).wrap_err("Failed to read stdin")?;
            yaml
        }
    };
    format.render(&merge_entries(&yaml, style)?)
}
