use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Html,
    Pdf,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Html => f.write_str("html"),
            SourceKind::Pdf => f.write_str("pdf"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(SourceKind::Html),
            "pdf" => Ok(SourceKind::Pdf),
            other => anyhow::bail!("unknown source kind: {other} (expected html or pdf)"),
        }
    }
}

/// A research page or PDF the pipeline pulls reports from.
///
/// `kind` stays a plain string: the backend stores whatever it was given, and
/// one odd row must not break listing the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSource {
    pub name: String,
    pub kind: SourceKind,
    pub url: String,
}

/// Report metadata; the backend never ships raw report text to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    pub published_at: NaiveDateTime,
    pub source_id: i64,
}
