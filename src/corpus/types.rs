//! Corpus Data Types
//!
//! The corpus document stores platforms as free-form strings. Analysis works on
//! `Comment`, whose platform is one of the recognized `Platform` keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The platform a comment was collected from. Also the partition key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Facebook, Platform::Instagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Platform::Twitter),
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            other => Err(anyhow::anyhow!("Unknown platform: {}", other)),
        }
    }
}

/// A record exactly as stored in the corpus document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusRecord {
    pub id: u64,
    pub platform: String,
    pub text: String,
}

/// The on-disk corpus document: `{"comments": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub comments: Vec<CorpusRecord>,
}

/// A comment on a recognized platform. This is also the shape sent to workers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub platform: Platform,
    pub text: String,
}

impl Comment {
    pub fn new(id: u64, platform: Platform, text: impl Into<String>) -> Self {
        Self {
            id,
            platform,
            text: text.into(),
        }
    }
}
