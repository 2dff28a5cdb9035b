use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::clean_item;

/// Characters kept as the title of a suggestion that has no `title: description` split.
pub const UNTITLED_PREFIX_CHARS: usize = 30;

/// Fixed-shape result of parsing an AI critique.
///
/// Field names are camelCase on the wire to match what the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredCritique {
    pub completeness_score: u32,
    pub skills_match: SkillsMatch,
    pub ats_score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_suggestions: ImprovementSuggestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsMatch {
    pub technical: u32,
    pub soft: u32,
    pub keywords: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementSuggestions {
    pub high_priority: Vec<Suggestion>,
    pub medium_priority: Vec<Suggestion>,
    pub low_priority: Vec<Suggestion>,
}

impl ImprovementSuggestions {
    pub fn len(&self) -> usize {
        self.high_priority.len() + self.medium_priority.len() + self.low_priority.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
}

impl Suggestion {
    /// Splits `Title: description` at the first colon, dropping bold markers.
    ///
    /// Without a colon (or with an empty half) the title is the first
    /// 30 characters and the description is the whole line.
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        let (title, description) = match line.split_once(':') {
            Some((title, description)) => (clean_item(title), clean_item(description)),
            None => ("", ""),
        };

        let title = if title.is_empty() {
            let prefix: String = line.chars().take(UNTITLED_PREFIX_CHARS).collect();
            prefix.trim_end().to_string()
        } else {
            title.to_string()
        };
        let description = if description.is_empty() {
            line.to_string()
        } else {
            description.to_string()
        };

        Self { title, description }
    }
}

/// The critique could not be read as text at all.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("critique is not valid UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),
}
