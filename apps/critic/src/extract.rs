//! Resume text extraction: file in, plain text plus coarse section hints out.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::text::{heading, strip_markup};

const MAX_HEADING_WORDS: usize = 3;

const PHOTO_INDICATORS: &[&str] = &[
    "photo",
    "picture",
    "image",
    "portrait",
    "headshot",
    "profile pic",
];

static CONTACT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}|\+\d{1,3}[\s-]?\d{1,14}|\d{3}[\s-]?\d{3}[\s-]?\d{4}",
    )
    .expect("contact pattern is a valid regex")
});

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported resume format '{0}' (expected .pdf, .txt or .md)")]
    UnsupportedFormat(String),

    #[error("failed to read resume: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("resume is not valid UTF-8 text")]
    NotText(#[from] std::string::FromUtf8Error),

    #[error("no text could be extracted from the resume")]
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSections {
    pub summary: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    /// Email addresses and phone numbers, joined with " | ".
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedResume {
    pub text: String,
    pub has_photo: bool,
    pub sections: ResumeSections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeSection {
    Summary,
    Education,
    Experience,
    Skills,
}

impl ResumeSection {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "summary" | "profile" | "objective" | "about" => Some(Self::Summary),
            "education" => Some(Self::Education),
            "experience" | "work" | "employment" => Some(Self::Experience),
            "skills" | "skill" => Some(Self::Skills),
            _ => None,
        }
    }
}

/// Reads a resume from disk. PDFs go through `pdf_extract`; `.txt` and `.md` are read as UTF-8.
pub fn extract_resume(path: &Path) -> Result<ExtractedResume, ExtractError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => extract_text_from_pdf(&std::fs::read(path)?)?,
        "txt" | "md" => String::from_utf8(std::fs::read(path)?)?,
        _ => return Err(ExtractError::UnsupportedFormat(path.display().to_string())),
    };

    info!(path = %path.display(), chars = text.len(), "Extracted resume text");
    from_text(text)
}

pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Builds an `ExtractedResume` from already extracted text.
pub fn from_text(text: String) -> Result<ExtractedResume, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    let sections = detect_sections(&text);
    let has_photo = has_photo(&text);
    debug!(?sections, has_photo, "Detected resume sections");

    Ok(ExtractedResume {
        text,
        has_photo,
        sections,
    })
}

/// Splits resume text on its summary, education, experience and skills headings.
///
/// A heading's body runs to the next recognised heading. Repeated headings
/// append to the same section.
pub fn detect_sections(text: &str) -> ResumeSections {
    let mut bodies: [Vec<&str>; 4] = Default::default();
    let mut current: Option<ResumeSection> = None;

    for line in text.lines() {
        let marked = strip_markup(line);
        let section = heading(marked, MAX_HEADING_WORDS).and_then(|h| {
            let section = ResumeSection::from_word(h.first_word())
                .or_else(|| ResumeSection::from_word(h.last_word()))?;
            Some((section, h.rest))
        });

        match section {
            Some((section, rest)) => {
                current = Some(section);
                bodies[section as usize].extend(rest);
            }
            None => {
                if let Some(section) = current {
                    let line = line.trim();
                    if !line.is_empty() {
                        bodies[section as usize].push(line);
                    }
                }
            }
        }
    }

    let join = |lines: &Vec<&str>| Some(lines.join("\n")).filter(|body| !body.is_empty());

    ResumeSections {
        summary: join(&bodies[ResumeSection::Summary as usize]),
        education: join(&bodies[ResumeSection::Education as usize]),
        experience: join(&bodies[ResumeSection::Experience as usize]),
        skills: join(&bodies[ResumeSection::Skills as usize]),
        contact: contact_details(text),
    }
}

/// Email addresses and phone numbers found anywhere in the text.
pub fn contact_details(text: &str) -> Option<String> {
    let found: Vec<&str> = CONTACT_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
    if found.is_empty() {
        None
    } else {
        Some(found.join(" | "))
    }
}

/// Text-only hint; embedded images are not inspected.
pub fn has_photo(text: &str) -> bool {
    let lower = text.to_lowercase();
    PHOTO_INDICATORS.iter().any(|w| lower.contains(w))
}
