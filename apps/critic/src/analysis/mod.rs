//! Analysis pipeline: resume text → model critique → `AnalysisRecord`.
//!
//! A failed model call does not fail the analysis. The canned fallback
//! critique is parsed instead and the record is tagged as such.

pub mod fallback;
pub mod model;
pub mod record;

use std::path::Path;

use anyhow::Context;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::critique::{CritiqueParser, StructuredCritique};
use crate::errors::AppError;
use crate::extract::{extract_resume, ResumeSections};
use fallback::FALLBACK_CRITIQUE;
use model::CritiqueModel;
use record::{AnalysisRecord, CritiqueSource};

/// Output of `analyze_file`.
#[derive(Debug, Serialize)]
pub struct ResumeReport {
    pub file: String,
    pub has_photo: bool,
    pub sections: ResumeSections,
    pub analysis: AnalysisRecord,
}

/// Critiques already extracted resume text and parses the result.
///
/// `make_rng` is only called once the model has answered, so no RNG is
/// held across the await.
pub async fn analyze_resume<M, R, F>(
    resume_text: &str,
    model: &M,
    parser: &CritiqueParser,
    make_rng: F,
) -> Result<AnalysisRecord, AppError>
where
    M: CritiqueModel + ?Sized,
    R: Rng,
    F: FnOnce() -> R,
{
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume text cannot be empty".to_string(),
        ));
    }

    let (ai_response, source) = match model.critique(resume_text).await {
        Ok(text) => (text, CritiqueSource::Model),
        Err(e) => {
            warn!("Critique model failed, using fallback critique: {e}");
            (FALLBACK_CRITIQUE.to_string(), CritiqueSource::Fallback)
        }
    };

    Ok(build_record(ai_response, source, parser, make_rng))
}

fn build_record<R: Rng>(
    ai_response: String,
    source: CritiqueSource,
    parser: &CritiqueParser,
    make_rng: impl FnOnce() -> R,
) -> AnalysisRecord {
    let critique = parser.parse(&ai_response, &mut make_rng());
    let record = AnalysisRecord::new(critique, ai_response, source);

    info!(
        analysis_id = %record.id,
        source = ?record.source,
        completeness = record.completeness_score,
        ats = record.ats_compatibility_score,
        "Resume analysis complete"
    );

    record
}

/// Extracts a resume file and analyses it.
pub async fn analyze_file<M, R, F>(
    path: &Path,
    model: &M,
    parser: &CritiqueParser,
    make_rng: F,
) -> Result<ResumeReport, AppError>
where
    M: CritiqueModel + ?Sized,
    R: Rng,
    F: FnOnce() -> R,
{
    let resume = extract_resume(path)?;
    let analysis = analyze_resume(&resume.text, model, parser, make_rng).await?;

    Ok(ResumeReport {
        file: path.display().to_string(),
        has_photo: resume.has_photo,
        sections: resume.sections,
        analysis,
    })
}

/// Parses a critique saved on disk without calling the model.
pub fn parse_critique_file<R: Rng>(
    path: &Path,
    parser: &CritiqueParser,
    rng: &mut R,
) -> Result<StructuredCritique, AppError> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read critique file {}", path.display()))?;
    Ok(parser.parse_bytes(&bytes, rng)?)
}
