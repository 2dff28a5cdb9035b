use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::critique::{ImprovementSuggestions, StructuredCritique};

/// Where the critique text behind a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CritiqueSource {
    Model,
    Fallback,
}

/// One resume analysis, in the shape the analyses table stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub completeness_score: u32,
    pub technical_skills_score: u32,
    pub soft_skills_score: u32,
    pub keywords_score: u32,
    pub ats_compatibility_score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_suggestions: ImprovementSuggestions,
    /// The critique text the record was parsed from.
    pub ai_response: String,
    pub source: CritiqueSource,
}

impl AnalysisRecord {
    pub fn new(critique: StructuredCritique, ai_response: String, source: CritiqueSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            completeness_score: critique.completeness_score,
            technical_skills_score: critique.skills_match.technical,
            soft_skills_score: critique.skills_match.soft,
            keywords_score: critique.skills_match.keywords,
            ats_compatibility_score: critique.ats_score,
            strengths: critique.strengths,
            weaknesses: critique.weaknesses,
            improvement_suggestions: critique.improvement_suggestions,
            ai_response,
            source,
        }
    }
}
