// Prompts for the resume critique call.
// The parser depends on the section names and metric labels requested here.

/// System prompt for resume critique.
pub const CRITIQUE_SYSTEM: &str = "You are an expert resume analyzer for the South African job market. \
    Analyze the resume text and provide detailed feedback on its strengths, weaknesses, \
    and suggestions for improvement. Focus on ATS compatibility, content quality, and formatting. \
    Include numerical scores (0-100) for: completeness, technical skills, soft skills, keywords, \
    and ATS compatibility.";

/// Critique prompt template. Replace `{resume_text}` before sending.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = "Please analyze this resume and provide a detailed assessment \
with scores and specific improvement suggestions. Format your response with clear sections for \
Strengths, Weaknesses, and Suggestions. Include numerical scores (0-100) for completeness, \
technical skills, soft skills, keywords, and ATS compatibility.

RESUME TEXT:
{resume_text}";

pub fn critique_prompt(resume_text: &str) -> String {
    CRITIQUE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
