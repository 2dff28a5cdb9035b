/// Critique used when the model call fails, so an upload still gets a
/// fully populated analysis. Records built from it are tagged
/// `CritiqueSource::Fallback`.
pub const FALLBACK_CRITIQUE: &str = "
Resume Analysis

Scores:
- Completeness: 72/100
- Technical Skills: 78/100
- Soft Skills: 65/100
- Keywords: 58/100
- ATS Compatibility: 68/100

Strengths:
1. Strong technical background with relevant programming languages and frameworks
2. Clear chronological work history with specific dates
3. Education credentials are well presented
4. Contact information is complete and professional
5. Good organization of sections with clear headings

Weaknesses:
1. Work experience lacks quantifiable achievements and metrics
2. Professional summary is too generic and doesn't highlight unique value proposition
3. Missing industry-specific keywords that would improve ATS compatibility
4. Soft skills are mentioned but not demonstrated with examples
5. No mention of certifications or professional development

Suggestions:
1. Add quantifiable achievements: Include specific metrics and results for each role (e.g., \"Increased deployment efficiency by 40% through CI/CD implementation\")
2. Enhance your professional summary: Make it more specific to your target role and highlight your unique strengths
3. Incorporate more industry keywords: Add terms from job descriptions in your field, especially for technical roles
4. Demonstrate soft skills: Provide brief examples of how you've applied leadership, communication, etc.
5. Add a certifications section: Include relevant professional certifications or courses
6. Standardize formatting: Ensure consistent date formats and bullet point styles throughout
7. Consider condensing to 2 pages: Focus on most relevant and recent experiences
";
