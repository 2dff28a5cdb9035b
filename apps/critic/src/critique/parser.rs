//! Critique Parser: turns a free-text AI critique into a `StructuredCritique`.
//!
//! Parsing never fails. Missing or unreadable scores become fallback
//! scores drawn from the caller's RNG, and missing sections become empty
//! lists. Only input that is not text at all is rejected, by `parse_bytes`.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::grammar::{scan, Line, Metric, Scan, SectionKind};
use super::models::{ParseFailure, SkillsMatch, StructuredCritique};
use super::tiering::{assign_tiers, positional_tiers, TierPolicy};
use crate::text::split_items;

/// Placeholder scores keep the dashboard non-null; they carry no signal.
pub const FALLBACK_SCORE_RANGE: RangeInclusive<u32> = 50..=79;
pub const MAX_SCORE: u32 = 100;
/// Strengths and weaknesses keep at most this many items.
pub const MAX_LIST_ITEMS: usize = 5;

/// What to do with a score found in the text outside 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Keep the number exactly as the model wrote it.
    #[default]
    PassThrough,
    /// Cap at 100.
    Clamp,
}

impl OutOfRangePolicy {
    pub fn apply(self, score: u32) -> u32 {
        match self {
            OutOfRangePolicy::PassThrough => score,
            OutOfRangePolicy::Clamp => score.min(MAX_SCORE),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown score policy '{0}' (expected 'passthrough' or 'clamp')")]
pub struct UnknownPolicy(String);

impl FromStr for OutOfRangePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "pass_through" | "pass-through" => Ok(Self::PassThrough),
            "clamp" => Ok(Self::Clamp),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for OutOfRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutOfRangePolicy::PassThrough => f.write_str("passthrough"),
            OutOfRangePolicy::Clamp => f.write_str("clamp"),
        }
    }
}

/// Stateless critique parser. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct CritiqueParser {
    policy: OutOfRangePolicy,
    tiering: TierPolicy,
}

impl Default for CritiqueParser {
    fn default() -> Self {
        Self::new(OutOfRangePolicy::default())
    }
}

impl CritiqueParser {
    pub fn new(policy: OutOfRangePolicy) -> Self {
        Self {
            policy,
            tiering: positional_tiers,
        }
    }

    /// Replaces the suggestion tiering policy.
    pub fn with_tiering(mut self, tiering: TierPolicy) -> Self {
        self.tiering = tiering;
        self
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    /// Parses raw bytes, rejecting input that is not UTF-8 text.
    pub fn parse_bytes<R: Rng>(
        &self,
        raw: &[u8],
        rng: &mut R,
    ) -> Result<StructuredCritique, ParseFailure> {
        let text = std::str::from_utf8(raw)?;
        Ok(self.parse(text, rng))
    }

    /// Parses a critique.
    ///
    /// `rng` is drawn from once per metric that falls back, in the order
    /// completeness, technical, soft, keywords, ats.
    pub fn parse<R: Rng>(&self, raw: &str, rng: &mut R) -> StructuredCritique {
        let scan = scan(raw);

        let completeness_score = self.score(&scan, Metric::Completeness, rng);
        let technical = self.score(&scan, Metric::TechnicalSkills, rng);
        let soft = self.score(&scan, Metric::SoftSkills, rng);
        let keywords = self.score(&scan, Metric::Keywords, rng);
        let ats_score = self.score(&scan, Metric::Ats, rng);

        let Sections {
            mut strengths,
            mut weaknesses,
            suggestions,
        } = Sections::collect(&scan.lines);
        strengths.truncate(MAX_LIST_ITEMS);
        weaknesses.truncate(MAX_LIST_ITEMS);

        StructuredCritique {
            completeness_score,
            skills_match: SkillsMatch {
                technical,
                soft,
                keywords,
            },
            ats_score,
            strengths,
            weaknesses,
            improvement_suggestions: assign_tiers(suggestions, self.tiering),
        }
    }

    fn score<R: Rng>(&self, scan: &Scan<'_>, metric: Metric, rng: &mut R) -> u32 {
        let Some(digits) = scan.metric(metric) else {
            debug!(metric = metric.name(), "score not found in critique, using fallback");
            return fallback_score(rng);
        };

        match digits.parse::<u32>() {
            Ok(score) => {
                debug!(metric = metric.name(), score, "parsed score");
                self.policy.apply(score)
            }
            Err(e) => {
                debug!(metric = metric.name(), digits, "invalid score format ({e}), using fallback");
                fallback_score(rng)
            }
        }
    }
}

fn fallback_score<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(FALLBACK_SCORE_RANGE)
}

/// Section contents in source order, before capping and tiering.
#[derive(Debug, Default)]
struct Sections {
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    suggestions: Vec<String>,
}

impl Sections {
    /// Content before the first header is preamble and is dropped. A
    /// repeated header resumes appending to its section.
    fn collect(lines: &[Line<'_>]) -> Self {
        let mut sections = Sections::default();
        let mut current: Option<SectionKind> = None;

        for line in lines {
            match line {
                Line::Header { kind, inline } => {
                    current = Some(*kind);
                    if let Some(text) = inline {
                        sections.section_mut(*kind).extend(split_items(text));
                    }
                }
                Line::Content(text) => {
                    if let Some(kind) = current {
                        sections.section_mut(kind).extend(split_items(text));
                    }
                }
                Line::Score { .. } | Line::Blank => {}
            }
        }

        sections
    }

    fn section_mut(&mut self, kind: SectionKind) -> &mut Vec<String> {
        match kind {
            SectionKind::Strengths => &mut self.strengths,
            SectionKind::Weaknesses => &mut self.weaknesses,
            SectionKind::Suggestions => &mut self.suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::analysis::fallback::FALLBACK_CRITIQUE;
    use crate::critique::tiering::TierSizes;

    const SAMPLE: &str = "Strengths:\n1. Great formatting\n2. Clear structure\n\
        Weaknesses:\n1. No metrics\n\
        Suggestions:\n1. Add numbers: include metrics\n2. Rewrite summary: be specific\n\
        3. Add keywords: use industry terms\n\
        completeness: 80\ntechnical skills: 70";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn parse(text: &str) -> StructuredCritique {
        CritiqueParser::default().parse(text, &mut rng())
    }

    fn in_fallback_range(score: u32) -> bool {
        FALLBACK_SCORE_RANGE.contains(&score)
    }

    #[test]
    fn test_sample_critique() {
        let c = parse(SAMPLE);
        assert_eq!(c.completeness_score, 80);
        assert_eq!(c.skills_match.technical, 70);
        assert_eq!(c.strengths, vec!["Great formatting", "Clear structure"]);
        assert_eq!(c.weaknesses, vec!["No metrics"]);

        // k = 3: high = ceil(3/3) = 1, medium = floor(3/3) = 1, low = 1
        let s = &c.improvement_suggestions;
        assert_eq!(s.high_priority.len(), 1);
        assert_eq!(s.medium_priority.len(), 1);
        assert_eq!(s.low_priority.len(), 1);
        assert_eq!(s.high_priority[0].title, "Add numbers");
        assert_eq!(s.high_priority[0].description, "include metrics");
        assert_eq!(s.medium_priority[0].title, "Rewrite summary");
        assert_eq!(s.low_priority[0].description, "use industry terms");
    }

    #[test]
    fn test_missing_labels_fall_back_into_range() {
        let c = parse(SAMPLE);
        assert!(in_fallback_range(c.skills_match.soft));
        assert!(in_fallback_range(c.skills_match.keywords));
        assert!(in_fallback_range(c.ats_score));
    }

    #[test]
    fn test_empty_input() {
        let c = parse("");
        for score in [
            c.completeness_score,
            c.skills_match.technical,
            c.skills_match.soft,
            c.skills_match.keywords,
            c.ats_score,
        ] {
            assert!(in_fallback_range(score), "score {score} out of fallback range");
        }
        assert!(c.strengths.is_empty());
        assert!(c.weaknesses.is_empty());
        assert!(c.improvement_suggestions.is_empty());
    }

    #[test]
    fn test_seeded_fallbacks_are_exact() {
        let mut expected_rng = rng();
        let expected: Vec<u32> = (0..5)
            .map(|_| expected_rng.gen_range(FALLBACK_SCORE_RANGE))
            .collect();

        let c = parse("no scores here");
        assert_eq!(
            vec![
                c.completeness_score,
                c.skills_match.technical,
                c.skills_match.soft,
                c.skills_match.keywords,
                c.ats_score,
            ],
            expected
        );
    }

    #[test]
    fn test_only_fallback_metrics_draw() {
        let mut expected_rng = rng();
        let first_draw = expected_rng.gen_range(FALLBACK_SCORE_RANGE);

        // completeness is parsed, so technical takes the first draw
        let c = parse("Completeness: 90");
        assert_eq!(c.completeness_score, 90);
        assert_eq!(c.skills_match.technical, first_draw);
    }

    #[test]
    fn test_same_input_same_seed_is_reproducible() {
        assert_eq!(parse("Strengths: ok"), parse("Strengths: ok"));
    }

    #[test]
    fn test_identical_labels_give_identical_scores() {
        let a = parse("Completeness: 64\nSoft skills: 71\nStrengths:\n- Tidy layout");
        let b = CritiqueParser::default().parse(
            "Overview first.\ncompleteness - 64 / 100\nSOFT SKILLS: 71\n",
            &mut StdRng::seed_from_u64(99),
        );
        assert_eq!(a.completeness_score, b.completeness_score);
        assert_eq!(a.skills_match.soft, b.skills_match.soft);
    }

    #[test]
    fn test_out_of_range_passes_through_by_default() {
        let c = parse("Technical skills: 150");
        assert_eq!(c.skills_match.technical, 150);
    }

    #[test]
    fn test_clamp_policy() {
        let c = CritiqueParser::new(OutOfRangePolicy::Clamp)
            .parse("Technical skills: 150\nATS: 40", &mut rng());
        assert_eq!(c.skills_match.technical, 100);
        assert_eq!(c.ats_score, 40);
    }

    #[test]
    fn test_overflowing_number_falls_back() {
        let c = parse("Completeness: 99999999999999999999");
        assert!(in_fallback_range(c.completeness_score));
    }

    #[test]
    fn test_lists_capped_at_five() {
        let text = "Strengths:\n1. a\n2. b\n3. c\n4. d\n5. e\n6. f\n7. g\nWeaknesses:\n- x";
        let c = parse(text);
        assert_eq!(c.strengths, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(c.weaknesses, vec!["x"]);
    }

    #[test]
    fn test_suggestions_not_capped_before_tiering() {
        let items: String = (1..=9).map(|i| format!("{i}. Fix {i}: detail\n")).collect();
        let c = parse(&format!("Suggestions:\n{items}"));
        let s = &c.improvement_suggestions;
        assert_eq!(s.len(), 7);
        assert_eq!(s.low_priority[1].title, "Fix 7");
    }

    #[test]
    fn test_header_at_end_of_text() {
        let c = parse("Strengths:\n- Concise\nWeaknesses:");
        assert_eq!(c.strengths, vec!["Concise"]);
        assert!(c.weaknesses.is_empty());
    }

    #[test]
    fn test_sections_in_any_order() {
        let c = parse("Weaknesses:\n- Thin\nStrengths:\n- Bold");
        assert_eq!(c.strengths, vec!["Bold"]);
        assert_eq!(c.weaknesses, vec!["Thin"]);
    }

    #[test]
    fn test_repeated_header_resumes_section() {
        let c = parse("Strengths:\n- One\nWeaknesses:\n- Two\nStrengths:\n- Three");
        assert_eq!(c.strengths, vec!["One", "Three"]);
        assert_eq!(c.weaknesses, vec!["Two"]);
    }

    #[test]
    fn test_preamble_is_ignored() {
        let c = parse("Here is my review of the resume.\n\nStrengths: Clean layout");
        assert_eq!(c.strengths, vec!["Clean layout"]);
    }

    #[test]
    fn test_markdown_critique() {
        let text = "## Scores\n- **Completeness:** 75/100\n\n\
            ### **Strengths**\n* Strong **projects** section\n\
            ### Areas of Weakness\n• Dense text • No links\n\
            ### Suggestions for Improvement\n1. **Add links**: GitHub and portfolio";
        let c = parse(text);
        assert_eq!(c.completeness_score, 75);
        assert_eq!(c.strengths, vec!["Strong **projects** section"]);
        assert_eq!(c.weaknesses, vec!["Dense text", "No links"]);
        let high = &c.improvement_suggestions.high_priority;
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].title, "Add links");
        assert_eq!(high[0].description, "GitHub and portfolio");
    }

    #[test]
    fn test_score_lines_are_not_content() {
        let c = parse("Suggestions:\n- Add metrics: numbers\nATS compatibility: 61");
        assert_eq!(c.ats_score, 61);
        assert_eq!(c.improvement_suggestions.len(), 1);
    }

    #[test]
    fn test_suggestions_naming_metrics_are_kept() {
        let text = "Suggestions:\n1. Add numbers: include metrics\n\
            2. Keywords: add 5 role-specific terms\n\
            3. ATS formatting: use a 1-column layout\n\
            4. Technical skills: list 3 core tools";
        let c = parse(text);
        let s = &c.improvement_suggestions;
        assert_eq!(s.len(), 4);
        assert_eq!(
            (s.high_priority.len(), s.medium_priority.len(), s.low_priority.len()),
            (2, 1, 1)
        );
        assert_eq!(s.high_priority[1].title, "Keywords");
        assert_eq!(s.low_priority[0].description, "list 3 core tools");
    }

    #[test]
    fn test_item_mentioning_other_section_stays_in_place() {
        let c = parse("Weaknesses:\nNo metrics\nLimited strengths\nThin summary");
        assert_eq!(c.weaknesses, vec!["No metrics", "Limited strengths", "Thin summary"]);
        assert!(c.strengths.is_empty());
    }

    #[test]
    fn test_canned_fallback_critique() {
        let c = parse(FALLBACK_CRITIQUE);
        assert_eq!(c.completeness_score, 72);
        assert_eq!(c.skills_match.technical, 78);
        assert_eq!(c.skills_match.soft, 65);
        assert_eq!(c.skills_match.keywords, 58);
        assert_eq!(c.ats_score, 68);
        assert_eq!(c.strengths.len(), 5);
        assert_eq!(c.weaknesses.len(), 5);
        let s = &c.improvement_suggestions;
        assert_eq!(
            (s.high_priority.len(), s.medium_priority.len(), s.low_priority.len()),
            (3, 2, 2)
        );
        assert_eq!(s.high_priority[0].title, "Add quantifiable achievements");
    }

    #[test]
    fn test_custom_tiering() {
        fn all_low(total: usize) -> TierSizes {
            TierSizes {
                high: 0,
                medium: 0,
                low: total,
            }
        }
        let c = CritiqueParser::default()
            .with_tiering(all_low)
            .parse(SAMPLE, &mut rng());
        assert_eq!(c.improvement_suggestions.low_priority.len(), 3);
    }

    #[test]
    fn test_parse_bytes_rejects_non_text() {
        let err = CritiqueParser::default()
            .parse_bytes(&[0xff, 0xfe, 0x00], &mut rng())
            .unwrap_err();
        assert!(matches!(err, ParseFailure::NotText(_)));
    }

    #[test]
    fn test_parse_bytes_accepts_text() {
        let c = CritiqueParser::default()
            .parse_bytes(SAMPLE.as_bytes(), &mut rng())
            .unwrap();
        assert_eq!(c.completeness_score, 80);
    }

    #[test]
    fn test_parallel_parses_are_independent() {
        let parser = CritiqueParser::default();
        let results: Vec<StructuredCritique> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| parser.parse(SAMPLE, &mut rand::thread_rng())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for c in results {
            assert_eq!(c.completeness_score, 80);
            assert_eq!(c.strengths.len(), 2);
            assert!(FALLBACK_SCORE_RANGE.contains(&c.ats_score));
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("clamp".parse::<OutOfRangePolicy>().unwrap(), OutOfRangePolicy::Clamp);
        assert_eq!(
            "PassThrough".parse::<OutOfRangePolicy>().unwrap(),
            OutOfRangePolicy::PassThrough
        );
        assert!("round".parse::<OutOfRangePolicy>().is_err());
    }
}
