//! Line grammar for AI critiques.
//!
//! A critique is scanned once, top to bottom. Every line gets exactly one
//! tag (`Line`), and every metric label followed by a number on the same
//! line is recorded as a hit. The parser reduces the tagged lines into a
//! `StructuredCritique`.

use crate::text::{heading, strip_markup, Heading, Marked};

/// Longest head (in words) still read as a section header, e.g.
/// "Suggestions for Improvement" or "Key Strengths".
const MAX_HEADER_WORDS: usize = 3;

/// Words allowed next to a section label in a header.
const HEADER_QUALIFIERS: &[&str] = &[
    "key", "main", "major", "top", "core", "notable", "primary", "potential", "overall", "your",
    "resume", "area", "areas", "of", "for", "improvement", "improvements",
];

/// Words allowed between a metric label and its number on a score line.
const SCORE_FILLER: &[&str] = &[
    "compatibility",
    "score",
    "match",
    "rating",
    "overall",
    "coverage",
    "optimization",
    "level",
    "alignment",
];

fn is_one_of(word: &str, list: &[&str]) -> bool {
    list.iter().any(|w| word.eq_ignore_ascii_case(w))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Strengths,
    Weaknesses,
    Suggestions,
}

impl SectionKind {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "strength" | "strengths" => Some(Self::Strengths),
            "weakness" | "weaknesses" => Some(Self::Weaknesses),
            "suggestion" | "suggestions" => Some(Self::Suggestions),
            _ => None,
        }
    }
}

/// The five scored dimensions of a critique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Completeness,
    TechnicalSkills,
    SoftSkills,
    Keywords,
    Ats,
}

impl Metric {
    /// Fixed order; fallback draws follow it.
    pub const ALL: [Metric; 5] = [
        Metric::Completeness,
        Metric::TechnicalSkills,
        Metric::SoftSkills,
        Metric::Keywords,
        Metric::Ats,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Completeness => "completeness",
            Metric::TechnicalSkills => "technical_skills",
            Metric::SoftSkills => "soft_skills",
            Metric::Keywords => "keywords",
            Metric::Ats => "ats",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Label words in order; each position lists its accepted spellings.
    fn label(self) -> &'static [&'static [&'static str]] {
        match self {
            Metric::Completeness => &[&["completeness"]],
            Metric::TechnicalSkills => &[&["technical"], &["skill", "skills"]],
            Metric::SoftSkills => &[&["soft"], &["skill", "skills"]],
            Metric::Keywords => &[&["keyword", "keywords"]],
            Metric::Ats => &[&["ats"]],
        }
    }

    /// Number of tokens the label spans when it starts at `at`.
    fn label_at(self, tokens: &[Token<'_>], at: usize) -> Option<usize> {
        let label = self.label();
        for (offset, spellings) in label.iter().enumerate() {
            match tokens.get(at + offset) {
                Some(Token::Word(word)) if spellings.iter().any(|s| word.eq_ignore_ascii_case(s)) => {}
                _ => return None,
            }
        }
        Some(label.len())
    }

    /// The first number following an occurrence of this metric's label.
    fn find_in<'a>(self, tokens: &[Token<'a>]) -> Option<&'a str> {
        (0..tokens.len()).find_map(|at| {
            let len = self.label_at(tokens, at)?;
            tokens[at + len..].iter().find_map(|t| match t {
                Token::Number(digits) => Some(*digits),
                Token::Word(_) => None,
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Number(&'a str),
}

/// Splits text into alphabetic words and ASCII digit runs; everything else separates.
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let is_word = c.is_alphabetic();
        if !is_word && !c.is_ascii_digit() {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            let same_kind = if is_word {
                next.is_alphabetic()
            } else {
                next.is_ascii_digit()
            };
            if !same_kind {
                break;
            }
            end = i + next.len_utf8();
            chars.next();
        }
        let slice = &text[start..end];
        tokens.push(if is_word {
            Token::Word(slice)
        } else {
            Token::Number(slice)
        });
    }

    tokens
}

/// One tagged critique line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Opens (or re-opens) a section. Text after the header's colon is
    /// the section's first content line.
    Header {
        kind: SectionKind,
        inline: Option<&'a str>,
    },
    /// A line that is a metric reading, e.g. `- ATS Compatibility: 68/100`.
    /// Never section content.
    Score { metric: Metric, digits: &'a str },
    Content(&'a str),
    Blank,
}

/// Result of scanning a critique.
#[derive(Debug, Clone, Default)]
pub struct Scan<'a> {
    pub lines: Vec<Line<'a>>,
    hits: [Option<&'a str>; 5],
}

impl<'a> Scan<'a> {
    /// Digits of the first label-then-number occurrence of `metric`, if any.
    pub fn metric(&self, metric: Metric) -> Option<&'a str> {
        self.hits[metric.index()]
    }
}

pub fn scan(text: &str) -> Scan<'_> {
    let mut scan = Scan::default();

    for raw in text.lines() {
        let tokens = tokenize(raw);
        for metric in Metric::ALL {
            let slot = &mut scan.hits[metric.index()];
            if slot.is_none() {
                *slot = metric.find_in(&tokens);
            }
        }
        scan.lines.push(classify(raw));
    }

    scan
}

fn classify(raw: &str) -> Line<'_> {
    let marked = strip_markup(raw);
    if marked.text.is_empty() {
        return Line::Blank;
    }

    if let Some(h) = heading(marked, MAX_HEADER_WORDS) {
        if let Some(kind) = header_kind(&h, marked) {
            return Line::Header {
                kind,
                inline: h.rest,
            };
        }
    }

    if let Some((metric, digits)) = score_line(&tokenize(marked.text)) {
        return Line::Score { metric, digits };
    }

    Line::Content(raw)
}

/// A header is a section label, optionally qualified ("Key Strengths",
/// "Suggestions for Improvement"), that is set apart as a heading: ended
/// by a colon, marked with `#` or bold, or standing alone as one word.
fn header_kind(h: &Heading<'_>, marked: Marked<'_>) -> Option<SectionKind> {
    let qualified = |label: &str, others: &[&str]| {
        let kind = SectionKind::from_word(label)?;
        others
            .iter()
            .all(|w| is_one_of(w, HEADER_QUALIFIERS))
            .then_some(kind)
    };
    let (first, rest) = h.words.split_first()?;
    let (last, init) = h.words.split_last()?;
    let kind = qualified(*first, rest).or_else(|| qualified(*last, init))?;

    let set_apart = h.colon || marked.hashed || marked.bold() || h.words.len() == 1;
    set_apart.then_some(kind)
}

/// Reads `<label> [filler...] <number>` where the number ends the line,
/// optionally followed by `/100` or `out of 100`.
fn score_line<'a>(tokens: &[Token<'a>]) -> Option<(Metric, &'a str)> {
    let (metric, len) = Metric::ALL
        .into_iter()
        .find_map(|m| Some((m, m.label_at(tokens, 0)?)))?;

    let after_label = &tokens[len..];
    let filler = after_label
        .iter()
        .take_while(|t| matches!(t, Token::Word(w) if is_one_of(w, SCORE_FILLER)))
        .count();
    let (digits, rest) = match &after_label[filler..] {
        [Token::Number(digits), rest @ ..] => (*digits, rest),
        _ => return None,
    };

    let closed = match rest {
        [] | [Token::Number(_)] => true,
        [Token::Word(out), Token::Word(of), Token::Number(_)] => {
            out.eq_ignore_ascii_case("out") && of.eq_ignore_ascii_case("of")
        }
        _ => false,
    };
    closed.then_some((metric, digits))
}
