//! Line-level helpers shared by the critique grammar and the resume extractor.
//!
//! Both inputs are loosely formatted free text: markdown headings, bold
//! markers, bullets and `1.` enumerations all show up interchangeably.

/// Bullet glyphs recognised as list markers, at line start or mid-line.
pub const BULLETS: &[char] = &['•', '●', '▪', '◦', '‣'];

/// A line with its leading markup removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marked<'a> {
    pub text: &'a str,
    /// The line started with a bullet or an enumeration.
    pub listed: bool,
    /// The line started with a markdown `#` heading marker.
    pub hashed: bool,
}

impl Marked<'_> {
    /// The remaining text is wrapped in `**bold**` or `__bold__`.
    pub fn bold(&self) -> bool {
        let text = self.text.trim_end_matches(':').trim_end();
        ["**", "__"]
            .iter()
            .any(|m| text.len() > 2 * m.len() && text.starts_with(m) && text.ends_with(m))
    }
}

/// A `Head: rest` candidate heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    pub words: Vec<&'a str>,
    pub rest: Option<&'a str>,
    /// The head was terminated by a colon.
    pub colon: bool,
}

impl Heading<'_> {
    pub fn first_word(&self) -> &str {
        self.words.first().copied().unwrap_or_default()
    }

    pub fn last_word(&self) -> &str {
        self.words.last().copied().unwrap_or_default()
    }
}

/// Strips leading `#` headings, bullets and enumerations from a line.
pub fn strip_markup(line: &str) -> Marked<'_> {
    let mut text = line.trim();
    let mut listed = false;
    let mut hashed = false;

    loop {
        let before = text;
        if let Some(rest) = text.strip_prefix('#') {
            text = rest.trim_start_matches('#').trim_start();
            hashed = true;
        }
        if let Some(rest) = strip_list_marker(text) {
            text = rest.trim_start();
            listed = true;
        }
        if text.len() == before.len() {
            break;
        }
    }

    Marked {
        text,
        listed,
        hashed,
    }
}

fn strip_list_marker(text: &str) -> Option<&str> {
    if let Some(rest) = text.strip_prefix(|c: char| c == '-' || BULLETS.contains(&c)) {
        return Some(rest);
    }
    // "* item" is a bullet; "**bold**" is not
    if let Some(rest) = text.strip_prefix("* ") {
        return Some(rest);
    }
    strip_enumeration(text)
}

/// Strips a leading `12.` or `12)` enumeration.
pub fn strip_enumeration(text: &str) -> Option<&str> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &text[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    // "2.5 years" is a number, not an enumeration
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(rest)
}

/// Reads a marked line as a heading of at most `max_words` words.
///
/// The head is the text before the first colon, or the whole line when
/// there is none. Listed lines only count as headings when they are a
/// single bare word, so `1. Highlight your strengths: ...` stays content.
pub fn heading(marked: Marked<'_>, max_words: usize) -> Option<Heading<'_>> {
    let (head, rest) = match marked.text.split_once(':') {
        Some((head, rest)) => (head, Some(rest)),
        None => (marked.text, None),
    };
    let colon = rest.is_some();

    let words: Vec<&str> = head
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() || words.len() > max_words {
        return None;
    }

    let rest = rest.map(clean_item).filter(|r| !r.is_empty());
    if marked.listed && (words.len() > 1 || rest.is_some()) {
        return None;
    }

    Some(Heading { words, rest, colon })
}

/// Trims whitespace and stray bold markers from a list item.
pub fn clean_item(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '*' || c == '_').trim()
}

/// Splits one content line into list items.
///
/// Bullet glyphs split mid-line; each piece loses its leading bullet or
/// enumeration. Empty pieces are dropped.
pub fn split_items(line: &str) -> Vec<String> {
    line.split(BULLETS)
        .map(|piece| clean_item(strip_markup(piece).text))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
