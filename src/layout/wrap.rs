//! Greedy word wrapping over measured text.

use super::cursor::EPSILON;
use super::metrics::{FontFace, FontSet};
use super::page::TextSegment;

/// Wrap `text` into lines no wider than `max_width`.
///
/// Words are accumulated while `measure` of the joined line stays within
/// the limit. A word wider than the limit on its own occupies a line by
/// itself and is not split.
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure(&candidate) <= max_width + EPSILON {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A wrapped row of mixed-face text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedLine {
    /// Adjacent segments never share a face
    pub segments: Vec<TextSegment>,
    /// Measured width in points
    pub width: f32,
}

impl WrappedLine {
    /// Concatenated text of the row.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&mut self, text: &str, face: FontFace) {
        match self.segments.last_mut() {
            Some(last) if last.face == face => last.text.push_str(text),
            _ => self.segments.push(TextSegment::new(text, face)),
        }
    }
}

/// A word made of pieces with no whitespace between them.
#[derive(Debug, Default)]
struct Word<'a> {
    pieces: Vec<(&'a str, FontFace)>,
}

impl Word<'_> {
    fn width(&self, fonts: &FontSet, size: f32) -> f32 {
        self.pieces
            .iter()
            .map(|(text, face)| fonts.string_width(text, *face, size))
            .sum()
    }

    fn first_face(&self) -> FontFace {
        self.pieces
            .first()
            .map(|(_, face)| *face)
            .unwrap_or(FontFace::Regular)
    }
}

/// Wrap runs of differently styled text into rows no wider than `max_width`.
///
/// Whitespace inside or between runs separates words. Text on either side
/// of a run boundary with no whitespace is one word, so `**Blocker**:`
/// never puts the colon on a different row from the label.
pub fn wrap_runs(
    runs: &[(&str, FontFace)],
    max_width: f32,
    fonts: &FontSet,
    size: f32,
) -> Vec<WrappedLine> {
    let words = split_words(runs);
    let mut lines = Vec::new();
    let mut current = WrappedLine::default();

    for word in &words {
        let width = word.width(fonts, size);
        if !current.is_empty() {
            let space = fonts.string_width(" ", word.first_face(), size);
            if current.width + space + width <= max_width + EPSILON {
                current.push(" ", word.first_face());
                current.width += space;
            } else {
                lines.push(std::mem::take(&mut current));
            }
        }
        for (text, face) in &word.pieces {
            current.push(text, *face);
        }
        current.width += width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_words<'a>(runs: &[(&'a str, FontFace)]) -> Vec<Word<'a>> {
    let mut words: Vec<Word<'a>> = Vec::new();
    let mut space_before = true;

    for &(text, face) in runs {
        let mut rest = text;
        loop {
            let trimmed = rest.trim_start();
            if trimmed.len() != rest.len() {
                space_before = true;
            }
            if trimmed.is_empty() {
                break;
            }
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            if space_before || words.is_empty() {
                words.push(Word::default());
            }
            if let Some(word) = words.last_mut() {
                word.pieces.push((&trimmed[..end], face));
            }
            space_before = false;
            rest = &trimmed[end..];
        }
    }
    words
}
