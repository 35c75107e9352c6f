// SPDX-License-Identifier: Apache-2.0

//! Splitting labels into highlighted and plain runs for rendering.
//!
//! Matching is case- and accent-insensitive, but the output must reproduce
//! the original text byte for byte - the UI renders "Clínica Médica", not
//! "clinica medica". Because stripping diacritics changes byte lengths, every
//! normalized byte carries a back-pointer to the original character it came
//! from, and match spans are mapped through that table before splitting.

use unicode_normalization::UnicodeNormalization;

use crate::normalize::normalize;

/// One run of output text. `highlighted` runs matched a query word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightPart {
    pub text: String,
    pub highlighted: bool,
}

/// Partition `text` into alternating plain/highlighted runs for `query`.
///
/// Every whitespace-separated query word is searched for independently;
/// overlapping and adjacent matches merge into a single highlighted run.
/// An empty query (or a query with no occurrences) yields the whole text
/// as one plain run.
pub fn highlighted_parts(text: &str, query: &str) -> Vec<HighlightPart> {
    let whole = || {
        vec![HighlightPart {
            text: text.to_owned(),
            highlighted: false,
        }]
    };

    if text.is_empty() {
        return Vec::new();
    }

    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return whole();
    }

    // Per-character normalization with provenance: haystack is the
    // normalized text, back[i] is the original byte range that produced
    // normalized byte i.
    let mut haystack = String::new();
    let mut back: Vec<(usize, usize)> = Vec::new();
    for (orig_start, c) in text.char_indices() {
        let orig_end = orig_start + c.len_utf8();
        let piece: String = c
            .nfd()
            .filter(|d| !is_mark(*d))
            .flat_map(char::to_lowercase)
            .collect();
        for _ in 0..piece.len() {
            back.push((orig_start, orig_end));
        }
        haystack.push_str(&piece);
    }

    let mut spans: Vec<(usize, usize)> = Vec::new();
    for word in normalized_query.split(' ') {
        // Overlapping occurrence scan: restart one character past each hit,
        // so "ana" is found twice in "banana".
        let mut from = 0;
        while let Some(rel) = haystack[from..].find(word) {
            let pos = from + rel;
            // Map normalized byte span back to original bytes, widening to
            // whole original characters.
            let start = back[pos].0;
            let end = back[pos + word.len() - 1].1;
            spans.push((start, end));
            from = pos
                + haystack[pos..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
    }

    if spans.is_empty() {
        return whole();
    }

    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let mut parts = Vec::new();
    let mut cursor = 0;
    for (start, end) in merged {
        if start > cursor {
            parts.push(HighlightPart {
                text: text[cursor..start].to_owned(),
                highlighted: false,
            });
        }
        parts.push(HighlightPart {
            text: text[start..end].to_owned(),
            highlighted: true,
        });
        cursor = end;
    }
    if cursor < text.len() {
        parts.push(HighlightPart {
            text: text[cursor..].to_owned(),
            highlighted: false,
        });
    }

    parts
}

fn is_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}
