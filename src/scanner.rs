//! Substring scanner: finds issue names anywhere in a text, including
//! mid-word and next to punctuation, and partitions the text around them.

use std::ops::Range;

use crate::types::{Fragment, Issue, LinkStyle};

/// A located match of one issue name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'i> {
    /// The issue whose name matched.
    pub issue: &'i Issue,
    /// Byte offset of the match in the scanned text.
    pub start: usize,
}

impl Occurrence<'_> {
    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        return self.start.saturating_add(self.issue.name.len());
    }

    /// Byte range covered by the match.
    pub fn range(&self) -> Range<usize> {
        return self.start..self.end();
    }
}

/// Every byte offset where `needle` occurs. After a hit at `i` the search
/// resumes one character later, so overlapping hits of the same needle are found.
fn match_starts(haystack: &str, needle: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    if needle.is_empty() {
        return starts;
    }

    let mut from = 0_usize;
    while let Some(rest) = haystack.get(from..) {
        let Some(offset) = rest.find(needle) else {
            break;
        };
        let start = from.saturating_add(offset);
        starts.push(start);
        let step = rest.get(offset..).and_then(|tail| return tail.chars().next()).map_or(1, char::len_utf8);
        from = start.saturating_add(step);
    }
    return starts;
}

/// Find where the issues occur in `text`, one occurrence per covered region.
///
/// Occurrences are ordered by start offset. At the same offset the longer
/// name wins (`#21` over `#2`), then the earlier issue in `issues`. An
/// occurrence that starts before the end of the previously kept one is
/// dropped, so `#2` is never found inside `#234`.
pub fn find_occurrences<'i>(text: &str, issues: &'i [Issue]) -> Vec<Occurrence<'i>> {
    let mut candidates: Vec<Occurrence<'i>> = issues
        .iter()
        .flat_map(|issue| {
            return match_starts(text, &issue.name)
                .into_iter()
                .map(move |start| return Occurrence { issue, start });
        })
        .collect();

    // Stable sort keeps list order as the last tie-break.
    candidates.sort_by(|a, b| {
        return a.start.cmp(&b.start).then_with(|| return b.issue.name.len().cmp(&a.issue.name.len()));
    });

    let mut occurrences: Vec<Occurrence<'i>> = Vec::with_capacity(candidates.len());
    let mut covered_until = 0_usize;
    for candidate in candidates {
        if candidate.start < covered_until {
            log::trace!("dropping `{}` at {} inside an earlier match", candidate.issue.name, candidate.start);
            continue;
        }
        covered_until = candidate.end();
        occurrences.push(candidate);
    }
    return occurrences;
}

/// Split `text` into text fragments and one link fragment per occurrence.
/// Empty text between adjacent matches is not emitted.
///
/// `occurrences` must come from [`find_occurrences`] on the same text.
pub fn partition(text: &str, occurrences: &[Occurrence<'_>], style: &LinkStyle) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(occurrences.len().saturating_mul(2).saturating_add(1));
    let mut last_end = 0_usize;

    for occurrence in occurrences {
        if let Some(before) = text.get(last_end..occurrence.start)
            && !before.is_empty()
        {
            fragments.push(Fragment::text(before));
        }
        let name = &occurrence.issue.name;
        fragments.push(Fragment::Link(occurrence.issue.link(style.title_for(name))));
        last_end = occurrence.end();
    }

    if let Some(rest) = text.get(last_end..)
        && !rest.is_empty()
    {
        fragments.push(Fragment::text(rest));
    }
    return fragments;
}

/// Link every issue occurrence in `text`.
/// Returns `None` when nothing matched, so callers can leave their input alone.
pub fn scan_and_link(text: &str, issues: &[Issue], style: &LinkStyle) -> Option<Vec<Fragment>> {
    let occurrences = find_occurrences(text, issues);
    if occurrences.is_empty() {
        return None;
    }
    log::debug!("found {} issue occurrences in {} bytes", occurrences.len(), text.len());
    return Some(partition(text, &occurrences, style));
}
