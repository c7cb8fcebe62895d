//! Match segmentation for search highlighting.

use regex::Regex;

/// Split `text` into segments, flagging the ones the pattern matched, so a
/// renderer can style hits without re-running the search. Zero-width matches
/// are skipped rather than allowed to stall the scan.
pub fn segments<'t>(text: &'t str, re: &Regex) -> Vec<(&'t str, bool)> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        if m.start() > last {
            out.push((&text[last..m.start()], false));
        }
        out.push((m.as_str(), true));
        last = m.end();
    }
    if last < text.len() {
        out.push((&text[last..], false));
    }
    out
}
