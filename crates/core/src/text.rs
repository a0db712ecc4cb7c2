//! Shared text normalization used by the match and group scorers.

/// Trim and lower-case a label for comparison.
pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Split a label into lower-case alphanumeric tokens, deduplicated in first-seen order.
pub(crate) fn tokens(value: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in value.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
        let token = token.to_lowercase();
        if !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

/// Lower-case words of a label for keyword lookup.
///
/// Splits on non-alphanumerics, camelCase humps, and letter/digit boundaries,
/// so `SubmitButton` and `Icon7` yield `submit button` and `icon 7`.
pub(crate) fn words(value: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in value.chars() {
        if !c.is_alphanumeric() {
            flush(&mut out, &mut current);
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            let hump = p.is_lowercase() && c.is_uppercase();
            let digit_edge = p.is_ascii_digit() != c.is_ascii_digit();
            if hump || digit_edge {
                flush(&mut out, &mut current);
            }
        }
        current.extend(c.to_lowercase());
        prev = Some(c);
    }
    flush(&mut out, &mut current);
    out
}

fn flush(out: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        out.push(std::mem::take(current));
    }
}

/// Whether `keyword` (one or more space-separated words) appears as whole,
/// consecutive words. The last word may carry a plural `s` or `es`.
pub(crate) fn has_keyword(words: &[String], keyword: &str) -> bool {
    let wanted: Vec<&str> = keyword.split_whitespace().collect();
    let Some((last, head)) = wanted.split_last() else {
        return false;
    };
    words.windows(wanted.len()).any(|window| {
        let (tail, lead) = match window.split_last() {
            Some(parts) => parts,
            None => return false,
        };
        lead.iter().zip(head).all(|(w, k)| w == k)
            && (tail == last
                || tail.strip_suffix('s').is_some_and(|t| t == *last)
                || tail.strip_suffix("es").is_some_and(|t| t == *last))
    })
}
