//! String similarity used by fuzzy search.
//!
//! This is the classic recursive longest-common-substring measure: find the
//! longest common substring (first occurrence wins on ties), count it, then
//! recurse into the pieces left and right of it on both sides. Scores are
//! byte based.

/// Number of matching bytes between `a` and `b`.
pub fn similar_text(a: &str, b: &str) -> usize {
    common_bytes(a.as_bytes(), b.as_bytes())
}

/// Similarity as a percentage of the combined length, in `0.0..=100.0`.
pub fn similarity_percent(a: &str, b: &str) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    (similar_text(a, b) * 2) as f64 * 100.0 / total as f64
}

fn common_bytes(a: &[u8], b: &[u8]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (pos_a, pos_b, len) = longest_common(a, b);
    if len == 0 {
        return 0;
    }

    len + common_bytes(&a[..pos_a], &b[..pos_b])
        + common_bytes(&a[pos_a + len..], &b[pos_b + len..])
}

/// `(start in a, start in b, length)` of the first longest common run.
fn longest_common(a: &[u8], b: &[u8]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    for i in 0..a.len() {
        for j in 0..b.len() {
            let run = a[i..]
                .iter()
                .zip(&b[j..])
                .take_while(|(x, y)| x == y)
                .count();
            if run > best.2 {
                best = (i, j, run);
            }
        }
    }
    best
}
