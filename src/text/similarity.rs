// ============================================================================
// Sequence-alignment similarity (Ratcliff/Obershelp matching blocks)
// ============================================================================

/// Case-insensitive similarity ratio in `[0, 1]`.
///
/// The ratio is `2 * M / T`, where `M` is the number of characters covered by
/// recursively-found longest common blocks and `T` is the combined length.
/// Block discovery depends on argument order, so both orders are evaluated
/// and the larger ratio wins; this keeps `similarity(a, b) == similarity(b, a)`.
///
/// Returns 0.0 when either side is empty or whitespace-only.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    if s1.trim().is_empty() || s2.trim().is_empty() {
        return 0.0;
    }

    let a: Vec<char> = s1.to_lowercase().chars().collect();
    let b: Vec<char> = s2.to_lowercase().chars().collect();
    if a == b {
        return 1.0;
    }

    let total = (a.len() + b.len()) as f64;
    let matched = matching_chars(&a, &b).max(matching_chars(&b, &a));

    (2.0 * matched as f64 / total).clamp(0.0, 1.0)
}

/// Best similarity between `label` and any of `candidates`. 0.0 without a label.
pub fn max_similarity<S: AsRef<str>>(label: Option<&str>, candidates: &[S]) -> f64 {
    let Some(label) = label else {
        return 0.0;
    };

    candidates
        .iter()
        .map(|c| similarity(label, c.as_ref()))
        .fold(0.0, f64::max)
}

/// Characters covered by the matching blocks of `a` against `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Longest common run inside `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(start_in_a, start_in_b, len)`; ties keep the earliest run in `a`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo + 1;
    let mut best = (alo, blo, 0);
    let mut prev = vec![0usize; width];

    for i in alo..ahi {
        let mut cur = vec![0usize; width];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                cur[j - blo + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = cur;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_chars_counts_disjoint_blocks() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        assert_eq!(matching_chars(&a, &b), 4);
    }

    #[test]
    fn longest_match_prefers_earliest_run() {
        let a: Vec<char> = "abab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_match(&a, &b, 0, 4, 0, 2), (0, 0, 2));
    }
}
