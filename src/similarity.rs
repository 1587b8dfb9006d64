//! String-similarity ratio used to grade guesses.
//!
//! The metric is the classic matching-block ratio: find the longest
//! block of characters the two strings share, recurse into the pieces
//! on either side of it, and sum the matched lengths. With `M` matched
//! characters in total the ratio is `round(100 * 2M / (len_a + len_b))`,
//! an integer in `[0, 100]`. The measure is symmetric and equals 100
//! exactly when the strings are equal.
//!
//! Inputs are compared as-is; callers that want case- or
//! whitespace-insensitive grading normalize first (the scoring engine
//! does).

/// Similarity ratio between `a` and `b` in `[0, 100]`.
///
/// Two empty strings are considered identical (ratio 100); an empty
/// string against a non-empty one matches nothing (ratio 0).
///
/// # Examples
///
/// ```
/// use encore::similarity::ratio;
///
/// assert_eq!(ratio("queen", "queen"), 100);
/// assert_eq!(ratio("bohemian rhap", "bohemian rhapsody"), 87);
/// assert_eq!(ratio("abc", "xyz"), 0);
/// ```
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let matched = matched_length(&a, &b);

    #[allow(clippy::cast_precision_loss)]
    let scaled = (200.0 * matched as f64 / total as f64).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        scaled as u8
    }
}

/// Total length of all matching blocks shared by `a` and `b`.
///
/// Greedy recursion: take the longest common block, then match the
/// remainders to its left and right independently. Blocks never cross,
/// so the sum is well defined.
fn matched_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (a_start, b_start, size) = longest_block(a, b);
    if size == 0 {
        return 0;
    }

    size + matched_length(&a[..a_start], &b[..b_start])
        + matched_length(&a[a_start + size..], &b[b_start + size..])
}

/// Longest common contiguous block of `a` and `b`.
///
/// Returns `(start_in_a, start_in_b, length)`; ties resolve to the
/// earliest start in `a`, then in `b`, which keeps the recursion
/// deterministic.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);

    // lengths[j] = length of the common suffix ending at a[i-1]/b[j-1]
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if cur[j + 1] > best.2 {
                best = (i + 1 - cur[j + 1], j + 1 - cur[j + 1], cur[j + 1]);
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}
