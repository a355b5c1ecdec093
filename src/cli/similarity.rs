//! Approximate string matching for command names
//!
//! Scores are 0..=100: twice the longest common subsequence over the total
//! length, after lower-casing and sorting whitespace-separated tokens.

/// Similarity of `a` and `b` on a 0..=100 scale
///
/// Symmetric, case-insensitive and insensitive to token order. Empty input
/// scores 0 against anything.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = (a.len() + b.len()) as f64;
    let matched = 2 * lcs_len(&a, &b);
    // Ties round to even
    (100.0 * matched as f64 / total).round_ties_even() as u8
}

fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Length of the longest common subsequence, single-row DP
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];

    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}
