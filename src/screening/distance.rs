// Edit distance for fuzzy keyword matching.
//
// Classic Levenshtein over Unicode scalar values. No case folding happens
// here; the analyzer lowercases input before it ever reaches this module.

/// Minimum number of single-character insertions, deletions, or
/// substitutions needed to turn `a` into `b`.
///
/// Counts `char`s, not bytes, so "säure" has length 5.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // table[i][j] = distance between the first j chars of a and the first i chars of b
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a_chars[j - 1] != b_chars[i - 1]);
            table[i][j] = (table[i][j - 1] + 1)
                .min(table[i - 1][j] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[n][m]
}

/// How many edits a word may be away from `keyword` and still count as a
/// fuzzy hit.
///
/// These cutoffs are empirical and must stay exactly as they are:
/// - 3 chars or fewer: `None` (substring containment only)
/// - 4 to 5 chars: 1 edit
/// - more than 5 chars: 2 edits
pub fn fuzzy_tolerance(keyword: &str) -> Option<usize> {
    match keyword.chars().count() {
        0..=3 => None,
        4..=5 => Some(1),
        _ => Some(2),
    }
}
