/// Character-level Levenshtein distance (unit cost insert, delete, substitute).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Mean Levenshtein distance over paired lines, `0.0` when there are no pairs.
pub fn average_edit_distance(predicted: &[String], reference: &[String]) -> f64 {
    let distances: Vec<usize> = predicted
        .iter()
        .zip(reference)
        .map(|(p, r)| levenshtein(p, r))
        .collect();

    if distances.is_empty() {
        return 0.0;
    }

    distances.iter().sum::<usize>() as f64 / distances.len() as f64
}
