use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// Returns the index of the value in `sorted` closest to `query`.
///
/// `sorted` must be non-decreasing. Queries outside the sequence clamp to the
/// first or last index; equidistant neighbours resolve to the lower index.
/// Returns `None` only for an empty sequence.
#[must_use]
pub fn nearest_index(sorted: &[f64], query: f64) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }

    let insertion = match sorted.binary_search_by(|probe| probe.total_cmp(&query)) {
        Ok(exact) => return Some(exact),
        Err(insertion) => insertion,
    };

    if insertion == 0 {
        return Some(0);
    }
    if insertion == sorted.len() {
        return Some(sorted.len() - 1);
    }

    // Lower neighbour first so `min_by_key` keeps it on ties.
    let candidates: SmallVec<[(OrderedFloat<f64>, usize); 2]> = [insertion - 1, insertion]
        .into_iter()
        .map(|index| (OrderedFloat((sorted[index] - query).abs()), index))
        .collect();

    candidates
        .into_iter()
        .min_by_key(|candidate| candidate.0)
        .map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::nearest_index;

    #[test]
    fn empty_sequence_has_no_nearest_index() {
        assert_eq!(nearest_index(&[], 3.0), None);
    }

    #[test]
    fn single_element_always_wins() {
        assert_eq!(nearest_index(&[4.0], -100.0), Some(0));
        assert_eq!(nearest_index(&[4.0], 100.0), Some(0));
    }
}
