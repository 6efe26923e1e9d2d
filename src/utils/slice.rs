use indexmap::IndexMap;
use std::hash::Hash;

/// Result of comparing two slices element by element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceDiff {
    Equal,
    LengthDiffers,
    DiffersAt(usize),
}

// Clamp a signed index into 0..=len; negative values count from the end
fn normalize_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}

pub fn contains<T: PartialEq>(items: &[T], item: &T) -> bool {
    items.contains(item)
}

/// Inserts `elems` before position `index`.
///
/// `index >= len` appends, `index <= -len` prepends and other negative
/// indices count from the end, so `-1` inserts before the last element.
pub fn insert_at<T>(items: &mut Vec<T>, index: isize, elems: impl IntoIterator<Item = T>) {
    let at = normalize_index(index, items.len());
    items.splice(at..at, elems);
}

/// Removes and returns the element at `index`, with the same index
/// normalization as [`insert_at`]. Out-of-range positive indices remove the
/// last element.
pub fn pop_at<T>(items: &mut Vec<T>, index: isize) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let at = normalize_index(index, items.len()).min(items.len() - 1);
    Some(items.remove(at))
}

pub fn first_mismatch<T: PartialEq>(a: &[T], b: &[T]) -> SliceDiff {
    if a.len() != b.len() {
        return SliceDiff::LengthDiffers;
    }

    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(i) => SliceDiff::DiffersAt(i),
        None => SliceDiff::Equal,
    }
}

/// True for an empty row or a row of empty strings.
pub fn is_blank<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|s| s.as_ref().is_empty())
}

/// Maps every value that occurs more than once to the positions where it
/// occurs, in order of first appearance.
pub fn duplicate_indices<T: Eq + Hash + Clone>(items: &[T]) -> IndexMap<T, Vec<usize>> {
    let mut seen: IndexMap<T, Vec<usize>> = IndexMap::new();

    for (i, item) in items.iter().enumerate() {
        seen.entry(item.clone()).or_default().push(i);
    }

    seen.retain(|_, positions| positions.len() > 1);
    seen
}
