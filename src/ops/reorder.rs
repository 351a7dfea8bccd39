//! Index moves over plain sequences. The same three functions serve the
//! column order and every column's item list.

/// Error type for sequence moves
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}

fn check(index: usize, len: usize) -> Result<(), ReorderError> {
    if index < len {
        Ok(())
    } else {
        Err(ReorderError::IndexOutOfRange { index, len })
    }
}

/// Move the element at `from` so that it ends up at `to`.
///
/// Both indices must lie in `0..len`. The input is left untouched; the result
/// has the same length.
pub fn move_index<T: Clone>(seq: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    check(from, seq.len())?;
    check(to, seq.len())?;

    let mut out = seq.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    Ok(out)
}

/// Remove the element at `at`, returning the remainder and the element.
pub fn remove_index<T: Clone>(seq: &[T], at: usize) -> Result<(Vec<T>, T), ReorderError> {
    check(at, seq.len())?;

    let mut out = seq.to_vec();
    let removed = out.remove(at);
    Ok((out, removed))
}

/// Insert `value` at `at`. Appending (`at == len`) is allowed.
pub fn insert_index<T: Clone>(seq: &[T], at: usize, value: T) -> Result<Vec<T>, ReorderError> {
    check(at, seq.len() + 1)?;

    let mut out = Vec::with_capacity(seq.len() + 1);
    out.extend_from_slice(&seq[..at]);
    out.push(value);
    out.extend_from_slice(&seq[at..]);
    Ok(out)
}
