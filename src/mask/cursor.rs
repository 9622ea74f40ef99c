//! Cursor navigator over the marked skeleton.
//!
//! All moves land the caret on an editable (sentinel) boundary, skipping
//! literal runs. The `*_reverse` variants operate on a virtually padded
//! skeleton so delete/backspace behave when the live text is longer than the
//! compiled mask. Scans that exhaust the skeleton recurse once into the
//! opposite direction; a depth guard returns the original caret when even
//! that finds no editable slot.

use crate::mask::alphabet::SENTINEL;

const RECURSION_LIMIT: usize = 2;

/// Next caret offset for a plain left arrow. `len` is the live text length.
pub fn move_left(marked: &[char], len: usize, caret: usize) -> usize {
    left_inner(marked, len, caret as i64, 0).unwrap_or_else(|| clamp(caret as i64, len))
}

/// Next caret offset for a plain right arrow.
pub fn move_right(marked: &[char], len: usize, caret: usize) -> usize {
    right_inner(marked, len, caret as i64, 0).unwrap_or_else(|| clamp(caret as i64, len))
}

/// Padded-skeleton variant of [`move_left`], for backspace-like movement
/// over text that may extend past the mask.
pub fn left_reverse(marked: &[char], len: usize, caret: usize) -> usize {
    left_reverse_inner(marked, len, caret as i64, 0).unwrap_or_else(|| clamp(caret as i64, len))
}

/// Padded-skeleton variant of [`move_right`], for delete-forward movement.
pub fn right_reverse(marked: &[char], len: usize, caret: usize) -> usize {
    right_reverse_inner(marked, len, caret as i64, 0).unwrap_or_else(|| clamp(caret as i64, len))
}

/// Caret placement after a re-mask: scan right starting one position before
/// the caret the field reported, so the caret tracks the last typed char
/// through inserted literals.
pub(crate) fn caret_after_edit(marked: &[char], len: usize, end: usize) -> usize {
    let caret = end as i64 - 1;
    right_inner(marked, len, caret, 0).unwrap_or_else(|| clamp(caret, len))
}

fn left_inner(marked: &[char], len: usize, caret: i64, depth: usize) -> Option<usize> {
    let scan_start = (caret - 1).max(0);
    let no_mark_ahead = !contains_sentinel(marked, scan_start as usize);

    let mut cursor = caret;
    let mut found = false;
    let mut i = scan_start;
    while i >= 0 {
        if char_at(marked, i) == Some(SENTINEL) {
            cursor = i;
            if no_mark_ahead {
                cursor += 1;
            }
            found = true;
            break;
        }
        i -= 1;
    }

    if !found
        && let Some(ch) = char_at(marked, cursor)
        && ch != SENTINEL
    {
        if depth >= RECURSION_LIMIT {
            return None;
        }
        return right_inner(marked, len, 0, depth + 1);
    }

    Some(clamp(cursor, len))
}

fn right_inner(marked: &[char], len: usize, caret: i64, depth: usize) -> Option<usize> {
    let limit = len as i64;
    let mut cursor = caret;
    let mut found = false;
    let mut i = (caret + 1).min(limit);
    while i <= limit {
        if char_at(marked, i) == Some(SENTINEL) {
            cursor = i;
            found = true;
            break;
        }
        if char_at(marked, i - 1) == Some(SENTINEL) {
            cursor = i;
        }
        i += 1;
    }

    if !found
        && let Some(ch) = char_at(marked, cursor - 1)
        && ch != SENTINEL
    {
        if depth >= RECURSION_LIMIT {
            return None;
        }
        return left_inner(marked, len, limit, depth + 1);
    }

    Some(clamp(cursor, len))
}

fn left_reverse_inner(marked: &[char], len: usize, caret: i64, depth: usize) -> Option<usize> {
    let padded = padded_skeleton(marked, len);

    let mut cursor = caret;
    let mut found = false;
    let mut i = (caret - 1).max(0);
    while i >= 0 {
        if char_at(&padded, i - 1) == Some(SENTINEL) {
            cursor = i;
            found = true;
            break;
        }
        if char_at(&padded, i) == Some(SENTINEL) {
            cursor = i;
            if i == 0 {
                found = true;
                break;
            }
        }
        i -= 1;
    }

    if !found
        && let Some(ch) = char_at(&padded, cursor)
        && ch != SENTINEL
    {
        if depth >= RECURSION_LIMIT {
            return None;
        }
        return right_reverse_inner(marked, len, 0, depth + 1);
    }

    Some(clamp(cursor, len))
}

fn right_reverse_inner(marked: &[char], len: usize, caret: i64, depth: usize) -> Option<usize> {
    let limit = len as i64;
    let padded = padded_skeleton(marked, len);
    let prefix_end = ((caret + 1).max(0) as usize).min(padded.len());
    let no_mark_behind = !padded[..prefix_end].contains(&SENTINEL);

    let mut cursor = caret;
    let mut found = false;
    let mut i = (caret + 1).min(limit);
    while i <= limit {
        if char_at(&padded, i - 1) == Some(SENTINEL) {
            cursor = i;
            if cursor > 0 && no_mark_behind {
                cursor -= 1;
            }
            found = true;
            break;
        }
        i += 1;
    }

    if !found
        && let Some(ch) = char_at(&padded, cursor - 1)
        && ch != SENTINEL
    {
        if depth >= RECURSION_LIMIT {
            return None;
        }
        return left_reverse_inner(marked, len, limit, depth + 1);
    }

    Some(clamp(cursor, len))
}

/// Skeleton adjusted to the live text length: shorter text keeps the last
/// `len` skeleton chars; longer text gets extra sentinels inserted at the
/// first sentinel position (an open-ended editable run).
fn padded_skeleton(marked: &[char], len: usize) -> Vec<char> {
    if len < marked.len() {
        if len == 0 {
            return marked.to_vec();
        }
        return marked[marked.len() - len..].to_vec();
    }

    let Some(pad_pos) = marked.iter().position(|ch| *ch == SENTINEL) else {
        return marked.to_vec();
    };

    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(&marked[..pad_pos]);
    for _ in 0..len - marked.len() {
        out.push(SENTINEL);
    }
    out.extend_from_slice(&marked[pad_pos..]);
    out
}

fn contains_sentinel(marked: &[char], from: usize) -> bool {
    marked[from.min(marked.len())..].contains(&SENTINEL)
}

fn char_at(marked: &[char], idx: i64) -> Option<char> {
    if idx < 0 {
        return None;
    }
    marked.get(idx as usize).copied()
}

fn clamp(cursor: i64, len: usize) -> usize {
    cursor.clamp(0, len as i64) as usize
}
