//! Note concatenation.
//!
//! Notes are free text that grows over an installment's lifetime:
//! registration adds a descriptive suffix, payment actions may append a
//! further fragment. Merging always appends, never overwrites.

/// Separator between note fragments. The SQL append in
/// `SpesaRepo::append_note` must use the same literal.
pub const NOTE_SEPARATOR: &str = " | ";

/// Merge two note fragments, trimming both. Both non-empty -> joined
/// with [`NOTE_SEPARATOR`]; one non-empty -> that one; both empty -> "".
pub fn note_merge(base: &str, extra: &str) -> String {
    let base = base.trim();
    let extra = extra.trim();
    if !base.is_empty() && !extra.is_empty() {
        format!("{base}{NOTE_SEPARATOR}{extra}")
    } else if !base.is_empty() {
        base.to_string()
    } else {
        extra.to_string()
    }
}
