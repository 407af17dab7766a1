/// Characters that are unsafe in file names on common filesystems.
const UNSAFE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Extension of an uploaded file name: the text after the last `.`.
///
/// Returns `None` when there is no dot, the extension is blank, or it contains
/// anything other than ASCII letters and digits.
pub fn file_extension(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.trim();
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// Turn a student name into a file-name-safe fragment.
///
/// Lower-cases and trims, replaces unsafe and whitespace characters with `_`,
/// drops everything outside `[a-z0-9_.-]` and collapses runs of `_`. Falls back
/// to `student_{millis}` when nothing survives.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.trim().to_lowercase().chars() {
        let c = if UNSAFE_CHARS.contains(&c) || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')) {
            continue;
        }
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    if out.is_empty() {
        format!("student_{}", chrono::Utc::now().timestamp_millis())
    } else {
        out
    }
}

/// Name of the stored full-size avatar file.
pub fn avatar_file_name(student_id: i32, student_name: &str, ext: &str) -> String {
    format!("{student_id}_{}_full.{ext}", normalize_name(student_name))
}

/// `Content-Disposition` value for a preview download.
pub fn preview_disposition(ext: &str) -> String {
    format!("inline; filename=preview.{ext}")
}
