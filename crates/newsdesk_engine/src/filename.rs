const FALLBACK_NAME: &str = "download.csv";
const MAX_NAME_BYTES: usize = 120;

/// Maps a server-side file name to a name that is safe on every desktop filesystem.
///
/// Only the last path component is kept; forbidden characters become `_`, runs of
/// `_` collapse, and Windows device names get a trailing `_` on the stem.
pub fn local_file_name(server_name: &str) -> String {
    let last = server_name
        .rsplit(&['/', '\\'][..])
        .next()
        .unwrap_or(server_name);

    let replaced: String = last
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let mut compacted = String::with_capacity(replaced.len());
    let mut prev_underscore = false;
    for c in replaced.chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let trimmed = compacted.trim_matches(&[' ', '.'][..]);
    if trimmed.trim_matches('_').is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let (stem, extension) = match trimmed.rfind('.') {
        Some(dot) if dot > 0 => trimmed.split_at(dot),
        _ => (trimmed, ""),
    };
    let mut stem = truncate_bytes(stem, MAX_NAME_BYTES.saturating_sub(extension.len())).to_string();
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    format!("{stem}{extension}")
}

fn truncate_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
