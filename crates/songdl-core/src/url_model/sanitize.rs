//! Linux-safe filename sanitization for rendered template values.

/// Sanitizes a metadata value for use inside a filename on Linux.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Collapses runs of replaced characters into one `_`; underscores already
///   in the value are kept as they are
/// - Trims leading/trailing spaces and dots
/// - Limits length to 255 bytes (Linux NAME_MAX)
///
/// Spaces are kept: yt-dlp keeps them in titles too, so a rendered path
/// matches the file yt-dlp writes.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_replaced = false;

    for c in name.chars() {
        if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            if !prev_replaced {
                out.push('_');
            }
            prev_replaced = true;
        } else {
            out.push(c);
            prev_replaced = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
