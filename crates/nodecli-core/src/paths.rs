/// Joins path segments with `/` and folds the result lexically.
///
/// Empty segments are skipped, so an empty root joins as if it were absent.
pub fn join_lexical<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(segment);
    }
    normalize_lexical(&joined)
}

/// Rewrites backslashes to `/`, drops `.` segments, folds `..` into the
/// preceding segment and collapses repeated separators. Never touches disk.
pub fn normalize_lexical(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for part in unified.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    if absolute {
        return format!("/{body}");
    }
    if body.is_empty() {
        return ".".to_string();
    }
    body
}
