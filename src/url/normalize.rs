/// Cleans a slash-separated remote path lexically
///
/// # Normalization Steps
///
/// 1. Collapse repeated separators
/// 2. Drop `.` segments
/// 3. Resolve `..` against the preceding segment (dropped at the root of a
///    rooted path, kept at the front of a relative one)
/// 4. Remove any trailing slash
/// 5. An empty result becomes `/` for rooted paths and `.` otherwise
///
/// # Examples
///
/// ```
/// use pho::url::clean_path;
///
/// assert_eq!(clean_path("/var//albums/2019/"), "/var/albums/2019");
/// assert_eq!(clean_path("a/../../b"), "../b");
/// ```
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    match (rooted, segments.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => ".".to_string(),
        (true, false) => format!("/{}", segments.join("/")),
        (false, false) => segments.join("/"),
    }
}

/// Joins remote path elements with `/` and cleans the result
///
/// Empty elements are ignored; if every element is empty the result is the
/// empty string.
///
/// # Examples
///
/// ```
/// use pho::url::join_path;
///
/// assert_eq!(join_path(&["/var/albums", "/2019/"]), "/var/albums/2019");
/// assert_eq!(join_path(&["", "summer/"]), "summer");
/// assert_eq!(join_path(&["", ""]), "");
/// ```
pub fn join_path(elements: &[&str]) -> String {
    let parts: Vec<&str> = elements.iter().copied().filter(|e| !e.is_empty()).collect();
    if parts.is_empty() {
        return String::new();
    }

    clean_path(&parts.join("/"))
}
