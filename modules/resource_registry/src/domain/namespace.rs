//! Dotted namespace path helpers

/// Separator between namespace segments in a path
pub const SEPARATOR: char = '.';

/// Join namespace segments and a key into a qualified key
pub fn qualified_key<S: AsRef<str>>(namespace: &[S], key: &str) -> String {
    let mut qualified = join(namespace);
    if !qualified.is_empty() {
        qualified.push(SEPARATOR);
    }
    qualified.push_str(key);
    qualified
}

/// Dot-joined namespace path; empty for the root namespace
pub fn join<S: AsRef<str>>(namespace: &[S]) -> String {
    let mut path = String::new();
    for (i, segment) in namespace.iter().enumerate() {
        if i > 0 {
            path.push(SEPARATOR);
        }
        path.push_str(segment.as_ref());
    }
    path
}

/// Qualified key with its final segment removed
///
/// `ns_0.ns_1.ns_2` yields `ns_0.ns_1`; a key without separator yields `""`.
pub fn parent_namespace(qualified_key: &str) -> &str {
    qualified_key
        .rsplit_once(SEPARATOR)
        .map_or("", |(parent, _)| parent)
}

/// Every prefix path of a namespace, root-most first
///
/// `[vessel, boat, sail]` yields `vessel`, `vessel.boat`, `vessel.boat.sail`.
pub fn ancestor_paths<S: AsRef<str>>(namespace: &[S]) -> Vec<String> {
    let mut paths = Vec::with_capacity(namespace.len());
    let mut current = String::new();
    for segment in namespace {
        if !current.is_empty() {
            current.push(SEPARATOR);
        }
        current.push_str(segment.as_ref());
        paths.push(current.clone());
    }
    paths
}
