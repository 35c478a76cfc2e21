//! Namespace injection.
//!
//! This is a literal text rewrite, not a YAML edit: any line that is exactly
//! `metadata:` plus a line terminator (`\n` or `\r\n`) gets a namespace line
//! after it, whatever its structural role. Indented, commented, or
//! unterminated `metadata:` lines are left alone.

use std::path::Path;

use crate::models::ManifestRef;

/// The key line that triggers an injection, without its terminator.
pub const METADATA_KEY: &str = "metadata:";

/// Whether `manifest` should receive namespace lines.
///
/// The namespace manifest never does, and neither does anything whose path
/// relative to the deploy directory starts with `cluster_prefix`.
pub fn is_eligible(manifest: &ManifestRef, cluster_prefix: &str) -> bool {
    if manifest.is_namespace() {
        return false;
    }

    let scoped_path = manifest.relative_path.as_deref().unwrap_or(&manifest.path);
    !is_cluster_scoped(scoped_path, cluster_prefix)
}

fn is_cluster_scoped(path: &Path, cluster_prefix: &str) -> bool {
    // Plain string prefix: `cluster/`, `clusterrole.yaml` and
    // `cluster-binding.yaml` all count.
    path.to_string_lossy().starts_with(cluster_prefix)
}

/// The line inserted beneath each `metadata:` line, ending in `terminator`.
pub fn namespace_line(namespace: &str, terminator: &str) -> String {
    format!("  namespace: {}{}", namespace, terminator)
}

/// The terminator of `line` if it is exactly `metadata:` plus a line ending.
fn metadata_terminator(line: &str) -> Option<&str> {
    match line.strip_prefix(METADATA_KEY)? {
        terminator @ ("\n" | "\r\n") => Some(terminator),
        _ => None,
    }
}

/// Rebuild `text` with a namespace line after every `metadata:` line.
///
/// Returns the new text and the number of lines inserted. Existing line
/// endings are kept, and each inserted line reuses the ending of the
/// `metadata:` line above it.
pub fn inject_namespace(text: &str, namespace: &str) -> (String, usize) {
    let mut output = String::with_capacity(text.len());
    let mut injected = 0;

    for line in text.split_inclusive('\n') {
        output.push_str(line);
        if let Some(terminator) = metadata_terminator(line) {
            output.push_str(&namespace_line(namespace, terminator));
            injected += 1;
        }
    }

    (output, injected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const NS: &str = "octarine-dataplane";

    #[test]
    fn test_injects_after_metadata() {
        let (text, count) = inject_namespace("metadata:\nname: a\n", NS);
        assert_eq!(text, "metadata:\n  namespace: octarine-dataplane\nname: a\n");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_every_metadata_line_gets_one_injection() {
        let input = "kind: A\nmetadata:\n  name: a\n---\nkind: B\nmetadata:\n  name: b\n";
        let (text, count) = inject_namespace(input, NS);
        assert_eq!(count, 2);
        assert_eq!(
            text,
            "kind: A\nmetadata:\n  namespace: octarine-dataplane\n  name: a\n---\n\
             kind: B\nmetadata:\n  namespace: octarine-dataplane\n  name: b\n"
        );
    }

    #[test]
    fn test_near_misses_are_untouched() {
        let input = "  metadata:\n# metadata:\nmetadata: {}\nmetadata: \r\nmetadata:\r\rx\nmetadata:";
        let (text, count) = inject_namespace(input, NS);
        assert_eq!(count, 0);
        assert_eq!(text, input);
    }

    #[test]
    fn test_crlf_metadata_gets_crlf_namespace_line() {
        let (text, count) = inject_namespace("kind: Service\r\nmetadata:\r\n  name: a\r\n", NS);
        assert_eq!(count, 1);
        assert_eq!(
            text,
            "kind: Service\r\nmetadata:\r\n  namespace: octarine-dataplane\r\n  name: a\r\n"
        );
    }

    #[test]
    fn test_mixed_line_endings_follow_each_metadata_line() {
        let (text, count) = inject_namespace("metadata:\r\n---\nmetadata:\n", NS);
        assert_eq!(count, 2);
        assert_eq!(
            text,
            "metadata:\r\n  namespace: octarine-dataplane\r\n---\n\
             metadata:\n  namespace: octarine-dataplane\n"
        );
    }

    #[test]
    fn test_nested_metadata_key_matches_literally() {
        // Structure is not understood; a bare `metadata:` line anywhere matches.
        let input = "spec:\n  template:\nmetadata:\n";
        let (text, count) = inject_namespace(input, NS);
        assert_eq!(count, 1);
        assert!(text.ends_with("metadata:\n  namespace: octarine-dataplane\n"));
    }

    #[test]
    fn test_reinjection_doubles_lines() {
        let (once, _) = inject_namespace("metadata:\n", NS);
        let (twice, count) = inject_namespace(&once, NS);
        assert_eq!(count, 1);
        assert_eq!(
            twice,
            "metadata:\n  namespace: octarine-dataplane\n  namespace: octarine-dataplane\n"
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(inject_namespace("", NS), (String::new(), 0));
    }

    #[test]
    fn test_namespace_manifest_is_not_eligible() {
        let manifest = ManifestRef::namespace("namespace.yaml");
        assert!(!is_eligible(&manifest, "cluster"));
    }

    #[test]
    fn test_cluster_prefix_uses_path_relative_to_root() {
        let root = PathBuf::from("../deploy");
        let cluster = ManifestRef::discovered(&root, root.join("cluster").join("b.yaml"));
        let role = ManifestRef::discovered(&root, root.join("clusterrole.yaml"));
        let app = ManifestRef::discovered(&root, root.join("app").join("cluster.yaml"));

        assert!(!is_eligible(&cluster, "cluster"));
        assert!(!is_eligible(&role, "cluster"));
        assert!(is_eligible(&app, "cluster"));
    }
}
