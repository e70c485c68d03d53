//! Namespace fallback for short target names.

use crate::registry::Registry;

/// Separates namespace segments. A leading separator marks a name as fully
/// qualified.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Resolve `name` to a registered target UID.
///
/// `name` is tried under `namespace`, then under each shorter prefix of it,
/// and finally on its own. The first registered candidate wins. A name
/// nothing matches is returned unchanged and treated by callers as a literal
/// command, as are the empty name and names starting with
/// [`NAMESPACE_SEPARATOR`].
///
/// ```
/// use basis_target::{Registry, TargetKind, resolve_uid};
///
/// let mut builder = Registry::builder();
/// builder.target("proj.sub.tool", "bin/tool", TargetKind::Executable).unwrap();
/// let registry = builder.build("/opt/proj").unwrap();
///
/// assert_eq!(resolve_uid("tool", "proj.sub", &registry), "proj.sub.tool");
/// assert_eq!(resolve_uid("other", "proj.sub", &registry), "other");
/// ```
pub fn resolve_uid(name: &str, namespace: &str, registry: &Registry) -> String {
    if name.is_empty() || name.starts_with(NAMESPACE_SEPARATOR) {
        return name.to_owned();
    }
    // Registered qualified names resolve to themselves.
    if name.contains(NAMESPACE_SEPARATOR) && registry.contains(name) {
        return name.to_owned();
    }

    let mut prefix = namespace.trim_matches(NAMESPACE_SEPARATOR);
    loop {
        let candidate = if prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{prefix}{NAMESPACE_SEPARATOR}{name}")
        };
        if registry.contains(&candidate) {
            return candidate;
        }
        if prefix.is_empty() {
            break;
        }
        prefix = match prefix.rfind(NAMESPACE_SEPARATOR) {
            Some(i) => &prefix[..i],
            None => "",
        };
    }

    name.to_owned()
}

/// Drop the leading fully-qualified marker, if any.
pub fn strip_escape(uid: &str) -> &str {
    uid.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(uid)
}
