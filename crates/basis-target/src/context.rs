use crate::error::{Error, Result};
use crate::registry::{LazyRegistry, Registry, RegistrySource};
use crate::resolver::{PairResolver, RegistryResolver, SearchPathResolver, TargetResolver};
use crate::uid::{resolve_uid, strip_escape};
use basis_platform::path;
use std::path::{Path, PathBuf};

/// Everything target resolution needs, built once by the entry point and
/// passed down explicitly.
#[derive(Debug)]
pub struct Context {
    namespace: Option<String>,
    registry: LazyRegistry,
    search: SearchPathResolver,
}

impl Context {
    pub fn new(registry: LazyRegistry) -> Self {
        Self {
            namespace: None,
            registry,
            search: SearchPathResolver::new(),
        }
    }

    pub fn from_source(source: RegistrySource) -> Self {
        Self::new(LazyRegistry::new(source))
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self::new(LazyRegistry::ready(registry))
    }

    /// Override the namespace declared by the registry source.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_search_path(mut self, search: SearchPathResolver) -> Self {
        self.search = search;
        self
    }

    pub fn registry(&self) -> Result<&Registry> {
        self.registry.get()
    }

    /// The explicit namespace, else the registry's, else the root namespace.
    pub fn namespace(&self) -> Result<&str> {
        if let Some(namespace) = &self.namespace {
            return Ok(namespace.as_str());
        }
        Ok(self.registry()?.default_namespace().unwrap_or(""))
    }

    /// `targetuid`: the registered UID `name` refers to, or `name` itself.
    pub fn target_uid(&self, name: &str) -> Result<String> {
        Ok(resolve_uid(name, self.namespace()?, self.registry()?))
    }

    /// `istarget`: whether `name` refers to a registered target.
    pub fn is_target(&self, name: &str) -> Result<bool> {
        let uid = self.target_uid(name)?;
        Ok(self.registry()?.contains(strip_escape(&uid)))
    }

    /// `exepath`: absolute path of a target or search-path command, or of the
    /// running executable when `name` is `None`.
    pub fn exe_path(&self, name: Option<&str>) -> Result<PathBuf> {
        let Some(name) = name else {
            return Ok(path::current_exe()?);
        };

        let registry = self.registry()?;
        let resolver = PairResolver::new(
            RegistryResolver::new(self.namespace()?, registry),
            &self.search,
        );
        resolver
            .resolve(name)
            .ok_or_else(|| Error::UnresolvableTarget {
                name: name.to_owned(),
            })
    }

    /// `exename`: file name of [`Context::exe_path`].
    pub fn exe_name(&self, name: Option<&str>) -> Result<String> {
        let path = self.exe_path(name)?;
        Ok(path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default())
    }

    /// `exedir`: directory of [`Context::exe_path`].
    pub fn exe_dir(&self, name: Option<&str>) -> Result<PathBuf> {
        let path = self.exe_path(name)?;
        Ok(path.parent().map(Path::to_path_buf).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TargetKind;

    fn context() -> Context {
        let mut builder = Registry::builder();
        builder.namespace("proj.sub");
        builder
            .target("proj.sub.tool", "bin/tool", TargetKind::Executable)
            .unwrap();
        builder
            .target("proj.helper", "libexec/helper", TargetKind::Executable)
            .unwrap();
        Context::from_registry(builder.build("/opt/proj").unwrap())
    }

    #[test]
    fn test_namespace_defaults_to_registry() {
        let ctx = context();
        assert_eq!(ctx.namespace().unwrap(), "proj.sub");
        let ctx = context().with_namespace("proj");
        assert_eq!(ctx.namespace().unwrap(), "proj");
    }

    #[test]
    fn test_target_uid_and_is_target() {
        let ctx = context();
        assert_eq!(ctx.target_uid("tool").unwrap(), "proj.sub.tool");
        assert_eq!(ctx.target_uid("helper").unwrap(), "proj.helper");
        assert!(ctx.is_target("tool").unwrap());
        assert!(ctx.is_target(".proj.helper").unwrap());
        assert!(!ctx.is_target("ls").unwrap());
        assert!(!ctx.is_target("").unwrap());
    }

    #[test]
    fn test_exe_path_name_dir() {
        let ctx = context();
        assert_eq!(
            ctx.exe_path(Some("tool")).unwrap(),
            PathBuf::from("/opt/proj/bin/tool")
        );
        assert_eq!(ctx.exe_name(Some("helper")).unwrap(), "helper");
        assert_eq!(
            ctx.exe_dir(Some("helper")).unwrap(),
            PathBuf::from("/opt/proj/libexec")
        );
    }

    #[test]
    fn test_exe_path_without_name_is_current_exe() {
        let ctx = context();
        let exe = path::current_exe().unwrap();
        assert_eq!(ctx.exe_path(None).unwrap(), exe);
        assert_eq!(ctx.exe_dir(None).unwrap(), exe.parent().unwrap());
    }

    #[test]
    fn test_unresolvable_target() {
        let ctx = context().with_search_path(
            SearchPathResolver::new()
                .with_paths("")
                .with_cwd(std::env::temp_dir()),
        );
        let err = ctx.exe_path(Some("basis_missing_tool")).unwrap_err();
        assert!(matches!(err, Error::UnresolvableTarget { name } if name == "basis_missing_tool"));
        assert!(ctx.exe_name(Some("basis_missing_tool")).is_err());
        assert!(ctx.exe_dir(Some("basis_missing_tool")).is_err());
    }

    #[test]
    fn test_empty_name_is_not_resolvable() {
        let ctx = context();
        assert!(!ctx.is_target("").unwrap());
        let err = ctx.exe_path(Some("")).unwrap_err();
        assert!(matches!(err, Error::UnresolvableTarget { name } if name.is_empty()));
    }

    #[cfg(unix)]
    #[test]
    fn test_search_path_fallback() {
        let ctx = context();
        let sh = ctx.exe_path(Some("sh")).unwrap();
        assert!(sh.is_absolute());
        assert_eq!(ctx.exe_name(Some("sh")).unwrap(), "sh");
    }
}
