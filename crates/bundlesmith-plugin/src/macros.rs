//! Convenience macros for plugin development.

/// Macro for creating a plugin info struct.
///
/// The kind defaults to `PostBuild`; pass `kind:` to override it.
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     name: "zip_output",
///     description: "Archives the build output",
///     version: "1.0.0",
///     author: "Bundlesmith Team"
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        name: $name:expr,
        description: $desc:expr,
        version: $version:expr,
        author: $author:expr
    ) => {
        $crate::traits::PluginInfo {
            name: $name.to_string(),
            description: $desc.to_string(),
            version: $version.to_string(),
            author: $author.to_string(),
            kind: $crate::traits::PluginKind::PostBuild,
            enabled: true,
        }
    };
    (
        name: $name:expr,
        description: $desc:expr,
        version: $version:expr,
        author: $author:expr,
        kind: $kind:expr
    ) => {
        $crate::traits::PluginInfo {
            name: $name.to_string(),
            description: $desc.to_string(),
            version: $version.to_string(),
            author: $author.to_string(),
            kind: $kind,
            enabled: true,
        }
    };
}
