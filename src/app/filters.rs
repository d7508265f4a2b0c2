use crate::app::error::{Error, Result};
use std::path::Path;

/// Directory names that are always pruned.
pub const BUILTIN_EXCLUDED_DIRECTORIES: &[&str] = &[
    ".git",
    "bin",
    "out",
    ".vscode",
    "__pycache__",
    "zig-out",
    "zig-cache",
];

/// File extensions and exact file names that are never scanned.
pub const BUILTIN_EXCLUDED_FILETYPES: &[&str] = &[
    ".md",
    ".txt",
    ".sh",
    ".bat",
    ".obj",
    ".dll",
    ".lib",
    ".exe",
    ".pdb",
    ".id",
    ".ini",
    ".git",
    ".gitignore",
    ".gitattributes",
    ".gitmodules",
    ".toml",
    ".yaml",
    ".wav",
    ".mp3",
    ".ogg",
    ".png",
    ".jpeg",
    ".bmp",
    ".ps",
    ".lnk",
    ".leo",
];

/// User supplied include/exclude policy.
///
/// Each list is inactive while empty and keeps the order it was given in.
/// The built-in lists are applied on top and cannot be switched off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    extension_whitelist: Vec<String>,
    excluded_directories: Vec<String>,
    excluded_filenames: Vec<String>,
    print_filenames: bool,
}

impl FilterConfig {
    pub fn new(
        extension_whitelist: Vec<String>,
        excluded_directories: Vec<String>,
        excluded_filenames: Vec<String>,
    ) -> Result<Self> {
        for ext in &extension_whitelist {
            validate_extension(ext)?;
            if BUILTIN_EXCLUDED_FILETYPES.contains(&ext.as_str()) {
                log::warn!(
                    "Whitelisted extension '{}' is excluded by the built-in filters and will never match",
                    ext
                );
            }
        }
        for dir in &excluded_directories {
            validate_base_name("directory", dir)?;
        }
        for name in &excluded_filenames {
            validate_base_name("filename", name)?;
        }

        Ok(Self {
            extension_whitelist,
            excluded_directories,
            excluded_filenames,
            print_filenames: false,
        })
    }

    pub fn with_print_filenames(mut self, print_filenames: bool) -> Self {
        self.print_filenames = print_filenames;
        self
    }

    pub fn extension_whitelist(&self) -> &[String] {
        &self.extension_whitelist
    }

    pub fn excluded_directories(&self) -> &[String] {
        &self.excluded_directories
    }

    pub fn excluded_filenames(&self) -> &[String] {
        &self.excluded_filenames
    }

    pub fn print_filenames(&self) -> bool {
        self.print_filenames
    }

    /// Whether traversal may descend into a directory with this base name.
    pub fn allows_dir(&self, name: &str) -> bool {
        if BUILTIN_EXCLUDED_DIRECTORIES.contains(&name) {
            return false;
        }
        !self.excluded_directories.iter().any(|d| d == name)
    }

    /// Whether a file should be handed to the line scanner.
    pub fn allows_file(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str());
        let suffix = suffix(path);

        if is_builtin_excluded_file(name, suffix.as_deref()) {
            return false;
        }

        if !self.extension_whitelist.is_empty() {
            match &suffix {
                Some(ext) if self.extension_whitelist.contains(ext) => {}
                _ => return false,
            }
        }

        if !self.excluded_filenames.is_empty() {
            if let Some(name) = name {
                if self.excluded_filenames.iter().any(|n| n == name) {
                    return false;
                }
            }
        }

        true
    }
}

fn is_builtin_excluded_file(name: Option<&str>, suffix: Option<&str>) -> bool {
    let listed = |s: &str| BUILTIN_EXCLUDED_FILETYPES.contains(&s);
    suffix.is_some_and(listed) || name.is_some_and(listed)
}

/// Final extension of the file name including its leading dot.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn suffix(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e))
}

fn validate_extension(token: &str) -> Result<()> {
    let rest = token.strip_prefix('.').ok_or_else(|| {
        Error::Configuration(format!(
            "extension '{}' must start with '.' (e.g. '.{}')",
            token, token
        ))
    })?;
    if rest.is_empty() || rest.contains(['.', '/', '\\']) {
        return Err(Error::Configuration(format!(
            "extension '{}' must be a single extension such as '.py'",
            token
        )));
    }
    Ok(())
}

fn validate_base_name(kind: &str, token: &str) -> Result<()> {
    if token.is_empty() || token == "." || token == ".." || token.contains(['/', '\\']) {
        return Err(Error::Configuration(format!(
            "{} '{}' must be a plain base name",
            kind, token
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_config_allows_everything_not_builtin() {
        let config = FilterConfig::default();
        assert!(config.allows_dir("src"));
        assert!(config.allows_file(Path::new("src/main.rs")));
        assert!(config.allows_file(Path::new("Makefile")));
        assert!(config.allows_file(Path::new(".env")));
    }

    #[test]
    fn builtin_directories_always_pruned() {
        let config = FilterConfig::new(vec![], strings(&["target"]), vec![]).unwrap();
        for dir in BUILTIN_EXCLUDED_DIRECTORIES {
            assert!(!config.allows_dir(dir), "{} should be pruned", dir);
        }
        assert!(!config.allows_dir("target"));
        assert!(config.allows_dir("src"));
    }

    #[test]
    fn builtin_filetypes_match_suffix_and_exact_name() {
        let config = FilterConfig::default();
        assert!(!config.allows_file(Path::new("README.md")));
        assert!(!config.allows_file(Path::new("Cargo.toml")));
        assert!(!config.allows_file(Path::new("proj/.gitignore")));
        assert!(!config.allows_file(Path::new(".gitmodules")));
        assert!(!config.allows_file(Path::new("logo.png")));
        // Only the last extension is compared.
        assert!(config.allows_file(Path::new("notes.md.py")));
    }

    #[test]
    fn whitelist_cannot_override_builtin_exclusions() {
        let config = FilterConfig::new(strings(&[".md", ".py"]), vec![], vec![]).unwrap();
        assert!(!config.allows_file(Path::new("README.md")));
        assert!(config.allows_file(Path::new("a.py")));
    }

    #[test]
    fn whitelist_restricts_extensions() {
        let config = FilterConfig::new(strings(&[".py", ".json"]), vec![], vec![]).unwrap();
        assert!(config.allows_file(Path::new("a.py")));
        assert!(config.allows_file(Path::new("data.json")));
        assert!(!config.allows_file(Path::new("main.rs")));
        assert!(!config.allows_file(Path::new("Makefile")));
    }

    #[test]
    fn excluded_filenames_compose_with_whitelist() {
        let config =
            FilterConfig::new(strings(&[".py"]), vec![], strings(&["skip.py"])).unwrap();
        assert!(!config.allows_file(Path::new("proj/skip.py")));
        assert!(config.allows_file(Path::new("proj/keep.py")));
    }

    #[test]
    fn suffix_includes_leading_dot() {
        assert_eq!(suffix(Path::new("a/b.tar.gz")).as_deref(), Some(".gz"));
        assert_eq!(suffix(Path::new(".gitignore")), None);
        assert_eq!(suffix(Path::new("Makefile")), None);
        assert_eq!(suffix(Path::new("trailing.")), None);
    }

    #[test]
    fn malformed_tokens_are_configuration_errors() {
        for bad in ["py", ".", ".tar.gz", "./py", ""] {
            let err = FilterConfig::new(strings(&[bad]), vec![], vec![]).unwrap_err();
            assert!(matches!(err, Error::Configuration(_)), "{:?}", bad);
        }
        for bad in ["", "..", "a/b", "a\\b"] {
            assert!(FilterConfig::new(vec![], strings(&[bad]), vec![]).is_err());
            assert!(FilterConfig::new(vec![], vec![], strings(&[bad])).is_err());
        }
    }

    #[test]
    fn print_flag_does_not_affect_filtering() {
        let config = FilterConfig::new(strings(&[".py"]), vec![], vec![])
            .unwrap()
            .with_print_filenames(true);
        assert!(config.print_filenames());
        assert!(config.allows_file(Path::new("a.py")));
        assert!(!config.allows_file(Path::new("a.rs")));
    }
}
