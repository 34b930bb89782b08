//! Rendering of `config_pro.php` from its template.
//!
//! The template is plain text with exactly two `%s` slots: the first receives
//! the profile path, the second the license path. `%%` renders a single `%`.

use crate::error::{PackagingError, PackagingResult};
use crate::package_id::PackageId;
use std::fs;
use std::io;
use std::path::Path;

/// The two generated file names substituted into the config template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProConfigPaths {
    /// `profiles-<id>.bin`
    pub profile_path: String,
    /// `license-<id>.key`
    pub license_path: String,
}

impl ProConfigPaths {
    pub fn for_package(id: &PackageId) -> Self {
        Self {
            profile_path: format!("profiles-{id}.bin"),
            license_path: format!("license-{id}.key"),
        }
    }
}

/// A parsed config template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProConfigTemplate {
    head: String,
    between: String,
    tail: String,
}

impl ProConfigTemplate {
    /// Parses template text.
    pub fn parse(source: &str) -> PackagingResult<Self> {
        let mut pieces = Vec::with_capacity(3);
        let mut current = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                current.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => current.push('%'),
                Some('s') => pieces.push(std::mem::take(&mut current)),
                Some(other) => {
                    return Err(PackagingError::Template(format!(
                        "unsupported directive '%{other}'"
                    )));
                }
                None => {
                    return Err(PackagingError::Template(
                        "dangling '%' at end of template".to_string(),
                    ));
                }
            }
        }
        pieces.push(current);

        match <[String; 3]>::try_from(pieces) {
            Ok([head, between, tail]) => Ok(Self {
                head,
                between,
                tail,
            }),
            Err(pieces) => Err(PackagingError::Template(format!(
                "expected 2 '%s' slots, found {}",
                pieces.len() - 1
            ))),
        }
    }

    /// Loads and parses a template file.
    pub fn load(path: impl AsRef<Path>) -> PackagingResult<Self> {
        let path = path.as_ref();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PackagingError::MissingTemplate(path.to_path_buf()));
            }
            Err(e) => return Err(PackagingError::io(path, e)),
        };
        Self::parse(&source)
    }

    pub fn render(&self, paths: &ProConfigPaths) -> String {
        let mut out = String::with_capacity(
            self.head.len()
                + self.between.len()
                + self.tail.len()
                + paths.profile_path.len()
                + paths.license_path.len(),
        );
        out.push_str(&self.head);
        out.push_str(&paths.profile_path);
        out.push_str(&self.between);
        out.push_str(&paths.license_path);
        out.push_str(&self.tail);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths() -> ProConfigPaths {
        ProConfigPaths {
            profile_path: "profiles-x.bin".into(),
            license_path: "license-x.key".into(),
        }
    }

    #[test]
    fn slots_filled_in_order() {
        let template = ProConfigTemplate::parse("A=%s;B=%s;").unwrap();
        assert_eq!(template.render(&paths()), "A=profiles-x.bin;B=license-x.key;");
    }

    #[test]
    fn escaped_percent() {
        let template = ProConfigTemplate::parse("%s 100%% %s").unwrap();
        assert_eq!(template.render(&paths()), "profiles-x.bin 100% license-x.key");
    }

    #[test]
    fn slot_count_enforced() {
        assert!(ProConfigTemplate::parse("only %s").is_err());
        assert!(ProConfigTemplate::parse("%s %s %s").is_err());
        assert!(ProConfigTemplate::parse("none").is_err());
    }

    #[test]
    fn unknown_directive_rejected() {
        let err = ProConfigTemplate::parse("%s %d %s").unwrap_err();
        assert!(err.to_string().contains("%d"));
        assert!(ProConfigTemplate::parse("%s %s %").is_err());
    }

    #[test]
    fn paths_for_package() {
        let id = PackageId::parse("0123456789abcdef0123456789abcdef").unwrap();
        let paths = ProConfigPaths::for_package(&id);
        assert_eq!(paths.profile_path, "profiles-0123456789abcdef0123456789abcdef.bin");
        assert_eq!(paths.license_path, "license-0123456789abcdef0123456789abcdef.key");
    }
}
