//! Configuration injected into the license subsystem.
//!
//! Two sources feed it: the JSON settings file of the host application, and
//! the `config_pro.php` rendered into every pro package, which defines
//! `AUTHENTICATION_FILE_PATH` and `MONSTA_LICENSE_PATH`.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable consulted when no temp directory is configured.
pub const UPLOAD_TMP_DIR_ENV: &str = "MONSTA_UPLOAD_TMP_DIR";

/// Constant naming the profile file in `config_pro.php`.
pub const AUTHENTICATION_FILE_DEFINE: &str = "AUTHENTICATION_FILE_PATH";

/// Constant naming the license file in `config_pro.php`.
pub const LICENSE_PATH_DEFINE: &str = "MONSTA_LICENSE_PATH";

/// Paths the license subsystem works with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseConfig {
    /// Installed license file.
    pub license_path: Option<PathBuf>,
    /// Profile file populated by the host at first use.
    pub authentication_file_path: Option<PathBuf>,
    /// Explicit temp directory override.
    pub temp_dir: Option<PathBuf>,
}

impl LicenseConfig {
    /// Loads settings from a JSON file. A missing file yields defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(LicenseError::io(path, e)),
        };

        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| LicenseError::Config(format!("{}: {e}", path.display())))?;
        Ok(config.normalized())
    }

    /// Loads the license paths defined by a rendered `config_pro.php`.
    ///
    /// A missing file leaves both paths unset, which is the free tier.
    pub fn from_pro_config(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let mut config = Self::default();
        config.apply_pro_config(path)?;
        Ok(config)
    }

    /// Overlays the license paths from a rendered `config_pro.php`.
    pub fn with_pro_config(mut self, path: impl AsRef<Path>) -> LicenseResult<Self> {
        self.apply_pro_config(path)?;
        Ok(self)
    }

    fn apply_pro_config(&mut self, path: impl AsRef<Path>) -> LicenseResult<()> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No pro configuration present");
                return Ok(());
            }
            Err(e) => return Err(LicenseError::io(path, e)),
        };

        let base = pro_config_dir(path)?;
        let base = base.as_path();
        for (name, value) in parse_defines(&raw, base)? {
            let value = non_empty(value).map(|v| base.join(v));
            match name.as_str() {
                AUTHENTICATION_FILE_DEFINE => self.authentication_file_path = value,
                LICENSE_PATH_DEFINE => self.license_path = value,
                _ => {}
            }
        }
        Ok(())
    }

    /// Installed license file, if configured.
    #[must_use]
    pub fn license_path(&self) -> Option<&Path> {
        self.license_path.as_deref()
    }

    /// Profile file, if configured.
    #[must_use]
    pub fn authentication_file_path(&self) -> Option<&Path> {
        self.authentication_file_path.as_deref()
    }

    /// True when a license path is configured and the file exists.
    #[must_use]
    pub fn is_license_present(&self) -> bool {
        self.license_path().is_some_and(Path::is_file)
    }

    /// Temp directory: explicit setting, then [`UPLOAD_TMP_DIR_ENV`], then the
    /// system default.
    #[must_use]
    pub fn resolve_temp_dir(&self) -> PathBuf {
        let from_env = std::env::var_os(UPLOAD_TMP_DIR_ENV).map(PathBuf::from);
        pick_temp_dir(self.temp_dir.clone(), from_env)
    }

    fn normalized(self) -> Self {
        Self {
            license_path: self.license_path.and_then(non_empty),
            authentication_file_path: self.authentication_file_path.and_then(non_empty),
            temp_dir: self.temp_dir.and_then(non_empty),
        }
    }
}

fn non_empty(path: PathBuf) -> Option<PathBuf> {
    (!path.as_os_str().is_empty()).then_some(path)
}

/// Absolute directory of `path`, the value `dirname(__FILE__)` takes inside it.
fn pro_config_dir(path: &Path) -> LicenseResult<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| LicenseError::io(path, e))?;
    Ok(absolute
        .parent()
        .map_or_else(|| absolute.clone(), Path::to_path_buf))
}

fn pick_temp_dir(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    explicit
        .and_then(non_empty)
        .or_else(|| from_env.and_then(non_empty))
        .unwrap_or_else(std::env::temp_dir)
}

/// Extracts `define("NAME", expr);` pairs.
///
/// `expr` is a `.`-concatenation of string literals and `dirname(__FILE__)` /
/// `__DIR__`, which evaluate to `base`.
fn parse_defines(contents: &str, base: &Path) -> LicenseResult<Vec<(String, PathBuf)>> {
    let mut defines = Vec::new();

    for line in contents.lines() {
        if is_comment(line) {
            continue;
        }
        let Some(start) = line.find("define(") else {
            continue;
        };
        let args = &line[start + "define(".len()..];
        let Some(end) = args.rfind(')') else {
            return Err(LicenseError::Config(format!("unterminated define: {line}")));
        };
        let args = &args[..end];

        let parts = split_outside_quotes(args, ',');
        let [name, expr] = parts.as_slice() else {
            return Err(LicenseError::Config(format!("malformed define: {line}")));
        };
        let name = unquote(name.trim())
            .ok_or_else(|| LicenseError::Config(format!("define name must be a string: {line}")))?;

        let mut value = String::new();
        for part in split_outside_quotes(expr, '.') {
            let part = part.trim();
            if part == "dirname(__FILE__)" || part == "__DIR__" {
                value.push_str(&base.to_string_lossy());
            } else if let Some(literal) = unquote(part) {
                value.push_str(literal);
            } else {
                return Err(LicenseError::Config(format!(
                    "unsupported expression in define {name}: {part}"
                )));
            }
        }

        defines.push((name.to_string(), PathBuf::from(value)));
    }

    Ok(defines)
}

fn is_comment(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("//") || line.starts_with('#') || line.starts_with('*')
}

fn split_outside_quotes(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut last = 0;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == sep => {
                parts.push(&s[last..i]);
                last = i + c.len_utf8();
            }
            None => {}
        }
    }
    parts.push(&s[last..]);
    parts
}

fn unquote(s: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        s.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
            .filter(|inner| !inner.contains(q))
    })
}
