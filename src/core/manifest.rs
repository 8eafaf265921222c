//! Manifest (demobuild.toml) parsing and validation
//!
//! The manifest lists the build targets in order, the two external tools and
//! the bundler configuration files used per mode.
//! Supports environment variable substitution using ${VAR} syntax.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::ManifestError;

/// The project manifest (demobuild.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectConfig,

    /// External tools
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Bundler configuration files
    #[serde(default)]
    pub bundler: BundlerConfig,

    /// Build targets, in build order
    #[serde(default)]
    pub targets: Vec<BuildTarget>,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Project version (semver)
    #[serde(default = "default_version")]
    pub version: String,

    /// Project description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// SPDX license expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Source repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Search keywords
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// External tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsConfig {
    /// Packaging tool run once per target
    #[serde(default = "default_packager")]
    pub packager: String,

    /// Packager arguments placed before the target path
    #[serde(default = "default_packager_args")]
    pub packager_args: Vec<String>,

    /// Bundler run once after all targets
    #[serde(default = "default_bundler")]
    pub bundler: String,

    /// Bundler arguments placed before `--config`
    #[serde(default)]
    pub bundler_args: Vec<String>,

    /// Bundler arguments prepended when serving
    #[serde(default = "default_serve_args")]
    pub serve_args: Vec<String>,
}

fn default_packager() -> String {
    defaults::DEFAULT_PACKAGER.to_string()
}

fn default_packager_args() -> Vec<String> {
    defaults::DEFAULT_PACKAGER_ARGS.iter().map(|s| (*s).to_string()).collect()
}

fn default_bundler() -> String {
    defaults::DEFAULT_BUNDLER.to_string()
}

fn default_serve_args() -> Vec<String> {
    defaults::DEFAULT_SERVE_ARGS.iter().map(|s| (*s).to_string()).collect()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            packager: default_packager(),
            packager_args: default_packager_args(),
            bundler: default_bundler(),
            bundler_args: Vec::new(),
            serve_args: default_serve_args(),
        }
    }
}

/// Bundler configuration file per mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundlerConfig {
    /// Development configuration
    #[serde(default = "default_dev_config")]
    pub dev_config: String,

    /// Production configuration
    #[serde(default = "default_prod_config")]
    pub prod_config: String,
}

fn default_dev_config() -> String {
    defaults::DEFAULT_DEV_CONFIG.to_string()
}

fn default_prod_config() -> String {
    defaults::DEFAULT_PROD_CONFIG.to_string()
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            dev_config: default_dev_config(),
            prod_config: default_prod_config(),
        }
    }
}

/// One external package built before bundling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildTarget {
    /// Output package name
    pub name: String,

    /// Source directory, relative to the project root
    pub path: PathBuf,

    /// Extra packager arguments for this target
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl BuildTarget {
    /// Create a target with no extra arguments
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            args: Vec::new(),
        }
    }

    /// Directory the packager writes this target's artifact to
    pub fn output_dir(&self) -> PathBuf {
        self.path.join(defaults::PACKAGE_OUT_DIR)
    }

    /// Dependency specifier under which the artifact is consumed downstream
    pub fn dependency_spec(&self) -> String {
        format!("file:{}", self.output_dir().display())
    }
}

impl Manifest {
    /// Manifest describing the five built-in demo packages
    pub fn demo() -> Self {
        Self {
            project: ProjectConfig {
                name: defaults::DEFAULT_PROJECT_NAME.to_string(),
                version: default_version(),
                description: Some("WebAssembly demo packages bundled for the browser".to_string()),
                license: None,
                repository: None,
                keywords: vec!["wasm".to_string(), "webpack".to_string()],
            },
            tools: ToolsConfig::default(),
            bundler: BundlerConfig::default(),
            targets: defaults::DEFAULT_TARGETS
                .iter()
                .map(|name| BuildTarget::new(*name, Path::new("..").join(name)))
                .collect(),
        }
    }

    /// Load manifest from file path with environment variable substitution
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let substituted =
            substitute_env_vars_in_toml(&content).map_err(ManifestError::Substitution)?;

        Self::from_toml(&substituted).map_err(|source| ManifestError::Parse { source })
    }

    /// Load and validate a manifest, reporting every problem at once
    pub fn load_validated(path: &Path) -> Result<Self, ManifestError> {
        let manifest = Self::load(path)?;
        let errors = manifest.validate();
        if errors.is_empty() {
            Ok(manifest)
        } else {
            Err(ManifestError::Invalid { errors })
        }
    }

    /// Load manifest from TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize manifest to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Collect all validation problems; empty when the manifest is usable
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.project.name.trim().is_empty() {
            errors.push("Field 'project.name' cannot be empty".to_string());
        }
        if let Err(e) = semver::Version::parse(&self.project.version) {
            errors.push(format!(
                "Invalid project.version '{}': {e}",
                self.project.version
            ));
        }

        if self.tools.packager.trim().is_empty() {
            errors.push("Field 'tools.packager' cannot be empty".to_string());
        }
        if self.tools.bundler.trim().is_empty() {
            errors.push("Field 'tools.bundler' cannot be empty".to_string());
        }
        if self.bundler.dev_config.trim().is_empty() {
            errors.push("Field 'bundler.dev_config' cannot be empty".to_string());
        }
        if self.bundler.prod_config.trim().is_empty() {
            errors.push("Field 'bundler.prod_config' cannot be empty".to_string());
        }

        if self.targets.is_empty() {
            errors.push("At least one [[targets]] entry is required".to_string());
        }

        let mut seen = HashSet::new();
        for (index, target) in self.targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                errors.push(format!("targets[{index}]: 'name' cannot be empty"));
            } else if !seen.insert(target.name.as_str()) {
                errors.push(format!(
                    "targets[{index}]: duplicate target name '{}'",
                    target.name
                ));
            }
            if target.path.as_os_str().is_empty() {
                errors.push(format!("targets[{index}]: 'path' cannot be empty"));
            }
        }

        errors
    }
}

/// Directory that invocations run in: the manifest's parent directory
///
/// Relative manifest paths are anchored at the current directory so the
/// result can be joined with a tool path and used as a child's working
/// directory without being resolved twice.
pub fn project_root(manifest_path: &Path) -> PathBuf {
    let parent = match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if parent.is_absolute() {
        return parent.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) if parent == Path::new(".") => cwd,
        Ok(cwd) => cwd.join(parent),
        Err(_) => parent.to_path_buf(),
    }
}

/// Substitute environment variables in a string using ${VAR} syntax.
///
/// Unset variables expand to the empty string.
///
/// # Examples
/// ```
/// use demobuild::core::manifest::substitute_env_vars;
///
/// std::env::set_var("DEMOBUILD_DOC_VAR", "hello");
/// let result = substitute_env_vars("prefix_${DEMOBUILD_DOC_VAR}_suffix").unwrap();
/// assert_eq!(result, "prefix_hello_suffix");
/// std::env::remove_var("DEMOBUILD_DOC_VAR");
/// ```
pub fn substitute_env_vars(input: &str) -> Result<String, String> {
    let re =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| format!("Invalid regex: {e}"))?;

    let substituted = re.replace_all(input, |caps: &regex::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_default()
    });

    Ok(substituted.into_owned())
}

/// Substitute environment variables in all string values of a TOML document
fn substitute_env_vars_in_toml(content: &str) -> Result<String, String> {
    let mut value: toml::Value =
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {e}"))?;

    substitute_in_value(&mut value)?;

    toml::to_string_pretty(&value).map_err(|e| format!("Failed to serialize TOML: {e}"))
}

fn substitute_in_value(value: &mut toml::Value) -> Result<(), String> {
    match value {
        toml::Value::String(s) => {
            *s = substitute_env_vars(s)?;
        }
        toml::Value::Array(arr) => {
            for item in arr.iter_mut() {
                substitute_in_value(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                substitute_in_value(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_MANIFEST: &str = r#"
[project]
name = "div-examples"
version = "0.2.0"
license = "MIT OR Apache-2.0"
repository = "https://github.com/example/div-rs"
keywords = ["wasm", "div"]

[tools]
packager = "wasm-pack"
packager_args = ["build", "--target", "bundler"]
bundler = "webpack"

[bundler]
dev_config = "webpack.dev.js"
prod_config = "webpack.prod.js"

[[targets]]
name = "hello_world"
path = "../hello_world"

[[targets]]
name = "toggle"
path = "../toggle"
args = ["--dev"]
"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::from_toml(FULL_MANIFEST).unwrap();
        assert_eq!(manifest.project.name, "div-examples");
        assert_eq!(manifest.project.keywords, vec!["wasm", "div"]);
        assert_eq!(manifest.tools.packager_args, vec!["build", "--target", "bundler"]);
        assert_eq!(manifest.targets.len(), 2);
        assert_eq!(manifest.targets[0].name, "hello_world");
        assert_eq!(manifest.targets[1].args, vec!["--dev"]);
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let manifest = Manifest::from_toml(
            r#"
[project]
name = "minimal"

[[targets]]
name = "a"
path = "a"
"#,
        )
        .unwrap();
        assert_eq!(manifest.project.version, "0.1.0");
        assert_eq!(manifest.tools, ToolsConfig::default());
        assert_eq!(manifest.bundler.dev_config, "webpack.dev.js");
        assert_eq!(manifest.bundler.prod_config, "webpack.prod.js");
        assert_eq!(manifest.tools.serve_args, vec!["serve"]);
    }

    #[test]
    fn test_target_order_is_preserved() {
        let manifest = Manifest::demo();
        let names: Vec<&str> = manifest.targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["hello_svelte", "hello_world", "reposition", "styled", "toggle"]
        );
    }

    #[test]
    fn test_demo_manifest_survives_toml() {
        let manifest = Manifest::demo();
        let toml = manifest.to_toml().unwrap();
        assert_eq!(Manifest::from_toml(&toml).unwrap(), manifest);
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_dependency_spec_points_at_pkg_dir() {
        let target = BuildTarget::new("styled", "../styled");
        assert_eq!(target.output_dir(), PathBuf::from("../styled/pkg"));
        assert_eq!(target.dependency_spec(), "file:../styled/pkg");
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let mut manifest = Manifest::demo();
        manifest.project.name = String::new();
        manifest.project.version = "not-a-version".to_string();
        manifest.tools.bundler = " ".to_string();
        manifest.targets.push(BuildTarget::new("toggle", "other"));
        manifest.targets.push(BuildTarget::new("", ""));

        let errors = manifest.validate();
        assert!(errors.iter().any(|e| e.contains("project.name")));
        assert!(errors.iter().any(|e| e.contains("project.version")));
        assert!(errors.iter().any(|e| e.contains("tools.bundler")));
        assert!(errors.iter().any(|e| e.contains("duplicate target name 'toggle'")));
        assert!(errors.iter().any(|e| e.contains("targets[6]: 'name'")));
        assert!(errors.iter().any(|e| e.contains("targets[6]: 'path'")));
    }

    #[test]
    fn test_validate_requires_targets() {
        let mut manifest = Manifest::demo();
        manifest.targets.clear();
        let errors = manifest.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("[[targets]]"));
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join("demobuild.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demobuild.toml");
        std::fs::write(&path, "[project\nname = ").unwrap();
        assert!(Manifest::load(&path).is_err());
    }

    #[test]
    fn test_load_validated_rejects_bad_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demobuild.toml");
        std::fs::write(&path, "[project]\nname = \"x\"\n").unwrap();
        let err = Manifest::load_validated(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Invalid { .. }));
    }

    #[test]
    fn test_load_substitutes_env_vars() {
        std::env::set_var("DEMOBUILD_TEST_PACKAGER", "/opt/bin/wasm-pack");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demobuild.toml");
        std::fs::write(
            &path,
            r#"
[project]
name = "env"

[tools]
packager = "${DEMOBUILD_TEST_PACKAGER}"

[[targets]]
name = "a"
path = "a"
"#,
        )
        .unwrap();
        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.tools.packager, "/opt/bin/wasm-pack");
        std::env::remove_var("DEMOBUILD_TEST_PACKAGER");
    }

    #[test]
    fn test_substitute_unset_var_is_empty() {
        let result = substitute_env_vars("a${DEMOBUILD_DEFINITELY_UNSET_VAR}b").unwrap();
        assert_eq!(result, "ab");
    }

    #[test]
    fn test_project_root() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(project_root(Path::new("demobuild.toml")), cwd);
        assert_eq!(project_root(Path::new("site/demobuild.toml")), cwd.join("site"));
        assert!(project_root(Path::new("./site/demobuild.toml")).is_absolute());
        assert_eq!(
            project_root(Path::new("/work/site/demobuild.toml")),
            PathBuf::from("/work/site")
        );
    }
}
