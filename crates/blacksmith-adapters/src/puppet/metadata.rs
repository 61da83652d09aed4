//! Puppet `metadata.json` handling
//!
//! The manifest is read into a typed view of the fields Blacksmith edits
//! (`name`, `version`, `dependencies`) while every other key lands in a
//! pass-through map and is written back untouched, in its original position.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use blacksmith_core::error::{ManifestError, Result};
use blacksmith_core::types::{BumpLevel, PackageInfo};
use blacksmith_strategies::{SemVerStrategy, VersionComponents, VersionRequirement};

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`)
fn nullable<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A `dependencies` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Module name, `author/module` or `author-module`
    pub name: String,

    /// Raw requirement string, e.g. `>= 1.0.0 < 2.0.0`
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub version_requirement: Option<Option<String>>,

    /// Preserve other fields
    #[serde(flatten)]
    pub other: Map<String, Value>,

    /// Key order as read from disk
    #[serde(skip)]
    key_order: Vec<String>,
}

impl Dependency {
    /// Requirement string, if the entry has a non-null one
    pub fn requirement(&self) -> Option<&str> {
        self.version_requirement.as_ref().and_then(|r| r.as_deref())
    }
}

/// metadata.json structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Full module name (e.g. `puppetlabs-stdlib`)
    pub name: String,

    /// Module version
    pub version: String,

    /// Module dependencies
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependencies: Option<Option<Vec<Dependency>>>,

    /// Preserve other fields
    #[serde(flatten)]
    pub other: Map<String, Value>,

    /// Top-level key order as read from disk
    #[serde(skip)]
    key_order: Vec<String>,
}

impl Metadata {
    /// Load metadata.json from path
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.to_path_buf()).into());
            }
            Err(e) => return Err(e.into()),
        };

        let metadata = Self::parse(&content, path)?;
        debug!(name = %metadata.name, version = %metadata.version, "loaded manifest");
        Ok(metadata)
    }

    /// Parse manifest content; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let parse_error = |e: serde_json::Error| ManifestError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let document: Map<String, Value> = serde_json::from_str(content).map_err(parse_error)?;
        let key_order = document.keys().cloned().collect();
        let dependency_orders: Vec<Vec<String>> = match document.get("dependencies") {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| match entry {
                    Value::Object(fields) => fields.keys().cloned().collect(),
                    _ => Vec::new(),
                })
                .collect(),
            _ => Vec::new(),
        };

        let mut metadata: Metadata =
            serde_json::from_value(Value::Object(document)).map_err(parse_error)?;
        metadata.key_order = key_order;
        if let Some(Some(dependencies)) = metadata.dependencies.as_mut() {
            for (dependency, order) in dependencies.iter_mut().zip(dependency_orders) {
                dependency.key_order = order;
            }
        }

        metadata.version.parse::<VersionComponents>()?;
        Ok(metadata)
    }

    /// Render as pretty JSON with two-space indentation and a trailing newline
    pub fn to_json_string(&self) -> Result<String> {
        let mut value = reorder(serde_json::to_value(self)?, &self.key_order);

        if let Some(Value::Array(entries)) = value.get_mut("dependencies") {
            for (entry, dependency) in entries.iter_mut().zip(self.dependencies()) {
                *entry = reorder(entry.take(), &dependency.key_order);
            }
        }

        let mut content = serde_json::to_string_pretty(&value)?;
        content.push('\n');
        Ok(content)
    }

    /// Save metadata.json to path
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// target, so readers never observe a half-written manifest.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_error = |e: std::io::Error| ManifestError::WriteError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let content = self.to_json_string()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
        if let Ok(existing) = std::fs::metadata(path) {
            file.as_file()
                .set_permissions(existing.permissions())
                .map_err(write_error)?;
        }
        file.persist(path).map_err(|e| write_error(e.error))?;

        debug!(version = %self.version, "wrote manifest");
        Ok(())
    }

    /// Full module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace part of the name, before the first `-` or `/`
    pub fn author(&self) -> Option<&str> {
        self.name.split_once(['-', '/']).map(|(author, _)| author)
    }

    /// Module part of the name, after the first `-` or `/`
    pub fn module_name(&self) -> &str {
        self.name
            .split_once(['-', '/'])
            .map_or(self.name.as_str(), |(_, module)| module)
    }

    /// Current version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Replace the version string
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Apply a bump in memory and return the new version
    pub fn bump(&mut self, level: BumpLevel, target: Option<&str>) -> Result<String> {
        let next = SemVerStrategy::new().next_version(&self.version, level, target)?;
        self.set_version(next.clone());
        Ok(next)
    }

    /// Declared dependencies, in manifest order
    pub fn dependencies(&self) -> &[Dependency] {
        self.dependencies
            .as_ref()
            .and_then(|deps| deps.as_deref())
            .unwrap_or_default()
    }

    /// Requirement of a dependency; `None` when the entry has no requirement
    pub fn dependency_requirement(&self, module: &str) -> Result<Option<VersionRequirement>> {
        let index = self.dependency_index(module)?;
        match self.dependencies()[index].requirement() {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(VersionRequirement::parse(raw)?)),
            _ => Ok(None),
        }
    }

    /// Store a requirement for an existing dependency
    pub fn set_dependency_requirement(
        &mut self,
        module: &str,
        requirement: &VersionRequirement,
    ) -> Result<()> {
        let index = self.dependency_index(module)?;
        if let Some(dependency) = self
            .dependencies
            .as_mut()
            .and_then(|deps| deps.as_mut())
            .and_then(|deps| deps.get_mut(index))
        {
            dependency.version_requirement = Some(Some(requirement.to_string()));
        }
        Ok(())
    }

    /// Raise the lower bound of a dependency's requirement to `>=new_min`
    #[instrument(skip(self))]
    pub fn set_dependency_minimum(&mut self, module: &str, new_min: &str) -> Result<VersionRequirement> {
        let min: VersionComponents = new_min.parse()?;

        let updated = match self.dependency_requirement(module)? {
            Some(requirement) => requirement.set_minimum(&min),
            None => VersionRequirement::minimum(min),
        };
        self.set_dependency_requirement(module, &updated)?;

        debug!(requirement = %updated, "updated dependency requirement");
        Ok(updated)
    }

    /// Package info for uploaders
    pub fn package_info(&self, manifest_path: &Path) -> PackageInfo {
        PackageInfo::new(&self.name, &self.version, manifest_path)
    }

    fn dependency_index(&self, module: &str) -> Result<usize> {
        let wanted = normalize_module_name(module);
        self.dependencies()
            .iter()
            .position(|dep| normalize_module_name(&dep.name) == wanted)
            .ok_or_else(|| ManifestError::UnknownModule(module.to_string()).into())
    }
}

/// Put the keys of a JSON object back in `order`; keys not listed follow
fn reorder(value: Value, order: &[String]) -> Value {
    match value {
        Value::Object(mut fields) => {
            let mut ordered = Map::new();
            for key in order {
                if let Some(v) = fields.remove(key) {
                    ordered.insert(key.clone(), v);
                }
            }
            ordered.extend(fields);
            Value::Object(ordered)
        }
        other => other,
    }
}

/// `puppetlabs/stdlib` and `puppetlabs-stdlib` name the same module
pub fn normalize_module_name(name: &str) -> String {
    name.trim().replace('/', "-")
}
