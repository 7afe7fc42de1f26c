//! Merge fields and their resolved replacement text

use crate::catalog::{Artifact, Library};
use crate::constants::{platforms, DEFAULT_REPOSITORIES, JME_VERSION_PROPERTY};
use crate::sanitize::{
    package_path_to_directory_path, sanitize_to_class_identifier, sanitize_to_package_path,
};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::sync::LazyLock;

/// Anything that looks like a field reference; unknown names are left alone.
pub(crate) static FIELD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Z][A-Z0-9_]*)\]").expect("field token regex is valid")
});

/// A named field, written as `[NAME]` in template paths and contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeField {
    /// The game name exactly as the user typed it.
    GameNameFull,
    /// The game name as a class identifier.
    GameName,
    GamePackage,
    GamePackageFolder,
    JmeVersion,
    /// Core platform libraries, versioned by the platform version property.
    JmeDependencies,
    VrSpecialisedDependencies,
    AndroidSpecialisedDependencies,
    DesktopSpecialisedDependencies,
    AllNonJmeNonSpecialisedDependencies,
    /// Every non-platform dependency, specialised or not, without blank lines.
    AllNonJmeDependencies,
    MavenRepos,
    CsvLibraries,
}

impl MergeField {
    /// Platform specialised dependency fields and the platform they collect.
    pub const SPECIALISED: [(MergeField, &'static str); 3] = [
        (MergeField::VrSpecialisedDependencies, platforms::JME_VR),
        (MergeField::AndroidSpecialisedDependencies, platforms::JME_ANDROID),
        (MergeField::DesktopSpecialisedDependencies, platforms::JME_DESKTOP),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MergeField::GameNameFull => "GAME_NAME_FULL",
            MergeField::GameName => "GAME_NAME",
            MergeField::GamePackage => "GAME_PACKAGE",
            MergeField::GamePackageFolder => "GAME_PACKAGE_FOLDER",
            MergeField::JmeVersion => "JME_VERSION",
            MergeField::JmeDependencies => "JME_DEPENDENCIES",
            MergeField::VrSpecialisedDependencies => "VR_SPECIALISED_DEPENDENCIES",
            MergeField::AndroidSpecialisedDependencies => "ANDROID_SPECIALISED_DEPENDENCIES",
            MergeField::DesktopSpecialisedDependencies => "DESKTOP_SPECIALISED_DEPENDENCIES",
            MergeField::AllNonJmeNonSpecialisedDependencies => {
                "ALL_NON_JME_NON_SPECIALISED_DEPENDENCIES"
            }
            MergeField::AllNonJmeDependencies => "ALL_NON_JME_DEPENDENCIES",
            MergeField::MavenRepos => "MAVEN_REPOS",
            MergeField::CsvLibraries => "CSV_LIBRARIES",
        }
    }

    /// The field as it appears in template text, e.g. `[GAME_NAME]`.
    pub fn token(&self) -> String {
        format!("[{}]", self.name())
    }
}

impl Display for MergeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What the field resolver needs from a generation request.
#[derive(Debug, Clone, Copy)]
pub struct FieldInputs<'a> {
    pub game_name: &'a str,
    pub package_name: &'a str,
    pub libraries: &'a [Library],
    pub jme_version: &'a str,
    /// `group:artifact` → version.
    pub library_versions: &'a HashMap<String, String>,
}

/// Field name → replacement text, fully resolved before any substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeFields {
    values: IndexMap<String, String>,
}

impl MergeFields {
    pub fn resolve(inputs: &FieldInputs<'_>) -> Self {
        let mut fields = Self::default();
        let libraries = inputs.libraries;
        let versions = inputs.library_versions;

        let class_name = sanitize_to_class_identifier(inputs.game_name);
        let mut package = sanitize_to_package_path(inputs.package_name);
        if package.is_empty() {
            package = sanitize_to_package_path(&class_name);
        }
        let package_folder = package_path_to_directory_path(&package);

        fields.insert(MergeField::GameNameFull, inputs.game_name);
        fields.insert(MergeField::GameName, class_name);
        fields.insert(MergeField::GamePackage, package);
        fields.insert(MergeField::GamePackageFolder, package_folder);
        fields.insert(MergeField::JmeVersion, inputs.jme_version);
        fields.insert(MergeField::JmeDependencies, jme_dependencies(libraries));

        let mut all_non_jme = Vec::new();
        for (field, platform) in MergeField::SPECIALISED {
            let block = specialised_dependencies(libraries, versions, platform);
            all_non_jme.push(block.clone());
            fields.insert(field, block);
        }
        let non_specialised = non_specialised_dependencies(libraries, versions);
        all_non_jme.push(non_specialised.clone());
        fields.insert(MergeField::AllNonJmeNonSpecialisedDependencies, non_specialised);
        fields.insert(
            MergeField::AllNonJmeDependencies,
            eliminate_empty_lines(&all_non_jme.join("\n")),
        );

        fields.insert(MergeField::MavenRepos, maven_repos(libraries));
        fields.insert(MergeField::CsvLibraries, csv_libraries(libraries));
        fields
    }

    fn insert(&mut self, field: MergeField, value: impl Into<String>) {
        self.values.insert(field.name().to_string(), value.into());
    }

    pub fn get(&self, field: MergeField) -> Option<&str> {
        self.by_name(field.name())
    }

    /// Looks up a field by its bare name (without brackets).
    pub fn by_name(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replaces every known field reference in `text` with its value.
    ///
    /// Single pass: replacement text is never scanned again.
    pub fn replace_all(&self, text: &str) -> String {
        FIELD_TOKEN
            .replace_all(text, |caps: &Captures<'_>| match self.by_name(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Fields in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn implementation_line(artifact: &Artifact, versions: &HashMap<String, String>) -> String {
    format!("implementation '{}:{}'", artifact.coordinate(), artifact.resolve_version(versions))
}

/// Core platform libraries, other than the platforms themselves which the
/// templates hard code.
fn jme_dependencies(libraries: &[Library]) -> String {
    libraries
        .iter()
        .filter(|l| l.uses_jme_version && !l.is_platform())
        .flat_map(|l| &l.artifacts)
        .map(|artifact| {
            let version = match &artifact.pin_version {
                Some(pinned) => format!("'{pinned}'"),
                None => JME_VERSION_PROPERTY.to_string(),
            };
            format!("implementation '{}:' + {version}", artifact.coordinate())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn specialised_dependencies(
    libraries: &[Library],
    versions: &HashMap<String, String>,
    platform: &str,
) -> String {
    libraries
        .iter()
        .filter(|l| !l.uses_jme_version && l.is_specialised_to(platform))
        .flat_map(|l| &l.artifacts)
        .map(|artifact| implementation_line(artifact, versions))
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_specialised_dependencies(
    libraries: &[Library],
    versions: &HashMap<String, String>,
) -> String {
    libraries
        .iter()
        .filter(|l| !l.uses_jme_version && !l.is_specialised())
        .flat_map(|l| &l.artifacts)
        .map(|artifact| implementation_line(artifact, versions))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sorted, de-duplicated repositories including the defaults.
fn maven_repos(libraries: &[Library]) -> String {
    let repos: BTreeSet<&str> = DEFAULT_REPOSITORIES
        .iter()
        .copied()
        .chain(libraries.iter().flat_map(|l| l.additional_maven_repos.iter().map(String::as_str)))
        .collect();
    repos.into_iter().collect::<Vec<_>>().join("\n")
}

/// Form-encoded library keys, comma separated.
fn csv_libraries(libraries: &[Library]) -> String {
    libraries
        .iter()
        .map(|l| url::form_urlencoded::byte_serialize(l.key.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
}

/// Drops blank (empty or whitespace only) lines.
pub fn eliminate_empty_lines(input: &str) -> String {
    input.lines().filter(|l| !l.trim().is_empty()).collect::<Vec<_>>().join("\n")
}
