//! Build configuration identities and the per-configuration settings
//! collected from `<ProjectConfiguration>` declarations.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ═══════════════════════════════════════════════════════════════════════════════
//  ConfigurationIdentity
// ═══════════════════════════════════════════════════════════════════════════════

/// One build variant, e.g. `Release` × `x64`.
///
/// The canonical form `"{build_type}|{platform}"` is what MSBuild writes
/// into `Condition` attributes, so it doubles as the matching key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigurationIdentity {
    build_type: String,
    platform: String,
}

impl ConfigurationIdentity {
    pub fn new(build_type: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            build_type: build_type.into(),
            platform: platform.into(),
        }
    }

    /// Build type, e.g. `Debug` or `Release`.
    pub fn build_type(&self) -> &str {
        &self.build_type
    }

    /// Target platform, e.g. `Win32` or `x64`.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// `"{build_type}|{platform}"`.
    pub fn canonical(&self) -> String {
        format!("{}|{}", self.build_type, self.platform)
    }
}

impl fmt::Display for ConfigurationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.build_type, self.platform)
    }
}

impl FromStr for ConfigurationIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('|') {
            Some((build_type, platform))
                if !build_type.is_empty() && !platform.is_empty() && !platform.contains('|') =>
            {
                Ok(Self::new(build_type, platform))
            }
            _ => Err(Error::InvalidConfiguration(s.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  ConfigurationType
// ═══════════════════════════════════════════════════════════════════════════════

/// Kind of binary a configuration produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigurationType {
    #[default]
    Undefined,
    Application,
    DynamicLibrary,
}

impl ConfigurationType {
    /// Map a `<ConfigurationType>` literal. Unknown literals return `None`
    /// so the caller keeps whatever value it already had.
    pub fn from_msbuild(text: &str) -> Option<Self> {
        match text {
            "Application" => Some(Self::Application),
            "DynamicLibrary" => Some(Self::DynamicLibrary),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Application => "Application",
            Self::DynamicLibrary => "DynamicLibrary",
            Self::Undefined => "Unknown",
        };
        f.write_str(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  ConfigurationRecord
// ═══════════════════════════════════════════════════════════════════════════════

/// Settings gathered for a single [`ConfigurationIdentity`].
///
/// Created when the `<ProjectConfiguration>` declaration is seen and
/// filled in as matching `<PropertyGroup>` / `<ItemDefinitionGroup>`
/// elements turn up later in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub identity: ConfigurationIdentity,
    pub configuration_type: ConfigurationType,
    pub output_directory: String,
    pub intermediate_directory: String,
    pub additional_include_directories: Vec<String>,
    pub preprocessor_definitions: Vec<String>,
    pub additional_options: String,
    pub additional_library_directories: Vec<String>,
    /// Extra link inputs (`.lib` / `.dll`).
    pub additional_dependencies: Vec<String>,
    pub pre_build_event: String,
    pub post_build_event: String,
}

impl ConfigurationRecord {
    pub fn new(identity: ConfigurationIdentity) -> Self {
        Self {
            identity,
            configuration_type: ConfigurationType::Undefined,
            output_directory: String::new(),
            intermediate_directory: String::new(),
            additional_include_directories: Vec::new(),
            preprocessor_definitions: Vec::new(),
            additional_options: String::new(),
            additional_library_directories: Vec::new(),
            additional_dependencies: Vec::new(),
            pre_build_event: String::new(),
            post_build_event: String::new(),
        }
    }

    /// Apply a `<ConfigurationType>` literal; unknown values are ignored.
    pub fn set_configuration_type(&mut self, text: &str) {
        if let Some(kind) = ConfigurationType::from_msbuild(text) {
            self.configuration_type = kind;
        }
    }
}

impl fmt::Display for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.identity)?;
        writeln!(f, "  type: {}", self.configuration_type)?;

        let scalars = [
            ("output directory", &self.output_directory),
            ("intermediate directory", &self.intermediate_directory),
            ("additional options", &self.additional_options),
            ("pre-build", &self.pre_build_event),
            ("post-build", &self.post_build_event),
        ];
        for (label, value) in scalars {
            if !value.is_empty() {
                writeln!(f, "  {label}: {value}")?;
            }
        }

        let lists = [
            ("include directories", &self.additional_include_directories),
            ("definitions", &self.preprocessor_definitions),
            ("library directories", &self.additional_library_directories),
            ("dependencies", &self.additional_dependencies),
        ];
        for (label, values) in lists {
            if !values.is_empty() {
                writeln!(f, "  {label}: {}", values.join(";"))?;
            }
        }

        Ok(())
    }
}
