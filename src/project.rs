//! The flattened project model handed to the CMake emitter.

/// C++ language standard selected through `<LanguageStandard>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageStandard {
    #[default]
    Unspecified,
    Cpp11,
    Cpp14,
    Cpp17,
    Cpp20,
    Cpp23,
    Cpp2x,
}

impl LanguageStandard {
    /// Map an MSBuild literal such as `stdcpp17`. Unknown literals return
    /// `None`.
    pub fn from_msbuild(text: &str) -> Option<Self> {
        match text {
            "stdcpp11" => Some(Self::Cpp11),
            "stdcpp14" => Some(Self::Cpp14),
            "stdcpp17" => Some(Self::Cpp17),
            "stdcpp20" => Some(Self::Cpp20),
            "stdcpp23" => Some(Self::Cpp23),
            "stdcpp2x" | "stdcpplatest" => Some(Self::Cpp2x),
            _ => None,
        }
    }

    /// Value for `CXX_STANDARD`, `None` when unspecified.
    pub fn cmake_suffix(self) -> Option<&'static str> {
        match self {
            Self::Unspecified => None,
            Self::Cpp11 => Some("11"),
            Self::Cpp14 => Some("14"),
            Self::Cpp17 => Some("17"),
            Self::Cpp20 => Some("20"),
            Self::Cpp23 => Some("23"),
            Self::Cpp2x => Some("2x"),
        }
    }
}

/// Everything the converter extracts from a `.vcxproj`.
///
/// List fields keep every contribution in document order; the emitter
/// reads them through [`Project::sorted_sources`] and
/// [`Project::sorted_includes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Empty when the project file names no target.
    pub name: String,
    pub is_application: bool,
    pub standard: LanguageStandard,
    pub sources: Vec<String>,
    pub includes: Vec<String>,
    /// `ClInclude` items. Not part of the CMake output.
    pub headers: Vec<String>,
}

impl Project {
    /// Apply a `<LanguageStandard>` literal; unknown values are ignored.
    pub fn set_standard(&mut self, text: &str) {
        if let Some(standard) = LanguageStandard::from_msbuild(text) {
            self.standard = standard;
        }
    }

    /// Apply a `<ConfigurationType>` literal. Only `Application` changes
    /// anything.
    pub fn set_configuration_type(&mut self, text: &str) {
        if text == "Application" {
            self.is_application = true;
        }
    }

    pub fn sorted_sources(&self) -> Vec<&str> {
        sorted_unique(&self.sources)
    }

    pub fn sorted_includes(&self) -> Vec<&str> {
        sorted_unique(&self.includes)
    }

    pub fn sorted_headers(&self) -> Vec<&str> {
        sorted_unique(&self.headers)
    }
}

fn sorted_unique(items: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = items.iter().map(String::as_str).collect();
    out.sort_unstable();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_literals() {
        assert_eq!(LanguageStandard::from_msbuild("stdcpp17"), Some(LanguageStandard::Cpp17));
        assert_eq!(LanguageStandard::from_msbuild("stdcpplatest"), Some(LanguageStandard::Cpp2x));
        assert_eq!(LanguageStandard::from_msbuild("Default"), None);
        assert_eq!(LanguageStandard::Cpp2x.cmake_suffix(), Some("2x"));
        assert_eq!(LanguageStandard::Unspecified.cmake_suffix(), None);
    }

    #[test]
    fn unknown_standard_keeps_previous_value() {
        let mut p = Project::default();
        p.set_standard("stdcpp20");
        p.set_standard("stdc11");
        assert_eq!(p.standard, LanguageStandard::Cpp20);
    }

    #[test]
    fn only_application_flips_binary_kind() {
        let mut p = Project::default();
        p.set_configuration_type("DynamicLibrary");
        assert!(!p.is_application);
        p.set_configuration_type("Application");
        assert!(p.is_application);
        p.set_configuration_type("StaticLibrary");
        assert!(p.is_application);
    }

    #[test]
    fn sorted_views_are_strictly_ascending() {
        let p = Project {
            sources: vec!["z.cpp".into(), "a.cpp".into(), "m.cpp".into(), "a.cpp".into()],
            includes: vec!["inc".into(), "inc".into()],
            ..Default::default()
        };
        let sources = p.sorted_sources();
        assert_eq!(sources, vec!["a.cpp", "m.cpp", "z.cpp"]);
        assert!(sources.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(p.sorted_includes(), vec!["inc"]);
    }
}
