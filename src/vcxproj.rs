//! Per-configuration view of a `.vcxproj`.
//!
//! Where [`crate::builder`] flattens the groups selected by one matcher
//! into a single [`crate::project::Project`], this module keeps every
//! configuration declared in the file apart: each
//! `<ProjectConfiguration>` becomes a [`ConfigurationRecord`], and
//! conditioned `<PropertyGroup>` / `<ItemDefinitionGroup>` elements are
//! routed to the record their `Condition` names.

use std::fmt;
use std::path::{Path, PathBuf};

use roxmltree::Node;

use crate::condition;
use crate::config::{ConfigurationIdentity, ConfigurationRecord};
use crate::error::{Error, Result};
use crate::token;
use crate::xml::{self, ElementKind};

/// A loaded Visual Studio C++ project with its configurations resolved.
#[derive(Debug, Clone, Default)]
pub struct VisualStudioProject {
    /// Directory containing the project file. `None` when created via
    /// [`VisualStudioProject::parse`].
    project_root: Option<PathBuf>,
    project_name: String,
    source_files: Vec<String>,
    header_files: Vec<String>,
    configurations: Vec<ConfigurationRecord>,
}

impl VisualStudioProject {
    /// Parse a project from its XML source.
    pub fn parse(source: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(source)?;
        let mut project = Self::default();

        project.parse_project_name(doc.root());
        project.parse_configurations(doc.root());
        project.header_files = item_includes(doc.root(), "Project/ItemGroup/ClInclude");
        project.source_files = item_includes(doc.root(), "Project/ItemGroup/ClCompile");
        project.parse_property_groups(doc.root());
        project.parse_item_definition_groups(doc.root());

        tracing::info!("headers: {}", project.header_files.join(", "));
        tracing::info!("sources: {}", project.source_files.join(", "));
        Ok(project)
    }

    /// Load a project file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut project = Self::parse(&source)?;
        project.project_root = path.parent().map(Path::to_path_buf);
        if let Some(root) = &project.project_root {
            tracing::info!("project root path: {}", root.display());
        }
        Ok(project)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// `ClCompile` items, sorted and deduplicated.
    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    /// `ClInclude` items, sorted and deduplicated.
    pub fn header_files(&self) -> &[String] {
        &self.header_files
    }

    /// Records in declaration order.
    pub fn configurations(&self) -> &[ConfigurationRecord] {
        &self.configurations
    }

    pub fn configuration(&self, identity: &ConfigurationIdentity) -> Option<&ConfigurationRecord> {
        self.configurations.iter().find(|r| &r.identity == identity)
    }

    // ─── Parsing steps ───────────────────────────────────────────────────

    fn parse_project_name(&mut self, root: Node) {
        for group in xml::select(root, "Project/PropertyGroup") {
            if group.attribute("Label") != Some("Globals") {
                continue;
            }
            for child in xml::child_elements(&group) {
                if matches!(child.tag_name().name(), "ProjectName" | "RootNamespace") {
                    self.project_name = xml::text(&child).to_string();
                }
            }
        }
    }

    /// Declarations missing either `<Configuration>` or `<Platform>` are
    /// dropped.
    fn parse_configurations(&mut self, root: Node) {
        for declaration in xml::select(root, "Project/ItemGroup/ProjectConfiguration") {
            let configuration = xml::find_child_text(&declaration, "Configuration");
            let platform = xml::find_child_text(&declaration, "Platform");
            if let (Some(configuration), Some(platform)) = (configuration, platform) {
                let identity = ConfigurationIdentity::new(configuration, platform);
                self.configurations.push(ConfigurationRecord::new(identity));
            }
        }

        let names: Vec<String> = self
            .configurations
            .iter()
            .map(|r| r.identity.canonical())
            .collect();
        tracing::info!("configurations: {}", names.join(", "));
    }

    fn parse_property_groups(&mut self, root: Node) {
        for group in xml::select(root, "Project/PropertyGroup") {
            let Some(condition) = xml::condition(&group) else {
                continue;
            };
            let Some(record) = condition::find_record(&mut self.configurations, condition) else {
                tracing::info!("no configuration for PropertyGroup condition: {condition}");
                continue;
            };

            for child in xml::child_elements(&group) {
                let text = xml::text(&child);
                match child.tag_name().name() {
                    "ConfigurationType" => record.set_configuration_type(text),
                    "OutDir" => record.output_directory = token::translate_token(text),
                    "IntDir" => record.intermediate_directory = token::translate_token(text),
                    _ => {}
                }
            }
        }
    }

    /// Unconditioned groups apply to every configuration.
    fn parse_item_definition_groups(&mut self, root: Node) {
        for group in xml::select(root, "Project/ItemDefinitionGroup") {
            match xml::condition(&group) {
                Some(condition) => {
                    match condition::find_record(&mut self.configurations, condition) {
                        Some(record) => apply_item_definitions(record, &group),
                        None => tracing::info!(
                            "no configuration for ItemDefinitionGroup condition: {condition}"
                        ),
                    }
                }
                None => {
                    for record in &mut self.configurations {
                        apply_item_definitions(record, &group);
                    }
                }
            }
        }
    }
}

fn apply_item_definitions(record: &mut ConfigurationRecord, group: &Node) {
    for tool in xml::child_elements(group) {
        match ElementKind::of(&tool) {
            ElementKind::ClCompile => {
                for setting in xml::child_elements(&tool) {
                    let text = xml::text(&setting);
                    match setting.tag_name().name() {
                        "AdditionalIncludeDirectories" => record
                            .additional_include_directories
                            .extend(path_list(text)),
                        "PreprocessorDefinitions" => {
                            record.preprocessor_definitions.extend(plain_list(text))
                        }
                        "AdditionalOptions" => record.additional_options = options(text),
                        _ => {}
                    }
                }
            }
            ElementKind::Link => {
                for setting in xml::child_elements(&tool) {
                    let text = xml::text(&setting);
                    match setting.tag_name().name() {
                        "AdditionalLibraryDirectories" => record
                            .additional_library_directories
                            .extend(path_list(text)),
                        "AdditionalDependencies" => {
                            record.additional_dependencies.extend(plain_list(text))
                        }
                        _ => {}
                    }
                }
            }
            ElementKind::PreBuildEvent => {
                if let Some(command) = xml::find_child_text(&tool, "Command") {
                    record.pre_build_event = command;
                }
            }
            ElementKind::PostBuildEvent => {
                if let Some(command) = xml::find_child_text(&tool, "Command") {
                    record.post_build_event = command;
                }
            }
            _ => {}
        }
    }
}

/// Non-empty `Include` attributes of the items at `path`, sorted and
/// deduplicated.
fn item_includes(root: Node, path: &str) -> Vec<String> {
    let mut files: Vec<String> = xml::select(root, path)
        .iter()
        .filter_map(|item| item.attribute("Include"))
        .filter(|include| !include.is_empty())
        .map(String::from)
        .collect();
    files.sort();
    files.dedup();
    files
}

fn keep(entry: &str) -> bool {
    !entry.is_empty() && !token::is_inherited_metadata(entry)
}

fn plain_list(text: &str) -> Vec<String> {
    token::split_list(text)
        .into_iter()
        .map(str::trim)
        .filter(|entry| keep(entry))
        .map(String::from)
        .collect()
}

fn path_list(text: &str) -> Vec<String> {
    token::split_list(text)
        .into_iter()
        .map(str::trim)
        .filter(|entry| keep(entry))
        .map(token::translate_token)
        .collect()
}

fn options(text: &str) -> String {
    text.split_whitespace()
        .filter(|option| !token::is_inherited_metadata(option))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for VisualStudioProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.project_name.is_empty() { "(unnamed)" } else { self.project_name.as_str() };
        writeln!(f, "project: {name}")?;
        writeln!(f, "sources: {}", self.source_files.len())?;
        writeln!(f, "headers: {}", self.header_files.len())?;
        for record in &self.configurations {
            writeln!(f)?;
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationType;

    const TWO_CONFIGS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ItemGroup Label="ProjectConfigurations">
    <ProjectConfiguration Include="Debug|x64">
      <Configuration>Debug</Configuration>
      <Platform>x64</Platform>
    </ProjectConfiguration>
    <ProjectConfiguration Include="Release|x64">
      <Configuration>Release</Configuration>
      <Platform>x64</Platform>
    </ProjectConfiguration>
    <ProjectConfiguration Include="Broken|x64">
      <Configuration>Broken</Configuration>
    </ProjectConfiguration>
  </ItemGroup>
  <PropertyGroup Label="Globals">
    <RootNamespace>demo</RootNamespace>
  </PropertyGroup>
  <PropertyGroup Condition="'$(Configuration)|$(Platform)'=='Debug|x64'" Label="Configuration">
    <ConfigurationType>Application</ConfigurationType>
  </PropertyGroup>
  <PropertyGroup Condition="'$(Configuration)|$(Platform)'=='Release|x64'" Label="Configuration">
    <ConfigurationType>DynamicLibrary</ConfigurationType>
  </PropertyGroup>
  <PropertyGroup Condition="'$(Configuration)|$(Platform)'=='Release|x64'">
    <OutDir>$(ProjectDir)bin\</OutDir>
    <IntDir>obj\</IntDir>
  </PropertyGroup>
  <PropertyGroup Condition="'$(Configuration)|$(Platform)'=='Profile|ARM64'">
    <OutDir>ignored\</OutDir>
  </PropertyGroup>
  <ItemDefinitionGroup Condition="'$(Configuration)|$(Platform)'=='Release|x64'">
    <ClCompile>
      <AdditionalIncludeDirectories>$(ProjectDir)include;%(AdditionalIncludeDirectories)</AdditionalIncludeDirectories>
      <PreprocessorDefinitions>NDEBUG;_CONSOLE;%(PreprocessorDefinitions)</PreprocessorDefinitions>
      <AdditionalOptions>/utf-8 %(AdditionalOptions)</AdditionalOptions>
    </ClCompile>
    <Link>
      <AdditionalLibraryDirectories>$(ProjectDir)lib;C:\sdk\lib</AdditionalLibraryDirectories>
      <AdditionalDependencies>zlib.lib;%(AdditionalDependencies)</AdditionalDependencies>
    </Link>
    <PreBuildEvent>
      <Command>echo pre</Command>
    </PreBuildEvent>
    <PostBuildEvent>
      <Command>copy $(OutDir)demo.dll dist</Command>
    </PostBuildEvent>
  </ItemDefinitionGroup>
  <ItemDefinitionGroup Condition="'$(Configuration)|$(Platform)'=='Release|x64'">
    <ClCompile>
      <AdditionalIncludeDirectories>third_party</AdditionalIncludeDirectories>
    </ClCompile>
  </ItemDefinitionGroup>
  <ItemDefinitionGroup Condition="'$(Configuration)|$(Platform)'=='Profile|ARM64'">
    <ClCompile>
      <PreprocessorDefinitions>PROFILE</PreprocessorDefinitions>
    </ClCompile>
  </ItemDefinitionGroup>
  <ItemDefinitionGroup>
    <ClCompile>
      <PreprocessorDefinitions>SHARED</PreprocessorDefinitions>
    </ClCompile>
  </ItemDefinitionGroup>
  <ItemGroup>
    <ClCompile Include="src\main.cpp" />
    <ClCompile Include="src\app.cpp" />
    <ClCompile Include="src\main.cpp" />
    <ClInclude Include="src\app.h" />
    <ClInclude Include="" />
  </ItemGroup>
</Project>"#;

    fn release() -> ConfigurationIdentity {
        ConfigurationIdentity::new("Release", "x64")
    }

    #[test]
    fn declarations_without_platform_are_dropped() {
        let p = VisualStudioProject::parse(TWO_CONFIGS).unwrap();
        let names: Vec<String> = p.configurations().iter().map(|r| r.identity.canonical()).collect();
        assert_eq!(names, vec!["Debug|x64", "Release|x64"]);
    }

    #[test]
    fn name_and_item_lists() {
        let p = VisualStudioProject::parse(TWO_CONFIGS).unwrap();
        assert_eq!(p.project_name(), "demo");
        assert_eq!(p.source_files(), ["src\\app.cpp", "src\\main.cpp"]);
        assert_eq!(p.header_files(), ["src\\app.h"]);
        assert!(p.project_root().is_none());
    }

    #[test]
    fn configuration_types_per_record() {
        let p = VisualStudioProject::parse(TWO_CONFIGS).unwrap();
        let debug = p.configuration(&ConfigurationIdentity::new("Debug", "x64")).unwrap();
        assert_eq!(debug.configuration_type, ConfigurationType::Application);
        let release = p.configuration(&release()).unwrap();
        assert_eq!(release.configuration_type, ConfigurationType::DynamicLibrary);
    }

    #[test]
    fn release_record_settings() {
        let p = VisualStudioProject::parse(TWO_CONFIGS).unwrap();
        let r = p.configuration(&release()).unwrap();

        assert_eq!(r.output_directory, "${CMAKE_PROJECT_DIR}bin\\");
        assert_eq!(r.intermediate_directory, "obj\\");
        assert_eq!(r.preprocessor_definitions, vec!["NDEBUG", "_CONSOLE", "SHARED"]);
        assert_eq!(r.additional_options, "/utf-8");
        assert_eq!(
            r.additional_library_directories,
            vec!["${CMAKE_PROJECT_DIR}lib", "C:\\sdk\\lib"]
        );
        assert_eq!(r.additional_dependencies, vec!["zlib.lib"]);
        assert_eq!(r.pre_build_event, "echo pre");
        assert_eq!(r.post_build_event, "copy $(OutDir)demo.dll dist");
    }

    #[test]
    fn matching_item_definition_groups_accumulate_includes() {
        let p = VisualStudioProject::parse(TWO_CONFIGS).unwrap();
        let r = p.configuration(&release()).unwrap();
        assert_eq!(
            r.additional_include_directories,
            vec!["${CMAKE_PROJECT_DIR}include", "third_party"]
        );
    }

    #[test]
    fn unmatched_groups_leave_records_untouched() {
        let p = VisualStudioProject::parse(TWO_CONFIGS).unwrap();
        let debug = p.configuration(&ConfigurationIdentity::new("Debug", "x64")).unwrap();
        assert_eq!(debug.output_directory, "");
        assert_eq!(debug.preprocessor_definitions, vec!["SHARED"]);
        assert!(p.configurations().iter().all(|r| !r.preprocessor_definitions.contains(&"PROFILE".to_string())));
    }

    #[test]
    fn no_configurations_means_nothing_matches() {
        let p = VisualStudioProject::parse(
            r#"<Project>
  <ItemDefinitionGroup Condition="'$(Configuration)|$(Platform)'=='Release|x64'">
    <ClCompile><PreprocessorDefinitions>NDEBUG</PreprocessorDefinitions></ClCompile>
  </ItemDefinitionGroup>
</Project>"#,
        )
        .unwrap();
        assert!(p.configurations().is_empty());
    }

    #[test]
    fn summary_lists_every_configuration() {
        let p = VisualStudioProject::parse(TWO_CONFIGS).unwrap();
        let text = p.to_string();
        assert!(text.starts_with("project: demo\nsources: 2\nheaders: 1\n"));
        assert!(text.contains("[Debug|x64]\n  type: Application\n"));
        assert!(text.contains("[Release|x64]\n  type: DynamicLibrary\n"));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(matches!(
            VisualStudioProject::parse("<Project><ItemGroup></Project>"),
            Err(Error::Xml(_))
        ));
    }

    #[test]
    fn from_file_records_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.vcxproj");
        std::fs::write(&path, TWO_CONFIGS).unwrap();

        let p = VisualStudioProject::from_file(&path).unwrap();
        assert_eq!(p.project_root(), Some(dir.path()));
        assert_eq!(p.configurations().len(), 2);
    }

    #[test]
    fn example_project_file() {
        let p = VisualStudioProject::from_file("example.vcxproj").unwrap();
        assert_eq!(p.project_name(), "Calculator");
        assert_eq!(p.configurations().len(), 4);
        assert_eq!(p.source_files().len(), 3);
        assert_eq!(p.header_files(), ["include\\evaluator.h", "include\\parser.h"]);

        let r = p.configuration(&release()).unwrap();
        assert_eq!(r.configuration_type, ConfigurationType::Application);
        assert_eq!(r.intermediate_directory, "obj\\$(Platform)\\$(Configuration)\\");
        assert_eq!(r.additional_options, "/utf-8 /permissive-");
        assert_eq!(r.additional_library_directories, vec!["${CMAKE_PROJECT_DIR}lib"]);
        assert!(r.post_build_event.starts_with("xcopy"));
    }

    #[test]
    fn from_file_missing() {
        assert!(matches!(
            VisualStudioProject::from_file("missing.vcxproj"),
            Err(Error::Io { .. })
        ));
    }
}
