//! Building a [`Project`] from the top-level groups of a `.vcxproj`.
//!
//! The builder walks the `<Project>` children once, in document order:
//!
//! - `<PropertyGroup Condition="...">` groups that match contribute the
//!   target name, configuration type and nested compiler settings;
//! - `<PropertyGroup Label="Globals">` contributes the project name;
//! - `<ItemGroup>` / `<ItemDefinitionGroup>` contribute source files,
//!   headers, include directories and the language standard unless their
//!   condition rules them out.
//!
//! Scalars are last-writer-wins; lists accumulate and are sorted and
//! deduplicated when emitted.

use std::path::Path;

use roxmltree::Node;

use crate::condition::ConditionMatcher;
use crate::error::{Error, Result};
use crate::project::Project;
use crate::token;
use crate::xml::{self, ElementKind};

/// Accumulates a [`Project`] while walking one document.
#[derive(Debug, Clone, Default)]
pub struct ProjectBuilder {
    matcher: ConditionMatcher,
    project: Project,
}

impl ProjectBuilder {
    pub fn new(matcher: ConditionMatcher) -> Self {
        Self {
            matcher,
            project: Project::default(),
        }
    }

    /// Walk the children of the `<Project>` element and return the
    /// populated model.
    pub fn build(mut self, root: Node) -> Project {
        for child in xml::child_elements(&root) {
            match ElementKind::of(&child) {
                ElementKind::PropertyGroup => self.property_group(&child),
                ElementKind::ItemGroup | ElementKind::ItemDefinitionGroup => {
                    self.item_group(&child)
                }
                _ => tracing::trace!("ignoring <{}>", child.tag_name().name()),
            }
        }
        self.project
    }

    fn property_group(&mut self, group: &Node) {
        if let Some(condition) = xml::condition(group) {
            if self.matcher.matches(condition) {
                tracing::debug!("PropertyGroup matches: {condition}");
                self.conditional_properties(group);
            } else {
                tracing::info!("skipping PropertyGroup, condition not matched: {condition}");
            }
        }

        if group.attribute("Label") == Some("Globals") {
            self.global_properties(group);
        }
    }

    fn conditional_properties(&mut self, group: &Node) {
        for child in xml::child_elements(group) {
            match child.tag_name().name() {
                "TargetName" => self.project.name = xml::text(&child).to_string(),
                "ConfigurationType" => self.project.set_configuration_type(xml::text(&child)),
                "ClCompile" => self.compile_settings(&child),
                _ => {}
            }
        }
    }

    fn global_properties(&mut self, group: &Node) {
        for child in xml::child_elements(group) {
            if matches!(child.tag_name().name(), "RootNamespace" | "ProjectName") {
                self.project.name = xml::text(&child).to_string();
            }
        }
    }

    fn item_group(&mut self, group: &Node) {
        if !self.matcher.applies(xml::condition(group), false) {
            tracing::info!(
                "skipping <{}>, condition not matched: {}",
                group.tag_name().name(),
                xml::condition(group).unwrap_or_default()
            );
            return;
        }

        for item in xml::child_elements(group) {
            match ElementKind::of(&item) {
                ElementKind::ClCompile => match item.attribute("Include") {
                    Some(path) => self.project.sources.push(path.to_string()),
                    None => self.compile_settings(&item),
                },
                ElementKind::ClInclude => {
                    if let Some(path) = item.attribute("Include") {
                        self.project.headers.push(path.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    /// Settings nested inside a `<ClCompile>` definition.
    fn compile_settings(&mut self, compile: &Node) {
        for setting in xml::child_elements(compile) {
            let text = xml::text(&setting);
            match setting.tag_name().name() {
                "AdditionalIncludeDirectories" => self.additional_includes(text),
                "LanguageStandard" => self.project.set_standard(text),
                _ => {}
            }
        }
    }

    fn additional_includes(&mut self, list: &str) {
        let dirs = token::translate_list(list)
            .into_iter()
            .filter(|dir| !dir.is_empty() && !token::is_inherited_metadata(dir));
        self.project.includes.extend(dirs);
    }
}

/// Parse `.vcxproj` source text into a [`Project`].
pub fn parse_project(source: &str, matcher: ConditionMatcher) -> Result<Project> {
    let doc = roxmltree::Document::parse(source)?;
    Ok(ProjectBuilder::new(matcher).build(doc.root_element()))
}

/// Load a `.vcxproj` from disk and parse it into a [`Project`].
pub fn load_project(path: impl AsRef<Path>, matcher: ConditionMatcher) -> Result<Project> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_project(&source, matcher)
}
