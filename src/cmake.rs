//! Rendering a [`Project`] as `CMakeLists.txt` text.

use std::fmt;

use crate::project::Project;

const INDENT: &str = "    ";

/// Display adapter that writes the CMake description of a project.
///
/// Output is deterministic: sources and include directories are sorted
/// and deduplicated, and optional blocks are left out entirely when the
/// corresponding field is empty.
pub struct CMakeLists<'a>(pub &'a Project);

impl fmt::Display for CMakeLists<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;

        if !p.name.is_empty() {
            writeln!(f, "project({} LANGUAGES CXX)", p.name)?;
            writeln!(f)?;
        }

        if let Some(suffix) = p.standard.cmake_suffix() {
            writeln!(f, "set(CXX_STANDARD {suffix})")?;
            writeln!(f, "set(CMAKE_CXX_STANDARD_REQUIRED ON)")?;
            writeln!(f)?;
        }

        let command = if p.is_application { "add_executable" } else { "add_library" };
        writeln!(f, "{command}(${{PROJECT_NAME}}")?;
        write_list(f, &p.sorted_sources())?;
        writeln!(f, ")")?;

        let includes = p.sorted_includes();
        if !includes.is_empty() {
            writeln!(f, "target_include_directories(${{PROJECT_NAME}} PUBLIC")?;
            write_list(f, &includes)?;
            writeln!(f, ")")?;
        }

        Ok(())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[&str]) -> fmt::Result {
    for item in items {
        writeln!(f, "{INDENT}{item}")?;
    }
    Ok(())
}

/// Render `project` to a string.
pub fn emit(project: &Project) -> String {
    CMakeLists(project).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::LanguageStandard;

    #[test]
    fn full_project() {
        let p = Project {
            name: "demo".into(),
            is_application: true,
            standard: LanguageStandard::Cpp17,
            sources: vec!["main.cpp".into(), "util.cpp".into(), "main.cpp".into()],
            includes: vec!["${CMAKE_PROJECT_DIR}include".into(), "C:\\sdk".into()],
            headers: vec!["util.h".into()],
        };

        assert_eq!(
            emit(&p),
            "project(demo LANGUAGES CXX)\n\
             \n\
             set(CXX_STANDARD 17)\n\
             set(CMAKE_CXX_STANDARD_REQUIRED ON)\n\
             \n\
             add_executable(${PROJECT_NAME}\n    main.cpp\n    util.cpp\n)\n\
             target_include_directories(${PROJECT_NAME} PUBLIC\n    ${CMAKE_PROJECT_DIR}include\n    C:\\sdk\n)\n"
        );
    }

    #[test]
    fn library_without_optional_blocks() {
        let p = Project {
            sources: vec!["b.cpp".into(), "a.cpp".into()],
            ..Default::default()
        };
        assert_eq!(emit(&p), "add_library(${PROJECT_NAME}\n    a.cpp\n    b.cpp\n)\n");
    }

    #[test]
    fn empty_project_emits_bare_target() {
        let out = emit(&Project::default());
        assert_eq!(out, "add_library(${PROJECT_NAME}\n)\n");
        assert!(!out.contains("project("));
        assert!(!out.contains("CXX_STANDARD"));
        assert!(!out.contains("target_include_directories"));
    }

    #[test]
    fn headers_are_not_emitted() {
        let p = Project {
            headers: vec!["only.h".into()],
            ..Default::default()
        };
        assert!(!emit(&p).contains("only.h"));
    }
}
