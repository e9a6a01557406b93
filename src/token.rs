//! Rewriting MSBuild placeholder macros into their CMake equivalents.

/// Separator used by MSBuild list properties.
pub const LIST_DELIMITER: char = ';';

/// MSBuild macro for the directory holding the project file.
pub const MSBUILD_PROJECT_DIR: &str = "$(ProjectDir)";

/// CMake variable substituted for [`MSBUILD_PROJECT_DIR`].
pub const CMAKE_PROJECT_DIR: &str = "${CMAKE_PROJECT_DIR}";

/// Split a `;`-separated list. Empty segments are kept, so joining the
/// result with `;` gives back the input.
pub fn split_list(list: &str) -> Vec<&str> {
    list.split(LIST_DELIMITER).collect()
}

/// Rewrite a leading `$(ProjectDir)` to `${CMAKE_PROJECT_DIR}`; any other
/// token is returned unchanged.
pub fn translate_token(token: &str) -> String {
    match token.strip_prefix(MSBUILD_PROJECT_DIR) {
        Some(rest) => format!("{CMAKE_PROJECT_DIR}{rest}"),
        None => token.to_string(),
    }
}

/// Split `list` and translate each token, preserving input order.
pub fn translate_list(list: &str) -> Vec<String> {
    split_list(list).into_iter().map(translate_token).collect()
}

/// `%(Name)` metadata references, which tell MSBuild to append inherited
/// values, have no CMake counterpart.
pub fn is_inherited_metadata(token: &str) -> bool {
    token.starts_with("%(") && token.ends_with(')')
}
