//! Thin read-only helpers over [`roxmltree`] for walking MSBuild documents.

use roxmltree::Node;

/// MSBuild elements the converter knows about.
///
/// Tag names are classified once; everything downstream switches on the
/// variant instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Project,
    PropertyGroup,
    ItemGroup,
    ItemDefinitionGroup,
    ProjectConfiguration,
    ClCompile,
    ClInclude,
    Link,
    PreBuildEvent,
    PostBuildEvent,
    Other,
}

impl ElementKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Project" => Self::Project,
            "PropertyGroup" => Self::PropertyGroup,
            "ItemGroup" => Self::ItemGroup,
            "ItemDefinitionGroup" => Self::ItemDefinitionGroup,
            "ProjectConfiguration" => Self::ProjectConfiguration,
            "ClCompile" => Self::ClCompile,
            "ClInclude" => Self::ClInclude,
            "Link" => Self::Link,
            "PreBuildEvent" => Self::PreBuildEvent,
            "PostBuildEvent" => Self::PostBuildEvent,
            _ => Self::Other,
        }
    }

    pub fn of(node: &Node) -> Self {
        Self::from_tag(node.tag_name().name())
    }
}

/// Direct element children of `node`, in document order.
pub fn child_elements<'a, 'input>(
    node: &Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + use<'a, 'input> {
    node.children().filter(|n| n.is_element())
}

/// Text content of `node`, or `""` for empty elements.
pub fn text<'a>(node: &Node<'a, '_>) -> &'a str {
    node.text().unwrap_or("")
}

/// `Condition` attribute, if present.
pub fn condition<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    node.attribute("Condition")
}

/// Return the text content of the first child element with the given tag name.
pub fn find_child_text(parent: &Node, tag: &str) -> Option<String> {
    child_elements(parent)
        .find(|c| c.tag_name().name() == tag)
        .and_then(|c| c.text())
        .map(String::from)
}

/// All elements reachable from `node` by the `/`-separated tag path.
///
/// When `node` is the document root the first segment names the root
/// element itself, so `select(doc.root(), "Project/ItemGroup/ClCompile")`
/// returns every `ClCompile` directly under a top-level `ItemGroup`.
pub fn select<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = current
            .iter()
            .flat_map(|n| child_elements(n))
            .filter(|n| n.tag_name().name() == segment)
            .collect();
    }
    current
}
