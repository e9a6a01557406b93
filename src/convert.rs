//! One-shot conversion entry points.

use std::path::Path;

use crate::builder;
use crate::cmake;
use crate::condition::ConditionMatcher;
use crate::config::ConfigurationIdentity;
use crate::error::Result;

/// Builder for a conversion run.
///
/// # Example
/// ```no_run
/// use vcx2cmake::ConvertOptions;
///
/// let cmake = ConvertOptions::new()
///     .configuration("Release|x64".parse().unwrap())
///     .exact(true)
///     .convert_file("demo.vcxproj")
///     .unwrap();
/// print!("{cmake}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    marker: Option<String>,
    configuration: Option<ConfigurationIdentity>,
    exact: bool,
}

impl ConvertOptions {
    /// Marker-mode conversion selecting groups whose condition mentions
    /// `Release`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select groups whose condition contains `marker`.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Select groups naming this `Build|Platform` pair. Takes precedence
    /// over [`marker`](Self::marker).
    pub fn configuration(mut self, identity: ConfigurationIdentity) -> Self {
        self.configuration = Some(identity);
        self
    }

    /// Evaluate conditions as MSBuild expressions instead of searching
    /// for the configuration text. Only meaningful together with
    /// [`configuration`](Self::configuration).
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// The matcher these options describe.
    pub fn matcher(&self) -> ConditionMatcher {
        match (&self.configuration, self.exact) {
            (Some(identity), true) => ConditionMatcher::Evaluated(identity.clone()),
            (Some(identity), false) => ConditionMatcher::Identity(identity.clone()),
            (None, _) => self
                .marker
                .clone()
                .map(ConditionMatcher::Marker)
                .unwrap_or_default(),
        }
    }

    /// Convert project XML into CMake text.
    pub fn convert_str(&self, source: &str) -> Result<String> {
        let project = builder::parse_project(source, self.matcher())?;
        Ok(cmake::emit(&project))
    }

    /// Load a project file and convert it into CMake text.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let project = builder::load_project(path, self.matcher())?;
        Ok(cmake::emit(&project))
    }
}
