pub mod builder;
pub mod cmake;
pub mod condition;
pub mod config;
pub mod convert;
pub mod error;
pub mod project;
pub mod token;
pub mod vcxproj;
pub mod xml;

pub use builder::{ProjectBuilder, load_project, parse_project};
pub use condition::ConditionMatcher;
pub use config::{ConfigurationIdentity, ConfigurationRecord, ConfigurationType};
pub use convert::ConvertOptions;
pub use error::{Error, Result};
pub use project::{LanguageStandard, Project};
pub use vcxproj::VisualStudioProject;
