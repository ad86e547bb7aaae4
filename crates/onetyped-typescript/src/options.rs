//! Conversion options.
//!
//! Both option structs deserialize from camelCase JSON with every field
//! optional, so a host can pass `{}` or a partial object.

use crate::recursion::RecursionProfile;
use serde::Deserialize;

/// How a type with several call signatures is imported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignaturePolicy {
    /// Import the first declared signature, ignore the rest.
    #[default]
    FirstDeclared,
    /// Fail with `UnsupportedType` on overloads.
    RejectOverloads,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    pub signature_policy: SignaturePolicy,
    /// Prefix of identifiers synthesized for recursive types that carry no
    /// alias name; a counter is appended (`Recursive1`, `Recursive2`, ...).
    pub anonymous_identifier_prefix: String,
    pub max_depth: u32,
    pub max_iterations: u32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            signature_policy: SignaturePolicy::default(),
            anonymous_identifier_prefix: "Recursive".to_string(),
            max_depth: RecursionProfile::Import.max_depth(),
            max_iterations: RecursionProfile::Import.max_iterations(),
        }
    }
}

impl ImportOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub(crate) fn profile(&self) -> RecursionProfile {
        RecursionProfile::Custom {
            max_depth: self.max_depth,
            max_iterations: self.max_iterations,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Function parameters are named `{prefix}{index}`.
    pub parameter_prefix: String,
    pub max_depth: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            parameter_prefix: "arg".to_string(),
            max_depth: RecursionProfile::Export.max_depth(),
        }
    }
}

impl ExportOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
