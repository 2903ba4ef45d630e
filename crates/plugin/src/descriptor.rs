use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a discoverable patch-generation strategy: a name, the
/// parameters the implementation was built for, and a human-readable
/// description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    #[serde(default)]
    pub params: IndexMap<String, String>,
    #[serde(default)]
    pub description: String,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: IndexMap::new(),
            description: description.into(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// What the user asked for: a plugin name plus the parameter values the
/// selected plugin must carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchCriteria {
    pub name: String,
    #[serde(default)]
    pub params: IndexMap<String, String>,
}

impl MatchCriteria {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: IndexMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Names compare case-insensitively; the descriptor must carry every
    /// required parameter with an equal value.
    pub fn matches(&self, descriptor: &PluginDescriptor) -> bool {
        if !self.name.eq_ignore_ascii_case(&descriptor.name) {
            return false;
        }
        self.params
            .iter()
            .all(|(key, value)| descriptor.params.get(key) == Some(value))
    }
}

impl fmt::Display for MatchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (key, value)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matches_case_insensitively() {
        let descriptor = PluginDescriptor::new("CapGen", "capability-guided generation")
            .with_param("bugId", "112");
        let criteria = MatchCriteria::new("capgen").with_param("bugId", "112");

        assert!(criteria.matches(&descriptor));
    }

    #[test]
    fn descriptor_params_must_cover_required_set() {
        let descriptor = PluginDescriptor::new("capgen", "").with_param("project", "Closure");
        let criteria = MatchCriteria::new("capgen").with_param("bugId", "112");

        assert!(!criteria.matches(&descriptor));
    }

    #[test]
    fn param_values_must_be_equal() {
        let descriptor = PluginDescriptor::new("capgen", "").with_param("bugId", "7");
        let criteria = MatchCriteria::new("capgen").with_param("bugId", "112");

        assert!(!criteria.matches(&descriptor));
    }

    #[test]
    fn extra_descriptor_params_are_allowed() {
        let descriptor = PluginDescriptor::new("capgen", "")
            .with_param("bugId", "112")
            .with_param("project", "Closure");
        let criteria = MatchCriteria::new("capgen").with_param("bugId", "112");

        assert!(criteria.matches(&descriptor));
    }

    #[test]
    fn different_names_never_match() {
        let descriptor = PluginDescriptor::new("jaid", "");
        let criteria = MatchCriteria::new("capgen");

        assert!(!criteria.matches(&descriptor));
    }

    #[test]
    fn display_names_the_request() {
        let criteria = MatchCriteria::new("capgen")
            .with_param("bugId", "112")
            .with_param("project", "Closure");

        assert_eq!(criteria.to_string(), "capgen (bugId=112, project=Closure)");
    }
}
