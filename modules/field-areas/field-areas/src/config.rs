use serde::Deserialize;

/// Configuration for the field areas module.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldAreasConfig {
    /// Upper bound on the length of every text field.
    pub max_field_length: usize,
}

impl Default for FieldAreasConfig {
    fn default() -> Self {
        Self {
            max_field_length: 100,
        }
    }
}
