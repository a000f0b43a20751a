//! Per-run tuning configuration for the kernel attribute pass.
//!
//! Values come from the process environment by convention (build systems
//! export them around the compiler invocation), but the struct is plain
//! data so embedders and tests can construct it directly. An empty string
//! means "not configured": the corresponding attribute is not attached and
//! the name filter is disabled.
use crate::magic::{
    ATTR_FLAT_WORK_GROUP_SIZE, ATTR_NUM_SGPR, ATTR_NUM_VGPR, ATTR_WAVES_PER_EU,
    ENV_FLAT_WORK_GROUP_SIZE, ENV_KERNEL_ENTRY_FUNCTION_NAME, ENV_NUM_SGPR, ENV_NUM_VGPR,
    ENV_WAVES_PER_EU,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeConfig {
    /// When non-empty, only the kernel entry with this exact display name is
    /// annotated; other classified entries are reported as skipped.
    pub kernel_entry_function_name: String,

    /// Value for the flat work-group size attribute.
    pub flat_work_group_size: String,

    /// Value for the scalar-register budget attribute.
    pub num_sgpr: String,

    /// Value for the vector-register budget attribute.
    pub num_vgpr: String,

    /// Value for the waves-per-execution-unit attribute.
    pub waves_per_eu: String,
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

impl AttributeConfig {
    /// Read the configuration from the process environment. Unset variables
    /// yield empty (disabled) values.
    pub fn from_env() -> Self {
        AttributeConfig {
            kernel_entry_function_name: env_or_empty(ENV_KERNEL_ENTRY_FUNCTION_NAME),
            flat_work_group_size: env_or_empty(ENV_FLAT_WORK_GROUP_SIZE),
            num_sgpr: env_or_empty(ENV_NUM_SGPR),
            num_vgpr: env_or_empty(ENV_NUM_VGPR),
            waves_per_eu: env_or_empty(ENV_WAVES_PER_EU),
        }
    }

    /// Returns true if `name` passes the entry-name filter.
    pub fn matches_entry_name(&self, name: &str) -> bool {
        self.kernel_entry_function_name.is_empty() || self.kernel_entry_function_name == name
    }

    /// `(attribute kind, configured value)` pairs, including the empty ones.
    pub fn tuning_attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (ATTR_FLAT_WORK_GROUP_SIZE, self.flat_work_group_size.as_str()),
            (ATTR_NUM_SGPR, self.num_sgpr.as_str()),
            (ATTR_NUM_VGPR, self.num_vgpr.as_str()),
            (ATTR_WAVES_PER_EU, self.waves_per_eu.as_str()),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_filters_nothing() {
        let config = AttributeConfig::default();
        assert!(config.matches_entry_name("any_kernel"));
        assert!(config.tuning_attributes().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn name_filter_matches_exactly() {
        let config = AttributeConfig {
            kernel_entry_function_name: "main_kernel".to_string(),
            ..Default::default()
        };
        assert!(config.matches_entry_name("main_kernel"));
        assert!(!config.matches_entry_name("main_kernel2"));
        assert!(!config.matches_entry_name(""));
    }

    #[test]
    fn tuning_attributes_expose_kind_constants() {
        let config = AttributeConfig {
            num_vgpr: "128".to_string(),
            ..Default::default()
        };
        let set: Vec<_> = config
            .tuning_attributes()
            .filter(|(_, value)| !value.is_empty())
            .collect();
        assert_eq!(set, [(ATTR_NUM_VGPR, "128")]);
    }
}
