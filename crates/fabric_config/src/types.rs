//! Configuration types deserialized from `fabric.toml`.

use serde::Deserialize;

/// The complete builder configuration.
///
/// Every section is optional; an empty file yields [`FabricConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FabricConfig {
    /// Domain naming.
    #[serde(default)]
    pub domains: DomainConfig,
    /// Conditional lowering settings.
    #[serde(default)]
    pub lowering: LoweringConfig,
}

/// How domain names given to the builder are interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainConfig {
    /// The name that resolves to the unclocked (combinational) domain.
    #[serde(default = "default_comb_name")]
    pub comb: String,
    /// The clocked domain used by the `sync()` shorthand.
    #[serde(default = "default_sync_name")]
    pub default: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            comb: default_comb_name(),
            default: default_sync_name(),
        }
    }
}

fn default_comb_name() -> String {
    "comb".to_string()
}

fn default_sync_name() -> String {
    "sync".to_string()
}

/// Settings for lowering If/Elif/Else chains into switch statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoweringConfig {
    /// Pattern encoding for branch priority.
    #[serde(default)]
    pub priority: PriorityEncoding,
}

/// How branch priority of an If/Elif/Else chain is expressed in the emitted patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityEncoding {
    /// Branch `i` fixes only its own condition bit; priority comes from case
    /// order and requires a first-match-wins evaluator.
    #[default]
    FirstMatch,
    /// Branch `i` also fixes every earlier condition bit to `0`, so the
    /// patterns are mutually exclusive and order-independent.
    Exclusive,
}
