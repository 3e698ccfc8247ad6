//! Reconciler configuration (environment-driven, with defaults).

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use prodplan_core::DomainError;

pub const ALLOCATION_POLICY_ENV: &str = "PRODPLAN_ALLOCATION_POLICY";
pub const WARN_UNKNOWN_INGREDIENTS_ENV: &str = "PRODPLAN_WARN_UNKNOWN_INGREDIENTS";

/// How a global ingredient shortage is attributed to the products competing for it.
///
/// Only affects the per-product `missing_ingredients` amounts. Whether a product
/// is blocked is always decided against the global shortage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// Split the shortage by each product's share of total demand.
    #[default]
    Proportional,
    /// Serve stock first-selected-first-served; later products absorb the shortage.
    ListOrder,
    /// Report the full global shortage on every consuming product.
    AggregateOnly,
}

impl AllocationPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            AllocationPolicy::Proportional => "proportional",
            AllocationPolicy::ListOrder => "list_order",
            AllocationPolicy::AggregateOnly => "aggregate_only",
        }
    }
}

impl core::fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "proportional" | "pro_rata" => Ok(AllocationPolicy::Proportional),
            "list_order" | "first_selected" => Ok(AllocationPolicy::ListOrder),
            "aggregate_only" | "aggregate" => Ok(AllocationPolicy::AggregateOnly),
            other => Err(DomainError::validation(format!(
                "unknown allocation policy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    pub allocation_policy: AllocationPolicy,
    /// Log recipe items that reference ingredients missing from the catalog.
    pub warn_on_unknown_ingredient: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            allocation_policy: AllocationPolicy::default(),
            warn_on_unknown_ingredient: true,
        }
    }
}

impl ReconcilerConfig {
    pub fn with_allocation_policy(mut self, policy: AllocationPolicy) -> Self {
        self.allocation_policy = policy;
        self
    }

    pub fn with_warn_on_unknown_ingredient(mut self, warn: bool) -> Self {
        self.warn_on_unknown_ingredient = warn;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Invalid values are logged and replaced by defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ALLOCATION_POLICY_ENV) {
            match raw.parse::<AllocationPolicy>() {
                Ok(policy) => config.allocation_policy = policy,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "{ALLOCATION_POLICY_ENV} invalid; using {}",
                    config.allocation_policy
                ),
            }
        }

        if let Some(raw) = lookup(WARN_UNKNOWN_INGREDIENTS_ENV) {
            match parse_bool(&raw) {
                Some(flag) => config.warn_on_unknown_ingredient = flag,
                None => tracing::warn!(
                    value = %raw,
                    "{WARN_UNKNOWN_INGREDIENTS_ENV} invalid; using {}",
                    config.warn_on_unknown_ingredient
                ),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ReconcilerConfig::from_lookup(|_| None);
        assert_eq!(config, ReconcilerConfig::default());
        assert_eq!(config.allocation_policy, AllocationPolicy::Proportional);
        assert!(config.warn_on_unknown_ingredient);
    }

    #[test]
    fn reads_both_variables() {
        let config = ReconcilerConfig::from_lookup(lookup_from(&[
            (ALLOCATION_POLICY_ENV, "list-order"),
            (WARN_UNKNOWN_INGREDIENTS_ENV, "off"),
        ]));
        assert_eq!(config.allocation_policy, AllocationPolicy::ListOrder);
        assert!(!config.warn_on_unknown_ingredient);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = ReconcilerConfig::from_lookup(lookup_from(&[
            (ALLOCATION_POLICY_ENV, "round_robin"),
            (WARN_UNKNOWN_INGREDIENTS_ENV, "maybe"),
        ]));
        assert_eq!(config, ReconcilerConfig::default());
    }

    #[test]
    fn policy_parse_and_display_agree() {
        for policy in [
            AllocationPolicy::Proportional,
            AllocationPolicy::ListOrder,
            AllocationPolicy::AggregateOnly,
        ] {
            assert_eq!(policy.to_string().parse::<AllocationPolicy>().unwrap(), policy);
        }
        assert!("".parse::<AllocationPolicy>().is_err());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ReconcilerConfig =
            serde_json::from_str(r#"{"allocation_policy":"aggregate_only"}"#).unwrap();
        assert_eq!(config.allocation_policy, AllocationPolicy::AggregateOnly);
        assert!(config.warn_on_unknown_ingredient);
    }
}
