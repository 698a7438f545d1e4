//! Impact heuristics.
//!
//! Four independent assessments are derived from an [`ExecutionContext`]:
//! cross-domain impact from layer and focus length, and three keyword lookups
//! over focus, timing and resource text. Thresholds and keyword tables live in
//! [`EstimatorPolicy`] so hosts can tune them from configuration.

use conduit_core::{ConfigError, ExecutionContext, Tier};
use serde::{Deserialize, Serialize};

/// A tier plus its human-readable rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Assessment {
    pub tier: Tier,
    pub rationale: String,
}

impl Assessment {
    pub fn new(tier: Tier, rationale: impl Into<String>) -> Self {
        Self {
            tier,
            rationale: rationale.into(),
        }
    }
}

/// All four assessments for one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImpactScores {
    pub cross_domain_impact: Assessment,
    pub value_estimate: Assessment,
    pub timing: Assessment,
    pub resource_efficiency: Assessment,
}

// ============================================================================
// POLICY
// ============================================================================

/// Keyword mapped to an assessment. Matching is a case-insensitive substring test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct KeywordRule {
    pub keyword: String,
    pub tier: Tier,
    pub rationale: String,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, tier: Tier, rationale: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            tier,
            rationale: rationale.into(),
        }
    }
}

/// Ordered keyword rules with a fallback. First matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct KeywordTable {
    pub rules: Vec<KeywordRule>,
    pub fallback: Assessment,
}

impl KeywordTable {
    pub fn classify(&self, text: &str) -> Assessment {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| haystack.contains(&rule.keyword.to_lowercase()))
            .map(|rule| Assessment::new(rule.tier, rule.rationale.clone()))
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.keyword.trim().is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: format!("{}.rules[{}].keyword", field, index),
                });
            }
        }
        Ok(())
    }
}

/// Weights and thresholds for the cross-domain impact score.
///
/// `score = layer * layer_weight + focus character count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct ImpactWeights {
    pub layer_weight: u32,
    /// Scores strictly above this are `High`
    pub high_threshold: u64,
    /// Scores strictly above this (and not `High`) are `Medium`
    pub medium_threshold: u64,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            layer_weight: 10,
            high_threshold: 50,
            medium_threshold: 30,
        }
    }
}

/// Tunable heuristics. Every section falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorPolicy {
    pub impact: ImpactWeights,
    /// Matched against the context focus
    pub value: KeywordTable,
    /// Matched against the timing hint
    pub timing: KeywordTable,
    /// Matched against the resource hint
    pub resources: KeywordTable,
}

impl Default for EstimatorPolicy {
    fn default() -> Self {
        Self {
            impact: ImpactWeights::default(),
            value: KeywordTable {
                rules: vec![
                    KeywordRule::new("credit repair", Tier::Medium, "$50K-100K monthly revenue potential"),
                    KeywordRule::new("real estate", Tier::High, "$100K-500K monthly revenue potential"),
                    KeywordRule::new("ai automation", Tier::Medium, "$25K-75K monthly revenue potential"),
                ],
                fallback: Assessment::new(Tier::Low, "$10K-50K monthly revenue potential"),
            },
            timing: KeywordTable {
                rules: vec![
                    KeywordRule::new("30-day", Tier::High, "Quick implementation, high success probability"),
                    KeywordRule::new("90-day", Tier::Medium, "Medium-term implementation, good success probability"),
                ],
                fallback: Assessment::new(Tier::Low, "Long-term implementation, variable success probability"),
            },
            resources: KeywordTable {
                rules: vec![
                    KeywordRule::new("high", Tier::High, "Optimal resource utilization"),
                    KeywordRule::new("medium", Tier::Medium, "Good resource utilization"),
                ],
                fallback: Assessment::new(Tier::Low, "Limited resource utilization"),
            },
        }
    }
}

impl EstimatorPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.impact.medium_threshold > self.impact.high_threshold {
            return Err(ConfigError::InvalidValue {
                field: "impact.medium_threshold".to_string(),
                value: self.impact.medium_threshold.to_string(),
                reason: format!(
                    "must not exceed impact.high_threshold ({})",
                    self.impact.high_threshold
                ),
            });
        }
        self.value.validate("value")?;
        self.timing.validate("timing")?;
        self.resources.validate("resources")?;
        Ok(())
    }
}

// ============================================================================
// ESTIMATOR
// ============================================================================

const HIGH_IMPACT_RATIONALE: &str = "Significant cross-domain optimization achieved";
const MEDIUM_IMPACT_RATIONALE: &str = "Moderate cross-domain optimization achieved";
const LOW_IMPACT_RATIONALE: &str = "Basic cross-domain optimization achieved";

/// Pure, deterministic impact estimator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpactEstimator {
    policy: EstimatorPolicy,
}

impl ImpactEstimator {
    /// Build an estimator from a validated policy.
    pub fn new(policy: EstimatorPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &EstimatorPolicy {
        &self.policy
    }

    /// Raw cross-domain score before bucketing.
    pub fn impact_score(&self, context: &ExecutionContext) -> u64 {
        let weights = &self.policy.impact;
        let focus_len = context.focus.chars().count() as u64;
        u64::from(context.layer)
            .saturating_mul(u64::from(weights.layer_weight))
            .saturating_add(focus_len)
    }

    pub fn cross_domain_impact(&self, context: &ExecutionContext) -> Assessment {
        let weights = &self.policy.impact;
        let score = self.impact_score(context);
        if score > weights.high_threshold {
            Assessment::new(Tier::High, HIGH_IMPACT_RATIONALE)
        } else if score > weights.medium_threshold {
            Assessment::new(Tier::Medium, MEDIUM_IMPACT_RATIONALE)
        } else {
            Assessment::new(Tier::Low, LOW_IMPACT_RATIONALE)
        }
    }

    pub fn value_estimate(&self, context: &ExecutionContext) -> Assessment {
        self.policy.value.classify(&context.focus)
    }

    pub fn timing(&self, context: &ExecutionContext) -> Assessment {
        self.policy.timing.classify(&context.hints.timing)
    }

    pub fn resource_efficiency(&self, context: &ExecutionContext) -> Assessment {
        self.policy.resources.classify(&context.hints.resources)
    }

    pub fn estimate(&self, context: &ExecutionContext) -> ImpactScores {
        ImpactScores {
            cross_domain_impact: self.cross_domain_impact(context),
            value_estimate: self.value_estimate(context),
            timing: self.timing(context),
            resource_efficiency: self.resource_efficiency(context),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use conduit_core::Category;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Estimation is pure: identical contexts give identical scores.
        #[test]
        fn prop_estimate_deterministic(
            focus in ".{0,40}",
            layer in any::<u8>(),
            timing in ".{0,20}",
            resources in ".{0,20}",
        ) {
            let ctx = ExecutionContext::new(Category::Execution, "x", focus)
                .with_layer(layer)
                .with_timing(timing)
                .with_resources(resources);
            let estimator = ImpactEstimator::default();
            prop_assert_eq!(estimator.estimate(&ctx), estimator.estimate(&ctx));
        }

        /// A longer focus never lowers the impact tier.
        #[test]
        fn prop_impact_monotonic_in_focus(focus in "[a-z ]{0,40}", extra in "[a-z]{1,20}", layer in 0u8..10) {
            let estimator = ImpactEstimator::default();
            let short = ExecutionContext::new(Category::Timing, "", focus.clone()).with_layer(layer);
            let long = ExecutionContext::new(Category::Timing, "", format!("{}{}", focus, extra)).with_layer(layer);
            prop_assert!(
                estimator.cross_domain_impact(&long).tier >= estimator.cross_domain_impact(&short).tier
            );
        }
    }
}
