//! repo-rules: evaluates proposed commit and branch operations against
//! server-configured repository rules.
//!
//! Raw rule records (fetched and pre-resolved by an external configuration
//! collaborator) are compiled by [`eval::RuleSetBuilder`] into an immutable
//! [`eval::RuleEvaluation`]. Callers then query it at the moment of a commit
//! or branch action: scalar flags ([`eval::EnforcementLevel`]) gate branch
//! creation and pull-request requirements outright, while the per-category
//! pattern sets ([`eval::MetadataRuleSet`]) classify a candidate string's
//! violations as blocking or bypassable for the current actor.
//!
//! # Architecture
//!
//! - **[`config`]** — Raw rule records: wire types and JSON deserialization.
//! - **[`eval`]** — Evaluation engine: matchers, rule sets, enforcement
//!   levels, and the builder that resolves them for the current actor.
//!
//! The engine performs no I/O and holds no shared mutable state: `build` and
//! `evaluate` are pure, so one [`eval::RuleEvaluation`] may be queried from
//! any number of threads, and a configuration refresh is a fresh build
//! swapped in whole.

/// Raw rule payload types and JSON parsing.
pub mod config;
/// Evaluation engine: matchers, rule sets, enforcement resolution.
pub mod eval;

use eval::{ConfigError, RuleEvaluation, RuleSetBuilder};

/// Parse a JSON rule payload and build the evaluation for the current actor.
///
/// This is the main entry point for tests and simple usage. Callers that
/// already hold deserialized [`config::RawRule`]s build via
/// [`RuleSetBuilder`] directly.
pub fn rules_from_json(
    json: &str,
    actor_can_bypass: bool,
) -> Result<RuleEvaluation, ConfigError> {
    let rules = config::parse_rules(json)?;
    RuleSetBuilder::new(actor_can_bypass).build(&rules)
}
