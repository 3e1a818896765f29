pub mod evaluation;
pub mod level;
pub mod matcher;
pub mod ruleset;

pub use evaluation::RuleEvaluation;
pub use level::EnforcementLevel;
pub use matcher::Matcher;
pub use ruleset::{MetadataRule, MetadataRuleSet, RuleFailureReport};

use regex::Regex;
use thiserror::Error;

use crate::config::{PatternOperator, PatternParameters, RawRule, RuleKind};

/// Errors surfaced while turning raw configuration into a [`RuleEvaluation`].
///
/// A failed build never yields a partial evaluation: presenting an incomplete
/// policy is worse than failing closed, so the caller decides whether to fall
/// back to "no rules" or block everything.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("{kind} rule is missing its pattern parameters")]
    MissingParameters { kind: RuleKind },
    #[error("malformed rule payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Assembles a [`RuleEvaluation`] from raw server rules.
///
/// This is the only place enforcement levels are resolved for the current
/// actor; everything downstream trusts the level baked into each rule.
pub struct RuleSetBuilder {
    actor_can_bypass: bool,
}

impl RuleSetBuilder {
    /// `actor_can_bypass` comes from the configuration collaborator, derived
    /// from the actor's repository permission level.
    pub fn new(actor_can_bypass: bool) -> Self {
        Self { actor_can_bypass }
    }

    /// Build the full evaluation, or fail on the first bad pattern.
    pub fn build(&self, rules: &[RawRule]) -> Result<RuleEvaluation, ConfigError> {
        let mut eval = RuleEvaluation::default();

        for rule in rules {
            match rule.kind {
                RuleKind::Creation => {
                    raise(&mut eval.creation_restricted, self.resolve(rule));
                }
                RuleKind::PullRequest => {
                    raise(&mut eval.pull_request_required, self.resolve(rule));
                }
                // Rules that affect committing but can only be checked
                // server-side fold into one warning flag.
                RuleKind::Update
                | RuleKind::RequiredSignatures
                | RuleKind::RequiredStatusChecks
                | RuleKind::RequiredDeployments => {
                    raise(&mut eval.basic_commit_warning, self.resolve(rule));
                }
                RuleKind::CommitMessagePattern => {
                    eval.commit_message_patterns.push(self.metadata_rule(rule)?);
                }
                RuleKind::CommitAuthorEmailPattern => {
                    eval.commit_author_email_patterns
                        .push(self.metadata_rule(rule)?);
                }
                RuleKind::CommitterEmailPattern => {
                    eval.committer_email_patterns.push(self.metadata_rule(rule)?);
                }
                RuleKind::BranchNamePattern => {
                    eval.branch_name_patterns.push(self.metadata_rule(rule)?);
                }
                RuleKind::Unrecognized => {
                    log::debug!("skipping rule kind this engine does not evaluate");
                }
            }
        }

        Ok(eval)
    }

    fn resolve(&self, rule: &RawRule) -> EnforcementLevel {
        EnforcementLevel::resolve(rule.bypassable, self.actor_can_bypass)
    }

    fn metadata_rule(&self, rule: &RawRule) -> Result<Option<MetadataRule>, ConfigError> {
        let params = rule
            .parameters
            .as_ref()
            .ok_or(ConfigError::MissingParameters { kind: rule.kind })?;
        let matcher = build_matcher(params)?;
        let level = self.resolve(rule);
        Ok(MetadataRule::new(matcher, level, describe(params)))
    }
}

/// Construct a matcher from wire parameters. Regex compilation is the only
/// fallible step; a failure aborts the whole build.
fn build_matcher(params: &PatternParameters) -> Result<Matcher, ConfigError> {
    let base = match params.operator {
        PatternOperator::StartsWith => Matcher::StartsWith(params.pattern.clone()),
        PatternOperator::EndsWith => Matcher::EndsWith(params.pattern.clone()),
        PatternOperator::Contains => Matcher::Contains(params.pattern.clone()),
        PatternOperator::Regex => match Regex::new(&params.pattern) {
            Ok(re) => Matcher::Regex(re),
            Err(source) => {
                log::warn!("invalid regex pattern {:?}: {source}", params.pattern);
                return Err(ConfigError::InvalidPattern {
                    pattern: params.pattern.clone(),
                    source: Box::new(source),
                });
            }
        },
    };
    Ok(base.negated_if(params.negate))
}

/// Human-readable failure condition for a pattern rule,
/// e.g. `must not start with "wip/"`.
fn describe(params: &PatternParameters) -> String {
    let condition = match params.operator {
        PatternOperator::StartsWith => format!("start with \"{}\"", params.pattern),
        PatternOperator::EndsWith => format!("end with \"{}\"", params.pattern),
        PatternOperator::Contains => format!("contain \"{}\"", params.pattern),
        PatternOperator::Regex => {
            format!("match the regular expression \"{}\"", params.pattern)
        }
    };
    if params.negate {
        format!("must not {condition}")
    } else {
        format!("must {condition}")
    }
}

/// Fold a resolved level into a scalar flag, strictest wins.
fn raise(slot: &mut EnforcementLevel, level: EnforcementLevel) {
    if level > *slot {
        *slot = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_rules;

    fn build(json: &str, actor_can_bypass: bool) -> Result<RuleEvaluation, ConfigError> {
        let rules = parse_rules(json).unwrap();
        RuleSetBuilder::new(actor_can_bypass).build(&rules)
    }

    #[test]
    fn empty_rules_build_empty_evaluation() {
        let eval = build("[]", false).unwrap();
        assert!(!eval.any_rules());
    }

    #[test]
    fn creation_rule_sets_scalar() {
        let eval = build(r#"[{ "type": "creation" }]"#, false).unwrap();
        assert_eq!(eval.creation_restricted, EnforcementLevel::Required);
        assert_eq!(eval.pull_request_required, EnforcementLevel::Off);
    }

    #[test]
    fn bypassable_needs_eligible_actor() {
        let json = r#"[{ "type": "pull_request", "bypassable": true }]"#;
        let eval = build(json, true).unwrap();
        assert_eq!(eval.pull_request_required, EnforcementLevel::Bypassable);
        let eval = build(json, false).unwrap();
        assert_eq!(eval.pull_request_required, EnforcementLevel::Required);
    }

    #[test]
    fn commit_affecting_kinds_fold_into_basic_warning() {
        let eval = build(
            r#"[
                { "type": "required_signatures", "bypassable": true },
                { "type": "required_status_checks" },
                { "type": "update", "bypassable": true },
                { "type": "required_deployments", "bypassable": true }
            ]"#,
            true,
        )
        .unwrap();
        // One non-bypassable contributor makes the whole warning required.
        assert_eq!(eval.basic_commit_warning, EnforcementLevel::Required);
    }

    #[test]
    fn all_bypassable_contributors_stay_bypassable() {
        let eval = build(
            r#"[
                { "type": "required_signatures", "bypassable": true },
                { "type": "update", "bypassable": true }
            ]"#,
            true,
        )
        .unwrap();
        assert_eq!(eval.basic_commit_warning, EnforcementLevel::Bypassable);
    }

    #[test]
    fn pattern_rules_land_in_their_category() {
        let eval = build(
            r#"[
                {
                    "type": "commit_message_pattern",
                    "parameters": { "operator": "contains", "pattern": "JIRA-" }
                },
                {
                    "type": "branch_name_pattern",
                    "parameters": { "operator": "starts_with", "pattern": "wip/", "negate": true }
                }
            ]"#,
            false,
        )
        .unwrap();
        assert!(eval.commit_message_patterns.has_rules());
        assert!(eval.branch_name_patterns.has_rules());
        assert!(!eval.commit_author_email_patterns.has_rules());
        assert!(!eval.committer_email_patterns.has_rules());
    }

    #[test]
    fn unrecognized_kinds_are_skipped() {
        let eval = build(r#"[{ "type": "workflows" }]"#, false).unwrap();
        assert!(!eval.any_rules());
    }

    #[test]
    fn invalid_regex_fails_the_whole_build() {
        let result = build(
            r#"[
                {
                    "type": "branch_name_pattern",
                    "parameters": { "operator": "starts_with", "pattern": "ok/" }
                },
                {
                    "type": "commit_message_pattern",
                    "parameters": { "operator": "regex", "pattern": "([unclosed" }
                }
            ]"#,
            false,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPattern { ref pattern, .. }) if pattern == "([unclosed"
        ));
    }

    #[test]
    fn pattern_rule_without_parameters_is_an_error() {
        let result = build(r#"[{ "type": "committer_email_pattern" }]"#, false);
        assert!(matches!(
            result,
            Err(ConfigError::MissingParameters {
                kind: RuleKind::CommitterEmailPattern
            })
        ));
    }

    #[test]
    fn descriptions_read_like_requirements() {
        let cases = [
            ("starts_with", false, "must start with \"x\""),
            ("starts_with", true, "must not start with \"x\""),
            ("ends_with", false, "must end with \"x\""),
            ("ends_with", true, "must not end with \"x\""),
            ("contains", false, "must contain \"x\""),
            ("contains", true, "must not contain \"x\""),
            ("regex", false, "must match the regular expression \"x\""),
            ("regex", true, "must not match the regular expression \"x\""),
        ];
        for (operator, negate, expected) in cases {
            let eval = build(
                &format!(
                    r#"[{{
                        "type": "branch_name_pattern",
                        "parameters": {{ "operator": "{operator}", "pattern": "x", "negate": {negate} }}
                    }}]"#
                ),
                false,
            )
            .unwrap();
            // "x" matches all non-negated operators, so force a failure with
            // a candidate that misses the pattern, or hits it when negated.
            let candidate = if negate { "x" } else { "zzz" };
            let report = eval.branch_name_patterns.evaluate(candidate);
            assert_eq!(report.failed, vec![expected], "operator: {operator}");
        }
    }
}
