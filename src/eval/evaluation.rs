use crate::eval::{EnforcementLevel, MetadataRuleSet};

/// Snapshot of all rules that apply to the current branch and actor.
///
/// Built once per rule-configuration fetch and read-only thereafter; no
/// method mutates it. When the server configuration or the actor's bypass
/// eligibility changes, the caller rebuilds and swaps in the new value
/// rather than patching fields, so an in-flight evaluation never observes
/// a half-updated policy.
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluation {
    /// Rules that affect committing but cannot be checked locally
    /// (required signatures, status checks, deployments, branch update).
    pub basic_commit_warning: EnforcementLevel,
    /// Branch creation is restricted.
    pub creation_restricted: EnforcementLevel,
    /// Changes must go through a pull request.
    pub pull_request_required: EnforcementLevel,

    pub commit_message_patterns: MetadataRuleSet,
    pub commit_author_email_patterns: MetadataRuleSet,
    pub committer_email_patterns: MetadataRuleSet,
    pub branch_name_patterns: MetadataRuleSet,
}

impl RuleEvaluation {
    /// True iff any rule is configured at all. Callers with a false here can
    /// skip rule checks entirely.
    pub fn any_rules(&self) -> bool {
        self.basic_commit_warning.is_enforced()
            || self.creation_restricted.is_enforced()
            || self.pull_request_required.is_enforced()
            || self.commit_message_patterns.has_rules()
            || self.commit_author_email_patterns.has_rules()
            || self.committer_email_patterns.has_rules()
            || self.branch_name_patterns.has_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_rules() {
        let eval = RuleEvaluation::default();
        assert!(!eval.any_rules());
        assert_eq!(eval.basic_commit_warning, EnforcementLevel::Off);
        assert_eq!(eval.creation_restricted, EnforcementLevel::Off);
        assert_eq!(eval.pull_request_required, EnforcementLevel::Off);
    }

    #[test]
    fn scalar_flag_counts_as_rules() {
        let eval = RuleEvaluation {
            creation_restricted: EnforcementLevel::Required,
            ..Default::default()
        };
        assert!(eval.any_rules());
    }
}
