use crate::eval::{EnforcementLevel, Matcher};

/// One configured pattern rule: a matcher, the enforcement level resolved
/// for the current actor, and a precomputed human-readable description of
/// the failure condition (e.g. `must not start with "wip/"`).
#[derive(Debug, Clone)]
pub struct MetadataRule {
    matcher: Matcher,
    enforcement: EnforcementLevel,
    description: String,
}

impl MetadataRule {
    /// Returns `None` when the level is `Off`, so builders can construct
    /// conditionally and push unconditionally. An `Off` rule is never stored.
    pub fn new(
        matcher: Matcher,
        enforcement: EnforcementLevel,
        description: String,
    ) -> Option<Self> {
        match enforcement {
            EnforcementLevel::Off => None,
            EnforcementLevel::Bypassable | EnforcementLevel::Required => Some(Self {
                matcher,
                enforcement,
                description,
            }),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Result of evaluating a candidate string against one rule set.
///
/// Produced fresh per call. Descriptions appear in rule insertion order;
/// rules whose matcher passed contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFailureReport {
    /// Violations that block the action for this actor.
    pub failed: Vec<String>,
    /// Violations the actor is permitted to proceed past.
    pub bypassed: Vec<String>,
}

impl RuleFailureReport {
    /// True when the candidate satisfied every rule.
    pub fn is_compliant(&self) -> bool {
        self.failed.is_empty() && self.bypassed.is_empty()
    }
}

/// Ordered rules for exactly one category (commit message, author email,
/// committer email, or branch name).
#[derive(Debug, Clone, Default)]
pub struct MetadataRuleSet {
    rules: Vec<MetadataRule>,
}

impl MetadataRuleSet {
    /// Append a rule. No-op on `None`.
    pub fn push(&mut self, rule: Option<MetadataRule>) {
        if let Some(rule) = rule {
            self.rules.push(rule);
        }
    }

    /// True iff at least one rule is stored. Callers use this to skip
    /// UI sections for categories with nothing configured.
    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Evaluate a candidate against every stored rule.
    ///
    /// Visits all rules rather than short-circuiting so the caller can
    /// present the complete set of violations at once. Pure: the same
    /// candidate against the same set always yields the same report.
    pub fn evaluate(&self, candidate: &str) -> RuleFailureReport {
        let mut report = RuleFailureReport::default();
        for rule in &self.rules {
            if rule.matcher.matches(candidate) {
                continue;
            }
            match rule.enforcement {
                EnforcementLevel::Required => report.failed.push(rule.description.clone()),
                EnforcementLevel::Bypassable => report.bypassed.push(rule.description.clone()),
                // MetadataRule::new never stores Off
                EnforcementLevel::Off => {}
            }
        }
        report
    }
}
