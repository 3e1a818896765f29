//! Raw server rule records, as fetched by the configuration collaborator.
//!
//! These types mirror the JSON shape of the "rules for a branch" payload.
//! The collaborator also resolves, per rule, whether the *current actor* is
//! allowed to bypass it (from the ruleset's bypass-actor list and the actor's
//! repository permission) and reports that as the `bypassable` flag. This
//! module only deserializes; enforcement resolution lives in the builder.

use serde::Deserialize;

/// One server-configured rule.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    /// Category tag.
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Pattern configuration; present only for the metadata pattern kinds.
    #[serde(default)]
    pub parameters: Option<PatternParameters>,
    /// Whether the current actor may bypass this specific rule.
    #[serde(default)]
    pub bypassable: bool,
}

/// Rule category, as tagged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Creation,
    Update,
    PullRequest,
    RequiredSignatures,
    RequiredStatusChecks,
    RequiredDeployments,
    CommitMessagePattern,
    CommitAuthorEmailPattern,
    CommitterEmailPattern,
    BranchNamePattern,
    /// Any rule kind this engine does not evaluate. Skipped during build.
    #[serde(other)]
    Unrecognized,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Creation => "creation",
            RuleKind::Update => "update",
            RuleKind::PullRequest => "pull_request",
            RuleKind::RequiredSignatures => "required_signatures",
            RuleKind::RequiredStatusChecks => "required_status_checks",
            RuleKind::RequiredDeployments => "required_deployments",
            RuleKind::CommitMessagePattern => "commit_message_pattern",
            RuleKind::CommitAuthorEmailPattern => "commit_author_email_pattern",
            RuleKind::CommitterEmailPattern => "committer_email_pattern",
            RuleKind::BranchNamePattern => "branch_name_pattern",
            RuleKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pattern configuration for the metadata rule kinds.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternParameters {
    pub operator: PatternOperator,
    pub pattern: String,
    /// Invert the match: the rule passes when the pattern does NOT match.
    #[serde(default)]
    pub negate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternOperator {
    StartsWith,
    EndsWith,
    Contains,
    Regex,
}

/// Parse a JSON array of raw rules.
pub fn parse_rules(json: &str) -> Result<Vec<RawRule>, serde_json::Error> {
    serde_json::from_str(json)
}
