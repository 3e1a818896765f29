/// How a configured rule applies to the current actor.
///
/// Resolution happens once, at build time; evaluation trusts the level
/// baked into each stored rule and never re-examines bypass eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnforcementLevel {
    /// No rule of this category is configured, or it does not apply.
    #[default]
    Off,
    /// Violations are shown as warnings; the actor may proceed.
    Bypassable,
    /// Violations block the action for this actor.
    Required,
}

impl EnforcementLevel {
    /// Resolve the level for one raw rule: bypassable only when the rule
    /// itself permits bypass *and* the current actor is bypass-eligible.
    pub fn resolve(rule_bypassable: bool, actor_can_bypass: bool) -> Self {
        if rule_bypassable && actor_can_bypass {
            EnforcementLevel::Bypassable
        } else {
            EnforcementLevel::Required
        }
    }

    /// True for any configured level (`Bypassable` or `Required`).
    pub fn is_enforced(self) -> bool {
        self != EnforcementLevel::Off
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnforcementLevel::Off => "off",
            EnforcementLevel::Bypassable => "bypassable",
            EnforcementLevel::Required => "required",
        }
    }
}
