//! Query-safety policy records.
//!
//! Like the generation options, safety policies come in two shapes: the
//! flat-boolean [`LegacySafetyRules`] wire form and the semantic
//! [`TypeSafeSafetyRules`] used internally. The semantic form is lowered to
//! the external tool's rule-expression list by [`crate::transform_rules`].

use serde::{Deserialize, Serialize};

use crate::{
    ColumnExplicitness, DestructiveOperationPolicy, LimitClauseRequirement, SelectStarPolicy,
    WhereClauseRequirement,
};

/// A named predicate/message triple emitted into the config document's
/// `rules` list.
///
/// The `rule` field is an opaque predicate in the external tool's DSL; it
/// is carried verbatim and never parsed or evaluated here.
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_core::CustomRule;
///
/// let rule = CustomRule::new(
///     "no-select-star",
///     "!query.contains('SELECT *')",
///     "SELECT * is not allowed",
/// );
/// assert_eq!(rule.name, "no-select-star");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    /// Rule identifier, unique within a rule list by convention.
    pub name: String,
    /// Opaque predicate expression in the external tool's DSL.
    pub rule: String,
    /// Human-readable message shown when the rule fires.
    pub message: String,
}

impl CustomRule {
    /// Creates a rule triple.
    pub fn new(
        name: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Flat-boolean safety rules in the legacy wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LegacySafetyRules {
    /// Reject `SELECT *`.
    #[serde(default)]
    pub no_select_star: bool,
    /// Require a WHERE clause on filterable statements.
    #[serde(default)]
    pub require_where: bool,
    /// Reject `DROP TABLE`.
    #[serde(default)]
    pub no_drop_table: bool,
    /// Reject `TRUNCATE`.
    #[serde(default)]
    pub no_truncate: bool,
    /// Require a LIMIT clause on SELECT statements.
    #[serde(default)]
    pub require_limit: bool,
    /// User-supplied rules, passed through verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<CustomRule>,
}

/// Query style policies: what well-formed queries look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StyleRules {
    /// `SELECT *` policy.
    pub select_star_policy: SelectStarPolicy,
    /// Column naming explicitness.
    pub column_explicitness: ColumnExplicitness,
}

/// Query safety checks: guards against accidental full-table operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyChecks {
    /// When a WHERE clause is mandatory.
    pub where_requirement: WhereClauseRequirement,
    /// When a LIMIT clause is mandatory.
    pub limit_requirement: LimitClauseRequirement,
    /// Largest LIMIT value accepted when limits are enforced. Zero disables
    /// the cap.
    pub max_rows_without_limit: u32,
}

impl Default for SafetyChecks {
    fn default() -> Self {
        Self {
            where_requirement: WhereClauseRequirement::default(),
            limit_requirement: LimitClauseRequirement::default(),
            max_rows_without_limit: 1000,
        }
    }
}

/// Semantic safety-rule record.
///
/// Grouped by intent: style rules, safety checks, the destructive-operation
/// policy, and user-supplied custom rules. The destructive policy governs
/// `DROP TABLE` and `TRUNCATE` together; the legacy projection can never
/// allow one while forbidding the other when produced from this type.
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_core::TypeSafeSafetyRules;
///
/// let rules = TypeSafeSafetyRules::production();
/// let lowered = rules.to_rules();
/// let names: Vec<&str> = lowered.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["no-select-star", "require-where", "no-drop-table", "no-truncate"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TypeSafeSafetyRules {
    /// Query style policies.
    pub style_rules: StyleRules,
    /// Full-table-operation guards.
    pub safety_rules: SafetyChecks,
    /// Destructive statement policy.
    pub destructive_ops: DestructiveOperationPolicy,
    /// User-supplied rules, appended after the generated ones.
    pub custom_rules: Vec<CustomRule>,
}

impl TypeSafeSafetyRules {
    /// Production tier: no `SELECT *`, WHERE on destructive statements,
    /// no LIMIT requirement, destructive statements forbidden.
    pub fn production() -> Self {
        Self {
            style_rules: StyleRules {
                select_star_policy: SelectStarPolicy::Forbidden,
                column_explicitness: ColumnExplicitness::Default,
            },
            safety_rules: SafetyChecks {
                where_requirement: WhereClauseRequirement::Destructive,
                limit_requirement: LimitClauseRequirement::Never,
                max_rows_without_limit: 1000,
            },
            destructive_ops: DestructiveOperationPolicy::Forbidden,
            custom_rules: Vec::new(),
        }
    }

    /// Development tier: everything permissive.
    pub fn development() -> Self {
        Self {
            style_rules: StyleRules {
                select_star_policy: SelectStarPolicy::Allowed,
                column_explicitness: ColumnExplicitness::Default,
            },
            safety_rules: SafetyChecks {
                where_requirement: WhereClauseRequirement::Never,
                limit_requirement: LimitClauseRequirement::Never,
                max_rows_without_limit: 0,
            },
            destructive_ops: DestructiveOperationPolicy::Allowed,
            custom_rules: Vec::new(),
        }
    }

    /// Strict tier: explicit columns, WHERE and LIMIT always required,
    /// a 100-row cap, destructive statements forbidden.
    pub fn strict() -> Self {
        Self {
            style_rules: StyleRules {
                select_star_policy: SelectStarPolicy::Explicit,
                column_explicitness: ColumnExplicitness::Required,
            },
            safety_rules: SafetyChecks {
                where_requirement: WhereClauseRequirement::Always,
                limit_requirement: LimitClauseRequirement::Always,
                max_rows_without_limit: 100,
            },
            destructive_ops: DestructiveOperationPolicy::Forbidden,
            custom_rules: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_tier() {
        let rules = TypeSafeSafetyRules::production();
        assert_eq!(
            rules.style_rules.select_star_policy,
            SelectStarPolicy::Forbidden
        );
        assert_eq!(
            rules.safety_rules.where_requirement,
            WhereClauseRequirement::Destructive
        );
        assert_eq!(
            rules.safety_rules.limit_requirement,
            LimitClauseRequirement::Never
        );
        assert_eq!(rules.safety_rules.max_rows_without_limit, 1000);
        assert_eq!(rules.destructive_ops, DestructiveOperationPolicy::Forbidden);
    }

    #[test]
    fn test_development_tier_is_permissive() {
        let rules = TypeSafeSafetyRules::development();
        assert_eq!(
            rules.style_rules.select_star_policy,
            SelectStarPolicy::Allowed
        );
        assert_eq!(
            rules.safety_rules.where_requirement,
            WhereClauseRequirement::Never
        );
        assert_eq!(rules.destructive_ops, DestructiveOperationPolicy::Allowed);
    }

    #[test]
    fn test_strict_tier() {
        let rules = TypeSafeSafetyRules::strict();
        assert_eq!(
            rules.style_rules.select_star_policy,
            SelectStarPolicy::Explicit
        );
        assert_eq!(
            rules.style_rules.column_explicitness,
            ColumnExplicitness::Required
        );
        assert_eq!(
            rules.safety_rules.where_requirement,
            WhereClauseRequirement::Always
        );
        assert_eq!(
            rules.safety_rules.limit_requirement,
            LimitClauseRequirement::Always
        );
        assert_eq!(rules.safety_rules.max_rows_without_limit, 100);
    }
}
