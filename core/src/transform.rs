//! Lowering of safety policies into the external tool's rule list.
//!
//! [`transform_rules`] turns a [`TypeSafeSafetyRules`] value into an ordered
//! list of [`CustomRule`] triples ready to embed in the config document.
//! The output ordering is part of the contract:
//!
//! 1. Style rules: select-star, column explicitness.
//! 2. Safety rules: require-where, require-limit, the row cap.
//! 3. Destructive-operation rules (a forbid pair or a confirmation pair).
//! 4. User-supplied custom rules, in input order.
//!
//! The transformer is a pure function with no state; equal inputs produce
//! equal outputs. Rule expressions are opaque strings in the external
//! tool's predicate DSL and are never evaluated here.

use crate::{CustomRule, DestructiveOperationPolicy, TypeSafeSafetyRules};

/// Lowers a safety policy into the ordered rule list.
///
/// `None` yields an empty list. See the module docs for the ordering
/// contract.
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_core::{transform_rules, TypeSafeSafetyRules};
///
/// assert!(transform_rules(None).is_empty());
///
/// let rules = transform_rules(Some(&TypeSafeSafetyRules::development()));
/// assert!(rules.is_empty());
///
/// let rules = transform_rules(Some(&TypeSafeSafetyRules::production()));
/// assert_eq!(rules[0].name, "no-select-star");
/// ```
pub fn transform_rules(rules: Option<&TypeSafeSafetyRules>) -> Vec<CustomRule> {
    let Some(rules) = rules else {
        return Vec::new();
    };
    rules.to_rules()
}

impl TypeSafeSafetyRules {
    /// Lowers this policy into the ordered rule list.
    pub fn to_rules(&self) -> Vec<CustomRule> {
        let mut out = Vec::new();

        // Style rules first.
        if self.style_rules.select_star_policy.forbids_select_star() {
            out.push(CustomRule::new(
                "no-select-star",
                "!query.contains('SELECT *')",
                "SELECT * is not allowed — use explicit column names",
            ));
        }
        if self.style_rules.column_explicitness.requires_explicit_columns() {
            out.push(CustomRule::new(
                "require-explicit-columns",
                "query.type == 'SELECT' && query.hasExplicitColumns()",
                "All columns must be explicitly named",
            ));
        }

        // Safety rules second.
        if self.safety_rules.where_requirement.requires_on_destructive() {
            out.push(CustomRule::new(
                "require-where",
                "query.type in ('SELECT','UPDATE','DELETE') && query.hasWhereClause()",
                "WHERE clause is required for SELECT/UPDATE/DELETE to prevent accidental \
                 full-table operations",
            ));
        }
        if self.safety_rules.limit_requirement.requires_on_select() {
            out.push(CustomRule::new(
                "require-limit",
                "query.type == 'SELECT' && !query.hasLimitClause()",
                "LIMIT clause is required for SELECT queries",
            ));
            // The row cap only means something when limits are enforced.
            let max_rows = self.safety_rules.max_rows_without_limit;
            if max_rows > 0 {
                out.push(CustomRule::new(
                    "max-rows-without-limit",
                    format!(
                        "query.type == 'SELECT' && (!query.hasLimitClause() || \
                         query.limitValue() > {max_rows})"
                    ),
                    format!(
                        "SELECT queries without LIMIT or with LIMIT > {max_rows} are not allowed"
                    ),
                ));
            }
        }

        // Destructive-operation rules third.
        match self.destructive_ops {
            DestructiveOperationPolicy::Forbidden => {
                out.push(CustomRule::new(
                    "no-drop-table",
                    "!query.contains('DROP TABLE')",
                    "DROP TABLE is forbidden by safety policy",
                ));
                out.push(CustomRule::new(
                    "no-truncate",
                    "!query.contains('TRUNCATE')",
                    "TRUNCATE is forbidden by safety policy",
                ));
            }
            DestructiveOperationPolicy::WithConfirmation => {
                out.push(CustomRule::new(
                    "drop-table-requires-confirmation",
                    "query.contains('DROP TABLE') && query.hasComment('CONFIRMED')",
                    "DROP TABLE requires explicit confirmation (add comment: -- CONFIRMED)",
                ));
                out.push(CustomRule::new(
                    "truncate-requires-confirmation",
                    "query.contains('TRUNCATE') && query.hasComment('CONFIRMED')",
                    "TRUNCATE requires explicit confirmation (add comment: -- CONFIRMED)",
                ));
            }
            DestructiveOperationPolicy::Allowed => {}
        }

        // Custom rules last, in input order.
        out.extend(self.custom_rules.iter().cloned());

        out
    }
}
