//! Bidirectional conversion between the legacy flat-boolean records and the
//! semantic type-safe records.
//!
//! The legacy shape is strictly less expressive, so three conversions are
//! lossy by design:
//!
//! 1. `pointers` and `explicit_null` null handling collapse to the same
//!    legacy tuple; round-tripping either through legacy yields
//!    `explicit_null` (unless struct pointers are in play, which the legacy
//!    shape reads back as `pointers`).
//! 2. `required` and `named` column explicitness cannot be expressed in the
//!    legacy shape and collapse to `default`.
//! 3. `max_rows_without_limit` is not representable in the legacy shape;
//!    the production default of 1000 is restored on round-trip.
//!
//! Conversions are pure single-pass functions over values. Within the
//! legacy shapes that satisfy the documented pre-conditions (consistent
//! drop/truncate flags, no simultaneous empty-slices and struct pointers),
//! `to_legacy` after `from_legacy` is the identity.

use crate::{
    ColumnExplicitness, DestructiveOperationPolicy, EnumGenerationMode, GenerationFeatures,
    JsonTagStyle, LegacyOptions, LegacySafetyRules, LimitClauseRequirement, NullHandlingMode,
    SafetyChecks, SelectStarPolicy, StructPointerMode, StyleRules, TypeSafeOptions,
    TypeSafeSafetyRules, WhereClauseRequirement,
};

impl TypeSafeOptions {
    /// Builds the semantic record from a legacy wire record.
    ///
    /// Unrecognized `json_tags_case_style` values (including the legacy
    /// `none`) fall back to `camel`. `use_exact_table_names` has no legacy
    /// counterpart and is always false here.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlc_scaffold_core::*;
    ///
    /// let legacy = LegacyOptions {
    ///     emit_empty_slices: true,
    ///     emit_enum_valid_method: true,
    ///     emit_all_enum_values: false,
    ///     ..LegacyOptions::default()
    /// };
    /// let opts = TypeSafeOptions::from_legacy(&legacy);
    /// assert_eq!(opts.null_handling, NullHandlingMode::EmptySlices);
    /// assert_eq!(opts.enum_mode, EnumGenerationMode::WithValidation);
    /// ```
    pub fn from_legacy(legacy: &LegacyOptions) -> Self {
        let any_struct_pointers =
            legacy.emit_result_struct_pointers || legacy.emit_params_struct_pointers;

        let null_handling = if legacy.emit_empty_slices {
            NullHandlingMode::EmptySlices
        } else if any_struct_pointers {
            NullHandlingMode::Pointers
        } else {
            NullHandlingMode::ExplicitNull
        };

        let enum_mode = if legacy.emit_enum_valid_method && legacy.emit_all_enum_values {
            EnumGenerationMode::Complete
        } else if legacy.emit_enum_valid_method {
            EnumGenerationMode::WithValidation
        } else {
            EnumGenerationMode::Basic
        };

        let struct_pointers = match (
            legacy.emit_result_struct_pointers,
            legacy.emit_params_struct_pointers,
        ) {
            (true, true) => StructPointerMode::Always,
            (true, false) => StructPointerMode::Results,
            (false, true) => StructPointerMode::Params,
            (false, false) => StructPointerMode::Never,
        };

        Self {
            null_handling,
            enum_mode,
            struct_pointers,
            tag_style: JsonTagStyle::parse(&legacy.json_tags_case_style)
                .unwrap_or(JsonTagStyle::Camel),
            features: GenerationFeatures {
                generate_json_tags: legacy.emit_json_tags,
                generate_prepared_queries: legacy.emit_prepared_queries,
                generate_interface: legacy.emit_interface,
                use_exact_table_names: false,
            },
        }
    }

    /// Projects the semantic record onto the legacy wire shape.
    ///
    /// File names and the flags with no semantic counterpart take their
    /// wire defaults, so the result always passes
    /// [`LegacyOptions` validation](crate::validate_legacy_options).
    pub fn to_legacy(&self) -> LegacyOptions {
        LegacyOptions {
            emit_json_tags: self.features.generate_json_tags,
            emit_prepared_queries: self.features.generate_prepared_queries,
            emit_interface: self.features.generate_interface,
            emit_empty_slices: self.null_handling == NullHandlingMode::EmptySlices,
            emit_result_struct_pointers: self.struct_pointers.results_are_pointers(),
            emit_params_struct_pointers: self.struct_pointers.params_are_pointers(),
            emit_enum_valid_method: self.enum_mode.includes_validation(),
            emit_all_enum_values: self.enum_mode.includes_all_values(),
            json_tags_case_style: self.tag_style.as_str().to_string(),
            ..LegacyOptions::default()
        }
    }
}

impl TypeSafeSafetyRules {
    /// Builds the semantic safety record from a legacy wire record.
    ///
    /// The legacy shape cannot express `required`/`named` column policies
    /// or a row cap; those take their defaults. A mixed drop/truncate state
    /// (one forbidden, one allowed) defaults to the safe side: forbidden.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlc_scaffold_core::*;
    ///
    /// let legacy = LegacySafetyRules {
    ///     no_select_star: true,
    ///     no_drop_table: true,
    ///     no_truncate: false, // mixed state
    ///     ..LegacySafetyRules::default()
    /// };
    /// let rules = TypeSafeSafetyRules::from_legacy(&legacy);
    /// assert_eq!(rules.destructive_ops, DestructiveOperationPolicy::Forbidden);
    /// ```
    pub fn from_legacy(legacy: &LegacySafetyRules) -> Self {
        let destructive_ops = match (legacy.no_drop_table, legacy.no_truncate) {
            (false, false) => DestructiveOperationPolicy::Allowed,
            // Mixed states default to the safe side.
            _ => DestructiveOperationPolicy::Forbidden,
        };

        Self {
            style_rules: StyleRules {
                select_star_policy: if legacy.no_select_star {
                    SelectStarPolicy::Forbidden
                } else {
                    SelectStarPolicy::Allowed
                },
                column_explicitness: ColumnExplicitness::Default,
            },
            safety_rules: SafetyChecks {
                where_requirement: if legacy.require_where {
                    WhereClauseRequirement::Always
                } else {
                    WhereClauseRequirement::Never
                },
                limit_requirement: if legacy.require_limit {
                    LimitClauseRequirement::Always
                } else {
                    LimitClauseRequirement::Never
                },
                max_rows_without_limit: 1000,
            },
            destructive_ops,
            custom_rules: legacy.rules.clone(),
        }
    }

    /// Projects the semantic safety record onto the legacy wire shape.
    ///
    /// `no_drop_table` and `no_truncate` are both derived from the single
    /// destructive policy, so they are always equal in the output.
    pub fn to_legacy(&self) -> LegacySafetyRules {
        LegacySafetyRules {
            no_select_star: self.style_rules.select_star_policy.forbids_select_star(),
            require_where: self.safety_rules.where_requirement.requires_on_destructive(),
            require_limit: self.safety_rules.limit_requirement.requires_on_select(),
            no_drop_table: !self.destructive_ops.allows_drop_table(),
            no_truncate: !self.destructive_ops.allows_truncate(),
            rules: self.custom_rules.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CustomRule;

    fn legacy_options(f: impl FnOnce(&mut LegacyOptions)) -> LegacyOptions {
        let mut legacy = LegacyOptions {
            emit_json_tags: false,
            emit_prepared_queries: false,
            emit_interface: false,
            emit_enum_valid_method: false,
            emit_all_enum_values: false,
            ..LegacyOptions::default()
        };
        f(&mut legacy);
        legacy
    }

    #[test]
    fn test_null_handling_from_legacy_precedence() {
        let empty = legacy_options(|l| l.emit_empty_slices = true);
        assert_eq!(
            TypeSafeOptions::from_legacy(&empty).null_handling,
            NullHandlingMode::EmptySlices
        );

        let pointers = legacy_options(|l| l.emit_result_struct_pointers = true);
        assert_eq!(
            TypeSafeOptions::from_legacy(&pointers).null_handling,
            NullHandlingMode::Pointers
        );

        let neither = legacy_options(|_| {});
        assert_eq!(
            TypeSafeOptions::from_legacy(&neither).null_handling,
            NullHandlingMode::ExplicitNull
        );
    }

    #[test]
    fn test_enum_mode_from_legacy() {
        let complete = legacy_options(|l| {
            l.emit_enum_valid_method = true;
            l.emit_all_enum_values = true;
        });
        assert_eq!(
            TypeSafeOptions::from_legacy(&complete).enum_mode,
            EnumGenerationMode::Complete
        );

        let with_validation = legacy_options(|l| l.emit_enum_valid_method = true);
        assert_eq!(
            TypeSafeOptions::from_legacy(&with_validation).enum_mode,
            EnumGenerationMode::WithValidation
        );

        assert_eq!(
            TypeSafeOptions::from_legacy(&legacy_options(|_| {})).enum_mode,
            EnumGenerationMode::Basic
        );
    }

    #[test]
    fn test_struct_pointers_from_legacy() {
        let both = legacy_options(|l| {
            l.emit_result_struct_pointers = true;
            l.emit_params_struct_pointers = true;
        });
        assert_eq!(
            TypeSafeOptions::from_legacy(&both).struct_pointers,
            StructPointerMode::Always
        );

        let results = legacy_options(|l| l.emit_result_struct_pointers = true);
        assert_eq!(
            TypeSafeOptions::from_legacy(&results).struct_pointers,
            StructPointerMode::Results
        );

        let params = legacy_options(|l| l.emit_params_struct_pointers = true);
        assert_eq!(
            TypeSafeOptions::from_legacy(&params).struct_pointers,
            StructPointerMode::Params
        );
    }

    #[test]
    fn test_unrecognized_case_style_falls_back_to_camel() {
        let legacy = legacy_options(|l| l.json_tags_case_style = "none".to_string());
        assert_eq!(
            TypeSafeOptions::from_legacy(&legacy).tag_style,
            JsonTagStyle::Camel
        );
    }

    #[test]
    fn test_options_legacy_fixed_point() {
        // Defaults in the wire shape survive a full round-trip.
        let legacy = LegacyOptions::default();
        let roundtripped = TypeSafeOptions::from_legacy(&legacy).to_legacy();
        assert_eq!(roundtripped, legacy);

        let featureful = LegacyOptions {
            emit_empty_slices: true,
            emit_enum_valid_method: true,
            emit_all_enum_values: false,
            json_tags_case_style: "snake".to_string(),
            ..LegacyOptions::default()
        };
        let roundtripped = TypeSafeOptions::from_legacy(&featureful).to_legacy();
        assert_eq!(roundtripped, featureful);
    }

    #[test]
    fn test_pointers_collapse_to_explicit_null() {
        // Documented lossy point: with no struct pointers in play, both
        // pointer and explicit-null handling read back as explicit_null.
        for mode in [NullHandlingMode::Pointers, NullHandlingMode::ExplicitNull] {
            let opts = TypeSafeOptions {
                null_handling: mode,
                struct_pointers: StructPointerMode::Never,
                ..TypeSafeOptions::production()
            };
            let roundtripped = TypeSafeOptions::from_legacy(&opts.to_legacy());
            assert_eq!(roundtripped.null_handling, NullHandlingMode::ExplicitNull);
        }
    }

    #[test]
    fn test_typesafe_roundtrip_is_idempotent() {
        let starts = [
            TypeSafeOptions::production(),
            TypeSafeOptions {
                null_handling: NullHandlingMode::Mixed,
                struct_pointers: StructPointerMode::Params,
                tag_style: JsonTagStyle::Kebab,
                ..TypeSafeOptions::production()
            },
            TypeSafeOptions {
                null_handling: NullHandlingMode::EmptySlices,
                enum_mode: EnumGenerationMode::Basic,
                ..TypeSafeOptions::production()
            },
        ];
        for start in starts {
            let once = TypeSafeOptions::from_legacy(&start.to_legacy());
            let twice = TypeSafeOptions::from_legacy(&once.to_legacy());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_safety_rules_strict_roundtrip_is_identity() {
        let legacy = LegacySafetyRules {
            no_select_star: true,
            require_where: true,
            no_drop_table: true,
            no_truncate: true,
            require_limit: false,
            rules: vec![CustomRule::new("r1", "expr", "msg")],
        };
        let roundtripped = TypeSafeSafetyRules::from_legacy(&legacy).to_legacy();
        assert_eq!(roundtripped, legacy);
    }

    #[test]
    fn test_safety_rules_legacy_fixed_point_with_consistent_flags() {
        // Every combination with no_drop_table == no_truncate is a fixed
        // point of the round-trip.
        for no_select_star in [false, true] {
            for require_where in [false, true] {
                for require_limit in [false, true] {
                    for destructive in [false, true] {
                        let legacy = LegacySafetyRules {
                            no_select_star,
                            require_where,
                            require_limit,
                            no_drop_table: destructive,
                            no_truncate: destructive,
                            rules: Vec::new(),
                        };
                        let roundtripped =
                            TypeSafeSafetyRules::from_legacy(&legacy).to_legacy();
                        assert_eq!(roundtripped, legacy);
                    }
                }
            }
        }
    }

    #[test]
    fn test_destructive_flags_always_consistent_from_typesafe() {
        for policy in [
            DestructiveOperationPolicy::Allowed,
            DestructiveOperationPolicy::WithConfirmation,
            DestructiveOperationPolicy::Forbidden,
        ] {
            let rules = TypeSafeSafetyRules {
                destructive_ops: policy,
                ..TypeSafeSafetyRules::development()
            };
            let legacy = rules.to_legacy();
            assert_eq!(legacy.no_drop_table, legacy.no_truncate);
        }
    }

    #[test]
    fn test_mixed_destructive_state_defaults_to_forbidden() {
        let legacy = LegacySafetyRules {
            no_drop_table: true,
            no_truncate: false,
            ..LegacySafetyRules::default()
        };
        assert_eq!(
            TypeSafeSafetyRules::from_legacy(&legacy).destructive_ops,
            DestructiveOperationPolicy::Forbidden
        );
    }

    #[test]
    fn test_column_explicitness_collapses_to_default() {
        for explicitness in [ColumnExplicitness::Required, ColumnExplicitness::Named] {
            let mut rules = TypeSafeSafetyRules::strict();
            rules.style_rules.column_explicitness = explicitness;
            let roundtripped = TypeSafeSafetyRules::from_legacy(&rules.to_legacy());
            assert_eq!(
                roundtripped.style_rules.column_explicitness,
                ColumnExplicitness::Default
            );
        }
    }

    #[test]
    fn test_max_rows_restored_to_default_on_roundtrip() {
        let mut rules = TypeSafeSafetyRules::strict();
        rules.safety_rules.max_rows_without_limit = 42;
        let roundtripped = TypeSafeSafetyRules::from_legacy(&rules.to_legacy());
        assert_eq!(roundtripped.safety_rules.max_rows_without_limit, 1000);
    }

    #[test]
    fn test_legacy_of_valid_typesafe_passes_validation() {
        let starts = [
            TypeSafeOptions::production(),
            TypeSafeOptions {
                struct_pointers: StructPointerMode::Always,
                tag_style: JsonTagStyle::Pascal,
                ..TypeSafeOptions::production()
            },
        ];
        for opts in starts {
            assert!(crate::validate_legacy_options(&opts.to_legacy()).is_ok());
        }
    }
}
