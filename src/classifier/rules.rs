//! Ordered classification rules.
//!
//! Classification is a first-match-wins scan over a fixed rule table.
//! Precedence is part of the contract: a record that errored on mainnet
//! is Unaffected no matter what the experimental runs did, exact
//! step-count matches beat the lenient step-count bounds, and the
//! lenient rules only exist to absorb false positives where the
//! repriced run took extra steps.

use crate::loader::schema::{TxRecord, Variant};

/// Compatibility category assigned to every transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Behaves the same under the repricing (or was already failing)
    Unaffected,
    /// Incompatible with yolo but recovered by the yolo2x variant
    Salvageable,
    /// Incompatible with both experimental variants
    Broken,
}

/// Outcome of classifying one record
#[derive(Debug, Clone, Copy)]
pub struct Verdict {
    pub category: Category,

    /// Variant whose gas joins the repriced total. `None` means the
    /// record takes part in no gas or max-delta bookkeeping.
    pub billed: Option<Variant>,

    /// The baseline execution itself failed
    pub main_error: bool,

    /// Name of the rule that matched
    pub rule: &'static str,
}

/// One entry in the ordered rule table
struct Rule {
    name: &'static str,
    /// Skipped entirely unless the lenient flag is set
    lenient_only: bool,
    matches: fn(&TxRecord) -> bool,
    category: Category,
    billed: Option<Variant>,
    main_error: bool,
}

fn baseline_errored(tx: &TxRecord) -> bool {
    tx.main().errored
}

fn yolo_exact(tx: &TxRecord) -> bool {
    let yolo = tx.yolo();
    !yolo.errored && tx.main().step_count == yolo.step_count
}

fn yolo2x_exact(tx: &TxRecord) -> bool {
    let yolo2x = tx.yolo2x();
    !yolo2x.errored && tx.main().step_count == yolo2x.step_count
}

fn yolo_within(tx: &TxRecord) -> bool {
    let yolo = tx.yolo();
    !yolo.errored && tx.main().step_count <= yolo.step_count
}

fn yolo2x_within(tx: &TxRecord) -> bool {
    let yolo2x = tx.yolo2x();
    !yolo2x.errored && tx.main().step_count <= yolo2x.step_count
}

/// The rule table, in precedence order
const RULES: [Rule; 5] = [
    Rule {
        name: "baseline-error",
        lenient_only: false,
        matches: baseline_errored,
        category: Category::Unaffected,
        billed: None,
        main_error: true,
    },
    Rule {
        name: "yolo-exact",
        lenient_only: false,
        matches: yolo_exact,
        category: Category::Unaffected,
        billed: Some(Variant::Yolo),
        main_error: false,
    },
    Rule {
        name: "yolo2x-exact",
        lenient_only: false,
        matches: yolo2x_exact,
        category: Category::Salvageable,
        billed: Some(Variant::Yolo2x),
        main_error: false,
    },
    Rule {
        name: "yolo-within",
        lenient_only: true,
        matches: yolo_within,
        category: Category::Unaffected,
        billed: Some(Variant::Yolo),
        main_error: false,
    },
    Rule {
        name: "yolo2x-within",
        lenient_only: true,
        matches: yolo2x_within,
        category: Category::Salvageable,
        billed: Some(Variant::Yolo2x),
        main_error: false,
    },
];

/// Classify one record against the rule table
///
/// **Public** - pure and total: every record maps to exactly one verdict,
/// and no input can fail. With `lenient` unset the two `*-within` rules
/// are skipped, so records that only pass a step-count bound fall
/// through to Broken.
pub fn classify(tx: &TxRecord, lenient: bool) -> Verdict {
    for rule in &RULES {
        if rule.lenient_only && !lenient {
            continue;
        }
        if (rule.matches)(tx) {
            return Verdict {
                category: rule.category,
                billed: rule.billed,
                main_error: rule.main_error,
                rule: rule.name,
            };
        }
    }

    Verdict {
        category: Category::Broken,
        billed: None,
        main_error: false,
        rule: "broken",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TxRecord {
        TxRecord {
            tx_hash: "0xtest".to_string(),
            main_gas_used: 100,
            main_steps: 10,
            yolo_gas_used: 90,
            yolo_steps: 10,
            yolo2x_gas_used: 95,
            yolo2x_steps: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_baseline_error_beats_everything() {
        let mut tx = record();
        tx.main_error = true;

        let verdict = classify(&tx, true);
        assert_eq!(verdict.category, Category::Unaffected);
        assert!(verdict.main_error);
        assert!(verdict.billed.is_none());
        assert_eq!(verdict.rule, "baseline-error");
    }

    #[test]
    fn test_yolo_exact_match() {
        let verdict = classify(&record(), false);
        assert_eq!(verdict.category, Category::Unaffected);
        assert_eq!(verdict.billed, Some(Variant::Yolo));
        assert_eq!(verdict.rule, "yolo-exact");
    }

    #[test]
    fn test_yolo_error_falls_through_to_yolo2x() {
        let mut tx = record();
        tx.yolo_error = true;

        let verdict = classify(&tx, false);
        assert_eq!(verdict.category, Category::Salvageable);
        assert_eq!(verdict.billed, Some(Variant::Yolo2x));
        assert_eq!(verdict.rule, "yolo2x-exact");
    }

    #[test]
    fn test_step_mismatch_falls_through_to_yolo2x() {
        let mut tx = record();
        tx.yolo_steps = 12;
        tx.yolo2x_steps = 10;

        // Not lenient, so the yolo <= bound cannot fire first
        let verdict = classify(&tx, false);
        assert_eq!(verdict.rule, "yolo2x-exact");
    }

    #[test]
    fn test_lenient_yolo_bound() {
        let mut tx = record();
        tx.yolo_steps = 12;
        tx.yolo2x_steps = 13;

        let verdict = classify(&tx, true);
        assert_eq!(verdict.category, Category::Unaffected);
        assert_eq!(verdict.billed, Some(Variant::Yolo));
        assert_eq!(verdict.rule, "yolo-within");
    }

    #[test]
    fn test_lenient_yolo2x_bound() {
        let mut tx = record();
        tx.yolo_error = true;
        tx.yolo2x_steps = 13;

        let verdict = classify(&tx, true);
        assert_eq!(verdict.category, Category::Salvageable);
        assert_eq!(verdict.billed, Some(Variant::Yolo2x));
        assert_eq!(verdict.rule, "yolo2x-within");
    }

    #[test]
    fn test_strict_mode_skips_lenient_rules() {
        let mut tx = record();
        tx.yolo_steps = 12;
        tx.yolo2x_steps = 13;

        let verdict = classify(&tx, false);
        assert_eq!(verdict.category, Category::Broken);
        assert!(verdict.billed.is_none());
    }

    #[test]
    fn test_both_variants_errored_is_broken() {
        let mut tx = record();
        tx.yolo_error = true;
        tx.yolo2x_error = true;

        let verdict = classify(&tx, true);
        assert_eq!(verdict.category, Category::Broken);
        assert_eq!(verdict.rule, "broken");
    }

    #[test]
    fn test_fewer_steps_in_both_variants_is_broken() {
        let mut tx = record();
        tx.yolo_steps = 8;
        tx.yolo2x_steps = 9;

        let verdict = classify(&tx, true);
        assert_eq!(verdict.category, Category::Broken);
    }
}
