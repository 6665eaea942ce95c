//! Document inventory: what the set contains.

use correctionlib_schema::{Content, CorrectionSet, Value};

use crate::report::{AuditReport, TestResult};

const VALIDATOR: &str = "inventory";

/// Node counts of a set, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Corrections in the set.
    pub corrections: usize,
    /// `binning` nodes.
    pub binnings: usize,
    /// `multibinning` nodes.
    pub multibinnings: usize,
    /// `category` nodes.
    pub categories: usize,
    /// Formula leaves.
    pub formulas: usize,
    /// Constant leaves.
    pub constants: usize,
}

impl Inventory {
    /// Counts every node of every correction in `set`.
    pub fn of(set: &CorrectionSet) -> Self {
        let mut inventory = Self {
            corrections: set.corrections().len(),
            ..Self::default()
        };
        for correction in set.corrections() {
            correction.data().for_each_node(&mut |node| match node {
                Content::Binning(_) => inventory.binnings += 1,
                Content::MultiBinning(_) => inventory.multibinnings += 1,
                Content::Category(_) => inventory.categories += 1,
                Content::Value(Value::Formula(_)) => inventory.formulas += 1,
                Content::Value(Value::Number(_)) => inventory.constants += 1,
            });
        }
        inventory
    }
}

/// Reports the inventory; an empty set is a warning.
pub fn validate(set: &CorrectionSet) -> AuditReport {
    let inventory = Inventory::of(set);
    let mut report = AuditReport::new();
    if inventory.corrections == 0 {
        report.push(TestResult::warn(VALIDATOR, "the set holds no corrections"));
        return report;
    }
    report.push(TestResult::pass(
        VALIDATOR,
        format!(
            "{} correction(s): {} binning, {} multibinning, {} category, {} formula, {} constant node(s)",
            inventory.corrections,
            inventory.binnings,
            inventory.multibinnings,
            inventory.categories,
            inventory.formulas,
            inventory.constants
        ),
    ));
    report
}
