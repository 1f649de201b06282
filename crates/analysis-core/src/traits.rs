use std::collections::{BTreeMap, HashMap};

use crate::types::StatementPeriod;

/// Read access to the line items of a single statement period.
///
/// `None` covers both an absent label and a label listed without a value.
pub trait LineItems {
    fn line_item(&self, label: &str) -> Option<f64>;
}

impl LineItems for StatementPeriod {
    fn line_item(&self, label: &str) -> Option<f64> {
        self.items.line_item(label)
    }
}

impl LineItems for BTreeMap<String, Option<f64>> {
    fn line_item(&self, label: &str) -> Option<f64> {
        self.get(label).copied().flatten()
    }
}

impl LineItems for BTreeMap<String, f64> {
    fn line_item(&self, label: &str) -> Option<f64> {
        self.get(label).copied()
    }
}

impl LineItems for HashMap<String, f64> {
    fn line_item(&self, label: &str) -> Option<f64> {
        self.get(label).copied()
    }
}

impl<T: LineItems + ?Sized> LineItems for &T {
    fn line_item(&self, label: &str) -> Option<f64> {
        (**self).line_item(label)
    }
}
