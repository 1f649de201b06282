//! Canonical statement fields and the vendor labels they may appear under.
//!
//! Data vendors name the same line item differently ("Total Revenue",
//! "Revenues", "Net Sales", ...). Each canonical field carries an ordered list
//! of candidate labels; the first one with a usable value wins.

use analysis_core::{AnalysisError, LineItems, Reading, StatementKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CanonicalField {
    OperatingCashFlow,
    NetIncome,
    Revenue,
    Receivables,
    CostOfGoodsSold,
    Inventory,
    Ebit,
    InterestExpense,
    CapitalExpenditure,
    ShareRepurchase,
    ShareIssuance,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 11] = [
        CanonicalField::OperatingCashFlow,
        CanonicalField::NetIncome,
        CanonicalField::Revenue,
        CanonicalField::Receivables,
        CanonicalField::CostOfGoodsSold,
        CanonicalField::Inventory,
        CanonicalField::Ebit,
        CanonicalField::InterestExpense,
        CanonicalField::CapitalExpenditure,
        CanonicalField::ShareRepurchase,
        CanonicalField::ShareIssuance,
    ];

    /// Candidate labels in lookup order.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::OperatingCashFlow => &[
                "Operating Cash Flow",
                "Total Cash From Operating Activities",
                "OperatingCashFlow",
                "Cash from Operating Activities",
            ],
            CanonicalField::NetIncome => &[
                "Net Income",
                "NetIncome",
                "Net Income Common Stockholders",
            ],
            CanonicalField::Revenue => &["Total Revenue", "Revenue", "Revenues", "Net Sales"],
            CanonicalField::Receivables => &[
                "Receivables",
                "Accounts Receivable",
                "Net Receivables",
                "AccountsReceivable",
            ],
            CanonicalField::CostOfGoodsSold => &[
                "Cost Of Goods Sold",
                "Cost of Revenue",
                "COGS",
                "CostOfGoodsSold",
                "Cost of Goods Sold",
            ],
            CanonicalField::Inventory => &["Inventory", "Inventories", "Total Inventory"],
            CanonicalField::Ebit => &[
                "EBIT",
                "Earnings Before Interest And Taxes",
                "Operating Income",
                "Income Before Tax",
            ],
            CanonicalField::InterestExpense => &[
                "Interest Expense",
                "InterestExpense",
                "Total Interest Expense",
                "Interest And Debt Expense",
            ],
            CanonicalField::CapitalExpenditure => &[
                "Capital Expenditure",
                "CapitalExpenditure",
                "Capital Expenditures",
                "Purchase Of Property Plant And Equipment",
            ],
            CanonicalField::ShareRepurchase => &[
                "Purchase Of Common Stock",
                "Common Stock Repurchased",
                "Repurchase Of Common Stock",
                "Stock Repurchase",
            ],
            CanonicalField::ShareIssuance => &[
                "Sale Of Common Stock",
                "Common Stock Issued",
                "Issuance Of Common Stock",
            ],
        }
    }

    /// Statement the field is reported on.
    pub fn statement(&self) -> StatementKind {
        match self {
            CanonicalField::NetIncome
            | CanonicalField::Revenue
            | CanonicalField::CostOfGoodsSold
            | CanonicalField::Ebit
            | CanonicalField::InterestExpense => StatementKind::Income,
            CanonicalField::Receivables | CanonicalField::Inventory => StatementKind::BalanceSheet,
            CanonicalField::OperatingCashFlow
            | CanonicalField::CapitalExpenditure
            | CanonicalField::ShareRepurchase
            | CanonicalField::ShareIssuance => StatementKind::CashFlow,
        }
    }

    pub fn name(&self) -> &'static str {
        self.synonyms()[0]
    }
}

/// Resolve `field` from one statement period.
///
/// Labels without a value and NaN (the vendor's blank cell) are skipped. The
/// first remaining value is returned if finite.
pub fn try_resolve<S: LineItems + ?Sized>(
    source: &S,
    field: CanonicalField,
) -> Result<f64, AnalysisError> {
    let found = field
        .synonyms()
        .iter()
        .find_map(|label| source.line_item(label).filter(|v| !v.is_nan()));

    match found {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(AnalysisError::arithmetic(format!(
            "{} is not a finite number",
            field.name()
        ))),
        None => Err(AnalysisError::missing(field.name())),
    }
}

pub fn resolve<S: LineItems + ?Sized>(source: &S, field: CanonicalField) -> Reading {
    try_resolve(source, field).into()
}
