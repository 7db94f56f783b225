//! # Cash-Flow Screen
//!
//! Cash-desk operations, filterable by direction, with income/expense totals.
use crate::model::{CashFlow, Direction, RecordId};
use chrono::{DateTime, Utc};
use list_framework::ListRecord;
use std::borrow::Cow;

/// Filterable fields of [`CashFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CashFlowField {
    /// `"income"` or `"expense"`.
    Direction,
}

impl ListRecord for CashFlow {
    type Id = RecordId;
    type Field = CashFlowField;

    fn id(&self) -> RecordId {
        self.id.clone()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.description)]
    }

    fn category(&self, field: CashFlowField) -> Option<Cow<'_, str>> {
        match field {
            CashFlowField::Direction => Some(Cow::Borrowed(self.direction().token())),
        }
    }

    fn sort_name(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.description))
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn sort_price(&self) -> Option<f64> {
        Some(self.abs_amount())
    }

    fn sort_value(&self) -> Option<f64> {
        Some(self.abs_amount())
    }
}

/// Sums over a set of operations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CashTotals {
    pub income: f64,
    pub expense: f64,
}

impl CashTotals {
    pub fn of<'a>(flows: impl IntoIterator<Item = &'a CashFlow>) -> Self {
        flows.into_iter().fold(Self::default(), |mut acc, flow| {
            match flow.direction() {
                Direction::Income => acc.income += flow.abs_amount(),
                Direction::Expense => acc.expense += flow.abs_amount(),
            }
            acc
        })
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_framework::{derive_view, SortKey, ViewState};
    use serde_json::json;

    fn flows() -> Vec<CashFlow> {
        serde_json::from_value(json!([
            { "id": 1, "type": "income", "amount": 5000, "description": "Оплата стрижки", "created_at": "2024-05-01" },
            { "id": 2, "type": "expense", "amount": 1200, "description": "Расходники", "created_at": "2024-05-02" },
            { "id": 3, "amount": -300, "description": "Такси", "created_at": "2024-05-03" },
            { "id": 4, "type": "приход", "amount": "2 500", "description": "Оплата бритья", "created_at": "2024-05-04" }
        ]))
        .unwrap()
    }

    #[test]
    fn totals_and_balance() {
        let totals = CashTotals::of(&flows());
        assert_eq!(totals.income, 7500.0);
        assert_eq!(totals.expense, 1500.0);
        assert_eq!(totals.balance(), 6000.0);
    }

    #[test]
    fn filter_by_direction_and_sort_by_amount() {
        let items = flows();
        let state = ViewState::new()
            .with_filter(CashFlowField::Direction, "income")
            .with_sort(SortKey::ValueDesc);
        let view = derive_view(&items, &state);
        let ids: Vec<String> = view.iter().map(|f| f.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        let state = ViewState::new().with_search("оплата").with_sort(SortKey::Oldest);
        let view = derive_view(&items, &state);
        assert_eq!(CashTotals::of(view.iter()).income, 7500.0);
        assert_eq!(view.len(), 2);
    }
}
