use crate::lenient;
use crate::model::RecordId;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn token(self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }

    /// Accepts the API's English and Russian spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "income" | "приход" => Some(Direction::Income),
            "expense" | "расход" => Some(Direction::Expense),
            _ => None,
        }
    }
}

/// A cash-desk operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCashFlow")]
pub struct CashFlow {
    pub id: RecordId,
    /// Declared direction as sent, possibly empty.
    pub kind: String,
    pub amount: f64,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawCashFlow {
    id: RecordId,
    #[serde(default, rename = "type")]
    kind_type: Option<Value>,
    #[serde(default)]
    kind: Option<Value>,
    #[serde(default)]
    direction: Option<Value>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    sum: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default, rename = "createdAt")]
    created_at_camel: Option<Value>,
}

impl From<RawCashFlow> for CashFlow {
    fn from(raw: RawCashFlow) -> Self {
        Self {
            id: raw.id,
            kind: lenient::first_set([&raw.kind_type, &raw.kind, &raw.direction])
                .map(lenient::string_from_value)
                .unwrap_or_default(),
            amount: lenient::first_set([&raw.amount, &raw.value, &raw.sum])
                .map(lenient::number_from_value)
                .unwrap_or(0.0),
            description: lenient::first_truthy([&raw.description, &raw.name])
                .map(lenient::string_from_value)
                .unwrap_or_default(),
            created_at: lenient::first_truthy([&raw.created_at, &raw.date, &raw.created_at_camel])
                .and_then(lenient::datetime_from_value),
        }
    }
}

impl CashFlow {
    /// The declared direction, or the sign of the amount when none is declared.
    pub fn direction(&self) -> Direction {
        Direction::parse(&self.kind).unwrap_or(if self.amount >= 0.0 {
            Direction::Income
        } else {
            Direction::Expense
        })
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}
