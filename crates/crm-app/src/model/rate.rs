use crate::lenient;
use crate::model::RecordId;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// How a master's daily pay is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateMode {
    /// A fixed amount per completed visit.
    PerRecord,
    /// A share of the revenue.
    Percent,
}

impl RateMode {
    /// Query value of the rates endpoint.
    pub fn token(self) -> &'static str {
        match self {
            RateMode::PerRecord => "lesson",
            RateMode::Percent => "percent",
        }
    }
}

/// One row of `/education/teacher-rates/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRate")]
pub struct Rate {
    pub employee: Option<RecordId>,
    pub rate: f64,
}

/// The master is named by whichever of these keys the backend filled in.
#[derive(Deserialize)]
struct RawRate {
    #[serde(default)]
    teacher: Option<Value>,
    #[serde(default)]
    teacher_id: Option<Value>,
    #[serde(default)]
    user: Option<Value>,
    #[serde(default)]
    employee: Option<Value>,
    #[serde(default)]
    master: Option<Value>,
    #[serde(default, deserialize_with = "lenient::number")]
    rate: f64,
}

impl From<RawRate> for Rate {
    fn from(raw: RawRate) -> Self {
        let holder = [&raw.teacher, &raw.teacher_id, &raw.user, &raw.employee, &raw.master];
        Self {
            employee: lenient::first_truthy(holder).and_then(RecordId::from_value),
            rate: raw.rate,
        }
    }
}

/// The effective pay terms of one master.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PayRate {
    pub per_record: f64,
    /// Always within `0..=100`.
    pub percent: f64,
}

/// Pay terms per master for one month.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    rates: HashMap<RecordId, PayRate>,
}

impl RateBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge rows of one mode. Rows without an employee are skipped; percentages are
    /// clamped to `0..=100`.
    pub fn absorb(&mut self, mode: RateMode, rows: &[Rate]) {
        for row in rows {
            let Some(id) = &row.employee else {
                continue;
            };
            let entry = self.rates.entry(id.clone()).or_default();
            match mode {
                RateMode::PerRecord => entry.per_record = row.rate,
                RateMode::Percent => entry.percent = row.rate.clamp(0.0, 100.0),
            }
        }
    }

    pub fn set(&mut self, id: RecordId, rate: PayRate) {
        let percent = rate.percent.clamp(0.0, 100.0);
        self.rates.insert(id, PayRate { percent, ..rate });
    }

    /// Terms for `id`; zero when nothing is on file.
    pub fn get(&self, id: &RecordId) -> PayRate {
        self.rates.get(id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_modes_and_clamps_percent() {
        let lesson: Vec<Rate> = serde_json::from_value(json!([
            { "teacher": 1, "rate": "200" },
            { "rate": 999 }
        ]))
        .unwrap();
        let percent: Vec<Rate> = serde_json::from_value(json!([
            { "master": 1, "rate": 40 },
            { "user": 2, "rate": 150 }
        ]))
        .unwrap();

        let mut book = RateBook::new();
        book.absorb(RateMode::PerRecord, &lesson);
        book.absorb(RateMode::Percent, &percent);

        assert_eq!(book.len(), 2);
        assert_eq!(book.get(&1u64.into()), PayRate { per_record: 200.0, percent: 40.0 });
        assert_eq!(book.get(&2u64.into()).percent, 100.0);
        assert_eq!(book.get(&3u64.into()), PayRate::default());
    }

    #[test]
    fn row_naming_the_master_twice() {
        let rows: Vec<Rate> = serde_json::from_value(json!([
            { "teacher": 4, "teacher_id": 4, "user": 11, "rate": 300 },
            { "teacher": null, "employee": "5", "master": 6, "rate": 10 }
        ]))
        .unwrap();
        assert_eq!(rows[0].employee, Some(RecordId::from(4u64)));
        assert_eq!(rows[1].employee, Some(RecordId::from(5u64)));
    }
}
