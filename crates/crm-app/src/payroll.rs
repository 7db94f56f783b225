//! # Daily Payroll
//!
//! What each master earned on one day: completed appointments are grouped by master,
//! their revenue summed, and the payout computed from the master's [`PayRate`].
//!
//! Revenue is the appointment's own `price` field and nothing else. Totals, paid amounts
//! and catalogue prices are ignored here; a visit without a `price` adds a record but no
//! revenue.
//!
//!
//! | Terms on file          | Payout                                   |
//! |------------------------|------------------------------------------|
//! | `percent > 0`          | `round(revenue * percent / 100)`         |
//! | otherwise              | `per_record * records`                   |
//!
//! Rows are ordered by payout, then revenue, both descending. The result can be written
//! as CSV with a UTF-8 BOM so spreadsheet tools pick the encoding up.

use crate::model::{Appointment, EmployeeDirectory, PayRate, RateBook, RateMode, RecordId, ServiceIndex};
use crate::money::format_money;
use chrono::{FixedOffset, NaiveDate};
use list_framework::ListRecord;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;
use tracing::debug;

/// One completed visit counted into a row.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollDetail {
    pub appointment: RecordId,
    pub time: String,
    pub client: String,
    pub services: String,
    pub amount: f64,
}

/// One master's day.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollRow {
    pub employee: RecordId,
    pub name: String,
    pub records: usize,
    pub revenue: f64,
    pub mode: RateMode,
    pub rate: PayRate,
    pub payout: f64,
    /// Sorted by time.
    pub details: Vec<PayrollDetail>,
}

impl PayrollRow {
    /// `"40%"` or the per-record amount.
    pub fn rate_label(&self) -> String {
        match self.mode {
            RateMode::Percent => format!("{}%", self.rate.percent),
            RateMode::PerRecord => format_money(self.rate.per_record),
        }
    }

    fn mode_label(&self) -> &'static str {
        match self.mode {
            RateMode::Percent => "Процент",
            RateMode::PerRecord => "Ставка",
        }
    }
}

impl ListRecord for PayrollRow {
    type Id = RecordId;
    type Field = list_framework::NoFields;

    fn id(&self) -> RecordId {
        self.employee.clone()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name)]
    }

    fn category(&self, field: list_framework::NoFields) -> Option<Cow<'_, str>> {
        match field {}
    }

    fn sort_name(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.name))
    }

    fn sort_price(&self) -> Option<f64> {
        Some(self.revenue)
    }

    fn sort_value(&self) -> Option<f64> {
        Some(self.payout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PayrollTotals {
    pub records: usize,
    pub revenue: f64,
    pub payout: f64,
}

/// Payroll of one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Payroll {
    pub date: NaiveDate,
    pub rows: Vec<PayrollRow>,
    pub totals: PayrollTotals,
}

/// Inputs of [`daily_payroll`] besides the appointments.
pub struct PayrollContext<'a> {
    pub employees: &'a EmployeeDirectory,
    pub services: &'a ServiceIndex,
    pub rates: &'a RateBook,
    pub offset: FixedOffset,
}

/// Compute the payroll of `date` from `appointments`.
///
/// Appointments on other days, not completed, or without a master are ignored. With
/// `employee` set only that master's row is kept; totals cover the kept rows.
pub fn daily_payroll(
    date: NaiveDate,
    appointments: &[Appointment],
    ctx: &PayrollContext<'_>,
    employee: Option<&RecordId>,
) -> Payroll {
    let mut order: Vec<RecordId> = Vec::new();
    let mut grouped: HashMap<RecordId, (usize, f64, Vec<PayrollDetail>)> = HashMap::new();

    for appt in appointments {
        if !appt.is_completed() || appt.day(ctx.offset) != Some(date) {
            continue;
        }
        let Some(master) = appt.barber() else {
            continue;
        };
        let amount = appt.price;
        let entry = grouped.entry(master.clone()).or_insert_with(|| {
            order.push(master);
            (0, 0.0, Vec::new())
        });
        entry.0 += 1;
        entry.1 += amount;
        entry.2.push(PayrollDetail {
            appointment: appt.id.clone(),
            time: appt.time_range(ctx.offset),
            client: appt.client_label(),
            services: appt.service_names(ctx.services),
            amount,
        });
    }

    let mut rows: Vec<PayrollRow> = order
        .into_iter()
        .filter(|id| employee.map_or(true, |wanted| wanted == id))
        .filter_map(|id| {
            let (records, revenue, mut details) = grouped.remove(&id)?;
            details.sort_by(|a, b| a.time.cmp(&b.time));
            let rate = ctx.rates.get(&id);
            let (mode, payout) = if rate.percent > 0.0 {
                (RateMode::Percent, (revenue * rate.percent / 100.0).round())
            } else {
                (RateMode::PerRecord, rate.per_record * records as f64)
            };
            let name = ctx
                .employees
                .name_of(&id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("ID {id}"));
            Some(PayrollRow {
                employee: id,
                name,
                records,
                revenue,
                mode,
                rate,
                payout,
                details,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.payout.total_cmp(&a.payout).then(b.revenue.total_cmp(&a.revenue)));

    let totals = rows.iter().fold(PayrollTotals::default(), |mut t, r| {
        t.records += r.records;
        t.revenue += r.revenue;
        t.payout += r.payout;
        t
    });
    debug!(%date, masters = rows.len(), records = totals.records, "Payroll computed");

    Payroll { date, rows, totals }
}

impl Payroll {
    /// Suggested file name of the export.
    pub fn file_name(&self) -> String {
        format!("payroll_{}.csv", self.date)
    }

    /// Write the CSV export: BOM, header, one line per row, totals line.
    pub fn write_csv<W: Write>(&self, mut out: W) -> Result<(), csv::Error> {
        out.write_all("\u{FEFF}".as_bytes())?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);
        writer.write_record(["Дата", "Мастер", "Записей", "Выручка", "Режим", "Ставка/Процент", "К выплате"])?;

        let date = self.date.to_string();
        for row in &self.rows {
            writer.write_record([
                date.clone(),
                row.name.clone(),
                row.records.to_string(),
                row.revenue.to_string(),
                row.mode_label().to_string(),
                row.rate_label(),
                row.payout.to_string(),
            ])?;
        }
        writer.write_record([
            "ИТОГО".to_string(),
            String::new(),
            self.totals.records.to_string(),
            self.totals.revenue.to_string(),
            String::new(),
            String::new(),
            self.totals.payout.to_string(),
        ])?;
        writer.flush()?;
        Ok(())
    }

    /// The CSV export as bytes.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Employee, Service};
    use serde_json::json;

    struct Fixture {
        employees: EmployeeDirectory,
        services: ServiceIndex,
        rates: RateBook,
        appointments: Vec<Appointment>,
    }

    fn fixture() -> Fixture {
        let employees: Vec<Employee> = serde_json::from_value(json!([
            { "id": 1, "first_name": "Айбек", "last_name": "Осмонов" },
            { "id": 2, "first_name": "Нурлан", "last_name": "Абдыкадыров" },
            { "id": 3, "email": "third@salon.kg" }
        ]))
        .unwrap();
        let services: Vec<Service> = serde_json::from_value(json!([
            { "id": 100, "name": "Стрижка", "price": 600 },
            { "id": 101, "name": "Борода", "price": 400 }
        ]))
        .unwrap();
        let appointments: Vec<Appointment> = serde_json::from_value(json!([
            { "id": 1, "barber": 1, "status": "completed", "service": 100, "client_name": "Марат",
              "price": 600, "start_at": "2024-05-03T04:00:00Z", "end_at": "2024-05-03T04:40:00Z" },
            { "id": 2, "barber": 1, "status": "done", "total_amount": "1200", "price": "1 000",
              "start_at": "2024-05-03T03:00:00Z", "end_at": "2024-05-03T03:30:00Z" },
            { "id": 3, "barber": 2, "status": "completed", "service": 101, "price": 400,
              "start_at": "2024-05-03T05:00:00Z" },
            { "id": 4, "barber": 2, "status": "completed", "service": 100,
              "start_at": "2024-05-03T06:00:00Z" },
            { "id": 5, "barber": 3, "status": "booked", "service": 100,
              "start_at": "2024-05-03T06:00:00Z" },
            { "id": 6, "barber": 1, "status": "completed", "service": 100,
              "start_at": "2024-05-04T06:00:00Z" },
            { "id": 7, "status": "completed", "service": 100, "start_at": "2024-05-03T06:00:00Z" },
            { "id": 8, "barber": 9, "status": "completed", "price": 250,
              "start_at": "2024-05-03T07:00:00Z" }
        ]))
        .unwrap();

        let mut rates = RateBook::new();
        rates.set(1u64.into(), PayRate { per_record: 0.0, percent: 40.0 });
        rates.set(2u64.into(), PayRate { per_record: 300.0, percent: 0.0 });

        Fixture {
            employees: EmployeeDirectory::new(&employees),
            services: ServiceIndex::new(&services),
            rates,
            appointments,
        }
    }

    fn run(f: &Fixture, employee: Option<&RecordId>) -> Payroll {
        let ctx = PayrollContext {
            employees: &f.employees,
            services: &f.services,
            rates: &f.rates,
            offset: FixedOffset::east_opt(6 * 3600).unwrap(),
        };
        daily_payroll(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), &f.appointments, &ctx, employee)
    }

    #[test]
    fn percent_and_per_record_payouts() {
        let f = fixture();
        let payroll = run(&f, None);

        let summary: Vec<(&str, usize, f64, f64)> = payroll
            .rows
            .iter()
            .map(|r| (r.name.as_str(), r.records, r.revenue, r.payout))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Осмонов Айбек", 2, 1600.0, 640.0),
                ("Абдыкадыров Нурлан", 2, 400.0, 600.0),
                ("ID 9", 1, 250.0, 0.0),
            ]
        );
        assert_eq!(payroll.totals, PayrollTotals { records: 5, revenue: 2250.0, payout: 1240.0 });
        assert_eq!(payroll.rows[0].rate_label(), "40%");
        assert_eq!(payroll.rows[1].rate_label(), "300 сом");
    }

    #[test]
    fn revenue_comes_only_from_the_price_field() {
        let f = fixture();
        let payroll = run(&f, None);

        let first: Vec<f64> = payroll.rows[0].details.iter().map(|d| d.amount).collect();
        assert_eq!(first, vec![1000.0, 600.0]);

        // A catalogue price alone does not count as revenue.
        let second: Vec<f64> = payroll.rows[1].details.iter().map(|d| d.amount).collect();
        assert_eq!(second, vec![400.0, 0.0]);
    }

    #[test]
    fn details_are_sorted_by_time() {
        let f = fixture();
        let payroll = run(&f, None);
        let times: Vec<&str> = payroll.rows[0].details.iter().map(|d| d.time.as_str()).collect();
        assert_eq!(times, vec!["09:00–09:30", "10:00–10:40"]);
        assert_eq!(payroll.rows[0].details[1].client, "Марат");
        assert_eq!(payroll.rows[0].details[1].services, "Стрижка");
    }

    #[test]
    fn employee_filter_narrows_rows_and_totals() {
        let f = fixture();
        let payroll = run(&f, Some(&2u64.into()));
        assert_eq!(payroll.rows.len(), 1);
        assert_eq!(payroll.totals.payout, 600.0);
    }

    #[test]
    fn ties_on_payout_break_by_revenue() {
        let mut f = fixture();
        f.rates = RateBook::new();
        let payroll = run(&f, None);
        let names: Vec<&str> = payroll.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Осмонов Айбек", "Абдыкадыров Нурлан", "ID 9"]);
    }

    #[test]
    fn csv_has_bom_header_rows_and_totals() {
        let f = fixture();
        let payroll = run(&f, None);
        let bytes = payroll.to_csv().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = text.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Дата,Мастер,Записей,Выручка,Режим,Ставка/Процент,К выплате");
        assert_eq!(lines[1], "2024-05-03,Осмонов Айбек,2,1600,Процент,40%,640");
        assert_eq!(lines[2], "2024-05-03,Абдыкадыров Нурлан,2,400,Ставка,300 сом,600");
        assert_eq!(lines[4], "ИТОГО,,5,2250,,,1240");
        assert_eq!(payroll.file_name(), "payroll_2024-05-03.csv");
    }
}
