//! # CRM App
//!
//! Command-line front end for the barbershop and cash-desk lists.
//!
//! ```bash
//! crm-app clients --search иванов --status active --sort visits_desc
//! crm-app services --status active --page 2
//! crm-app cashflows --direction expense
//! crm-app payroll --date 2024-05-14 --csv payroll.csv
//! crm-app barcode complete 400638133393
//! ```
//!
//! Settings come from `--config`, `CRM_CONFIG`, `CRM_BASE_URL` and `CRM_TOKEN`; see
//! [`crm_app::config`].

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use crm_app::barcode;
use crm_app::lifecycle::{setup_tracing, CrmSystem};
use crm_app::model::{ClientStatus, Direction, RecordId};
use crm_app::money::{format_money, DASH};
use crm_app::views::{pager_line, CashFlowField, CashTotals, ClientField, ServiceField};
use crm_app::{AppError, Config};
use list_framework::{FilterValue, ListRecord, ListView, SortKey};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "crm-app")]
#[command(about = "Browse CRM lists and build reports from the REST backend", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive substring search.
    #[arg(long, default_value = "")]
    search: String,

    /// name_asc, name_desc, price_asc, price_desc, newest, oldest, value_desc, last_visit.
    #[arg(long)]
    sort: Option<String>,

    #[arg(long, default_value = "1")]
    page: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Barbershop clients with their visit counts.
    Clients {
        #[command(flatten)]
        list: ListArgs,

        /// active, inactive, blacklist or all.
        #[arg(long, alias = "filter")]
        status: Option<String>,
    },

    /// The service price list.
    Services {
        #[command(flatten)]
        list: ListArgs,

        /// active, inactive or all.
        #[arg(long, alias = "filter")]
        status: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Cash-desk operations with totals.
    Cashflows {
        #[command(flatten)]
        list: ListArgs,

        /// income, expense or all.
        #[arg(long, alias = "filter")]
        direction: Option<String>,
    },

    /// What each master earned on one day.
    Payroll {
        /// YYYY-MM-DD; today in the configured time zone when omitted.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Only this master's row.
        #[arg(long)]
        employee: Option<String>,

        /// Also write the report as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// EAN-13 helpers.
    Barcode {
        #[command(subcommand)]
        action: BarcodeAction,
    },
}

#[derive(Subcommand)]
enum BarcodeAction {
    /// Whether a 13-digit code has a correct check digit.
    Check { code: String },
    /// Append the check digit to a 12-digit body.
    Complete { body: String },
    /// Random valid codes.
    Generate {
        #[arg(long, default_value = "1")]
        count: usize,
    },
}

fn apply_list<T: ListRecord>(view: &mut ListView<T>, args: &ListArgs) {
    if !args.search.trim().is_empty() {
        view.set_search(args.search.as_str());
    }
    if let Some(sort) = &args.sort {
        view.set_sort(SortKey::parse_or_default(sort));
    }
}

/// Print the current page, then the pager and the match count.
fn print_page<T: ListRecord>(view: &ListView<T>, render: impl Fn(&T) -> String) {
    let rows = view.visible();
    if rows.is_empty() {
        println!("Ничего не найдено");
    }
    for (i, row) in rows.into_iter().enumerate() {
        println!("{:>4}. {}", view.pager().row_number(i), render(row));
    }
    if view.page_count() > 1 {
        println!("{}", pager_line(&view.window(), view.page()));
    }
    println!("Всего: {}", view.total());
}

fn report_incomplete(incomplete: &[&str]) {
    if !incomplete.is_empty() {
        eprintln!("warning: partial data, could not read all of: {}", incomplete.join(", "));
    }
}

fn date_label(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| DASH.to_string())
}

async fn run_clients(system: &CrmSystem, list: &ListArgs, status: Option<&str>) -> Result<(), AppError> {
    let screen = system.clients_view().await;
    report_incomplete(&screen.incomplete);
    let mut view = screen.value;

    apply_list(&mut view, list);
    if let Some(raw) = status.filter(|s| FilterValue::parse(s).is_active()) {
        let status = ClientStatus::parse(raw)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown client status: {raw}")))?;
        view.set_filter(ClientField::Status, status.label());
    }
    view.set_page(list.page);

    print_page(&view, |row| {
        format!(
            "{} | {} | {} | визитов: {} | последний: {}",
            row.client.full_name,
            row.client.phone,
            row.client.status.label(),
            row.visits,
            date_label(row.last_visit),
        )
    });
    Ok(())
}

async fn run_services(
    system: &CrmSystem,
    list: &ListArgs,
    status: Option<&str>,
    category: Option<&str>,
) -> Result<(), AppError> {
    let screen = system.services_view().await;
    report_incomplete(&screen.incomplete);
    let mut view = screen.value;

    apply_list(&mut view, list);
    if let Some(raw) = status {
        let value = ServiceField::status_filter(raw)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown service status: {raw}")))?;
        view.set_filter(ServiceField::Status, value);
    }
    if let Some(category) = category {
        view.set_filter(ServiceField::Category, category);
    }
    view.set_page(list.page);

    print_page(&view, |service| {
        format!(
            "{} | {} | {} | {} | {}",
            service.name,
            format_money(service.price),
            if service.time.is_empty() { DASH } else { service.time.as_str() },
            service.category_label(),
            if service.is_active { "активна" } else { "неактивна" },
        )
    });
    Ok(())
}

async fn run_cashflows(system: &CrmSystem, list: &ListArgs, direction: Option<&str>) -> Result<(), AppError> {
    let screen = system.cashflows_view().await;
    report_incomplete(&screen.incomplete);
    let mut view = screen.value;

    apply_list(&mut view, list);
    if let Some(raw) = direction.filter(|s| FilterValue::parse(s).is_active()) {
        let direction = Direction::parse(raw)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown direction: {raw}")))?;
        view.set_filter(CashFlowField::Direction, direction.token());
    }
    view.set_page(list.page);

    print_page(&view, |flow| {
        let sign = match flow.direction() {
            Direction::Income => '+',
            Direction::Expense => '-',
        };
        format!(
            "{} | {sign}{} | {}",
            date_label(flow.created_at),
            format_money(flow.abs_amount()),
            flow.description,
        )
    });

    let derived = view.derived();
    let totals = CashTotals::of(derived.iter());
    println!(
        "Приход: {} | Расход: {} | Баланс: {}",
        format_money(totals.income),
        format_money(totals.expense),
        format_money(totals.balance()),
    );
    Ok(())
}

async fn run_payroll(
    system: &CrmSystem,
    date: Option<NaiveDate>,
    employee: Option<&str>,
    csv: Option<&PathBuf>,
) -> Result<(), AppError> {
    let date = date.unwrap_or_else(|| Utc::now().with_timezone(&system.offset()).date_naive());
    let employee = employee.map(RecordId::new);

    let loaded = system.payroll(date, employee.as_ref()).await;
    report_incomplete(&loaded.incomplete);
    let payroll = loaded.value;

    println!("Зарплата за {}", payroll.date.format("%d.%m.%Y"));
    if payroll.rows.is_empty() {
        println!("Нет завершённых записей");
    }
    for row in &payroll.rows {
        println!(
            "{} | записей: {} | выручка: {} | ставка: {} | к выплате: {}",
            row.name,
            row.records,
            format_money(row.revenue),
            row.rate_label(),
            format_money(row.payout),
        );
        for detail in &row.details {
            println!("    {} {} | {} | {}", detail.time, detail.client, detail.services, format_money(detail.amount));
        }
    }
    println!(
        "ИТОГО | записей: {} | выручка: {} | к выплате: {}",
        payroll.totals.records,
        format_money(payroll.totals.revenue),
        format_money(payroll.totals.payout),
    );

    if let Some(path) = csv {
        let target = if path.is_dir() { path.join(payroll.file_name()) } else { path.clone() };
        std::fs::write(&target, payroll.to_csv()?)?;
        info!(path = %target.display(), "Payroll exported");
        println!("CSV: {}", target.display());
    }
    Ok(())
}

fn run_barcode(action: &BarcodeAction) -> Result<(), AppError> {
    match action {
        BarcodeAction::Check { code } => {
            if barcode::is_valid(code) {
                println!("{code}: valid");
            } else {
                println!("{code}: invalid");
            }
        }
        BarcodeAction::Complete { body } => println!("{}", barcode::complete(body)?),
        BarcodeAction::Generate { count } => {
            let mut rng = rand::thread_rng();
            for _ in 0..*count {
                println!("{}", barcode::generate(&mut rng));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();
    let cli = Cli::parse();

    if let Commands::Barcode { action } = &cli.command {
        return run_barcode(action);
    }

    let config = Config::load(cli.config.as_deref())?;
    let system = CrmSystem::new(&config)?;

    match &cli.command {
        Commands::Clients { list, status } => run_clients(&system, list, status.as_deref()).await,
        Commands::Services { list, status, category } => {
            run_services(&system, list, status.as_deref(), category.as_deref()).await
        }
        Commands::Cashflows { list, direction } => run_cashflows(&system, list, direction.as_deref()).await,
        Commands::Payroll { date, employee, csv } => {
            run_payroll(&system, *date, employee.as_deref(), csv.as_ref()).await
        }
        Commands::Barcode { action } => run_barcode(action),
    }
}
