use crate::clients::{
    AppointmentsClient, CashFlowsClient, ClientsClient, CollectionClient, EmployeesClient, Fetcher, RatesClient,
    ServicesClient, SharedSource,
};
use crate::config::Config;
use crate::error::AppError;
use crate::model::{Appointment, CashFlow, Client, Employee, EmployeeDirectory, Rate, RecordId, Service, ServiceIndex};
use crate::payroll::{daily_payroll, Payroll, PayrollContext};
use crate::views::{build_client_rows, ClientRow};
use chrono::{FixedOffset, NaiveDate};
use list_framework::{Collected, HttpTransport, ListRecord, ListView, PageFetcher};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// One page source per remote collection.
///
/// Production wires all of them to the same [`HttpTransport`]; tests hand in
/// [`MockPageSource`](list_framework::mock::MockPageSource)s.
pub struct Sources {
    pub clients: SharedSource<Client>,
    pub appointments: SharedSource<Appointment>,
    pub services: SharedSource<Service>,
    pub employees: SharedSource<Employee>,
    pub cashflows: SharedSource<CashFlow>,
    pub rates: SharedSource<Rate>,
}

impl Sources {
    pub fn http(transport: &HttpTransport) -> Self {
        Self {
            clients: Arc::new(transport.source::<Client>()),
            appointments: Arc::new(transport.source::<Appointment>()),
            services: Arc::new(transport.source::<Service>()),
            employees: Arc::new(transport.source::<Employee>()),
            cashflows: Arc::new(transport.source::<CashFlow>()),
            rates: Arc::new(transport.source::<Rate>()),
        }
    }
}

/// A loaded value plus the collections that could not be read to the end.
///
/// An incomplete collection still contributes the items it got; callers decide whether
/// to show a warning.
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub incomplete: Vec<&'static str>,
}

impl<T> Loaded<T> {
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }
}

/// Everything the barbershop screens read.
#[derive(Debug)]
pub struct BarbershopData {
    pub clients: Vec<Client>,
    pub appointments: Vec<Appointment>,
    pub services: ServiceIndex,
    pub employees: EmployeeDirectory,
}

/// The CRM app's collection clients, wired to one backend.
///
/// # Example
///
/// ```ignore
/// let config = Config::load(None)?;
/// let system = CrmSystem::new(&config)?;
///
/// let screen = system.clients_view().await;
/// for row in screen.value.visible() {
///     println!("{}", row.client.full_name);
/// }
/// ```
pub struct CrmSystem {
    pub clients: ClientsClient,
    pub appointments: AppointmentsClient,
    pub services: ServicesClient,
    pub employees: EmployeesClient,
    pub cashflows: CashFlowsClient,
    pub rates: RatesClient,

    page_size: usize,
    offset: FixedOffset,
}

fn fetcher<T: Send + 'static>(source: SharedSource<T>, max_pages: Option<usize>) -> Fetcher<T> {
    PageFetcher::new(source).with_max_pages(max_pages)
}

/// Record `name` as incomplete unless the walk ran to the end.
fn track<T>(name: &'static str, collected: Collected<T>, incomplete: &mut Vec<&'static str>) -> Vec<T> {
    if !collected.is_complete() {
        warn!(collection = name, pages = collected.pages, stop = ?collected.stop, "Showing a partial collection");
        incomplete.push(name);
    }
    collected.items
}

impl CrmSystem {
    /// Build the HTTP transport from `config` and wire every client to it.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let transport = config.transport()?;
        info!(base_url = %transport.base_url(), "Connecting to CRM backend");
        Self::from_sources(Sources::http(&transport), config)
    }

    /// Wire the clients to the given sources, taking paging and time settings from
    /// `config`.
    pub fn from_sources(sources: Sources, config: &Config) -> Result<Self, AppError> {
        config.validate()?;
        let max_pages = config.max_pages;
        Ok(Self {
            clients: ClientsClient::new(fetcher(sources.clients, max_pages)),
            appointments: AppointmentsClient::new(fetcher(sources.appointments, max_pages)),
            services: ServicesClient::new(fetcher(sources.services, max_pages)),
            employees: EmployeesClient::new(fetcher(sources.employees, max_pages)),
            cashflows: CashFlowsClient::new(fetcher(sources.cashflows, max_pages)),
            rates: RatesClient::new(fetcher(sources.rates, max_pages)),
            page_size: config.page_size,
            offset: config.utc_offset()?,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn view_of<T: ListRecord>(&self, records: Vec<T>) -> ListView<T> {
        let mut view = ListView::new(self.page_size);
        view.replace_records(records);
        view
    }

    /// Read the four barbershop collections concurrently.
    #[instrument(skip(self))]
    pub async fn load_barbershop(&self) -> Loaded<BarbershopData> {
        let (clients, appointments, services, employees) = tokio::join!(
            self.clients.collect(),
            self.appointments.collect(),
            self.services.collect(),
            self.employees.collect(),
        );

        let mut incomplete = Vec::new();
        let clients = track("clients", clients, &mut incomplete);
        let appointments = track("appointments", appointments, &mut incomplete);
        let services = track("services", services, &mut incomplete);
        let employees = track("employees", employees, &mut incomplete);

        info!(
            clients = clients.len(),
            appointments = appointments.len(),
            services = services.len(),
            employees = employees.len(),
            "Barbershop data loaded"
        );
        Loaded {
            value: BarbershopData {
                clients,
                appointments,
                services: ServiceIndex::new(&services),
                employees: EmployeeDirectory::new(&employees),
            },
            incomplete,
        }
    }

    /// The clients screen: clients joined with their visit history.
    #[instrument(skip(self))]
    pub async fn clients_view(&self) -> Loaded<ListView<ClientRow>> {
        let (clients, appointments) = tokio::join!(self.clients.collect(), self.appointments.collect());
        let mut incomplete = Vec::new();
        let clients = track("clients", clients, &mut incomplete);
        let appointments = track("appointments", appointments, &mut incomplete);
        Loaded {
            value: self.view_of(build_client_rows(clients, &appointments)),
            incomplete,
        }
    }

    #[instrument(skip(self))]
    pub async fn services_view(&self) -> Loaded<ListView<Service>> {
        let mut incomplete = Vec::new();
        let services = track("services", self.services.collect().await, &mut incomplete);
        Loaded {
            value: self.view_of(services),
            incomplete,
        }
    }

    #[instrument(skip(self))]
    pub async fn cashflows_view(&self) -> Loaded<ListView<CashFlow>> {
        let mut incomplete = Vec::new();
        let flows = track("cashflows", self.cashflows.collect().await, &mut incomplete);
        Loaded {
            value: self.view_of(flows),
            incomplete,
        }
    }

    /// Payroll of `date`, optionally for one master only. Rates are read for the month
    /// `date` falls in.
    #[instrument(skip(self))]
    pub async fn payroll(&self, date: NaiveDate, employee: Option<&RecordId>) -> Loaded<Payroll> {
        let period = date.format("%Y-%m").to_string();
        let (appointments, services, employees, rates) = tokio::join!(
            self.appointments.collect(),
            self.services.collect(),
            self.employees.collect(),
            self.rates.rate_book(&period),
        );

        let mut incomplete = Vec::new();
        let appointments = track("appointments", appointments, &mut incomplete);
        let services = ServiceIndex::new(&track("services", services, &mut incomplete));
        let employees = EmployeeDirectory::new(&track("employees", employees, &mut incomplete));

        let ctx = PayrollContext {
            employees: &employees,
            services: &services,
            rates: &rates,
            offset: self.offset,
        };
        let payroll = daily_payroll(date, &appointments, &ctx, employee);
        info!(%date, masters = payroll.rows.len(), payout = payroll.totals.payout, "Payroll ready");
        Loaded {
            value: payroll,
            incomplete,
        }
    }
}
