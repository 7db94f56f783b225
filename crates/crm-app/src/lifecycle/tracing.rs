//! # Observability & Tracing
//!
//! Structured logging for the CRM app, configured from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Page walks**: every page request at `debug`, a summary per collection at `info`,
//!   and a `warn` whenever a walk stops short (failed request, repeated cursor, page cap)
//! - **Derived data**: payroll and client-row assembly at `debug`
//! - **Preview blobs**: each release at `debug`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Summaries and warnings
//! RUST_LOG=info crm-app clients
//!
//! # Every request URL
//! RUST_LOG=debug crm-app payroll --date 2024-05-14
//!
//! # Only the fetcher
//! RUST_LOG=list_framework=debug crm-app cashflows
//! ```
//!
//! Logs go to stderr, so table output on stdout can still be piped.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
