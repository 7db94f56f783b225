//! # System Lifecycle & Wiring
//!
//! Individual clients are simple; wiring them to one backend with consistent paging and
//! time settings is where the setup lives. [`CrmSystem`] is that wiring.
//!
//! ## The CrmSystem Pattern
//!
//! ```rust,ignore
//! // 1. Settings: file, then environment overrides
//! let config = Config::load(cli.config.as_deref())?;
//!
//! // 2. One HTTP transport, one typed client per collection
//! let system = CrmSystem::new(&config)?;
//!
//! // 3. Screens read their collections concurrently and report partial data
//! let screen = system.clients_view().await;
//! if !screen.is_complete() {
//!     eprintln!("incomplete: {:?}", screen.incomplete);
//! }
//! ```
//!
//! Tests build the same system over mock sources with [`CrmSystem::from_sources`], so
//! every screen can be exercised without a server.
//!
//! ## Partial Data
//!
//! A collection walk that stops early (failed request, repeated cursor, page cap) still
//! yields the items it gathered. Each screen returns them in a [`Loaded`] that names the
//! collections that were cut short; nothing is retried.
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging, filtered by `RUST_LOG`:
//!
//! | Level   | Shows                                                      |
//! |---------|------------------------------------------------------------|
//! | `warn`  | Collections that stopped short, and why                    |
//! | `info`  | One summary line per loaded collection or computed report  |
//! | `debug` | Every page request, with its resolved URL                  |

pub mod crm_system;
pub mod tracing;

pub use crm_system::*;
pub use self::tracing::setup_tracing;
