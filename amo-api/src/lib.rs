//! amo-api - HTTP client for the amoCRM REST API.
//!
//! This crate provides a typed client over the provider's `api/v4` REST
//! surface: an authenticated session ([`AmoClient`]) derived from a
//! `(token, subdomain)` pair, one repository per entity type offering
//! CRUD and listing operations, a fluent [`FilterBuilder`] for query
//! parameters, and a bounded-concurrency helper for caller-side fan-out.
//!
//! Every operation is one HTTP call translated to one typed result;
//! nothing is cached and nothing is retried. Failures surface through the
//! [`amo_core::AmoError`] taxonomy.
//!
//! ```no_run
//! use amo_api::{AmoClient, FilterBuilder, FilterOperator, SortDirection};
//! use amo_core::AmoConfig;
//!
//! # async fn run() -> amo_core::AmoResult<()> {
//! let client = AmoClient::new(&AmoConfig::new("token", "myteam"))?;
//!
//! let params = FilterBuilder::new()
//!     .add_filter("status_id", vec![142, 143], FilterOperator::In)
//!     .order_by("created_at", SortDirection::Desc)
//!     .limit(50)?
//!     .build();
//! let leads = client.leads().get_all(Some(&params)).await?;
//! println!("{} leads", leads.len());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod client;
pub mod entities;
pub mod filter;
pub mod repository;
pub mod response;

// Re-export key types
pub use batch::gather_bounded;
pub use client::AmoClient;
pub use entities::NoteParent;
pub use filter::{FilterBuilder, FilterOperator, FilterValue, QueryParams, SortDirection};
pub use repository::{Entity, Repository};
pub use response::PageMeta;
