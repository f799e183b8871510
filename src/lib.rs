//! tabsplit - core state for a receipt bill-splitting wizard
//!
//! A user uploads a receipt image, reviews the extracted line items, assigns
//! each item to a member, and reads the per-person totals. This crate holds
//! the client-side data model for that flow: the [`store::BillStore`] session
//! state with its mutation operations and derived totals, the
//! [`wizard::WizardStep`] progression, and the [`api::ExtractionClient`] that
//! talks to the external receipt extraction service. Rendering, file
//! handling, and routing belong to the embedding application.

pub mod api;
pub mod config;
pub mod logging;
pub mod store;
pub mod types;
pub mod wizard;

pub use api::{ApiError, ExtractionClient};
pub use config::Config;
pub use store::BillStore;
pub use types::{ExtractedItem, Item, ItemPatch, Member, MemberTotal, ProcessingStatus};
pub use wizard::WizardStep;
