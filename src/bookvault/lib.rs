//! # Bookvault Architecture
//!
//! Bookvault is a UI-agnostic personal book catalogue. The library owns all
//! record management; the CLI in `main.rs` is just one client of it.
//!
//! ## Layers
//!
//! ```text
//! CLI (main.rs, args.rs, print.rs)
//!   - argument parsing, terminal output, confirmation prompts
//!   - the only place that knows about stdout/stderr/exit codes
//!          │
//!          ▼
//! Commands (commands/*.rs)
//!   - per-command business logic: validate, mutate, report
//!   - returns structured CmdResult, never prints listings itself
//!          │
//!          ▼
//! Vault (vault.rs)
//!   - the authoritative record collection + settings + view state
//!   - CRUD, the filtered/sorted query projection, tag enumeration
//!          │
//!          ▼
//! Storage (store/)
//!   - Storage trait; FileStore (production), InMemoryStore (tests)
//! ```
//!
//! ## Key invariants
//!
//! - Every stored record satisfies the blocking rules in [`validate`]:
//!   mutations are validated before they are applied, never after.
//! - Mutations persist before they commit. Memory and disk move together
//!   or not at all; a failed write surfaces as an error.
//! - Loads are defensive: corrupt or missing data degrades to safe
//!   defaults instead of crashing.
//! - The query projection ([`vault::Vault::query`]) is read-only and never
//!   reorders the underlying collection.
//!
//! ## Module overview
//!
//! - [`vault`]: the record store, the entry point for all operations
//! - [`validate`]: field validators, pattern compilation, import checks
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: core data types (`Record`, `Settings`, `SortKey`)
//! - [`formats`]: JSON/CSV export and import decode
//! - [`stats`]: dashboard aggregates
//! - [`search`]: match segmentation for highlighting
//! - [`commands`]: business logic for each CLI command
//! - [`error`]: error types

pub mod commands;
pub mod error;
pub mod formats;
pub mod model;
pub mod search;
pub mod stats;
pub mod store;
pub mod validate;
pub mod vault;
