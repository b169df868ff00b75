//! Sentinelle - Multi-domain strategic intelligence center
//!
//! Sentinelle renders dozens of sector "professional centers" over one
//! shared controller: each center loads its domain's intelligence briefs
//! and related analytical records from a hosted entity service, runs a
//! conjunctive filter pipeline over the briefs, and derives headline stats
//! that each sector can customize through a policy object.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Professional Center                     │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────┐   │
//! │  │ CenterCtrl   │─▶│ Filter Pipeline│  │ Stats Policy │   │
//! │  │ (load state) │  │ (pure, conj.)  │  │ (per domain) │   │
//! │  └──────┬───────┘  └────────────────┘  └──────────────┘   │
//! │         │ tokio::join! at mount                           │
//! └─────────┼─────────────────────────────────────────────────┘
//!           ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │            Hosted Entity Service (external)               │
//! │     list / filter / create / update / current_user        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entity`]: entity-service seam, REST client, in-memory stub
//! - [`briefs`]: brief types, the filter pipeline, stats aggregation
//! - [`center`]: the professional-center controller and domain profiles
//! - [`session`]: role context with display-role override
//! - [`config`]: configuration management

pub mod briefs;
pub mod center;
pub mod config;
pub mod entity;
pub mod error;
pub mod session;

pub use config::SentinelleConfig;
pub use error::{Error, Result};
