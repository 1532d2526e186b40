//! # Core Application Logic
//!
//! This module contains PyBuddy's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Tutor (session data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • runner (effects)     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │ inference  │
//!     │  Adapter   │                          │  (HTTP)    │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Tutor` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`runner`]: Performs the effects `update()` asks for
//! - [`format`]: Splits message text into paragraphs and code blocks
//! - [`credential`]: The on-disk API key slot
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod credential;
pub mod format;
pub mod runner;
pub mod state;
