//! # Jokebox Architecture
//!
//! Jokebox is a **UI-agnostic joke viewer library** with a terminal client on
//! top. The library knows nothing about terminals; the same core could drive
//! a web page or a desktop window.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the interactive session, prints   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Async, cloneable facade over the session controller      │
//! │  - Fetches outside the lock, last request wins              │
//! │  - Returns CmdResult / SessionView, never prints            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controller (controller.rs) + Fetcher (fetcher/)            │
//! │  - Current joke state machine, request tickets              │
//! │  - History and favorites (collection.rs)                    │
//! │  - Remote API with bundled fallback jokes                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//!
//! - A joke request always produces a joke: network and payload errors are
//!   absorbed by the fallback set.
//! - Unreadable stored data is treated as no data.
//! - Storage writes and clipboard operations return errors the caller can
//!   show and move past. Nothing here exits the process.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`controller`]: Session state and user intents
//! - [`collection`]: Bounded, de-duplicated, persisted collections
//! - [`fetcher`]: Remote joke source and fallback jokes
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`JokeRecord`, `Theme`, `CategoryFilter`)
//! - [`config`]: Configuration management
//! - [`clipboard`]: Copy and share capabilities
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod collection;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod store;
