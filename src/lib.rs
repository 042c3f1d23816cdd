//! # Group Loader
//!
//! A bounded-concurrency scheduler for loading named groups of resources
//! through an external backend, with per-item retries and per-group progress
//! reporting.
//!
//! ## Core Problem Solved
//!
//! Applications that load assets in batches (UI skins, level data, config
//! bundles) need more than a plain task queue:
//!
//! - **Bounded Concurrency**: Never more than `concurrency_limit` backend loads in flight
//! - **Fairness Across Groups**: A huge group submitted first must not starve a small one behind it
//! - **Partial Failure**: Failed items are retried ahead of fresh work, up to a budget
//! - **Exact Settlement**: Each group reports completion or failure exactly once
//!
//! ## Key Features
//!
//! - **Round-Robin Dispatch**: Active groups are served in turn from a fair queue
//! - **Fast-Tracked Retries**: Failed items jump the queue until `max_retry_times` is exceeded
//! - **Ordered Signals**: Progress, item errors and group outcomes arrive in bookkeeping order
//! - **Pluggable Backends**: Anything implementing [`core::LoadBackend`]; in-memory and filesystem backends ship in [`infra`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use group_loader::builders::LoaderBuilder;
//! use group_loader::core::{ChannelEventSink, LoaderEvent, ResourceItem};
//! use group_loader::infra::FileSystemBackend;
//!
//! let (sink, mut events) = ChannelEventSink::channel();
//! let loader = LoaderBuilder::new(FileSystemBackend::new("assets"))
//!     .concurrency_limit(4)
//!     .event_sink(sink)
//!     .build()?;
//!
//! loader.load_group(
//!     vec![
//!         ResourceItem::new("bg", "ui/bg.png", "image"),
//!         ResourceItem::new("font", "ui/font.fnt", "font"),
//!     ],
//!     "ui",
//! );
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         LoaderEvent::GroupProgress { loaded_count, total, .. } => {
//!             println!("ui: {loaded_count}/{total}");
//!         }
//!         LoaderEvent::GroupComplete { .. } | LoaderEvent::GroupLoadError { .. } => break,
//!         _ => {}
//!     }
//! }
//! ```
//!
//! For complete examples, see:
//! - `tests/loader_test.rs` - End-to-end scheduling scenarios

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions: items, groups, retries and the loader.
pub mod core;
/// Configuration models for the loader.
pub mod config;
/// Builders to construct loaders from configuration.
pub mod builders;
/// Infrastructure adapters for load backends and result stores.
pub mod infra;
/// Runtime adapters and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
