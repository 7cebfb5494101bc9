//! # lookback
//!
//! Labeled lookback windows from per-user session streams.
//!
//! This crate provides a unified interface to the lookback crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Sessions, windows, user keys
//! - `traits`: Placement, source and sink abstractions
//! - `labels`: Positive label collection and interval search
//! - `placement`: Fixed and sliding window placement
//! - `windows`: Window generation and batch processing
//! - `utils`: Polars adapters
//! - `cli`: The `lookback-generate` binary and logging setup
//!
//! ## Example
//!
//! ```rust,ignore
//! use lookback::windows::prelude::*;
//!
//! let config = WindowingConfig::new(start, end, TimeDelta::days(7), TimeDelta::days(14));
//! let generator = WindowGenerator::sliding(config, TimeDelta::days(1))?;
//! let windows = generator.generate(&UserId::new("user-1"), &sessions)?;
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use lookback_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use lookback_traits as traits;
#[cfg(feature = "labels")]
#[doc(inline)]
pub use lookback_labels as labels;
#[cfg(feature = "placement")]
#[doc(inline)]
pub use lookback_placement as placement;
#[cfg(feature = "windows")]
#[doc(inline)]
pub use lookback_windows as windows;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use lookback_utils as utils;

#[cfg(feature = "cli")]
pub mod observability;

// Used by the `lookback-generate` binary only.
#[cfg(feature = "cli")]
use polars as _;
#[cfg(feature = "cli")]
use serde_json as _;
