#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lookback-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod fixed;
pub use fixed::FixedPlacement;

mod sliding;
pub use sliding::SlidingPlacement;

mod placement;
pub use placement::Placement;

mod error;
pub use error::PlacementError;
