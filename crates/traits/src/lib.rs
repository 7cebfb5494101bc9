#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lookback-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod placement;
pub use placement::{PlacementKind, WindowPlacement};

mod source;
pub use source::SessionSource;

mod sink;
pub use sink::{SinkError, WindowSink};
