#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lookback-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod collect;
pub use collect::{LabelTimes, collect_positive_label_times};

mod interval;
pub use interval::first_instant_in_interval;

mod error;
pub use error::LabelError;
