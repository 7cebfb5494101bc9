#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lookback-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod sessions;
pub use sessions::{SESSION_COLUMNS, sessions_from_frame};

mod summary;
pub use summary::{label_rate, windows_to_frame};

mod error;
pub use error::UtilsError;
