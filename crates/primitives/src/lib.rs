#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lookback-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod user;
pub use user::UserId;

mod session;
pub use session::Session;

mod window;
pub use window::LookbackWindow;

/// Instant type used for every point on the time axis.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Re-export the signed duration type used for all time offsets.
pub use chrono::TimeDelta;
