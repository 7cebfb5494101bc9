#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lookback-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{WindowingConfig, WindowingParams};

mod validation;
pub use validation::validate_sessions;

mod generator;
pub use generator::{StopReason, WalkState, WindowGenerator, Windows};

mod batch;
pub use batch::{BatchConfig, BatchOutput, BatchProcessor, ErrorMode, UserFailure, UserWindows};

mod error;
pub use error::{ConfigError, WindowError};

/// Re-export commonly used types.
pub mod prelude {
    pub use lookback_placement::{FixedPlacement, Placement, SlidingPlacement};
    pub use lookback_primitives::{LookbackWindow, Session, TimeDelta, Timestamp, UserId};
    pub use lookback_traits::{SessionSource, WindowPlacement, WindowSink};

    pub use super::{
        BatchConfig, BatchProcessor, ErrorMode, WindowError, WindowGenerator, WindowingConfig,
    };
}
