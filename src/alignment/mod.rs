//! Query/template alignment stages
//!
//! Three stages bring a cleaned query into a template's frame of reference
//! and price the remaining mismatch:
//!
//! - Key alignment: estimate and remove the gross pitch offset
//! - Tune following: adaptively track residual local drift (optional)
//! - DTW scoring: banded dynamic-time-warping alignment cost

pub mod dtw;
pub mod key;
pub mod tune;

pub use dtw::score;
pub use key::{apply_offset, estimate_offset};
pub use tune::follow_tune;
