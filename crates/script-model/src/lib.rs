//! Funheat Script Model
//!
//! Defines the core data contracts for motion scripts ("funscripts"):
//! - **Actions:** Timestamped position commands with derived kinematics
//! - **Script:** Document metadata plus the ordered action list
//! - **Validation:** Sorting and trimming of actions against a scene duration
//!
//! Timestamps are integer milliseconds from media start; positions are
//! integer percentages in `[0, 100]`.

pub mod action;
pub mod script;

pub use action::*;
pub use script::*;
