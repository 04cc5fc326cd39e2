//! Shot-list domain: what the caller sends, what the model is asked for,
//! and how the model's answer is turned back into a response body.
//!
//! # Data Flow
//! ```text
//! request body
//!     → types.rs (ShotRequest: extract + validate script)
//!     → prompt.rs (fixed system/user templates, script interpolated verbatim)
//!     → [upstream completion call]
//!     → content.rs (pull choices[0].message.content, parse, degrade to empty list)
//!     → response body
//! ```
//!
//! # Design Decisions
//! - Model output that is not JSON becomes `{"shots": []}`, never an error
//!   status
//! - Any JSON output is relayed exactly as the model produced it

pub mod content;
pub mod prompt;
pub mod types;

pub use content::{extract_content, parse_shot_list, ParsedShots};
pub use types::{Shot, ShotList, ShotRequest, MIN_SCRIPT_CHARS};
