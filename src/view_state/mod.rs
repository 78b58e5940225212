//! View-state layer - layout, scrolling and frame planning
//!
//! Pure state for the list view. Nothing here touches the terminal; the
//! `view` module draws what [`frame::plan_frame`] decides.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (LineOffset, ViewportDimensions)
//! - `wrap`: width-aware character wrapping shared by measuring and drawing
//! - `layout_cache`: id-keyed expansion flags and cached heights
//! - `viewport`: Following/Pinned auto-tail state machine
//! - `frame`: virtualized placement of the filtered entries

pub mod frame;
pub mod layout_cache;
pub mod types;
pub mod viewport;
pub mod wrap;

pub use frame::{plan_frame, FramePlan, Hit, Placement};
pub use layout_cache::{EntryLayout, LayoutCache, Measured};
pub use types::{LineOffset, ViewportDimensions};
pub use viewport::{TailMode, Viewport};
