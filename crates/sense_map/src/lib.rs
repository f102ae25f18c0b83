//! Presentation projector for the Sense Circulation Map.
//!
//! [`project`] turns a case record (and, when present, its generated hypotheses) into a
//! [`RenderTree`] of boxes, connectors and text placed on a fixed canvas. Coordinates come
//! from the lookup tables in [`layout`]; painting is left to the caller.

pub mod layout;
pub mod project;

pub use layout::{Point, Rect};
pub use project::{
    map_is_visible, parse_indicators, partition_by_level, project, ConnectorKind, NodeKind,
    RenderTree, SenseMap,
};
