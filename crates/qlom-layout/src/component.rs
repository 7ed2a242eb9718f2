//! Geometry produced by components.

use serde::{Deserialize, Serialize};

use crate::geometry::Polygon;

/// A named polygon with its rendering attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyGeometry {
    /// Component name.
    pub component: String,
    /// Element name within the component.
    pub name: String,
    /// Outline in millimetres.
    pub polygon: Polygon,
    /// Subtract from the ground plane instead of adding metal.
    pub subtract: bool,
    /// Helper geometry, not fabricated.
    pub helper: bool,
    /// Layer number.
    pub layer: u32,
    /// Chip name.
    pub chip: String,
}

/// Something that can be turned into geometry.
pub trait Component {
    /// Build the component's polygons.
    fn make(&self, name: &str) -> crate::error::LayoutResult<Vec<PolyGeometry>>;
}
