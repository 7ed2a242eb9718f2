//! A rectangle with a rotated rectangular cut-out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qlom_units::UnitRegistry;

use crate::component::{Component, PolyGeometry};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::Polygon;
use crate::length::Length;

/// The cut-out of a [`RectangleHollowOptions`], placed relative to the
/// outer rectangle's centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnerRectOptions {
    /// Width of the cut-out.
    pub width: Length,
    /// Height of the cut-out.
    pub height: Length,
    /// Horizontal offset from the outer centre.
    pub offset_x: Length,
    /// Vertical offset from the outer centre.
    pub offset_y: Length,
    /// Rotation about its own centre (degrees).
    pub rotation: f64,
}

impl Default for InnerRectOptions {
    fn default() -> Self {
        Self {
            width: Length::um(250.0),
            height: Length::um(100.0),
            offset_x: Length::um(40.0),
            offset_y: Length::um(-20.0),
            rotation: 15.0,
        }
    }
}

/// Options of a hollow rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleHollowOptions {
    /// Outer width.
    pub width: Length,
    /// Outer height.
    pub height: Length,
    /// Centre x.
    pub pos_x: Length,
    /// Centre y.
    pub pos_y: Length,
    /// Rotation of the whole shape about its bounding-box centre (degrees).
    pub rotation: f64,
    /// Subtract from the ground plane.
    pub subtract: bool,
    /// Helper geometry.
    pub helper: bool,
    /// Chip name.
    pub chip: String,
    /// Layer number.
    pub layer: u32,
    /// Cut-out.
    pub inner: InnerRectOptions,
}

impl Default for RectangleHollowOptions {
    fn default() -> Self {
        Self {
            width: Length::um(500.0),
            height: Length::um(300.0),
            pos_x: Length::um(0.0),
            pos_y: Length::um(0.0),
            rotation: 0.0,
            subtract: false,
            helper: false,
            chip: "main".to_string(),
            layer: 1,
            inner: InnerRectOptions::default(),
        }
    }
}

fn checked_rect(name: &str, w: f64, h: f64, cx: f64, cy: f64) -> LayoutResult<Polygon> {
    if !(w > 0.0 && h > 0.0) {
        return Err(LayoutError::DegenerateRectangle {
            name: name.to_string(),
            width: w,
            height: h,
        });
    }
    Ok(Polygon::rectangle(w, h, cx, cy))
}

impl Component for RectangleHollowOptions {
    fn make(&self, name: &str) -> LayoutResult<Vec<PolyGeometry>> {
        let ureg = UnitRegistry::new();
        let width = self.width.to_mm(&ureg, "width")?;
        let height = self.height.to_mm(&ureg, "height")?;
        let x = self.pos_x.to_mm(&ureg, "pos_x")?;
        let y = self.pos_y.to_mm(&ureg, "pos_y")?;
        let inner_w = self.inner.width.to_mm(&ureg, "inner.width")?;
        let inner_h = self.inner.height.to_mm(&ureg, "inner.height")?;
        let dx = self.inner.offset_x.to_mm(&ureg, "inner.offset_x")?;
        let dy = self.inner.offset_y.to_mm(&ureg, "inner.offset_y")?;

        let outer = checked_rect(name, width, height, x, y)?;
        let inner = checked_rect(name, inner_w, inner_h, x + dx, y + dy)?
            .rotated(self.inner.rotation);
        if !inner.exterior.iter().all(|p| outer.contains(*p)) {
            return Err(LayoutError::InnerNotContained(name.to_string()));
        }

        let rect = outer.with_hole(&inner).rotated(self.rotation);
        debug!(name, area_mm2 = rect.area(), "Built hollow rectangle");

        Ok(vec![PolyGeometry {
            component: name.to_string(),
            name: "rect".to_string(),
            polygon: rect,
            subtract: self.subtract,
            helper: self.helper,
            layer: self.layer,
            chip: self.chip.clone(),
        }])
    }
}
