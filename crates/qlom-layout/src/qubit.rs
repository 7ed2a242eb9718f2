//! Qubit options with named connection pads.
//!
//! Each qubit class owns a default pad template. A pad declared on a qubit
//! starts as a copy of the template and is then updated with the pad's own
//! entries, so a pad only lists what differs from the template.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use qlom_units::UnitRegistry;

use crate::component::{Component, PolyGeometry};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::Polygon;
use crate::length::Length;

/// Option entries of one connection pad, keyed by option name.
pub type PadOptions = BTreeMap<String, Length>;

/// Options shared by every qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QubitOptions {
    /// Qubit class, used to look up the pad template.
    pub class_name: String,
    /// Centre x.
    pub pos_x: Length,
    /// Centre y.
    pub pos_y: Length,
    /// Chip name.
    pub chip: String,
    /// Layer number.
    pub layer: u32,
    /// Declared connection pads.
    pub connection_pads: BTreeMap<String, PadOptions>,
}

impl Default for QubitOptions {
    fn default() -> Self {
        Self {
            class_name: "TransmonPocket".to_string(),
            pos_x: Length::um(0.0),
            pos_y: Length::um(0.0),
            chip: "main".to_string(),
            layer: 1,
            connection_pads: BTreeMap::new(),
        }
    }
}

impl QubitOptions {
    /// Add or update connection pads before resolution.
    pub fn with_connection_pads(mut self, pads: BTreeMap<String, PadOptions>) -> Self {
        self.connection_pads.extend(pads);
        self
    }

    /// Resolve every declared pad against `template`.
    ///
    /// A qubit without pads needs no template.
    pub fn resolve_connection_pads(
        &self,
        template: Option<&PadOptions>,
    ) -> LayoutResult<BTreeMap<String, PadOptions>> {
        if self.connection_pads.is_empty() {
            return Ok(BTreeMap::new());
        }
        let template =
            template.ok_or_else(|| LayoutError::MissingPadTemplate(self.class_name.clone()))?;

        Ok(self
            .connection_pads
            .iter()
            .map(|(name, own)| {
                let mut pad = template.clone();
                pad.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
                debug!(pad = %name, entries = pad.len(), "Resolved connection pad");
                (name.clone(), pad)
            })
            .collect())
    }
}

/// Default pad template of the pocket transmon.
pub fn pocket_pad_template() -> PadOptions {
    [
        ("pad_width", Length::um(125.0)),
        ("pad_height", Length::um(30.0)),
        ("pad_gap", Length::um(15.0)),
        ("cpw_width", Length::um(10.0)),
        ("cpw_gap", Length::um(6.0)),
        ("loc_w", Length::Mm(1.0)),
        ("loc_h", Length::Mm(1.0)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// A pocket transmon: two pads across a junction, plus its connection pads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmonPocketOptions {
    /// Common qubit options.
    #[serde(flatten)]
    pub qubit: QubitOptions,
    /// Width of each qubit pad.
    pub pad_width: Length,
    /// Height of each qubit pad.
    pub pad_height: Length,
    /// Gap between the two qubit pads.
    pub pad_gap: Length,
    /// Pad template; `None` makes declared connection pads an error.
    pub pad_template: Option<PadOptions>,
}

impl Default for TransmonPocketOptions {
    fn default() -> Self {
        Self {
            qubit: QubitOptions::default(),
            pad_width: Length::um(455.0),
            pad_height: Length::um(90.0),
            pad_gap: Length::um(30.0),
            pad_template: Some(pocket_pad_template()),
        }
    }
}

impl Component for TransmonPocketOptions {
    fn make(&self, name: &str) -> LayoutResult<Vec<PolyGeometry>> {
        let ureg = UnitRegistry::new();
        let x = self.qubit.pos_x.to_mm(&ureg, "pos_x")?;
        let y = self.qubit.pos_y.to_mm(&ureg, "pos_y")?;
        let pad_w = self.pad_width.to_mm(&ureg, "pad_width")?;
        let pad_h = self.pad_height.to_mm(&ureg, "pad_height")?;
        let gap = self.pad_gap.to_mm(&ureg, "pad_gap")?;

        let geometry = |element: &str, polygon: Polygon| PolyGeometry {
            component: name.to_string(),
            name: element.to_string(),
            polygon,
            subtract: false,
            helper: false,
            layer: self.qubit.layer,
            chip: self.qubit.chip.clone(),
        };

        let offset = (gap + pad_h) / 2.0;
        let mut out = vec![
            geometry("pad_top", Polygon::rectangle(pad_w, pad_h, x, y + offset)),
            geometry("pad_bot", Polygon::rectangle(pad_w, pad_h, x, y - offset)),
        ];

        let pads = self
            .qubit
            .resolve_connection_pads(self.pad_template.as_ref())?;
        for (pad_name, opts) in &pads {
            let get = |key: &str| -> LayoutResult<f64> {
                opts.get(key)
                    .map_or(Ok(0.0), |len| len.to_mm(&ureg, &format!("{pad_name}.{key}")))
            };
            let w = get("pad_width")?;
            let h = get("pad_height")?;
            let pad_gap = get("pad_gap")?;
            let loc_w = get("loc_w")?;
            let loc_h = get("loc_h")?;
            // loc_w/loc_h pick the quadrant (+1 or −1) the pad sits in.
            let cx = x + loc_w.signum() * (pad_w - w) / 2.0;
            let cy = y + loc_h.signum() * (offset + pad_h / 2.0 + pad_gap + h / 2.0);
            out.push(geometry(
                &format!("{pad_name}_connector_pad"),
                Polygon::rectangle(w, h, cx, cy),
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pads(names: &[&str]) -> BTreeMap<String, PadOptions> {
        names
            .iter()
            .map(|n| (n.to_string(), PadOptions::new()))
            .collect()
    }

    #[test]
    fn test_no_pads_needs_no_template() {
        let q = QubitOptions::default();
        assert!(q.resolve_connection_pads(None).unwrap().is_empty());
    }

    #[test]
    fn test_missing_template() {
        let q = QubitOptions::default().with_connection_pads(pads(&["readout"]));
        assert!(matches!(
            q.resolve_connection_pads(None),
            Err(LayoutError::MissingPadTemplate(_))
        ));
    }

    #[test]
    fn test_pad_overrides_template() {
        let mut own = PadOptions::new();
        own.insert("loc_h".into(), Length::Mm(-1.0));
        let mut declared = BTreeMap::new();
        declared.insert("bus".to_string(), own);

        let q = QubitOptions::default().with_connection_pads(declared);
        let resolved = q
            .resolve_connection_pads(Some(&pocket_pad_template()))
            .unwrap();
        let bus = &resolved["bus"];
        assert_eq!(bus["loc_h"], Length::Mm(-1.0));
        assert_eq!(bus["pad_width"], Length::um(125.0));
        assert_eq!(bus.len(), pocket_pad_template().len());
    }

    #[test]
    fn test_pocket_make() {
        let mut opts = TransmonPocketOptions::default();
        opts.qubit = opts.qubit.with_connection_pads(pads(&["readout"]));
        let geoms = opts.make("Q1").unwrap();
        let names: Vec<&str> = geoms.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["pad_top", "pad_bot", "readout_connector_pad"]);
        assert!(geoms[2].polygon.center()[1] > geoms[0].polygon.center()[1]);
    }
}
