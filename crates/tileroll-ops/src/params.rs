//! Roll parameters, their UI metadata and persistence.
//!
//! The operator exposes two 2-D controls: the user-facing `roll` offset
//! and a hidden `origin` it is measured from. Hosts save and restore them
//! generically; [`RollParams::to_yaml`] / [`RollParams::from_yaml`] provide
//! that round trip.
//!
//! ```rust
//! use tileroll_ops::RollParams;
//!
//! let params = RollParams::from_yaml("roll: [12.0, -4.5]").unwrap();
//! assert_eq!(params.roll, [12.0, -4.5]);
//! assert_eq!(params.origin, [0.0, 0.0]);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::hash::CacheHash;
use crate::OpsResult;

/// Tooltip shown on the `roll` control.
pub const ROLL_TOOLTIP: &str = "The number of pixels by which the canvas has to be offset. \
This is rounded to the nearest number of pixels, no filtering is done.";

/// Persisted parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RollParams {
    /// Offset to apply, in pixels. May be fractional; rounded before use.
    pub roll: [f64; 2],
    /// Reference origin subtracted from `roll`. Not user-editable.
    pub origin: [f64; 2],
}

impl RollParams {
    /// Creates parameters rolling by (x, y) from the default origin.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            roll: [x, y],
            origin: [0.0, 0.0],
        }
    }

    /// Returns a copy with a different origin.
    pub const fn with_origin(mut self, x0: f64, y0: f64) -> Self {
        self.origin = [x0, y0];
        self
    }

    /// Roll offset as a vector.
    #[inline]
    pub fn roll_vec(&self) -> DVec2 {
        DVec2::from_array(self.roll)
    }

    /// Origin as a vector.
    #[inline]
    pub fn origin_vec(&self) -> DVec2 {
        DVec2::from_array(self.origin)
    }

    /// Parses parameters saved by [`RollParams::to_yaml`]. Missing fields
    /// take their defaults.
    pub fn from_yaml(yaml: &str) -> OpsResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes the parameters for host persistence.
    pub fn to_yaml(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Appends the parameter values to a cache key.
    pub fn append(&self, hash: &mut CacheHash) {
        for v in self.roll.iter().chain(&self.origin) {
            hash.append_f64(*v);
        }
    }
}

/// Description of a host-visible control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knob {
    /// Storage name, matching the [`RollParams`] field.
    pub name: &'static str,
    /// Label shown in the UI.
    pub label: &'static str,
    /// Hover help, if any.
    pub tooltip: Option<&'static str>,
    /// Hidden controls are persisted but never shown.
    pub hidden: bool,
    /// Default value.
    pub default: [f64; 2],
}

/// Controls published by the roll operator.
pub const KNOBS: [Knob; 2] = [
    Knob {
        name: "roll",
        label: "roll",
        tooltip: Some(ROLL_TOOLTIP),
        hidden: false,
        default: [0.0, 0.0],
    },
    Knob {
        name: "origin",
        label: "origin",
        tooltip: None,
        hidden: true,
        default: [0.0, 0.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_roundtrip() {
        let params = RollParams::new(3.25, -7.0).with_origin(1.0, 0.5);
        let yaml = params.to_yaml().unwrap();
        assert!(yaml.contains("roll"));
        assert_eq!(RollParams::from_yaml(&yaml).unwrap(), params);
    }

    #[test]
    fn test_yaml_defaults() {
        assert_eq!(RollParams::from_yaml("{}").unwrap(), RollParams::default());
        let p = RollParams::from_yaml("origin: [2.0, 2.0]").unwrap();
        assert_eq!(p.roll, [0.0, 0.0]);
        assert_eq!(p.origin_vec(), DVec2::new(2.0, 2.0));
    }

    #[test]
    fn test_yaml_rejects_garbage() {
        assert!(RollParams::from_yaml("roll: not-a-vector").is_err());
    }

    #[test]
    fn test_knobs_match_fields() {
        let visible: Vec<_> = KNOBS.iter().filter(|k| !k.hidden).map(|k| k.name).collect();
        assert_eq!(visible, vec!["roll"]);
        assert!(KNOBS.iter().all(|k| k.default == [0.0, 0.0]));
    }

    #[test]
    fn test_params_change_cache_key() {
        let mut a = CacheHash::new();
        RollParams::new(1.0, 0.0).append(&mut a);
        let mut b = CacheHash::new();
        RollParams::new(0.0, 1.0).append(&mut b);
        assert_ne!(a.key(), b.key());
    }
}
