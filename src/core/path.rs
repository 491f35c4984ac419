//=========================================================================
// Path Model
//=========================================================================
//
// Ordered waypoints and the smooth curve the interior camera follows.
//
// Architecture:
//   WaypointConfig[] → Waypoint[] → PathCurve (centripetal Catmull-Rom)
//                                       ↓
//   PathModel::sample_position(t) / sample_tangent(t), t ∈ [0, 1]
//
// The curve runs through every waypoint. Two phantom control points,
// offset along the path's primary axis, shape the first and last
// segments; they are never sampled. Waypoint `i` sits at `t = i / (N-1)`.
//
// Sampling never fails: out-of-range parameters are clamped and an
// unbuilt model answers with the origin and the forward axis.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::content::Section;

//=== Constants ===========================================================

/// Distance of the phantom control points beyond the first/last waypoint.
pub const EXTENSION_OFFSET: f32 = 3.0;

/// Tangent returned when the curve is missing or degenerate.
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Parameter step for finite-difference tangents.
const TANGENT_DELTA: f32 = 1e-4;

/// Knot spacing below which a segment is treated as coincident.
const MIN_KNOT: f32 = 1e-4;

//=== PathError ===========================================================

/// Malformed waypoint configuration.
///
/// Fatal for path construction: no valid path exists to navigate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),

    #[error("waypoint {index} has {found} coordinates, expected 3")]
    MissingCoordinates { index: usize, found: usize },

    #[error("waypoint {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

//=== Waypoint ============================================================

/// A named, positioned stop along the navigable path.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub position: Vec3,
    pub section: Section,

    /// Yaw hint (radians) for the camera while parked at this waypoint.
    pub rotation_hint: f32,
}

impl Waypoint {
    pub fn new(position: Vec3, section: Section, rotation_hint: f32) -> Self {
        Self {
            position,
            section,
            rotation_hint,
        }
    }
}

/// Serialized waypoint as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointConfig {
    pub position: Vec<f32>,
    pub section: String,
    #[serde(default = "default_rotation")]
    pub rotation: f32,
}

fn default_rotation() -> f32 {
    std::f32::consts::FRAC_PI_2
}

impl WaypointConfig {
    pub fn new(position: [f32; 3], section: &str, rotation: f32) -> Self {
        Self {
            position: position.to_vec(),
            section: section.to_string(),
            rotation,
        }
    }

    /// Converts to a [`Waypoint`]; `index` is only used for error reporting.
    pub fn to_waypoint(&self, index: usize) -> Result<Waypoint, PathError> {
        let [x, y, z] = match self.position.as_slice() {
            [x, y, z, ..] => [*x, *y, *z],
            other => {
                return Err(PathError::MissingCoordinates {
                    index,
                    found: other.len(),
                })
            }
        };

        let section = self
            .section
            .parse::<Section>()
            .unwrap_or_else(|never| match never {});
        if let Section::Custom(tag) = &section {
            warn!(target: "scene", "Waypoint {} has unknown section {:?}", index, tag);
        }

        Ok(Waypoint::new(Vec3::new(x, y, z), section, self.rotation))
    }
}

//=== PathCurve ===========================================================

/// Centripetal Catmull-Rom curve through a fixed set of waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCurve {
    /// Phantom start, every waypoint, phantom end.
    control: Vec<Vec3>,
}

impl PathCurve {
    /// Builds the curve. Fails on fewer than 2 waypoints or non-finite positions.
    pub fn build(waypoints: &[Waypoint]) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooFewWaypoints(waypoints.len()));
        }

        if let Some(index) = waypoints.iter().position(|w| !w.position.is_finite()) {
            return Err(PathError::NonFinite { index });
        }

        let first = waypoints[0].position;
        let last = waypoints[waypoints.len() - 1].position;
        let axis = primary_axis(last - first);

        let mut control = Vec::with_capacity(waypoints.len() + 2);
        control.push(first - axis * EXTENSION_OFFSET);
        control.extend(waypoints.iter().map(|w| w.position));
        control.push(last + axis * EXTENSION_OFFSET);

        debug!(
            target: "scene",
            "Built path curve through {} waypoints (primary axis {:?})",
            waypoints.len(),
            axis
        );

        Ok(Self { control })
    }

    /// Number of waypoints the curve passes through.
    pub fn waypoint_count(&self) -> usize {
        self.control.len() - 2
    }

    /// Control points including both phantom extensions.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control
    }

    /// Position at parameter `t` (clamped to [0, 1]).
    pub fn point(&self, t: f32) -> Vec3 {
        let segments = self.waypoint_count() - 1;
        let scaled = clamp_param(t) * segments as f32;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - segment as f32;

        let [p0, p1, p2, p3] = [
            self.control[segment],
            self.control[segment + 1],
            self.control[segment + 2],
            self.control[segment + 3],
        ];

        centripetal_segment(p0, p1, p2, p3, local)
    }

    /// Unit tangent at parameter `t` (clamped to [0, 1]).
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t = clamp_param(t);
        let before = (t - TANGENT_DELTA).max(0.0);
        let after = (t + TANGENT_DELTA).min(1.0);

        (self.point(after) - self.point(before))
            .try_normalize()
            .unwrap_or(FORWARD)
    }
}

//--- Curve Helpers -------------------------------------------------------

fn clamp_param(t: f32) -> f32 {
    if t.is_finite() {
        t.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Unit vector along the dominant component of `span`, pointing the same way.
fn primary_axis(span: Vec3) -> Vec3 {
    let abs = span.abs();
    if abs.max_element() < MIN_KNOT {
        return Vec3::X;
    }

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::X * span.x.signum()
    } else if abs.y >= abs.z {
        Vec3::Y * span.y.signum()
    } else {
        Vec3::Z * span.z.signum()
    }
}

/// Evaluates the segment between `p1` and `p2` at `u ∈ [0, 1]`.
///
/// Knot spacing is the square root of the chord length (alpha = 0.5).
fn centripetal_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    let dt1 = p1.distance_squared(p2).powf(0.25);
    if dt1 < MIN_KNOT {
        // Degenerate segment: the curve rests on the waypoint.
        return p1;
    }
    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);

    if dt0 < MIN_KNOT {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    // Cubic Hermite between p1 and p2
    let c0 = p1;
    let c1 = m1;
    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2;
    let c3 = 2.0 * p1 - 2.0 * p2 + m1 + m2;

    c0 + u * (c1 + u * (c2 + u * c3))
}

//=== PathModel ===========================================================

/// Waypoints plus their curve, with glitch-free sampling.
///
/// A model without a curve (before construction, or after a failed build
/// replaced by the fallback) still answers every query with safe defaults.
#[derive(Debug, Clone, Default)]
pub struct PathModel {
    waypoints: Vec<Waypoint>,
    curve: Option<PathCurve>,
}

impl PathModel {
    /// Model with no waypoints and no curve.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the curve for `waypoints`.
    pub fn build(waypoints: Vec<Waypoint>) -> Result<Self, PathError> {
        let curve = PathCurve::build(&waypoints)?;
        Ok(Self {
            waypoints,
            curve: Some(curve),
        })
    }

    /// Converts and builds from serialized waypoints.
    pub fn from_config(configs: &[WaypointConfig]) -> Result<Self, PathError> {
        let waypoints = configs
            .iter()
            .enumerate()
            .map(|(index, config)| config.to_waypoint(index))
            .collect::<Result<Vec<_>, _>>()?;

        Self::build(waypoints)
    }

    /// Returns true once a curve exists.
    pub fn is_ready(&self) -> bool {
        self.curve.is_some()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoint(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn curve(&self) -> Option<&PathCurve> {
        self.curve.as_ref()
    }

    /// Curve parameter of waypoint `index`: `index / (N-1)`, clamped.
    pub fn param_for_index(&self, index: usize) -> f32 {
        match self.waypoints.len() {
            0 | 1 => 0.0,
            n => (index as f32 / (n - 1) as f32).clamp(0.0, 1.0),
        }
    }

    /// Position at `t`; origin when no curve exists.
    pub fn sample_position(&self, t: f32) -> Vec3 {
        self.curve
            .as_ref()
            .map(|curve| curve.point(t))
            .unwrap_or(Vec3::ZERO)
    }

    /// Unit tangent at `t`; [`FORWARD`] when no curve exists.
    pub fn sample_tangent(&self, t: f32) -> Vec3 {
        self.curve
            .as_ref()
            .map(|curve| curve.tangent(t))
            .unwrap_or(FORWARD)
    }
}

//=== Tests ===============================================================
