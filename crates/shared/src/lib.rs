use serde::{Deserialize, Serialize};

/// Unique identifier of an object in the scene
pub type ObjectId = String;

/// Local dimension axis of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimAxis {
    X,
    Y,
    Z,
}

/// Primitive kind with its dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Cube {
        width: f64,
        height: f64,
        depth: f64,
    },
    Plane {
        width: f64,
        depth: f64,
    },
    Cylinder {
        radius: f64,
        height: f64,
    },
    Disc {
        radius: f64,
    },
    Sphere {
        radius: f64,
    },
}

impl Primitive {
    /// Whether the kind exposes discrete corner/edge features
    pub fn has_discrete_corners(&self) -> bool {
        matches!(self, Primitive::Cube { .. } | Primitive::Plane { .. })
    }

    /// Whether the kind can be grabbed and manipulated in the viewport.
    /// Spheres live in the scene but offer no face/corner manipulation.
    pub fn is_manipulable(&self) -> bool {
        !matches!(self, Primitive::Sphere { .. })
    }

    /// Flat kinds must be promoted to a solid counterpart before extrusion
    pub fn needs_depth_promotion(&self) -> bool {
        matches!(self, Primitive::Plane { .. } | Primitive::Disc { .. })
    }

    /// Promote a flat kind to its solid counterpart with the given thickness.
    /// Solid kinds are returned unchanged.
    pub fn promoted(&self, thickness: f64) -> Primitive {
        match *self {
            Primitive::Plane { width, depth } => Primitive::Cube {
                width,
                height: thickness,
                depth,
            },
            Primitive::Disc { radius } => Primitive::Cylinder {
                radius,
                height: thickness,
            },
            ref other => other.clone(),
        }
    }

    /// Dimension that extrusion along the given local axis would change.
    /// None means the kind cannot be extruded along that axis.
    pub fn dimension_along(&self, axis: DimAxis) -> Option<f64> {
        match (self, axis) {
            (Primitive::Cube { width, .. }, DimAxis::X) => Some(*width),
            (Primitive::Cube { height, .. }, DimAxis::Y) => Some(*height),
            (Primitive::Cube { depth, .. }, DimAxis::Z) => Some(*depth),
            (Primitive::Cylinder { height, .. }, DimAxis::Y) => Some(*height),
            _ => None,
        }
    }

    /// Set the dimension along the given local axis. Returns false if the
    /// kind has no extrudable dimension on that axis.
    pub fn set_dimension_along(&mut self, axis: DimAxis, value: f64) -> bool {
        match (self, axis) {
            (Primitive::Cube { width, .. }, DimAxis::X) => {
                *width = value;
                true
            }
            (Primitive::Cube { height, .. }, DimAxis::Y) => {
                *height = value;
                true
            }
            (Primitive::Cube { depth, .. }, DimAxis::Z) => {
                *depth = value;
                true
            }
            (Primitive::Cylinder { height, .. }, DimAxis::Y) => {
                *height = value;
                true
            }
            _ => false,
        }
    }
}

/// World placement of a solid: position and XYZ Euler rotation in radians
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
        }
    }

    /// Transform at a position with no rotation
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
            rotation: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// A single solid manipulated directly by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub id: ObjectId,
    pub name: String,
    pub primitive: Primitive,
    pub transform: Transform,
    pub visible: bool,
}

/// Scene content: the flat list of solids
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    pub solids: Vec<Solid>,
}
