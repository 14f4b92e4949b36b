//! Scene - the renderable elements derived from a board
//!
//! A scene is rebuilt wholesale on every relevant control change; elements
//! are owned by exactly one scene and never carried over into the next one.

use nalgebra::{Point3, Vector3};
use std::fmt;

use crate::board::Rgb;
use crate::view_mode::ViewMode;

/// Stable identifier of a scene element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Layer(usize),
    Component(usize),
    Trace(usize),
    Outline,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ElementId::Layer(i) => write!(f, "layer-{}", i),
            ElementId::Component(i) => write!(f, "component-{}", i),
            ElementId::Trace(i) => write!(f, "trace-{}", i),
            ElementId::Outline => f.write_str("outline"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box centered on the element position, full extents per axis
    Cuboid { size: Vector3<f32> },
    /// Line strip in element-local coordinates
    Polyline { points: Vec<Point3<f32>>, closed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    /// 0.0 = invisible, 1.0 = opaque
    pub opacity: f32,
    /// Screen-space width for line geometry, in pixels
    pub line_width: f32,
}

impl Material {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            opacity: 1.0,
            line_width: 1.0,
        }
    }

    pub fn translucent(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
            line_width: 1.0,
        }
    }

    pub fn line(color: Rgb, line_width: f32) -> Self {
        Self {
            color,
            opacity: 1.0,
            line_width,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    pub id: ElementId,
    pub geometry: Geometry,
    pub material: Material,
    /// World position of the element origin
    pub position: Point3<f32>,
    pub visible: bool,
}

impl SceneElement {
    /// Polyline control points in world space; empty for boxes
    pub fn world_points(&self) -> Vec<Point3<f32>> {
        match &self.geometry {
            Geometry::Polyline { points, .. } => points
                .iter()
                .map(|p| self.position + p.coords)
                .collect(),
            Geometry::Cuboid { .. } => Vec::new(),
        }
    }
}

/// All renderable elements for one board in one view mode
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub view_mode: ViewMode,
    /// Layers first, then components, then traces, each in input order
    pub elements: Vec<SceneElement>,
    /// Optional board perimeter, kept out of `elements`
    pub outline: Option<SceneElement>,
}

impl Scene {
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            elements: Vec::new(),
            outline: None,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&SceneElement> {
        if id == ElementId::Outline {
            return self.outline.as_ref();
        }
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn visible_count(&self) -> usize {
        self.elements.iter().filter(|element| element.visible).count()
    }

    pub fn hidden_count(&self) -> usize {
        self.len() - self.visible_count()
    }

    /// Every element that should be drawn, outline included
    pub fn drawable(&self) -> impl Iterator<Item = &SceneElement> {
        self.elements
            .iter()
            .chain(self.outline.iter())
            .filter(|element| element.visible)
    }
}
