//! Projection of a scene into depth-sorted 2D draw primitives
//!
//! Boxes are split into shaded triangles, polylines into screen-space line
//! strips, and everything is sorted back to front so a plain 2D painter can
//! draw the frame without a depth buffer.

use nalgebra::{Matrix4, Point3, Vector3};

use crate::camera::{Camera, ModelTransform};
use crate::geometry::{cuboid_corners, CUBOID_INDICES};
use crate::scene::{Geometry, Material, Scene, SceneElement};

/// Drawable region of the rendering surface, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// A viewport with positive finite area
    pub fn is_drawable(&self) -> bool {
        [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Screen-space primitive ready for a 2D painter
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Triangle {
        points: [[f32; 2]; 3],
        /// Unmultiplied RGBA
        color: [u8; 4],
        depth: f32,
    },
    Line {
        points: Vec<[f32; 2]>,
        color: [u8; 4],
        width: f32,
        depth: f32,
    },
}

impl DrawPrimitive {
    /// Distance in front of the camera; larger is farther
    pub fn depth(&self) -> f32 {
        match self {
            DrawPrimitive::Triangle { depth, .. } | DrawPrimitive::Line { depth, .. } => *depth,
        }
    }
}

/// Fixed light rig: ambient, one directional and one point light
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    /// Ambient color already scaled by its intensity
    pub ambient: [f32; 3],
    /// Position the directional light shines from, toward the origin
    pub directional_from: Vector3<f32>,
    pub directional_intensity: f32,
    pub point_position: Point3<f32>,
    pub point_intensity: f32,
    /// Distance at which the point light fades out completely
    pub point_range: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        let ambient = 0x40 as f32 / 255.0 * 0.6;
        Self {
            ambient: [ambient; 3],
            directional_from: Vector3::new(10.0, 10.0, 5.0),
            directional_intensity: 0.8,
            point_position: Point3::new(-10.0, -10.0, 10.0),
            point_intensity: 0.5,
            point_range: 100.0,
        }
    }
}

impl Lighting {
    /// Lambert shading of `material` for a surface at `at` facing `normal`
    pub fn shade(&self, material: &Material, at: &Point3<f32>, normal: &Vector3<f32>) -> [u8; 4] {
        let mut light = self.ambient;

        let directional = normal.dot(&self.directional_from.normalize()).max(0.0) * self.directional_intensity;

        let to_point = self.point_position - at;
        let distance = to_point.magnitude();
        let falloff = (1.0 - distance / self.point_range).max(0.0);
        let point = if distance > 0.0 {
            normal.dot(&(to_point / distance)).max(0.0) * self.point_intensity * falloff
        } else {
            0.0
        };

        for channel in light.iter_mut() {
            *channel += directional + point;
        }

        let base = material.color.to_linear();
        [
            to_byte(base[0] * light[0]),
            to_byte(base[1] * light[1]),
            to_byte(base[2] * light[2]),
            to_byte(material.opacity),
        ]
    }
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn unlit(material: &Material) -> [u8; 4] {
    let c = material.color;
    [c.r(), c.g(), c.b(), to_byte(material.opacity)]
}

/// Everything needed to map world points onto the viewport
struct Projector {
    view: Matrix4<f32>,
    view_projection: Matrix4<f32>,
    model: Matrix4<f32>,
    viewport: Viewport,
}

impl Projector {
    fn to_world(&self, point: &Point3<f32>) -> Point3<f32> {
        self.model.transform_point(point)
    }

    /// Screen position of a world point, `None` when it is behind the camera
    fn to_screen(&self, world: &Point3<f32>) -> Option<[f32; 2]> {
        let clip = self.view_projection * world.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some([
            self.viewport.x + (ndc_x + 1.0) * 0.5 * self.viewport.width,
            // Flip Y for screen space
            self.viewport.y + (1.0 - ndc_y) * 0.5 * self.viewport.height,
        ])
    }

    fn depth(&self, world: &Point3<f32>) -> f32 {
        -self.view.transform_point(world).z
    }
}

/// Project every drawable element of `scene`, sorted back to front
pub fn project_scene(
    scene: &Scene,
    camera: &Camera,
    model: &ModelTransform,
    viewport: Viewport,
    lighting: &Lighting,
) -> Vec<DrawPrimitive> {
    if !viewport.is_drawable() {
        return Vec::new();
    }
    let projector = Projector {
        view: camera.view_matrix(),
        view_projection: camera.view_projection(viewport.aspect()),
        model: model.matrix(),
        viewport,
    };

    let mut primitives = Vec::new();
    for element in scene.drawable() {
        match &element.geometry {
            Geometry::Cuboid { size } => {
                project_cuboid(&projector, element, size, lighting, &mut primitives)
            }
            Geometry::Polyline { points, closed } => {
                project_polyline(&projector, element, points, *closed, &mut primitives)
            }
        }
    }

    // Sort by depth (back to front)
    primitives.sort_by(|a, b| b.depth().partial_cmp(&a.depth()).unwrap_or(std::cmp::Ordering::Equal));
    primitives
}

fn project_cuboid(
    projector: &Projector,
    element: &SceneElement,
    size: &Vector3<f32>,
    lighting: &Lighting,
    out: &mut Vec<DrawPrimitive>,
) {
    let corners = cuboid_corners(element.position, *size).map(|c| projector.to_world(&c));
    let center = projector.to_world(&element.position);

    for triangle in CUBOID_INDICES.chunks(3) {
        let [a, b, c] = [
            corners[triangle[0] as usize],
            corners[triangle[1] as usize],
            corners[triangle[2] as usize],
        ];
        let (Some(pa), Some(pb), Some(pc)) = (
            projector.to_screen(&a),
            projector.to_screen(&b),
            projector.to_screen(&c),
        ) else {
            continue;
        };

        let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
        // zero-thickness slabs have degenerate side faces
        let color = match (b - a).cross(&(c - a)).try_normalize(1e-12) {
            Some(n) => {
                let outward = if n.dot(&(centroid - center)) < 0.0 { -n } else { n };
                lighting.shade(&element.material, &centroid, &outward)
            }
            None => unlit(&element.material),
        };

        out.push(DrawPrimitive::Triangle {
            points: [pa, pb, pc],
            color,
            depth: projector.depth(&centroid),
        });
    }
}

fn project_polyline(
    projector: &Projector,
    element: &SceneElement,
    points: &[Point3<f32>],
    closed: bool,
    out: &mut Vec<DrawPrimitive>,
) {
    let mut world: Vec<Point3<f32>> = points
        .iter()
        .map(|p| projector.to_world(&(element.position + p.coords)))
        .collect();
    if closed {
        if let Some(&first) = world.first() {
            world.push(first);
        }
    }

    let color = unlit(&element.material);
    let mut run: Vec<[f32; 2]> = Vec::new();
    let mut run_depth = 0.0;
    // Split the strip wherever a point falls behind the camera
    for point in world.iter().map(Some).chain(std::iter::once(None)) {
        match point.and_then(|p| projector.to_screen(p).map(|s| (s, projector.depth(p)))) {
            Some((screen, depth)) => {
                run.push(screen);
                run_depth += depth;
            }
            None => {
                if run.len() >= 2 {
                    let depth = run_depth / run.len() as f32;
                    out.push(DrawPrimitive::Line {
                        points: std::mem::take(&mut run),
                        color,
                        width: element.material.line_width,
                        depth,
                    });
                }
                run.clear();
                run_depth = 0.0;
            }
        }
    }
}
