//! Built-in demo board
//!
//! The fixed four-layer description the viewer shows before any board file
//! has been opened.

use nalgebra::Point2;

use crate::board::{BoardModel, Component, Layer, Rgb, Trace};

pub fn demo_board() -> BoardModel {
    let layer = |name: &str, color: u32, thickness: f32, z: f32| Layer {
        name: name.to_string(),
        color: Rgb::new(color),
        thickness,
        z,
    };
    let component = |x: f32, y: f32, width: f32, height: f32, depth: f32| Component {
        x,
        y,
        z: 1.2,
        width,
        height,
        depth,
    };
    let points = |pts: &[(f32, f32)]| -> Vec<Point2<f32>> {
        pts.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    };

    BoardModel {
        layers: vec![
            layer("Top Copper", 0x00ff00, 0.035, 1.0),
            layer("Dielectric", 0x8b4513, 0.2, 0.5),
            layer("Bottom Copper", 0x00aa00, 0.035, 0.0),
            layer("Solder Mask", 0x0066cc, 0.02, 1.1),
        ],
        components: vec![
            component(2.0, 2.0, 1.0, 0.5, 0.3),
            component(-2.0, 1.0, 0.8, 0.8, 0.4),
            component(0.0, -2.0, 1.5, 0.6, 0.2),
        ],
        traces: vec![
            Trace {
                points: points(&[(0.0, 0.0), (2.0, 2.0), (4.0, 1.0)]),
                layer_index: 0,
                width: 0.1,
            },
            Trace {
                points: points(&[(-1.0, -1.0), (1.0, 1.0), (3.0, -1.0)]),
                layer_index: 2,
                width: 0.15,
            },
        ],
        board_outline: points(&[(-5.0, -3.0), (5.0, -3.0), (5.0, 3.0), (-5.0, 3.0), (-5.0, -3.0)]),
    }
}
