//! Board Model - the input data contract of the engine
//!
//! A board arrives already structured: an ordered layer stack, mounted
//! components, routed traces and a closed outline. Nothing in the engine
//! mutates a board once it has been supplied.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BoardModelIssue, Result};

/// 24-bit RGB color, `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    pub fn r(&self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Normalized color channels
    pub fn to_linear(&self) -> [f32; 3] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
        ]
    }

    /// Hex form used by the layer legend, e.g. `#00ff00`
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One slab of the stackup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub color: Rgb,
    pub thickness: f32,
    /// Stacking coordinate in board space
    pub z: f32,
}

/// A mounted part, positioned by its center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Extent along x
    pub width: f32,
    /// Extent along y (the depth axis)
    pub height: f32,
    /// Extent along z
    pub depth: f32,
}

/// A polyline routed on one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub points: Vec<Point2<f32>>,
    #[serde(rename = "layerIndex", alias = "layer")]
    pub layer_index: usize,
    pub width: f32,
}

/// Legend row shown next to the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Rgb,
}

/// Complete board description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBoardModel")]
pub struct BoardModel {
    pub layers: Vec<Layer>,
    pub components: Vec<Component>,
    pub traces: Vec<Trace>,
    pub board_outline: Vec<Point2<f32>>,
}

/// Wire form where every top-level sequence may be absent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoardModel {
    layers: Option<Vec<Layer>>,
    components: Option<Vec<Component>>,
    traces: Option<Vec<Trace>>,
    board_outline: Option<Vec<Point2<f32>>>,
}

impl TryFrom<RawBoardModel> for BoardModel {
    type Error = BoardModelIssue;

    fn try_from(raw: RawBoardModel) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            layers: raw.layers.ok_or(BoardModelIssue::MissingField("layers"))?,
            components: raw.components.ok_or(BoardModelIssue::MissingField("components"))?,
            traces: raw.traces.ok_or(BoardModelIssue::MissingField("traces"))?,
            board_outline: raw
                .board_outline
                .ok_or(BoardModelIssue::MissingField("boardOutline"))?,
        })
    }
}

impl BoardModel {
    /// Decode the JSON form of a board.
    ///
    /// A missing top-level sequence is reported as `InvalidBoardModel`, while
    /// malformed JSON is reported as a `Json` error.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawBoardModel = serde_json::from_str(json)?;
        let board = BoardModel::try_from(raw)?;
        board.validate()?;
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the structural invariants the geometry builder relies on
    pub fn validate(&self) -> std::result::Result<(), BoardModelIssue> {
        let layer_count = self.layers.len();
        for (trace, t) in self.traces.iter().enumerate() {
            if t.layer_index >= layer_count {
                return Err(BoardModelIssue::TraceLayerOutOfRange {
                    trace,
                    layer_index: t.layer_index,
                    layer_count,
                });
            }
        }
        Ok(())
    }

    /// True when the outline's first and last points coincide
    pub fn is_outline_closed(&self) -> bool {
        match (self.board_outline.first(), self.board_outline.last()) {
            (Some(first), Some(last)) => self.board_outline.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Number of scene elements a rebuild produces for this board
    pub fn element_count(&self) -> usize {
        self.layers.len() + self.components.len() + self.traces.len()
    }

    /// Read-only projection of the layer colors for the legend
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.layers
            .iter()
            .map(|layer| LegendEntry {
                name: layer.name.clone(),
                color: layer.color,
            })
            .collect()
    }
}
