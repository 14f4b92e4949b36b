use std::fmt;

/// Result type used throughout the engine
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors that can occur while building or rendering a board
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    #[error("Invalid board model: {0}")]
    InvalidBoardModel(BoardModelIssue),

    #[error("Rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Rendering surface lost: {0}")]
    SurfaceLost(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What exactly is wrong with a rejected board model
#[derive(Debug, Clone, PartialEq)]
pub enum BoardModelIssue {
    MissingField(&'static str),
    TraceLayerOutOfRange {
        trace: usize,
        layer_index: usize,
        layer_count: usize,
    },
}

impl fmt::Display for BoardModelIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardModelIssue::MissingField(field) => write!(f, "missing field `{}`", field),
            BoardModelIssue::TraceLayerOutOfRange { trace, layer_index, layer_count } => write!(
                f,
                "trace-{} references layer {} but the board has {} layers",
                trace, layer_index, layer_count
            ),
        }
    }
}

impl From<BoardModelIssue> for ViewerError {
    fn from(issue: BoardModelIssue) -> Self {
        ViewerError::InvalidBoardModel(issue)
    }
}
