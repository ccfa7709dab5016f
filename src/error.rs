use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced through the game lifecycle and startup.
///
/// The simulation itself never produces these: rejected moves and game
/// over are plain state.
#[derive(Debug, Error)]
pub enum ArcadeError {
    /// The drawing surface handed to `init` cannot fit the playfield.
    #[error("{game} needs at least {min_width}x{min_height} cells, surface is {width}x{height}")]
    SurfaceTooSmall {
        game: &'static str,
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    /// Config file exists but could not be parsed.
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
