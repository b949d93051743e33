pub mod composite;
pub mod control;
pub mod error;
pub mod imageset;
pub mod pan;
pub mod playback;
pub mod session;
pub mod viewport;
mod render {
    pub mod app;
    pub mod gpu;
}

pub use control::{ControlSignal, PlaybackSignals};
pub use error::Error;
pub use session::{Mode, PlaybackSession, StartOptions, TILED_PAGE_LIMIT, start};
