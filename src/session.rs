//! Session lifecycle: synchronous validation, composite build, and the
//! run-to-completion playback loop.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::composite;
use crate::control::{Completion, PlaybackSignals};
use crate::error::Error;
use crate::imageset::{self, ImageSet};
use crate::playback::{DEFAULT_DWELL, Timing};
use crate::render::app::{self, RunParams};

/// Tiled mode is a hand-panned overview; beyond this many pages it is
/// rejected before a session exists.
pub const TILED_PAGE_LIMIT: usize = 3;

/// Playback layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Vertical strip, auto-advanced at the configured speed.
    Scroll,
    /// Horizontal overview, panned by dragging.
    Tiled,
}

/// Everything the collaborator hands over at `start`.
#[derive(Debug, Clone)]
pub struct StartOptions {
    pub folder: PathBuf,
    pub speed: f32,
    pub mode: Mode,
    /// Hold at the bottom of a scroll pass before looping to the top.
    pub dwell: Duration,
}

impl StartOptions {
    #[must_use]
    pub fn new(folder: PathBuf, speed: f32, mode: Mode) -> Self {
        Self {
            folder,
            speed,
            mode,
            dwell: DEFAULT_DWELL,
        }
    }
}

/// One playback run: created by [`start`], consumed by [`PlaybackSession::run`].
#[derive(Debug)]
pub struct PlaybackSession {
    options: StartOptions,
    set: ImageSet,
}

/// Validate the folder and page count, returning a runnable session.
///
/// Runs before any window opens, so failures here surface synchronously.
///
/// # Errors
/// [`Error::NotFound`] if the folder has no supported images;
/// [`Error::InvalidMode`] if tiled mode is requested with more than
/// [`TILED_PAGE_LIMIT`] pages.
pub fn start(options: StartOptions) -> Result<PlaybackSession, Error> {
    let set = imageset::load(&options.folder)?;
    if options.mode == Mode::Tiled && set.len() > TILED_PAGE_LIMIT {
        return Err(Error::InvalidMode {
            pages: set.len(),
            limit: TILED_PAGE_LIMIT,
        });
    }
    info!(
        folder = %options.folder.display(),
        pages = set.len(),
        mode = ?options.mode,
        "session validated"
    );
    Ok(PlaybackSession { options, set })
}

impl PlaybackSession {
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.set.len()
    }

    /// Build the composite, open the window, and run until stopped.
    ///
    /// `on_finished` fires exactly once on every exit path: explicit stop,
    /// window close, decode failure, or a render error. It runs on the
    /// calling thread; collaborators that mutate UI state must redispatch
    /// from it (e.g. by sending on a channel owned by their own thread).
    ///
    /// # Errors
    /// [`Error::Decode`] if the scroll composite cannot be built;
    /// [`Error::Render`] for windowing/GPU failures.
    pub fn run(
        self,
        signals: PlaybackSignals,
        on_finished: impl FnOnce() + Send + 'static,
    ) -> Result<(), Error> {
        // Fires on early returns and panics alike.
        let mut completion = Completion::new(on_finished);
        let result = self.run_inner(signals);
        completion.fire();
        result
    }

    fn run_inner(self, signals: PlaybackSignals) -> Result<(), Error> {
        let composite = match self.options.mode {
            Mode::Scroll => composite::build_scroll(&self.set)?,
            Mode::Tiled => composite::build_tiled(&self.set)?,
        };

        let initial_size = match self.options.mode {
            Mode::Scroll => (800, 1000),
            Mode::Tiled => (composite.width().min(1200), composite.height().min(800)),
        };
        let background = match self.options.mode {
            Mode::Scroll => composite::SCROLL_BACKGROUND,
            Mode::Tiled => composite::TILED_BACKGROUND,
        };

        let params = RunParams {
            mode: self.options.mode,
            composite,
            timing: Timing::for_speed(self.options.speed, self.options.dwell),
            signals,
            background,
            initial_size,
            title: format!("sheetscroll: {}", self.options.folder.display()),
        };
        app::run(params).map_err(Error::Render)
    }
}
