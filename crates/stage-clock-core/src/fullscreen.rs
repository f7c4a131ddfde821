use tracing::{debug, error};

use crate::system::Presenter;

/// A key press as far as the fullscreen shortcuts are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenAction {
    Toggle,
    Exit,
}

impl FullscreenAction {
    /// `f`/`F` toggles, `Escape` forces exit. Nothing else is bound.
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::Char('f' | 'F') => Some(FullscreenAction::Toggle),
            Key::Escape => Some(FullscreenAction::Exit),
            _ => None,
        }
    }
}

/// Tracks whether the display is fullscreen and drives the presenter.
///
/// The flag only changes after the presenter reports success. Presenter
/// errors are logged and swallowed, so none of these methods can fail.
pub struct FullscreenController<P: Presenter> {
    presenter: P,
    is_fullscreen: bool,
}

impl<P: Presenter> FullscreenController<P> {
    pub fn new(presenter: P) -> Self {
        let is_fullscreen = presenter.is_fullscreen();
        Self {
            presenter,
            is_fullscreen,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Font scale multiplier: fullscreen shows the digits larger.
    pub fn display_scale(&self) -> u16 {
        if self.is_fullscreen {
            2
        } else {
            1
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Handle a key press. Returns whether the key was a fullscreen shortcut.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match FullscreenAction::for_key(key) {
            Some(FullscreenAction::Toggle) => {
                self.toggle();
                true
            }
            Some(FullscreenAction::Exit) => {
                self.exit();
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self) {
        if self.presenter.is_fullscreen() {
            self.exit();
        } else {
            self.enter();
        }
    }

    pub fn enter(&mut self) {
        if self.presenter.is_fullscreen() {
            self.is_fullscreen = true;
            return;
        }
        match self.presenter.enter_fullscreen() {
            Ok(()) => {
                debug!("entered fullscreen");
                self.is_fullscreen = true;
            }
            Err(e) => error!("fullscreen error: {e}"),
        }
    }

    /// Leave fullscreen. A no-op when the presenter is not fullscreen.
    pub fn exit(&mut self) {
        if !self.presenter.is_fullscreen() {
            self.is_fullscreen = false;
            return;
        }
        match self.presenter.exit_fullscreen() {
            Ok(()) => {
                debug!("exited fullscreen");
                self.is_fullscreen = false;
            }
            Err(e) => error!("exit fullscreen error: {e}"),
        }
    }

    /// Tell the presenter about a new surface size, then pick up any
    /// transition it inferred from it.
    pub fn surface_resized(&mut self, width: u16, height: u16) {
        self.presenter.surface_resized(width, height);
        self.sync_with_presenter();
    }

    /// Pick up a transition the platform made on its own.
    pub fn sync_with_presenter(&mut self) {
        let actual = self.presenter.is_fullscreen();
        if actual != self.is_fullscreen {
            debug!(fullscreen = actual, "presenter changed fullscreen state");
            self.is_fullscreen = actual;
        }
    }
}
