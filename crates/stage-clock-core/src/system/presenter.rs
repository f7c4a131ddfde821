use crate::error::ClockError;

/// Presenter platform trait: performs fullscreen transitions for the
/// display surface.
///
/// Implementations: terminal window operations, a browser's fullscreen API,
/// a window manager's fullscreen hint, etc. The presenter is the source of
/// truth for whether the surface is currently fullscreen, because the
/// platform can leave fullscreen on its own (e.g. a window manager gesture).
pub trait Presenter {
    /// Whether the surface is presented fullscreen right now.
    fn is_fullscreen(&self) -> bool;

    /// Ask the platform to present the surface fullscreen.
    fn enter_fullscreen(&mut self) -> Result<(), ClockError>;

    /// Ask the platform to leave fullscreen presentation.
    fn exit_fullscreen(&mut self) -> Result<(), ClockError>;

    /// The surface changed size. Presenters that can only infer the
    /// platform's state from its geometry update it here.
    fn surface_resized(&mut self, _width: u16, _height: u16) {}
}
