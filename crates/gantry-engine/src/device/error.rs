/// What the frame loop should do after `wgpu::SurfaceError`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface (and depth buffer) were reconfigured; try again next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (commonly OOM); the app should exit.
    Fatal,
}
