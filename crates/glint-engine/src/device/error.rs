/// What the frame loop should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Out of memory; terminate.
    Fatal,
}

impl SurfaceErrorAction {
    /// Maps a surface error to an action without touching the surface.
    ///
    /// Reconfiguration itself is performed by [`super::Gpu::handle_surface_error`].
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn timeout_skips_frame() {
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }
}
