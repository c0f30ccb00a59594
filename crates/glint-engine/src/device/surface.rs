use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

const SRGB_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = SRGB_FORMATS.iter().find(|f| formats.contains(*f)) {
            return Some(*f);
        }
    }

    formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Applies a new drawable size. A 0x0 size only updates state; wgpu cannot
/// configure an empty surface.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn recover_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = SurfaceErrorAction::classify(&err);
    match action {
        SurfaceErrorAction::Reconfigured => {
            log::debug!("surface {err:?}; reconfiguring");
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
        }
        SurfaceErrorAction::SkipFrame => log::debug!("surface {err:?}; skipping frame"),
        SurfaceErrorAction::Fatal => log::error!("surface {err:?}; giving up"),
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn prefers_srgb_when_offered() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn takes_first_format_without_srgb_preference() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }
}
