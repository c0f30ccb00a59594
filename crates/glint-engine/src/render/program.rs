use anyhow::Result;

use super::shader::validated;
use super::{compile_stage, RenderCtx, ShaderStage};

/// Inputs for linking a vertex + fragment pair into a pipeline.
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    pub vertex_layout: wgpu::VertexBufferLayout<'static>,
}

/// A linked render pipeline: one vertex stage, one fragment stage, triangle
/// list topology, no culling and no depth test.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
}

impl ShaderProgram {
    /// Compiles both stages and links them against the surface format.
    ///
    /// Compile errors and link errors (e.g. a missing entry point or
    /// mismatched stage interfaces) are returned, not raised.
    pub fn link(ctx: &RenderCtx<'_>, desc: ProgramDesc<'_>) -> Result<Self> {
        let ProgramDesc {
            label,
            vertex_source,
            fragment_source,
            vertex_layout,
        } = desc;

        let vs = compile_stage(
            ctx.device,
            ShaderStage::Vertex,
            &format!("{label} vs"),
            vertex_source,
        )?;
        let fs = compile_stage(
            ctx.device,
            ShaderStage::Fragment,
            &format!("{label} fs"),
            fragment_source,
        )?;

        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} pipeline layout")),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline_label = format!("{label} pipeline");
        let pipeline = validated(
            ctx.device,
            || format!("failed to link shader program `{label}`"),
            || {
                ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(&pipeline_label),
                    layout: Some(&layout),

                    vertex: wgpu::VertexState {
                        module: &vs,
                        entry_point: Some(ShaderStage::Vertex.entry_point()),
                        compilation_options: Default::default(),
                        buffers: &[vertex_layout],
                    },

                    fragment: Some(wgpu::FragmentState {
                        module: &fs,
                        entry_point: Some(ShaderStage::Fragment.entry_point()),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            blend: Some(wgpu::BlendState::REPLACE),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),

                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },

                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),
                    multiview_mask: None,
                    cache: None,
                })
            },
        )?;

        log::info!("linked shader program `{label}`");
        Ok(Self { pipeline })
    }

    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{PositionVertex, Vertex};

    const VS: &str = "@vertex fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> { return vec4<f32>(p, 1.0); }";
    const FS: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0, 0.5, 0.0, 1.0); }";

    fn link(vertex_source: &str, fragment_source: &str) -> Result<ShaderProgram> {
        let (device, queue) = crate::testing::noop_device();
        let ctx = RenderCtx::new(&device, &queue, wgpu::TextureFormat::Rgba8UnormSrgb);
        ShaderProgram::link(
            &ctx,
            ProgramDesc {
                label: "test",
                vertex_source,
                fragment_source,
                vertex_layout: PositionVertex::layout(),
            },
        )
    }

    #[test]
    fn links_matching_stages() {
        assert!(link(VS, FS).is_ok());
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let fs = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let err = link(VS, fs).err().expect("link should fail");
        assert!(format!("{err:#}").contains("failed to link shader program `test`"));
    }

    #[test]
    fn broken_fragment_stage_fails_before_linking() {
        let err = link(VS, "fn fs_main( {").err().expect("compile should fail");
        assert!(format!("{err:#}").contains("fragment shader `test fs` failed to compile"));
    }
}
