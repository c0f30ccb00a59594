//! Static geometry and shader programs.
//!
//! Everything here is created once before the first frame and never mutated:
//! a `Mesh` is uploaded into a `GpuMesh`, two WGSL stages are compiled and
//! linked into a `ShaderProgram`, and each frame binds both and issues the
//! mesh's single `DrawCall`.
//!
//! Geometry is given directly in NDC (`[-1, 1]` on both axes, +Y up).

mod ctx;
mod mesh;
mod program;
mod shader;
mod vertex;

pub use ctx::RenderCtx;
pub use mesh::{DrawCall, GpuMesh, Mesh};
pub use program::{ProgramDesc, ShaderProgram};
pub use shader::{compile_stage, load_shader_source, ShaderStage};
pub use vertex::{ColorVertex, PositionVertex, Vertex};
