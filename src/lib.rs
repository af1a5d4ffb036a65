//! A minimal real-time rendering demo using OpenGL via [glow] and a window
//! via [winit].
//!
//! The demo opens a window, uploads a static quad as indexed triangle data,
//! compiles a vertex/fragment shader pair parsed from a single text file,
//! and animates a color uniform every frame while redrawing the quad.
//!
//! # Shader file format
//!
//! One text file carries both stages. A line containing `#shader vertex` or
//! `#shader fragment` starts a section; every following line belongs to that
//! section until the next marker. See `res/shaders/basic.shader`.
//!
//! # Safety
//!
//! [`QuadRenderer`] methods are `unsafe` because they issue raw GL calls and
//! require a valid, current OpenGL context.
//!
//! [glow]: https://docs.rs/glow
//! [winit]: https://docs.rs/winit

mod animation;
mod app;
mod renderer;
mod shaders;
mod source;
mod types;

pub use animation::ColorPulse;
pub use app::{run, AppConfig};
pub use renderer::QuadRenderer;
pub use source::{ShaderSource, SourceError};
