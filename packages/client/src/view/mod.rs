//! Dashboard view: render commands, the pure sync logic producing them, and
//! renderers applying them to a display surface.

pub mod command;
pub mod formatter;
pub mod renderer;
pub mod sync;

pub use command::{ElementId, RenderCommand};
pub use renderer::{DashboardView, ElementState, Renderer, TerminalRenderer};
pub use sync::{DashboardSync, Reaction};
