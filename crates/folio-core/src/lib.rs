pub mod constants;
pub mod controls;
pub mod input;
pub mod loader;
pub mod modal;
pub mod picking;
pub mod scene;
pub mod state;

pub use constants::*;
pub use controls::*;
pub use input::*;
pub use loader::*;
pub use modal::*;
pub use picking::*;
pub use scene::*;
pub use state::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
