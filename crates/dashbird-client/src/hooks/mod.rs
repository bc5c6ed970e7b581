mod use_scene;

pub use use_scene::*;
