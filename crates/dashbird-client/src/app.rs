//! Main application component.

use yew::prelude::*;

use crate::hooks::{use_escape_clears_focus, use_scene_focus, use_scene_start};

/// Canvas element the scene renders into.
pub const SCENE_CANVAS_ID: &str = "dashbird-canvas";

#[function_component(App)]
pub fn app() -> Html {
    // Empty config selects the built-in scene
    use_scene_start(SCENE_CANVAS_ID.to_string(), String::new());
    use_escape_clears_focus();
    let focus = use_scene_focus();

    let canvas_style = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: 0;";

    html! {
        <div class="dashbird" data-focused={focus.focused.to_string()}>
            <canvas id={SCENE_CANVAS_ID} class="bevy-canvas" style={canvas_style} />
        </div>
    }
}
