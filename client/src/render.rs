use wasm_bindgen::{Clamped, JsValue};
use web_sys::{Element, HtmlButtonElement, ImageData};

use crate::state::State;

/// Copies the raster surface into the on-screen canvas wholesale. The
/// surface is the single source of truth; the 2d context is only a viewport.
pub fn blit(state: &State) -> Result<(), JsValue> {
    let surface = state.session.surface();
    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(surface.as_bytes()),
        surface.width(),
        surface.height(),
    )?;
    state.ctx.put_image_data(&image, 0.0, 0.0)
}

pub fn set_status(status_el: &Element, status_text: &Element, status: &str, text: &str) {
    let _ = status_el.set_attribute("data-state", status);
    status_text.set_text_content(Some(text));
}

pub fn sync_history_buttons(
    state: &State,
    undo_button: &HtmlButtonElement,
    redo_button: &HtmlButtonElement,
) {
    undo_button.set_disabled(!state.session.can_undo());
    redo_button.set_disabled(!state.session.can_redo());
}
