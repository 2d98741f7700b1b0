use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlAnchorElement, HtmlButtonElement,
    HtmlCanvasElement, HtmlElement, HtmlInputElement, HtmlSpanElement, KeyboardEvent,
    PointerEvent,
};

use inkboard_canvas::{EventRelay, Rgba, Tool};
use inkboard_shared::WireMessage;

use crate::dom::{event_to_point, get_element, set_canvas_cursor, update_size_label};
use crate::render::{blit, set_status, sync_history_buttons};
use crate::state::{State, DEFAULT_SWATCHES};
use crate::toolbar::{render_swatches, set_tool_button, swatch_color_from_event};
use crate::ws::{connect_ws, WsEvent};

const TOOL_IDS: [(&str, Tool); 7] = [
    ("tool-brush", Tool::Brush),
    ("tool-eraser", Tool::Eraser),
    ("tool-rectangle", Tool::Rectangle),
    ("tool-circle", Tool::Circle),
    ("tool-triangle", Tool::Triangle),
    ("tool-line", Tool::Line),
    ("tool-fill", Tool::Fill),
];

fn sync_tool_ui(state: &State, buttons: &[(HtmlButtonElement, Tool)]) {
    for (button, tool) in buttons {
        set_tool_button(button, *tool == state.tools.tool);
    }
    set_canvas_cursor(&state.canvas, state.tools.tool);
}

fn refresh(
    state: &State,
    undo_button: &HtmlButtonElement,
    redo_button: &HtmlButtonElement,
) {
    if let Err(error) = blit(state) {
        web_sys::console::error_2(&"Blit failed".into(), &error);
    }
    sync_history_buttons(state, undo_button, redo_button);
}

fn append_guess(document: &Document, list: &Element, text: &str) {
    if let Ok(item) = document.create_element("li") {
        item.set_text_content(Some(text));
        let _ = list.append_child(&item);
    }
}

fn selected_hex(state: &State) -> String {
    state.tools.color.to_hex()
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("No 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let state = Rc::new(RefCell::new(State::new(canvas.clone(), ctx)));

    let undo_button: HtmlButtonElement = get_element(&document, "undo")?;
    let redo_button: HtmlButtonElement = get_element(&document, "redo")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let save_button: HtmlButtonElement = get_element(&document, "save")?;
    let size_slider: HtmlInputElement = get_element(&document, "size-slider")?;
    let size_value: HtmlSpanElement = get_element(&document, "size-value")?;
    let fill_checkbox: HtmlInputElement = get_element(&document, "fill-shapes")?;
    let color_input: HtmlInputElement = get_element(&document, "color-input")?;
    let background_input: HtmlInputElement = get_element(&document, "background-input")?;
    let palette_el: HtmlElement = get_element(&document, "palette")?;
    let status_el: Element = get_element(&document, "status")?;
    let status_text: Element = get_element(&document, "status-text")?;
    let guess_input: HtmlInputElement = get_element(&document, "guess-input")?;
    let guess_list: Element = get_element(&document, "guess-list")?;

    let mut tool_buttons = Vec::new();
    for (id, tool) in TOOL_IDS {
        let button: HtmlButtonElement = get_element(&document, id)?;
        tool_buttons.push((button, tool));
    }
    let tool_buttons = Rc::new(tool_buttons);

    let swatches: Vec<String> = DEFAULT_SWATCHES.iter().map(|c| c.to_string()).collect();

    {
        let state = state.borrow();
        render_swatches(&document, &palette_el, &swatches, &selected_hex(&state));
        sync_tool_ui(&state, &tool_buttons);
        update_size_label(&size_slider, &size_value);
        refresh(&state, &undo_button, &redo_button);
    }
    let swatches = Rc::new(RefCell::new(swatches));

    // Network: relayed draw events land directly on the surface; guesses go
    // to the chat list.
    let sender = {
        let state = state.clone();
        let document = document.clone();
        let status_el = status_el.clone();
        let status_text = status_text.clone();
        let undo_button = undo_button.clone();
        let redo_button = redo_button.clone();
        let guess_list = guess_list.clone();
        connect_ws(&window, move |event| match event {
            WsEvent::Open => set_status(&status_el, &status_text, "online", "Connected"),
            WsEvent::Close => set_status(&status_el, &status_text, "offline", "Disconnected"),
            WsEvent::Error => set_status(&status_el, &status_text, "offline", "Connection error"),
            WsEvent::Message(message) => match message {
                WireMessage::Draw { .. } => {
                    let mut state = state.borrow_mut();
                    state.session.apply_remote(&message);
                    refresh(&state, &undo_button, &redo_button);
                }
                WireMessage::Guess { text } => {
                    append_guess(&document, &guess_list, &text);
                }
            },
        })?
    };
    state.borrow_mut().session.set_relay(sender.clone());

    // Pointer gestures.
    {
        let state = state.clone();
        let undo_button = undo_button.clone();
        let redo_button = redo_button.clone();
        let onpointerdown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = state.borrow_mut();
            let Some((x, y)) = event_to_point(&state.canvas, &event) else {
                return;
            };
            // A press on the canvas edge can floor to one past the last
            // pixel; the board is the press target, so clamp onto it.
            let x = x.clamp(0, state.session.surface().width() as i32 - 1);
            let y = y.clamp(0, state.session.surface().height() as i32 - 1);
            let tools = state.tools;
            match state.session.pointer_down(x, y, &tools) {
                Ok(()) => state.pointer_active = true,
                Err(error) => {
                    web_sys::console::warn_1(&format!("Ignored press: {error}").into());
                    return;
                }
            }
            refresh(&state, &undo_button, &redo_button);
        });
        canvas.add_event_listener_with_callback(
            "pointerdown",
            onpointerdown.as_ref().unchecked_ref(),
        )?;
        onpointerdown.forget();
    }

    {
        let state = state.clone();
        let undo_button = undo_button.clone();
        let redo_button = redo_button.clone();
        let onpointermove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = state.borrow_mut();
            if !state.pointer_active {
                return;
            }
            let Some((x, y)) = event_to_point(&state.canvas, &event) else {
                return;
            };
            let tools = state.tools;
            state.session.pointer_move(x, y, &tools);
            refresh(&state, &undo_button, &redo_button);
        });
        canvas.add_event_listener_with_callback(
            "pointermove",
            onpointermove.as_ref().unchecked_ref(),
        )?;
        onpointermove.forget();
    }

    for event_name in ["pointerup", "pointerleave", "pointercancel"] {
        let state = state.clone();
        let onpointerup = Closure::<dyn FnMut(PointerEvent)>::new(move |_| {
            let mut state = state.borrow_mut();
            state.pointer_active = false;
            state.session.pointer_up();
        });
        canvas
            .add_event_listener_with_callback(event_name, onpointerup.as_ref().unchecked_ref())?;
        onpointerup.forget();
    }

    // Toolbar: tool buttons.
    for (button, tool) in tool_buttons.iter() {
        let state = state.clone();
        let tool = *tool;
        let tool_buttons = tool_buttons.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let mut state = state.borrow_mut();
            state.tools.tool = tool;
            sync_tool_ui(&state, &tool_buttons);
        });
        button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    // Swatch row, delegated click.
    {
        let state = state.clone();
        let document = document.clone();
        let palette_el = palette_el.clone();
        let palette_el_cb = palette_el.clone();
        let swatches = swatches.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Some(color) = swatch_color_from_event(&event) else {
                return;
            };
            let Some(parsed) = Rgba::from_hex(&color) else {
                return;
            };
            let mut state = state.borrow_mut();
            state.tools.color = parsed;
            render_swatches(
                &document,
                &palette_el_cb,
                &swatches.borrow(),
                &selected_hex(&state),
            );
        });
        palette_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    // Free color picker extends the swatch row.
    {
        let state = state.clone();
        let document = document.clone();
        let palette_el = palette_el.clone();
        let swatches = swatches.clone();
        let color_input_cb = color_input.clone();
        let onchange = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let value = color_input_cb.value();
            let Some(parsed) = Rgba::from_hex(&value) else {
                return;
            };
            let mut state = state.borrow_mut();
            state.tools.color = parsed;
            let mut swatches = swatches.borrow_mut();
            if !swatches.iter().any(|c| c == &value) {
                swatches.push(value);
            }
            render_swatches(&document, &palette_el, &swatches, &selected_hex(&state));
        });
        color_input.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    // Background picker repaints the board in the new color.
    {
        let state = state.clone();
        let undo_button = undo_button.clone();
        let redo_button = redo_button.clone();
        let background_input_cb = background_input.clone();
        let onchange = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let Some(parsed) = Rgba::from_hex(&background_input_cb.value()) else {
                return;
            };
            let mut state = state.borrow_mut();
            state.session.set_background(parsed);
            refresh(&state, &undo_button, &redo_button);
        });
        background_input
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    // Size slider.
    {
        let state = state.clone();
        let size_slider_cb = size_slider.clone();
        let size_value = size_value.clone();
        let oninput = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let size = size_slider_cb.value().parse::<u32>().unwrap_or(5).clamp(1, 30);
            state.borrow_mut().tools.size = size;
            update_size_label(&size_slider_cb, &size_value);
        });
        size_slider.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    // Filled vs outlined shapes.
    {
        let state = state.clone();
        let fill_checkbox_cb = fill_checkbox.clone();
        let onchange = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            state.borrow_mut().tools.fill_shapes = fill_checkbox_cb.checked();
        });
        fill_checkbox
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    // Undo / redo / clear.
    {
        let state = state.clone();
        let undo_button_cb = undo_button.clone();
        let redo_button = redo_button.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let mut state = state.borrow_mut();
            state.session.undo();
            refresh(&state, &undo_button_cb, &redo_button);
        });
        undo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }
    {
        let state = state.clone();
        let undo_button = undo_button.clone();
        let redo_button_cb = redo_button.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let mut state = state.borrow_mut();
            state.session.redo();
            refresh(&state, &undo_button, &redo_button_cb);
        });
        redo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }
    {
        let state = state.clone();
        let undo_button = undo_button.clone();
        let redo_button = redo_button.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let mut state = state.borrow_mut();
            state.session.clear();
            refresh(&state, &undo_button, &redo_button);
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    // Save: the browser encodes the canvas as a PNG data URI.
    {
        let state = state.clone();
        let document = document.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            let state = state.borrow();
            let Ok(data_url) = state.canvas.to_data_url() else {
                return;
            };
            let Ok(element) = document.create_element("a") else {
                return;
            };
            let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() else {
                return;
            };
            anchor.set_href(&data_url);
            anchor.set_download("board.png");
            anchor.click();
        });
        save_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    // Guess chat: Enter sends, echoes locally.
    {
        let document = document.clone();
        let guess_input_cb = guess_input.clone();
        let guess_list = guess_list.clone();
        let sender = sender.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            let text = guess_input_cb.value();
            if text.trim().is_empty() {
                return;
            }
            sender.send(&WireMessage::Guess { text: text.clone() });
            append_guess(&document, &guess_list, &format!("you: {text}"));
            guess_input_cb.set_value("");
        });
        guess_input
            .add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    // Keyboard undo/redo.
    {
        let state = state.clone();
        let undo_button = undo_button.clone();
        let redo_button = redo_button.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if !(event.ctrl_key() || event.meta_key()) {
                return;
            }
            let key = event.key().to_ascii_lowercase();
            let mut state = state.borrow_mut();
            let handled = match key.as_str() {
                "z" if event.shift_key() => state.session.redo(),
                "z" => state.session.undo(),
                "y" => state.session.redo(),
                _ => return,
            };
            if handled {
                event.prevent_default();
            }
            refresh(&state, &undo_button, &redo_button);
        });
        document
            .add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    Ok(())
}
