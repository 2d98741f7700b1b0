use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use inkboard_canvas::{Rgba, Session, Tool, ToolState};

pub const BOARD_WIDTH: u32 = 800;
pub const BOARD_HEIGHT: u32 = 600;
pub const BACKGROUND: Rgba = Rgba::WHITE;

// Starter swatches; the color input extends them.
pub const DEFAULT_SWATCHES: [&str; 5] = ["#ffffff", "#000000", "#ef4415", "#00ff00", "#c1f40a"];

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub session: Session,
    pub tools: ToolState,
    pub pointer_active: bool,
}

impl State {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> State {
        State {
            canvas,
            ctx,
            session: Session::new(BOARD_WIDTH, BOARD_HEIGHT, BACKGROUND),
            tools: ToolState {
                tool: Tool::Brush,
                color: Rgba::BLACK,
                size: 5,
                fill_shapes: false,
            },
            pointer_active: false,
        }
    }
}
