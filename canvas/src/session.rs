use std::rc::Rc;

use inkboard_shared::WireMessage;

use crate::draw::{draw_circle, draw_disc, draw_rect, draw_segment, draw_triangle};
use crate::fill::flood_fill;
use crate::history::History;
use crate::surface::{Rgba, Snapshot, Surface, SurfaceError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
    Line,
    Fill,
}

/// Current toolbar selection, read-only input per gesture.
#[derive(Clone, Copy, Debug)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Rgba,
    pub size: u32,
    pub fill_shapes: bool,
}

/// Outbound half of the event transport, injected at construction. The
/// receive side is wired by the host calling `apply_remote`.
pub trait EventRelay {
    fn send(&self, message: &WireMessage);
}

enum Gesture {
    Idle,
    Freehand { last: (i32, i32) },
    Shape { anchor: (i32, i32), preview: Snapshot },
}

/// One drawing session: owns the surface and its history, translates pointer
/// gestures into raster operations, and echoes freehand strokes over the
/// relay. Single-threaded and synchronous; every operation runs to
/// completion before returning.
pub struct Session {
    surface: Surface,
    history: History,
    background: Rgba,
    relay: Option<Rc<dyn EventRelay>>,
    gesture: Gesture,
    remote_last: Option<(i32, i32)>,
}

impl Session {
    pub fn new(width: u32, height: u32, background: Rgba) -> Session {
        Session {
            surface: Surface::new(width, height, background),
            history: History::new(),
            background,
            relay: None,
            gesture: Gesture::Idle,
            remote_last: None,
        }
    }

    pub fn set_relay(&mut self, relay: Rc<dyn EventRelay>) {
        self.relay = Some(relay);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Starts a mutating gesture. The seed position must be on the board;
    /// callers translate pointer coordinates before getting here, so an
    /// out-of-bounds press is a caller bug and fails before any mutation.
    pub fn pointer_down(
        &mut self,
        x: i32,
        y: i32,
        tools: &ToolState,
    ) -> Result<(), SurfaceError> {
        if !self.surface.contains(x, y) {
            return Err(SurfaceError::OutOfBounds { x, y });
        }
        match tools.tool {
            Tool::Fill => {
                // A fill is a complete click gesture, no drag phase. Seeding
                // on a pixel that already has the fill color changes nothing,
                // so it must not spend a history entry or invalidate redo.
                self.gesture = Gesture::Idle;
                if self.surface.get(x, y)? == tools.color.opaque() {
                    return Ok(());
                }
                self.history.begin_gesture(&self.surface);
                flood_fill(&mut self.surface, x, y, tools.color)?;
            }
            Tool::Brush | Tool::Eraser => {
                self.history.begin_gesture(&self.surface);
                let color = self.brush_color(tools);
                draw_disc(&mut self.surface, x, y, tools.size, color);
                self.emit_draw(x, y, color, tools.size);
                self.gesture = Gesture::Freehand { last: (x, y) };
            }
            Tool::Rectangle | Tool::Circle | Tool::Triangle | Tool::Line => {
                self.history.begin_gesture(&self.surface);
                self.gesture = Gesture::Shape {
                    anchor: (x, y),
                    preview: self.surface.snapshot(),
                };
            }
        }
        Ok(())
    }

    /// Extends the active gesture. Off-board positions are fine here: strokes
    /// clip at the edge rather than aborting the gesture.
    pub fn pointer_move(&mut self, x: i32, y: i32, tools: &ToolState) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Freehand { last } => {
                let from = *last;
                *last = (x, y);
                let color = if tools.tool == Tool::Eraser {
                    self.background
                } else {
                    tools.color.opaque()
                };
                draw_segment(&mut self.surface, from, (x, y), tools.size, color);
                self.emit_draw(x, y, color, tools.size);
            }
            Gesture::Shape { anchor, preview } => {
                let anchor = *anchor;
                // Dimensions never change within a session, so the preview
                // snapshot always fits.
                let _ = self.surface.restore(preview);
                let color = tools.color.opaque();
                match tools.tool {
                    Tool::Rectangle => draw_rect(
                        &mut self.surface,
                        anchor,
                        (x, y),
                        tools.size,
                        tools.fill_shapes,
                        color,
                    ),
                    Tool::Circle => {
                        let dx = (x - anchor.0) as f64;
                        let dy = (y - anchor.1) as f64;
                        let radius = (dx * dx + dy * dy).sqrt();
                        draw_circle(
                            &mut self.surface,
                            anchor,
                            radius,
                            tools.size,
                            tools.fill_shapes,
                            color,
                        );
                    }
                    Tool::Triangle => draw_triangle(
                        &mut self.surface,
                        anchor,
                        (x, y),
                        tools.size,
                        tools.fill_shapes,
                        color,
                    ),
                    Tool::Line => {
                        draw_segment(&mut self.surface, anchor, (x, y), tools.size, color)
                    }
                    // Freehand and fill gestures never enter the shape arm.
                    Tool::Brush | Tool::Eraser | Tool::Fill => {}
                }
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Applies a relayed event from another client. Remote strokes chain
    /// from the previously received point and bypass local gesture state;
    /// they land in whatever snapshot the next local gesture captures.
    pub fn apply_remote(&mut self, message: &WireMessage) {
        match message {
            WireMessage::Draw {
                x,
                y,
                color,
                line_width,
            } => {
                let color = Rgba::from_hex(color).unwrap_or(Rgba::BLACK);
                let width = clamp_width(*line_width);
                let to = (x.round() as i32, y.round() as i32);
                match self.remote_last {
                    Some(from) => draw_segment(&mut self.surface, from, to, width, color),
                    None => draw_disc(&mut self.surface, to.0, to.1, width, color),
                }
                self.remote_last = Some(to);
            }
            WireMessage::Guess { .. } => {}
        }
    }

    pub fn undo(&mut self) -> bool {
        self.gesture = Gesture::Idle;
        self.history.undo(&mut self.surface)
    }

    pub fn redo(&mut self) -> bool {
        self.gesture = Gesture::Idle;
        self.history.redo(&mut self.surface)
    }

    /// Repaints the board in a new background color. The wipe is undoable,
    /// and later eraser strokes pick up the new color.
    pub fn set_background(&mut self, color: Rgba) {
        let color = color.opaque();
        if color == self.background {
            return;
        }
        self.gesture = Gesture::Idle;
        self.history.begin_gesture(&self.surface);
        self.background = color;
        self.surface.clear(color);
    }

    /// Undoable whole-board wipe back to the background color.
    pub fn clear(&mut self) {
        self.gesture = Gesture::Idle;
        self.history.begin_gesture(&self.surface);
        self.surface.clear(self.background);
    }

    fn brush_color(&self, tools: &ToolState) -> Rgba {
        if tools.tool == Tool::Eraser {
            self.background
        } else {
            tools.color.opaque()
        }
    }

    fn emit_draw(&self, x: i32, y: i32, color: Rgba, size: u32) {
        if let Some(relay) = &self.relay {
            relay.send(&WireMessage::Draw {
                x: x as f32,
                y: y as f32,
                color: color.to_hex(),
                line_width: size as f32,
            });
        }
    }
}

fn clamp_width(value: f32) -> u32 {
    if !value.is_finite() {
        return 1;
    }
    (value.round() as i64).clamp(1, 64) as u32
}
