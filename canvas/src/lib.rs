mod draw;
mod fill;
mod history;
mod session;
mod surface;

pub use draw::{draw_circle, draw_disc, draw_rect, draw_segment, draw_triangle};
pub use fill::flood_fill;
pub use history::{History, MAX_HISTORY};
pub use session::{EventRelay, Session, Tool, ToolState};
pub use surface::{Rgba, Snapshot, Surface, SurfaceError};
