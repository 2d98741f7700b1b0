mod app;
mod dom;
mod net;
mod render;
mod state;
mod toolbar;
mod ws;

pub use app::run;
