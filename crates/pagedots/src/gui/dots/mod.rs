use std::time::Duration;

pub mod model;
pub mod view;

pub use model::{DotStyle, State};
pub use view::draw;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const STROKE_WIDTH: f64 = 1.5;
