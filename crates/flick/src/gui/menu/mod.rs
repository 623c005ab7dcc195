pub mod view;

pub use view::draw;

pub const FONT_FACE: &str = "Sans";
pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const STATUS_FONT_SIZE: f64 = 18.0;
pub const STATUS_MARGIN: f64 = 12.0;
pub const GUIDE_LINE_WIDTH: f64 = 1.5;
pub const ACTIVE_LINE_WIDTH: f64 = 2.5;
