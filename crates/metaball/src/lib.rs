pub mod animation;
pub mod circle;
pub mod indicator;
pub mod layout;
pub mod macros;
pub mod metaball;
pub mod pager;
pub mod plan;
pub mod protocol;
pub mod settings;

pub use circle::{Circle, Point};
pub use indicator::Indicator;
pub use layout::{Bounds, DotLayout, Insets};
pub use metaball::{BandTuning, Metaball};
pub use pager::{PageEvent, Pager, PagerLink};
pub use plan::{Ink, PathCommand, Primitive, RenderPlan};
pub use settings::IndicatorSettings;
