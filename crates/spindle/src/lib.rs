pub mod angle;
pub mod animate;
pub mod paint;
pub mod section;
pub mod style;
pub mod transform;

pub use angle::{SpinDirection, end_rotation};
pub use animate::{SpinTransition, ease_out};
pub use paint::{Canvas, paint};
pub use section::{
    GroupError, IconGlyph, ImageId, Section, SectionContent, SectionGroup, SectionText,
};
pub use style::{FontWeight, TextStyle, WheelStyle};
pub use transform::Transform;
