use crate::circle::{Circle, Point};
use std::fmt;
use strum::Display as StrumDisplay;

/// Which paint a primitive is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Ink {
    Selected,
    Unselected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M {}", p),
            Self::LineTo(p) => write!(f, "L {}", p),
            Self::CubicTo { c1, c2, to } => write!(f, "C {} {} {}", c1, c2, to),
            Self::Close => write!(f, "Z"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle { circle: Circle, ink: Ink },
    Contour { path: Vec<PathCommand>, ink: Ink },
}

impl Primitive {
    pub fn ink(&self) -> Ink {
        match self {
            Self::Circle { ink, .. } | Self::Contour { ink, .. } => *ink,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle { circle, ink } => write!(
                f,
                "circle[{}] {} r={:.3}",
                ink,
                circle.center(),
                circle.radius
            ),
            Self::Contour { path, ink } => {
                write!(f, "contour[{}]", ink)?;
                path.iter().try_for_each(|cmd| write!(f, " {}", cmd))
            }
        }
    }
}

/// Ordered draw list for one frame. Later primitives paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPlan {
    primitives: Vec<Primitive>,
}

impl RenderPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_circle(&mut self, circle: Circle, ink: Ink) {
        if circle.is_visible() {
            self.primitives.push(Primitive::Circle { circle, ink });
        }
    }

    pub fn fill_contour(&mut self, path: Vec<PathCommand>, ink: Ink) {
        if !path.is_empty() {
            self.primitives.push(Primitive::Contour { path, ink });
        }
    }

    pub fn append(&mut self, other: RenderPlan) {
        self.primitives.extend(other.primitives);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn has_band(&self) -> bool {
        self.primitives
            .iter()
            .any(|p| matches!(p, Primitive::Contour { .. }))
    }
}

impl<'a> IntoIterator for &'a RenderPlan {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

impl fmt::Display for RenderPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.primitives
            .iter()
            .try_for_each(|p| writeln!(f, "{}", p))
    }
}
