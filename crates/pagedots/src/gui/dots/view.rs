use super::STROKE_WIDTH;
use crate::config::PaintMode;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use metaball::{Circle, Ink, PathCommand, Primitive, RenderPlan};
use palette::Srgba;
use std::f64::consts::PI;

struct PrimitiveRenderer<'a> {
    primitive: &'a Primitive,
    colors: &'a ThemeColors,
    mode: PaintMode,
}

impl<'a> PrimitiveRenderer<'a> {
    fn new(primitive: &'a Primitive, colors: &'a ThemeColors, mode: PaintMode) -> Self {
        Self {
            primitive,
            colors,
            mode,
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let ink = self.primitive.ink();
        set_source(cr, self.color(ink));

        match self.primitive {
            Primitive::Circle { circle, .. } => trace_circle(cr, circle),
            Primitive::Contour { path, .. } => trace_path(cr, path),
        }

        self.finish(cr, ink)
    }

    fn color(&self, ink: Ink) -> Srgba<f64> {
        match ink {
            Ink::Selected => self.colors.selected,
            Ink::Unselected => self.colors.unselected,
        }
    }

    fn finish(&self, cr: &Context, ink: Ink) -> Result<(), cairo::Error> {
        match (ink, self.mode) {
            (Ink::Selected, PaintMode::Stroke) => {
                cr.set_line_width(STROKE_WIDTH);
                cr.stroke()
            }
            _ => cr.fill(),
        }
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn trace_circle(cr: &Context, circle: &Circle) {
    cr.new_sub_path();
    cr.arc(
        circle.x as f64,
        circle.y as f64,
        circle.radius as f64,
        0.0,
        2.0 * PI,
    );
}

fn trace_path(cr: &Context, path: &[PathCommand]) {
    cr.new_path();
    for command in path {
        match *command {
            PathCommand::MoveTo(p) => cr.move_to(p.x as f64, p.y as f64),
            PathCommand::LineTo(p) => cr.line_to(p.x as f64, p.y as f64),
            PathCommand::CubicTo { c1, c2, to } => cr.curve_to(
                c1.x as f64,
                c1.y as f64,
                c2.x as f64,
                c2.y as f64,
                to.x as f64,
                to.y as f64,
            ),
            PathCommand::Close => cr.close_path(),
        }
    }
}

pub fn draw(
    cr: &Context,
    plan: &RenderPlan,
    colors: &ThemeColors,
    mode: PaintMode,
) -> Result<(), cairo::Error> {
    for primitive in plan {
        PrimitiveRenderer::new(primitive, colors, mode).draw(cr)?;
    }
    Ok(())
}
