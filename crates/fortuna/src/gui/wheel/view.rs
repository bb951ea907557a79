use super::model::WheelState;
use crate::gui::theme::{self, ThemeColors};
use cairo::{Context, Extend, Matrix};
use gdk4::prelude::*;
use gdk_pixbuf::Pixbuf;
use palette::Srgba;
use spindle::{Canvas, FontWeight, ImageId, TextStyle, Transform};
use std::collections::HashMap;
use std::f64::consts::TAU;

/// `spindle::Canvas` over a cairo context plus the decoded section images.
pub struct CairoCanvas<'a> {
    cr: &'a Context,
    images: &'a HashMap<ImageId, Pixbuf>,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context, images: &'a HashMap<ImageId, Pixbuf>) -> Self {
        Self { cr, images }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn wedge_path(&self, radius: f64, start: f64, sweep: f64) {
        self.cr.new_path();
        self.cr.move_to(0.0, 0.0);
        self.cr.arc(0.0, 0.0, radius, start, start + sweep);
        self.cr.close_path();
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn save(&mut self) -> Result<(), cairo::Error> {
        self.cr.save()
    }

    fn restore(&mut self) -> Result<(), cairo::Error> {
        self.cr.restore()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.cr.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
        self.cr.rotate(angle);
    }

    fn fill_wedge(
        &mut self,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.wedge_path(radius, start, sweep);
        self.cr.fill()
    }

    fn tile_wedge(
        &mut self,
        radius: f64,
        start: f64,
        sweep: f64,
        image: &ImageId,
        transform: Transform,
    ) -> Result<(), cairo::Error> {
        let Some(pixbuf) = self.images.get(image) else {
            return Ok(());
        };

        // Cairo's pattern matrix maps user space to pattern space, the
        // inverse of the painter's image-to-canvas transform.
        let matrix = Matrix::new(
            transform.xx,
            transform.yx,
            transform.xy,
            transform.yy,
            transform.dx,
            transform.dy,
        );
        let Ok(inverse) = matrix.try_invert() else {
            log::warn!("Singular image transform for '{}', keeping plain fill", image);
            return Ok(());
        };

        self.cr.save()?;
        self.wedge_path(radius, start, sweep);
        self.cr.clip();
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        let source = self.cr.source();
        source.set_extend(Extend::Repeat);
        source.set_matrix(inverse);
        self.cr.paint()?;
        self.cr.restore()
    }

    fn stroke_wedge(
        &mut self,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Srgba<f64>,
        width: f64,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr.set_line_width(width);
        self.wedge_path(radius, start, sweep);
        self.cr.stroke()
    }

    fn fill_circle(&mut self, radius: f64, color: Srgba<f64>) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr.new_path();
        self.cr.arc(0.0, 0.0, radius, 0.0, TAU);
        self.cr.fill()
    }

    fn image_size(&self, image: &ImageId) -> Option<(f64, f64)> {
        self.images
            .get(image)
            .map(|pixbuf| (f64::from(pixbuf.width()), f64::from(pixbuf.height())))
    }

    fn show_label(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: f64,
    ) -> Result<(), cairo::Error> {
        let weight = match style.weight {
            FontWeight::Normal => cairo::FontWeight::Normal,
            FontWeight::Bold => cairo::FontWeight::Bold,
        };
        self.cr
            .select_font_face(&style.family, cairo::FontSlant::Normal, weight);
        self.cr.set_font_size(style.size);

        let Ok(mut extents) = self.cr.text_extents(text) else {
            return Ok(());
        };
        if extents.width() > max_width && max_width > 0.0 {
            self.cr.set_font_size(style.size * max_width / extents.width());
            let Ok(shrunk) = self.cr.text_extents(text) else {
                return Ok(());
            };
            extents = shrunk;
        }

        self.set_color(style.color);
        self.cr
            .move_to(-extents.width() / 2.0, extents.height() / 2.0);
        self.cr.show_text(text)
    }
}

pub fn draw(
    cr: &Context,
    state: &WheelState,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let style = theme::resolve_style(&state.style, colors);
    let mut canvas = CairoCanvas::new(cr, &state.images);
    spindle::paint(&mut canvas, &state.group, &style, state.rotation, width, height)
}
