use crate::section::{ImageId, SectionContent, SectionGroup};
use crate::style::{TextStyle, WheelStyle};
use crate::transform::Transform;
use palette::Srgba;
use std::f64::consts::FRAC_PI_2;

/// Drawing surface the painter runs against.
///
/// Wedge and circle operations draw around the current origin; the painter
/// positions them with `save`/`translate`/`rotate` frames.
pub trait Canvas {
    type Error;

    fn save(&mut self) -> Result<(), Self::Error>;
    fn restore(&mut self) -> Result<(), Self::Error>;
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: f64);

    /// Filled pie wedge from `start`, spanning `sweep` radians.
    fn fill_wedge(
        &mut self,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;

    /// Fills a wedge with `image` tiled under `transform`. A canvas that
    /// does not know the image draws nothing.
    fn tile_wedge(
        &mut self,
        radius: f64,
        start: f64,
        sweep: f64,
        image: &ImageId,
        transform: Transform,
    ) -> Result<(), Self::Error>;

    /// Strokes the outline of a wedge.
    fn stroke_wedge(
        &mut self,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Srgba<f64>,
        width: f64,
    ) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, radius: f64, color: Srgba<f64>) -> Result<(), Self::Error>;

    /// Native size of a decoded image, if the canvas has it.
    fn image_size(&self, image: &ImageId) -> Option<(f64, f64)>;

    /// Text centered on the current origin, laid out to fit `max_width`.
    fn show_label(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: f64,
    ) -> Result<(), Self::Error>;
}

/// Paints one frame of the wheel.
///
/// Pure in its inputs: a redraw is needed exactly when the group, the style,
/// or the rotation angle changes.
pub fn paint<C: Canvas>(
    canvas: &mut C,
    group: &SectionGroup,
    style: &WheelStyle,
    rotation: f64,
    width: f64,
    height: f64,
) -> Result<(), C::Error> {
    let radius = width.min(height) / 2.0;
    let (cx, cy) = (width / 2.0, height / 2.0);

    // Everything but the sticker rotates with the wheel; the extra quarter
    // turn puts section 0 at the top pointer.
    canvas.save()?;
    canvas.translate(cx, cy);
    canvas.rotate(-FRAC_PI_2 + rotation);
    draw_background(canvas, group, style, radius)?;
    draw_content(canvas, group, style, radius)?;
    canvas.restore()?;

    canvas.save()?;
    canvas.translate(cx, cy);
    canvas.fill_circle(style.sticker_ratio * radius, style.sticker_color)?;
    canvas.restore()?;
    Ok(())
}

fn draw_background<C: Canvas>(
    canvas: &mut C,
    group: &SectionGroup,
    style: &WheelStyle,
    radius: f64,
) -> Result<(), C::Error> {
    for (index, section) in group.sections().iter().enumerate() {
        let start = group.leading_angle(index);
        let sweep = group.sweep(index);

        canvas.fill_wedge(radius, start, sweep, section.fill)?;

        if let Some(image) = &section.image
            && let Some((image_w, image_h)) = canvas.image_size(image)
        {
            canvas.tile_wedge(
                radius,
                start,
                sweep,
                image,
                image_transform(radius, start, sweep, image_w, image_h),
            )?;
        }

        canvas.stroke_wedge(radius, start, sweep, style.divider_color, style.divider_width)?;
    }
    Ok(())
}

/// Transform tiling a section image over its wedge.
///
/// The wedge's bounding square has side `radius`; the image is scaled by the
/// larger of the two side ratios so it covers the square, rotated onto the
/// wedge bisector with its upright axis pointing outward, and anchored so a
/// tile center rides the bisector at half the radius.
fn image_transform(radius: f64, start: f64, sweep: f64, image_w: f64, image_h: f64) -> Transform {
    let scale = (radius / image_w).max(radius / image_h);
    let mid = start + sweep / 2.0;

    let placed = Transform::scale(scale, scale) * Transform::rotation(mid + FRAC_PI_2);
    let (ax, ay) = placed.apply(image_w / 2.0, image_h / 2.0);
    let anchor_r = radius / 2.0;
    Transform::translation(anchor_r * mid.cos() - ax, anchor_r * mid.sin() - ay) * placed
}

fn draw_content<C: Canvas>(
    canvas: &mut C,
    group: &SectionGroup,
    style: &WheelStyle,
    radius: f64,
) -> Result<(), C::Error> {
    for (index, section) in group.sections().iter().enumerate() {
        let text = match &section.content {
            SectionContent::Empty => continue,
            SectionContent::Text(text) => text.to_string(),
            SectionContent::Icon(glyph) => glyph.to_string(),
        };
        let sweep = group.sweep(index);
        let mid = group.leading_angle(index) + sweep / 2.0;

        let text_radius = style.text_bias * radius;
        // Chord width of the wedge at the text radius; past a half turn the
        // full diameter is available.
        let half = (sweep / 2.0).min(FRAC_PI_2);
        let chord = 2.0 * text_radius * half.sin();

        let text_style = section.text_style.as_ref().unwrap_or(&style.text_style);

        canvas.save()?;
        canvas.rotate(mid + FRAC_PI_2);
        canvas.translate(0.0, -text_radius);
        canvas.show_label(&text, text_style, chord)?;
        canvas.restore()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{Section, SectionGroup};
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::f64::consts::TAU;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Save,
        Restore,
        Translate(f64, f64),
        Rotate(f64),
        FillWedge { start: f64, sweep: f64 },
        TileWedge { image: String, transform: Transform },
        StrokeWedge { start: f64, sweep: f64 },
        FillCircle { radius: f64 },
        Label { text: String, max_width: f64 },
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        images: HashMap<ImageId, (f64, f64)>,
    }

    impl Canvas for Recorder {
        type Error = Infallible;

        fn save(&mut self) -> Result<(), Infallible> {
            self.ops.push(Op::Save);
            Ok(())
        }

        fn restore(&mut self) -> Result<(), Infallible> {
            self.ops.push(Op::Restore);
            Ok(())
        }

        fn translate(&mut self, dx: f64, dy: f64) {
            self.ops.push(Op::Translate(dx, dy));
        }

        fn rotate(&mut self, angle: f64) {
            self.ops.push(Op::Rotate(angle));
        }

        fn fill_wedge(
            &mut self,
            _radius: f64,
            start: f64,
            sweep: f64,
            _color: Srgba<f64>,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::FillWedge { start, sweep });
            Ok(())
        }

        fn tile_wedge(
            &mut self,
            _radius: f64,
            _start: f64,
            _sweep: f64,
            image: &ImageId,
            transform: Transform,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::TileWedge {
                image: image.to_string(),
                transform,
            });
            Ok(())
        }

        fn stroke_wedge(
            &mut self,
            _radius: f64,
            start: f64,
            sweep: f64,
            _color: Srgba<f64>,
            _width: f64,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::StrokeWedge { start, sweep });
            Ok(())
        }

        fn fill_circle(&mut self, radius: f64, _color: Srgba<f64>) -> Result<(), Infallible> {
            self.ops.push(Op::FillCircle { radius });
            Ok(())
        }

        fn image_size(&self, image: &ImageId) -> Option<(f64, f64)> {
            self.images.get(image).copied()
        }

        fn show_label(
            &mut self,
            text: &str,
            _style: &TextStyle,
            max_width: f64,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::Label {
                text: text.to_string(),
                max_width,
            });
            Ok(())
        }
    }

    fn fill() -> Srgba<f64> {
        Srgba::new(0.3, 0.3, 0.3, 1.0)
    }

    fn three_sections() -> SectionGroup {
        SectionGroup::new(vec![
            Section::with_text(1.0, "a", fill()),
            Section::new(1.0, SectionContent::Empty, fill()),
            Section::with_icon(2.0, '★', fill()),
        ])
        .unwrap()
    }

    fn paint_recorded(group: &SectionGroup, recorder: &mut Recorder) {
        let style = WheelStyle::default();
        paint(recorder, group, &style, 0.8, 200.0, 100.0).unwrap();
    }

    #[test]
    fn frame_opens_with_translated_rotation() {
        let mut recorder = Recorder::default();
        paint_recorded(&three_sections(), &mut recorder);

        assert_eq!(recorder.ops[0], Op::Save);
        assert_eq!(recorder.ops[1], Op::Translate(100.0, 50.0));
        assert_eq!(recorder.ops[2], Op::Rotate(-FRAC_PI_2 + 0.8));
    }

    #[test]
    fn background_precedes_content_precedes_sticker() {
        let mut recorder = Recorder::default();
        paint_recorded(&three_sections(), &mut recorder);

        let last_wedge = recorder
            .ops
            .iter()
            .rposition(|op| matches!(op, Op::StrokeWedge { .. }))
            .unwrap();
        let first_label = recorder
            .ops
            .iter()
            .position(|op| matches!(op, Op::Label { .. }))
            .unwrap();
        let sticker = recorder
            .ops
            .iter()
            .position(|op| matches!(op, Op::FillCircle { .. }))
            .unwrap();
        assert!(last_wedge < first_label);
        assert!(first_label < sticker);
    }

    #[test]
    fn wedges_cover_the_circle_in_order() {
        let mut recorder = Recorder::default();
        paint_recorded(&three_sections(), &mut recorder);

        let wedges: Vec<_> = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::FillWedge { start, sweep } => Some((*start, *sweep)),
                _ => None,
            })
            .collect();
        assert_eq!(wedges.len(), 3);
        assert!((wedges[0].0).abs() < 1e-12);
        assert!((wedges[1].0 - TAU / 4.0).abs() < 1e-12);
        assert!((wedges[2].0 - TAU / 2.0).abs() < 1e-12);
        let total: f64 = wedges.iter().map(|(_, sweep)| sweep).sum();
        assert!((total - TAU).abs() < 1e-9);
    }

    #[test]
    fn empty_sections_get_no_label() {
        let mut recorder = Recorder::default();
        paint_recorded(&three_sections(), &mut recorder);

        let labels: Vec<_> = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Label { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["a".to_string(), "★".to_string()]);
    }

    #[test]
    fn sticker_is_drawn_outside_the_rotation_frame() {
        let mut recorder = Recorder::default();
        paint_recorded(&three_sections(), &mut recorder);

        let sticker = recorder
            .ops
            .iter()
            .position(|op| matches!(op, Op::FillCircle { .. }))
            .unwrap();
        // The wheel frame has been restored, and the sticker frame applies
        // no rotation.
        assert_eq!(recorder.ops[sticker - 2], Op::Save);
        assert_eq!(recorder.ops[sticker - 1], Op::Translate(100.0, 50.0));
        assert_eq!(
            recorder.ops[sticker],
            Op::FillCircle {
                radius: WheelStyle::default().sticker_ratio * 50.0
            }
        );
    }

    #[test]
    fn known_image_is_tiled_between_fill_and_stroke() {
        let image = ImageId::new("tile.png");
        let group = SectionGroup::new(vec![
            Section::with_text(1.0, "plain", fill()),
            Section::with_text(1.0, "tiled", fill()).image(image.clone()),
        ])
        .unwrap();

        let mut recorder = Recorder::default();
        recorder.images.insert(image, (64.0, 32.0));
        paint_recorded(&group, &mut recorder);

        let tile = recorder
            .ops
            .iter()
            .position(|op| matches!(op, Op::TileWedge { .. }))
            .unwrap();
        assert!(matches!(recorder.ops[tile - 1], Op::FillWedge { .. }));
        assert!(matches!(recorder.ops[tile + 1], Op::StrokeWedge { .. }));
    }

    #[test]
    fn unknown_image_degrades_to_plain_fill() {
        let group = SectionGroup::new(vec![
            Section::with_text(1.0, "x", fill()).image(ImageId::new("missing.png")),
        ])
        .unwrap();

        let mut recorder = Recorder::default();
        paint_recorded(&group, &mut recorder);

        assert!(
            !recorder
                .ops
                .iter()
                .any(|op| matches!(op, Op::TileWedge { .. }))
        );
        assert!(
            recorder
                .ops
                .iter()
                .any(|op| matches!(op, Op::FillWedge { .. }))
        );
    }

    #[test]
    fn image_scale_covers_the_bounding_square() {
        let radius = 50.0;
        let transform = image_transform(radius, 0.0, TAU / 4.0, 100.0, 25.0);
        // Larger ratio wins: 50/25 = 2.
        let scale = (transform.xx * transform.xx + transform.yx * transform.yx).sqrt();
        assert!((scale - 2.0).abs() < 1e-9);
    }

    #[test]
    fn labels_fit_the_wedge_chord() {
        let group = three_sections();
        let mut recorder = Recorder::default();
        paint_recorded(&group, &mut recorder);

        let style = WheelStyle::default();
        let radius = 50.0;
        let expected = 2.0 * style.text_bias * radius * (group.sweep(0) / 2.0).sin();
        let Some(Op::Label { max_width, .. }) = recorder
            .ops
            .iter()
            .find(|op| matches!(op, Op::Label { .. }))
        else {
            panic!("no label recorded");
        };
        assert!((max_width - expected).abs() < 1e-9);
    }
}
