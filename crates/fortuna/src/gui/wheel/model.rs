use crate::config::{Config, ConfigError, SectionConfig, SpinConfig, StyleConfig};
use crate::gui::theme;
use gdk_pixbuf::Pixbuf;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use spindle::{
    IconGlyph, ImageId, Section, SectionContent, SectionGroup, SectionText, SpinTransition,
    TextStyle,
};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SpinError {
    #[error("section index {index} out of range for {count} sections")]
    OutOfRange { index: usize, count: usize },
}

struct ActiveSpin {
    transition: SpinTransition,
    /// Frame-clock time of the first tick, in microseconds.
    started_at: Option<i64>,
    target: usize,
}

/// Runtime state of the wheel: the validated section group, decoded section
/// images, the rotation angle the painter reads, and the in-flight spin.
pub struct WheelState {
    pub group: SectionGroup,
    pub style: StyleConfig,
    pub images: HashMap<ImageId, Pixbuf>,
    pub rotation: f64,
    spin: SpinConfig,
    picker: WeightedIndex<f64>,
    active: Option<ActiveSpin>,
}

/// What the frame-clock ticker should do after advancing the wheel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickAction {
    pub should_redraw: bool,
    pub landed: Option<usize>,
    pub running: bool,
}

impl WheelState {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let group = build_group(&config.sections)?;
        let picker = WeightedIndex::new(group.sections().iter().map(|s| s.weight))?;
        Ok(Self {
            images: load_images(&config.sections),
            group,
            picker,
            style: config.style.clone(),
            spin: config.spin.clone(),
            rotation: 0.0,
            active: None,
        })
    }

    /// Swaps in a reloaded config, keeping the current resting angle.
    pub fn reload(&mut self, config: &Config) -> Result<(), ConfigError> {
        let group = build_group(&config.sections)?;
        let picker = WeightedIndex::new(group.sections().iter().map(|s| s.weight))?;
        self.images = load_images(&config.sections);
        self.group = group;
        self.picker = picker;
        self.style = config.style.clone();
        self.spin = config.spin.clone();
        // The new group may not contain the old spin target anymore.
        self.active = None;
        Ok(())
    }

    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a spin toward `target`, or toward a weighted-random section.
    ///
    /// A request made while a spin is in flight replaces it; the new spin's
    /// minimum rotations are measured from the current animated angle.
    pub fn begin_spin(&mut self, target: Option<usize>) -> Result<usize, SpinError> {
        let count = self.group.len();
        let target = match target {
            Some(index) if index < count => index,
            Some(index) => return Err(SpinError::OutOfRange { index, count }),
            None => self.picker.sample(&mut rand::rng()),
        };

        let end = spindle::end_rotation(
            &self.group,
            target,
            self.spin.direction,
            self.rotation,
            self.spin.min_rotate_circles,
            self.spin.offset,
        );

        self.active = Some(ActiveSpin {
            transition: SpinTransition::new(
                self.rotation,
                end,
                Duration::from_millis(self.spin.duration_ms),
            ),
            started_at: None,
            target,
        });
        Ok(target)
    }

    /// Advances the wheel to the given frame-clock time.
    pub fn tick(&mut self, frame_time_us: i64) -> TickAction {
        let Some(active) = &mut self.active else {
            return TickAction::default();
        };

        let started = *active.started_at.get_or_insert(frame_time_us);
        let elapsed = Duration::from_micros(frame_time_us.saturating_sub(started).max(0) as u64);

        if active.transition.is_finished(elapsed) {
            self.rotation = active.transition.to;
            let target = active.target;
            self.active = None;
            TickAction {
                should_redraw: true,
                landed: Some(target),
                running: false,
            }
        } else {
            self.rotation = active.transition.angle_at(elapsed);
            TickAction {
                should_redraw: true,
                landed: None,
                running: true,
            }
        }
    }
}

fn build_group(sections: &[SectionConfig]) -> Result<SectionGroup, ConfigError> {
    let mut built = Vec::with_capacity(sections.len());

    for (index, cfg) in sections.iter().enumerate() {
        let content = match (&cfg.text, cfg.icon) {
            (Some(_), Some(_)) => return Err(ConfigError::AmbiguousContent { index }),
            (Some(text), None) => SectionContent::Text(SectionText::new(text)),
            (None, Some(glyph)) => SectionContent::Icon(IconGlyph::from(glyph)),
            (None, None) => SectionContent::Empty,
        };

        let fill = cfg
            .color
            .map(Into::into)
            .unwrap_or_else(|| theme::section_fallback(index));

        let mut section = Section::new(cfg.weight, content, fill);
        if let Some(path) = &cfg.image {
            section = section.image(ImageId::new(path.clone()));
        }
        if cfg.text_color.is_some() || cfg.text_size.is_some() {
            let mut text_style = TextStyle::default();
            if let Some(color) = cfg.text_color {
                text_style.color = color.into();
            }
            if let Some(size) = cfg.text_size {
                text_style.size = size;
            }
            section = section.text_style(text_style);
        }
        built.push(section);
    }

    Ok(SectionGroup::new(built)?)
}

fn load_images(sections: &[SectionConfig]) -> HashMap<ImageId, Pixbuf> {
    sections
        .iter()
        .filter_map(|cfg| cfg.image.as_ref())
        .filter_map(|path| match Pixbuf::from_file(path) {
            Ok(pixbuf) => Some((ImageId::new(path.clone()), pixbuf)),
            Err(e) => {
                log::warn!("Failed to load section image '{}': {}", path, e);
                None
            }
        })
        .collect()
}
