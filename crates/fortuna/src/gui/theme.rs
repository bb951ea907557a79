use crate::config::StyleConfig;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use spindle::{TextStyle, WheelStyle};

pub struct ThemeColors {
    pub divider: Srgba<f64>,
    pub sticker: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            divider: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.9, 0.9, 0.9, 1.0),
                Some(1.0),
            ),
            sticker: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.12, 0.12, 0.12, 1.0),
                Some(0.95),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Fill used for sections whose config omits a color.
pub fn section_fallback(index: usize) -> Srgba<f64> {
    match index % 6 {
        0 => Srgba::new(0.18, 0.83, 0.70, 1.0),
        1 => Srgba::new(0.12, 0.12, 0.12, 1.0),
        2 => Srgba::new(0.08, 0.31, 0.27, 1.0),
        3 => Srgba::new(0.89, 0.36, 0.36, 1.0),
        4 => Srgba::new(0.16, 0.16, 0.16, 1.0),
        _ => Srgba::new(0.24, 0.84, 0.78, 1.0),
    }
}

/// Final wheel style for one frame: config overrides, then theme colors,
/// then the core defaults.
pub fn resolve_style(cfg: &StyleConfig, colors: &ThemeColors) -> WheelStyle {
    let defaults = WheelStyle::default();
    let text_defaults = TextStyle::default();

    let text_style = TextStyle {
        family: cfg.font_family.clone().unwrap_or(text_defaults.family),
        size: cfg.font_size.unwrap_or(text_defaults.size),
        weight: cfg.font_weight.unwrap_or(text_defaults.weight),
        color: cfg.text_color.map(Into::into).unwrap_or(colors.text),
    };

    WheelStyle {
        divider_color: cfg.divider_color.map(Into::into).unwrap_or(colors.divider),
        divider_width: cfg.divider_width.unwrap_or(defaults.divider_width),
        text_style,
        sticker_color: cfg.sticker_color.map(Into::into).unwrap_or(colors.sticker),
        sticker_ratio: cfg.sticker_ratio.unwrap_or(defaults.sticker_ratio),
        text_bias: cfg.text_bias.unwrap_or(defaults.text_bias),
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.fortuna-window, .fortuna-wheel {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
