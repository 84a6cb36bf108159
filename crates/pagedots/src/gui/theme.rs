use crate::gui::dots::DotStyle;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub selected: Srgba<f64>,
    pub unselected: Srgba<f64>,
}

impl ThemeColors {
    /// Theme colors, with any color set in `style` taking precedence.
    pub fn from_context(context: &gtk::StyleContext, style: &DotStyle) -> Self {
        Self {
            selected: style.selected.unwrap_or_else(|| {
                Self::lookup_color(
                    context,
                    "theme_selected_bg_color",
                    Srgba::new(0.21, 0.52, 0.89, 1.0),
                    None,
                )
            }),
            unselected: style.unselected.unwrap_or_else(|| {
                Self::lookup_color(
                    context,
                    "theme_fg_color",
                    Srgba::new(0.6, 0.6, 0.6, 0.5),
                    Some(0.35),
                )
            }),
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

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.pagedots-window, .pagedots-drawing-area {
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
