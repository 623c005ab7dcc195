use flick_core::guides::{LabelState, Stroke};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub passive: Srgba<f64>,
    pub active: Srgba<f64>,
    pub trail: Srgba<f64>,
    pub waiting: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub disabled: Srgba<f64>,
    pub status: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            passive: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.6, 0.6, 0.6, 0.6),
                Some(0.6),
            ),
            active: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 1.0),
                None,
            ),
            trail: Self::lookup_color(
                context,
                "warning_color",
                Srgba::new(0.9, 0.6, 0.1, 0.8),
                Some(0.8),
            ),
            waiting: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.1, 0.1, 0.1, 1.0),
                None,
            ),
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 1.0),
                None,
            ),
            disabled: Self::lookup_color(
                context,
                "insensitive_fg_color",
                Srgba::new(0.5, 0.5, 0.5, 0.6),
                Some(0.6),
            ),
            status: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.1, 0.1, 0.1, 1.0),
                None,
            ),
        }
    }

    pub fn stroke(&self, stroke: Stroke) -> Srgba<f64> {
        match stroke {
            Stroke::Passive => self.passive,
            Stroke::Active => self.active,
            Stroke::Trail => self.trail,
        }
    }

    pub fn label(&self, state: LabelState) -> Srgba<f64> {
        match state {
            LabelState::Waiting => self.waiting,
            LabelState::Selected => self.selected,
            LabelState::Disabled => self.disabled,
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
.flick-drawing-area {
    background-color: @theme_base_color;
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
