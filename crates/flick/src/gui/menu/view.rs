use super::{
    ACTIVE_LINE_WIDTH, FONT_FACE, GUIDE_LINE_WIDTH, LABEL_FONT_SIZE, STATUS_FONT_SIZE,
    STATUS_MARGIN,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use flick_core::geometry::Vec2;
use flick_core::guides::{self, GuideLabel, LabelState, Segment, Stroke};
use flick_core::session::Session;
use palette::Srgba;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct GuideRenderer<'a> {
    session: &'a Session,
    colors: &'a ThemeColors,
}

impl GuideRenderer<'_> {
    fn screen(&self, v: Vec2) -> Vec2 {
        self.session.to_screen(v)
    }

    fn draw_segment(&self, cr: &Context, segment: &Segment) -> Result<(), cairo::Error> {
        let (from, to) = (self.screen(segment.from), self.screen(segment.to));
        set_color(cr, self.colors.stroke(segment.stroke));
        cr.set_line_width(match segment.stroke {
            Stroke::Active => ACTIVE_LINE_WIDTH,
            Stroke::Passive | Stroke::Trail => GUIDE_LINE_WIDTH,
        });
        cr.move_to(from.x, from.y);
        cr.line_to(to.x, to.y);
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, label: &GuideLabel) -> Result<(), cairo::Error> {
        let weight = match label.state {
            LabelState::Selected => cairo::FontWeight::Bold,
            LabelState::Waiting | LabelState::Disabled => cairo::FontWeight::Normal,
        };
        cr.select_font_face(FONT_FACE, cairo::FontSlant::Normal, weight);
        cr.set_font_size(LABEL_FONT_SIZE);
        let ext = cr.text_extents(&label.text)?;

        // shift the box so the text grows away from the anchor
        let anchor = self.screen(label.anchor);
        let left = anchor.x + label.align.x * ext.width();
        let top = anchor.y + label.align.y * ext.height();

        set_color(cr, self.colors.label(label.state));
        cr.move_to(left - ext.x_bearing(), top - ext.y_bearing());
        cr.show_text(&label.text)
    }
}

pub fn draw(cr: &Context, session: &Session, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_status(cr, session, colors)?;
    if !session.is_open() {
        return Ok(());
    }

    let guides = guides::layout(session.navigator());
    let renderer = GuideRenderer { session, colors };
    for segment in &guides.segments {
        renderer.draw_segment(cr, segment)?;
    }
    for label in &guides.labels {
        renderer.draw_label(cr, label)?;
    }
    Ok(())
}

/// Last committed action in the top-left corner.
fn draw_status(cr: &Context, session: &Session, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some(action) = session.last_action() else {
        return Ok(());
    };
    cr.select_font_face(FONT_FACE, cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(STATUS_FONT_SIZE);
    let ext = cr.text_extents(action.as_str())?;
    set_color(cr, colors.status);
    cr.move_to(STATUS_MARGIN - ext.x_bearing(), STATUS_MARGIN - ext.y_bearing());
    cr.show_text(action.as_str())
}
