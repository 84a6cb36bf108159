use crate::gui::dots::State;
use gtk::prelude::*;
use gtk4 as gtk;

/// Asks for at least the indicator's natural size.
pub fn fit_to_indicator(area: &gtk::DrawingArea, state: &State) {
    let (width, height) = state.preferred_size();
    area.set_content_width(width.ceil() as i32);
    area.set_content_height(height.ceil() as i32);
}

pub fn surface_size(area: &gtk::DrawingArea) -> (i32, i32) {
    (area.width().max(1), area.height().max(1))
}
