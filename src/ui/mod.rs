//! UI rendering module
//!
//! Thin adapter over the form domain: reads `App` state, draws the active
//! wizard step or the confirmation view.

mod confirmation;
mod wizard;

use crate::app::App;
use ratatui::Frame;

/// Draw the whole UI
pub fn draw(frame: &mut Frame, app: &App) {
    if app.submit_state.is_confirmed() {
        confirmation::draw(frame, frame.area());
    } else {
        wizard::draw(frame, frame.area(), app);
    }
}
