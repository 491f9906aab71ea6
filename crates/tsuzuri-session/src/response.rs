use super::popup::{PopupModel, SelectingPopup};
use super::types::{KeyResponse, PopupAction, Preedit, SeatState};
use super::Seat;

impl Seat {
    /// Popup contents for the current state.
    pub(super) fn redraw(&self) -> PopupAction {
        match &self.state {
            SeatState::Selecting(model) if self.candidates_visible => {
                PopupAction::Show(PopupModel::Selecting(SelectingPopup::new(
                    self.engine.as_ref(),
                    model,
                    self.emulate_im_popups,
                )))
            }
            SeatState::Composing | SeatState::Selecting(_)
                if self.emulate_im_popups && !self.buffer.is_empty() =>
            {
                PopupAction::Show(PopupModel::Composing {
                    text: self.buffer.as_str().to_string(),
                    cursor: self.buffer.cursor(),
                })
            }
            _ => PopupAction::Hide,
        }
    }

    /// Preedit showing the raw buffer with a collapsed cursor.
    pub(super) fn composing_update(&self) -> KeyResponse {
        let cursor = self.buffer.cursor();
        let mut resp = KeyResponse::handled();
        resp.preedit = Some(Preedit {
            text: self.buffer.as_str().to_string(),
            cursor_begin: cursor,
            cursor_end: cursor,
        });
        resp.popup = self.redraw();
        resp
    }

    /// Preedit showing the selected candidates with the current segment
    /// highlighted.
    pub(super) fn selecting_update(&self) -> KeyResponse {
        let SeatState::Selecting(model) = &self.state else {
            return self.composing_update();
        };
        let (text, span) = model.render_text(self.engine.as_ref());
        let mut resp = KeyResponse::handled();
        resp.preedit = Some(Preedit {
            text,
            cursor_begin: span.start,
            cursor_end: span.end,
        });
        resp.popup = self.redraw();
        resp
    }
}
