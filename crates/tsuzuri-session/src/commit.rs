use tracing::debug;

use super::types::{KeyResponse, Preedit, SeatState};
use super::Seat;

impl Seat {
    /// Commit the raw buffer text and clear the buffer.
    pub(super) fn composing_commit(&mut self) -> KeyResponse {
        let text = self.buffer.as_str().to_string();
        self.buffer.clear();
        debug!(seat = %self.name, %text, "commit");
        self.commit_response(text)
    }

    /// Commit the selected candidates, leave selection and clear the buffer.
    pub(super) fn selecting_commit(&mut self) -> KeyResponse {
        let state = std::mem::replace(&mut self.state, SeatState::Composing);
        let SeatState::Selecting(model) = state else {
            self.state = state;
            return KeyResponse::handled();
        };
        let text = model.commit_text(self.engine.as_ref());
        self.candidates_visible = false;
        self.buffer.clear();
        debug!(seat = %self.name, %text, "commit selection");
        self.commit_response(text)
    }

    /// Drop the selection, if any, without committing it.
    pub(super) fn leave_selection(&mut self) {
        if self.is_selecting() {
            self.state = SeatState::Composing;
        }
        self.candidates_visible = false;
    }

    fn commit_response(&self, text: String) -> KeyResponse {
        let mut resp = KeyResponse::handled();
        resp.commit = Some(text);
        resp.preedit = Some(Preedit::empty());
        resp.popup = self.redraw();
        resp
    }
}
