use tracing::{debug, debug_span};
use tsuzuri_core::action::Action;

use super::segments::SegmentModel;
use super::types::{Direction, KeyResponse, SeatState};
use super::Seat;

impl Seat {
    /// Run one logical action.
    ///
    /// An action whose precondition does not hold does nothing but still
    /// reports the key as handled.
    pub fn handle_action(&mut self, action: Action) -> KeyResponse {
        let _span = debug_span!("handle_action", seat = %self.name, %action).entered();
        let resp = match action {
            Action::Enable => self.enable(),
            Action::Disable => self.disable(),
            Action::Toggle if self.is_composing() => self.disable(),
            Action::Toggle => self.enable(),
            Action::DeleteLeft => self.delete(Direction::Backward),
            Action::DeleteRight => self.delete(Direction::Forward),
            Action::MoveLeft => self.move_cursor(Direction::Backward),
            Action::MoveRight => self.move_cursor(Direction::Forward),
            Action::ExpandLeft => self.expand(-1),
            Action::ExpandRight => self.expand(1),
            Action::Select => self.select(),
            Action::Compose => self.compose(),
            Action::Accept => self.accept(),
            Action::Discard => self.discard(),
            Action::PrevCandidate => self.cycle(Direction::Backward),
            Action::NextCandidate | Action::CycleCandidate => self.cycle(Direction::Forward),
        };
        debug!(mode = ?self.mode(), "action done");
        resp
    }

    fn enable(&mut self) -> KeyResponse {
        if !self.is_composing() {
            self.state = SeatState::Composing;
        }
        KeyResponse::handled()
    }

    fn disable(&mut self) -> KeyResponse {
        self.state = SeatState::Disabled;
        self.candidates_visible = false;
        self.buffer.clear();
        self.composing_update()
    }

    fn delete(&mut self, direction: Direction) -> KeyResponse {
        if !self.is_composing() || self.buffer.is_empty() {
            return KeyResponse::handled();
        }
        self.leave_selection();
        match direction {
            Direction::Backward => self.buffer.delete_backward(1),
            Direction::Forward => self.buffer.delete_forward(1),
        }
        self.composing_update()
    }

    fn move_cursor(&mut self, direction: Direction) -> KeyResponse {
        if let SeatState::Selecting(model) = &mut self.state {
            model.advance_segment(self.engine.as_mut(), direction);
            return self.selecting_update();
        }
        if !self.is_composing() || self.buffer.is_empty() {
            return KeyResponse::handled();
        }
        match direction {
            Direction::Backward => self.buffer.move_left(),
            Direction::Forward => self.buffer.move_right(),
        }
        self.composing_update()
    }

    fn expand(&mut self, delta: i32) -> KeyResponse {
        let SeatState::Selecting(model) = &mut self.state else {
            return KeyResponse::handled();
        };
        model.resize_current(self.engine.as_mut(), delta);
        self.selecting_update()
    }

    fn select(&mut self) -> KeyResponse {
        if !matches!(self.state, SeatState::Composing) || self.buffer.is_empty() {
            return KeyResponse::handled();
        }
        self.buffer.convert_trailing_n();
        let model = SegmentModel::begin(self.engine.as_mut(), self.buffer.as_str());
        self.state = SeatState::Selecting(model);
        self.candidates_visible = self.emulate_im_popups;
        self.selecting_update()
    }

    fn compose(&mut self) -> KeyResponse {
        match self.state {
            SeatState::Disabled => self.enable(),
            SeatState::Selecting(_) => {
                self.leave_selection();
                self.composing_update()
            }
            SeatState::Composing => KeyResponse::handled(),
        }
    }

    fn accept(&mut self) -> KeyResponse {
        if !self.is_composing() || self.buffer.is_empty() {
            return KeyResponse::handled();
        }
        if self.is_selecting() {
            self.selecting_commit()
        } else {
            self.composing_commit()
        }
    }

    fn discard(&mut self) -> KeyResponse {
        if !self.is_composing() {
            return KeyResponse::handled();
        }
        self.leave_selection();
        self.buffer.clear();
        self.composing_commit()
    }

    fn cycle(&mut self, direction: Direction) -> KeyResponse {
        let SeatState::Selecting(model) = &mut self.state else {
            return KeyResponse::handled();
        };
        model.cycle_candidate(self.engine.as_ref(), direction);
        self.candidates_visible = true;
        self.selecting_update()
    }
}
