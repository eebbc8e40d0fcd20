/// iced views
///
/// - `login.rs` - sign-in form
/// - `directory.rs` - user table with stat cards
/// - `overlay.rs` - per-user image viewer
/// - `style.rs` - shared container styles

pub mod directory;
pub mod login;
pub mod overlay;
pub mod style;

use iced::widget::stack;
use iced::Element;

use crate::state::app::{AppState, DirectoryPhase, ViewState};
use crate::Message;

/// Pick the screen for the current view state
pub fn view(state: &AppState) -> Element<'_, Message> {
    match state.view_state() {
        ViewState::LoggedOut => login::view(state.session()),
        ViewState::LoggedIn(DirectoryPhase::ImageOverlayOpen) => stack![
            directory::view(state, DirectoryPhase::ImageOverlayOpen),
            overlay::view(state.directory().overlay()),
        ]
        .into(),
        ViewState::LoggedIn(phase) => directory::view(state, phase),
    }
}
