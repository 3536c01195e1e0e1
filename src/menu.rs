//! Button-style triggers for the menu and play views.
//!
//! The engine has no scenes of its own. Buttons persist whatever they
//! choose and answer with [`NavRequest`]s for the host's navigation layer.

use smallvec::{smallvec, SmallVec};
use tracing::info;

use crate::core::{GridSize, Result};
use crate::score::{set_grid_size, KeyValueStore};

/// Navigation the host should perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavRequest {
    OpenPlay,
    OpenMainMenu,
    ShowGridPicker,
    HideGridPicker,
    Quit,
}

/// Main menu and grid picker buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuButton {
    /// Play on the default 3x4 grid.
    Start,
    /// Open the custom grid picker.
    Custom,
    /// Play on a picked grid.
    Preset(GridSize),
    /// Close the picker without choosing.
    CloseCustom,
    Quit,
}

/// Buttons shown during play. Handled by
/// [`RoundController::press`](crate::round::RoundController::press).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayButton {
    Restart,
    Hint,
    MainMenu,
    Quit,
}

/// Handle a menu button, persisting the grid choice before the play view
/// loads.
pub fn press_menu_button(
    store: &mut impl KeyValueStore,
    button: MenuButton,
) -> Result<SmallVec<[NavRequest; 2]>> {
    let requests = match button {
        MenuButton::Start => {
            set_grid_size(store, GridSize::DEFAULT)?;
            smallvec![NavRequest::OpenPlay]
        }
        MenuButton::Custom => smallvec![NavRequest::ShowGridPicker],
        MenuButton::Preset(grid) => {
            info!(%grid, "grid chosen");
            set_grid_size(store, grid)?;
            smallvec![NavRequest::HideGridPicker, NavRequest::OpenPlay]
        }
        MenuButton::CloseCustom => smallvec![NavRequest::HideGridPicker],
        MenuButton::Quit => smallvec![NavRequest::Quit],
    };
    Ok(requests)
}
