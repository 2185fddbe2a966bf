use crate::{AppError, AppResult};

use std::panic::Location;

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use error_location::ErrorLocation;

/// Returns the platform-specific clipboard shortcut modifier.
///
/// macOS uses Cmd (Meta), Windows and Linux use Ctrl.
fn shortcut_modifier() -> Key {
    #[cfg(target_os = "macos")]
    {
        Key::Meta
    }
    #[cfg(not(target_os = "macos"))]
    {
        Key::Control
    }
}

/// RAII guard that holds the clipboard shortcut modifier down and
/// guarantees it is released when dropped.
///
/// Owns the `Enigo` instance so all keyboard operations go through it.
/// Release on drop is best-effort; the OS resets modifier state on the next
/// physical key event anyway.
pub struct ModifierKeyGuard {
    enigo: Enigo,
    modifier: Key,
}

impl ModifierKeyGuard {
    /// Press the shortcut modifier and return a guard that releases it on drop.
    #[track_caller]
    pub(crate) fn new() -> AppResult<Self> {
        let modifier = shortcut_modifier();
        let mut enigo = new_enigo()?;

        enigo
            .key(modifier, Direction::Press)
            .map_err(|e| AppError::KeySimulationFailed {
                reason: format!("Failed to press shortcut modifier: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { enigo, modifier })
    }

    /// Click `letter` while the modifier is held (`c` for copy, `v` for paste).
    #[track_caller]
    pub(crate) fn tap(&mut self, letter: char) -> AppResult<()> {
        self.enigo
            .key(Key::Unicode(letter), Direction::Click)
            .map_err(|e| AppError::KeySimulationFailed {
                reason: format!("Failed to press {}: {}", letter.to_ascii_uppercase(), e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Drop for ModifierKeyGuard {
    fn drop(&mut self) {
        let _ = self.enigo.key(self.modifier, Direction::Release);
    }
}

/// Release every key of the activation chord.
///
/// The user is usually still holding WIN+ALT when the chord fires; a
/// simulated copy would otherwise arrive as WIN+ALT+Ctrl+C.
#[track_caller]
pub(crate) fn release_chord(letter: char) -> AppResult<()> {
    let mut enigo = new_enigo()?;

    for key in [Key::Alt, Key::Meta, Key::Unicode(letter)] {
        enigo
            .key(key, Direction::Release)
            .map_err(|e| AppError::KeySimulationFailed {
                reason: format!("Failed to release {:?}: {}", key, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    Ok(())
}

#[track_caller]
fn new_enigo() -> AppResult<Enigo> {
    Enigo::new(&Settings::default()).map_err(|e| AppError::KeySimulationFailed {
        reason: format!("Failed to create Enigo: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
