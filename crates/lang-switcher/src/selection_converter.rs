//! Selected-text layout conversion through the clipboard.
//!
//! Copies the current selection, converts it with
//! [`lang_switcher_core::layout::convert`], pastes the result over the
//! selection and restores whatever text the clipboard held before.

use crate::{AppError, AppResult, ModifierKeyGuard, modifier_key_guard::release_chord};

use lang_switcher_core::{Activation, layout};

use std::{panic::Location, time::Duration};

use arboard::Clipboard;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Delay between individual simulated key events.
///
/// Some applications drop key events that arrive back to back.
const KEY_EVENT_DELAY: Duration = Duration::from_millis(20);

/// Clipboard-driven converter for the current text selection.
pub struct SelectionConverter {
    clipboard: Clipboard,
    settle_delay: Duration,
}

impl SelectionConverter {
    /// Create a converter that waits `settle_delay` after every simulated
    /// copy or paste before touching the clipboard again.
    #[track_caller]
    #[instrument]
    pub fn new(settle_delay: Duration) -> AppResult<Self> {
        let clipboard = Clipboard::new().map_err(|e| AppError::ClipboardError {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("SelectionConverter initialized");

        Ok(Self {
            clipboard,
            settle_delay,
        })
    }

    /// Convert the selection in the focused window.
    ///
    /// Does nothing when the copy yields no text. The previous clipboard
    /// text is restored on every path after it has been saved.
    #[instrument(skip(self))]
    pub async fn convert_selection(&mut self, activation: Activation) -> AppResult<()> {
        let letter = activation.letter();
        run_keys(move || release_chord(letter)).await?;

        let previous = self.clipboard.get_text().ok();
        let result = self.swap_selection().await;

        // Let the target application read the pasted text first.
        tokio::time::sleep(self.settle_delay).await;
        self.restore(previous);

        result
    }

    async fn swap_selection(&mut self) -> AppResult<()> {
        // Cleared so a copy that selects nothing cannot be mistaken for the
        // previous clipboard contents.
        self.clipboard
            .clear()
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to clear clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        run_keys(|| shortcut('c')).await?;
        tokio::time::sleep(self.settle_delay).await;

        let selected = match self.clipboard.get_text() {
            Ok(text) if !text.is_empty() => text,
            _ => {
                debug!("Nothing selected, skipping conversion");
                return Ok(());
            }
        };

        let converted = layout::convert(&selected);

        self.clipboard
            .set_text(converted.as_str())
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        tokio::time::sleep(self.settle_delay).await;
        run_keys(|| shortcut('v')).await?;

        info!(
            text_len = selected.len(),
            converted_len = converted.len(),
            "Selection converted"
        );

        Ok(())
    }

    fn restore(&mut self, previous: Option<String>) {
        let Some(previous) = previous else {
            return;
        };

        if let Err(e) = self.clipboard.set_text(previous) {
            warn!(error = %e, "Failed to restore clipboard");
        }
    }
}

/// Simulate modifier+`letter` with the modifier held by a guard.
fn shortcut(letter: char) -> AppResult<()> {
    let mut guard = ModifierKeyGuard::new()?;

    std::thread::sleep(KEY_EVENT_DELAY);
    guard.tap(letter)?;
    std::thread::sleep(KEY_EVENT_DELAY);

    // Guard drops here and releases the modifier.
    Ok(())
}

/// Run a keyboard simulation on the blocking pool.
///
/// `Enigo` is not `Send`, so each closure builds its own instance.
async fn run_keys<F>(keys: F) -> AppResult<()>
where
    F: FnOnce() -> AppResult<()> + Send + 'static,
{
    tokio::task::spawn_blocking(keys)
        .await
        .map_err(|e| AppError::KeySimulationFailed {
            reason: format!("Key simulation task panicked: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
}
