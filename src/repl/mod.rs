//! Interactive line reading with path completion
//!
//! This module provides the interactive prompts with features:
//! - Line editing with reedline
//! - Tab-completion menu for remote and local paths
//! - Optional persistent input history
//! - Non-blocking remote completion (see [`completion`])

pub mod completer;
pub mod completion;
pub mod prompt;

pub use completer::{LocalPathCompleter, RemotePathCompleter};
pub use completion::{PathCompletionEngine, RemoteDirSource, COMPLETION_PLACEHOLDER};
pub use prompt::FtpPrompt;

use reedline::{
    default_emacs_keybindings, ColumnarMenu, Completer, Emacs, FileBackedHistory, KeyCode,
    KeyModifiers, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};

use crate::config::HistoryConfig;
use crate::error::Result;

const COMPLETION_MENU: &str = "completion_menu";

/// Reads one line of input with tab-completion.
///
/// Each prompt question gets its own prompter carrying the completer for
/// that question's domain (remote paths, local paths).
pub struct PathPrompter {
    editor: Reedline,
    prompt: FtpPrompt,
}

impl PathPrompter {
    /// Create a prompter with the given completer
    ///
    /// # Arguments
    /// * `label` - Question shown before the input
    /// * `completer` - Completer consulted on Tab
    /// * `history` - History settings; `None` disables persistence
    ///
    /// # Returns
    /// * `Result<Self>` - New prompter or error
    pub fn new(
        label: impl Into<String>,
        completer: Box<dyn Completer>,
        history: Option<&HistoryConfig>,
    ) -> Result<Self> {
        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let mut editor = Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        if let Some(history) = history {
            if history.persist {
                let backed =
                    FileBackedHistory::with_file(history.max_size, history.file_path.clone())
                        .map_err(|e| format!("cannot open history file: {e}"))?;
                editor = editor.with_history(Box::new(backed));
            }
        }

        Ok(Self {
            editor,
            prompt: FtpPrompt::new(label),
        })
    }

    /// Read one line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - The line, or `None` on Ctrl-C / Ctrl-D
    pub fn read(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line.trim().to_string())),
            Signal::CtrlC | Signal::CtrlD => Ok(None),
        }
    }
}
