//! Custom prompt implementation for the interactive prompts

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt shown when reading a path or answer from the user
pub struct FtpPrompt {
    /// Question or label preceding the input
    label: String,
}

impl FtpPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `label` - Question or label preceding the input
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Prompt for FtpPrompt {
    /// Render the left prompt (main prompt)
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Prompt string
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("{}: ", self.label).into()
    }

    /// Render the right prompt (empty in our case)
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Right prompt string (empty)
    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Indicator string (empty since we include it in left prompt)
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the multiline prompt indicator
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Multiline indicator
    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "> ".into()
    }

    /// Render the history search prompt
    ///
    /// # Arguments
    /// * `history_search` - History search state
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - History search prompt
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_left_shows_label() {
        let prompt = FtpPrompt::new("Remote path");
        assert_eq!(prompt.render_prompt_left(), "Remote path: ");
    }

    #[test]
    fn test_right_prompt_empty() {
        let prompt = FtpPrompt::new("x");
        assert_eq!(prompt.render_prompt_right(), "");
    }
}
