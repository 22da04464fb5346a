//! Configuration for the command shell.

use reservoir_storage::BinaryLayout;

/// Configuration for a shell session.
///
/// Controls the binary export layout and the interactive front end.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Layout used by `save-bin` and `load-bin`.
    pub layout: BinaryLayout,

    /// Print the welcome banner on interactive start.
    pub show_banner: bool,

    /// Primary prompt.
    pub prompt: String,

    /// Number of history entries kept by the line editor.
    pub history_size: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            layout: BinaryLayout::native(),
            show_banner: true,
            prompt: "reservoir> ".to_string(),
            history_size: 1000,
        }
    }
}

impl ShellConfig {
    /// Creates a configuration that writes portable binary dumps.
    #[must_use]
    pub fn portable() -> Self {
        Self {
            layout: BinaryLayout::portable(),
            ..Self::default()
        }
    }

    /// Builder method to set the binary layout.
    #[must_use]
    pub fn with_layout(mut self, layout: BinaryLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Builder method to enable/disable the banner.
    #[must_use]
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to set the history size.
    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }
}
