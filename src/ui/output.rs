//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything in `Normal`, plus each command line before it runs.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show spinners and final status only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows plain informational messages.
    pub fn shows_messages(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode echoes commands before spawning them.
    pub fn shows_commands(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
