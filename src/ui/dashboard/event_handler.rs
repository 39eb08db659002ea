use crossterm::event::KeyCode;

/// Events that can occur in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Expand/collapse the panel at this index
    TogglePanel(usize),
    /// Show every panel again
    ShowAllPanels,
    /// Poll every endpoint now
    RefreshAll,
    /// No action
    None,
}

impl DashboardEvent {
    pub fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => DashboardEvent::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') => DashboardEvent::ToggleHelp,
            KeyCode::Char('r') => DashboardEvent::RefreshAll,
            KeyCode::Char('a') => DashboardEvent::ShowAllPanels,
            KeyCode::Char(c @ '1'..='9') => {
                DashboardEvent::TogglePanel(c as usize - '1' as usize)
            }
            _ => DashboardEvent::None,
        }
    }
}
