use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// User intent behind a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    PreviousPage,
    NextPage,
    FirstPage,
    LastPage,
    JumpBack,
    JumpForward,
    /// Direct page selection with a digit key
    GoTo(u8),
    OpenJump,
    NextPageSize,
    PreviousPageSize,
    CycleStyle,
}

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: Vec<KeyCode>,
    pub modifiers: KeyModifiers,
    pub action: Action,
    pub label: String,
    pub description: String,
}

impl KeyBinding {
    pub fn new(keys: &[KeyCode], modifiers: KeyModifiers, action: Action, label: &str, description: &str) -> Self {
        Self {
            keys: keys.to_vec(),
            modifiers,
            action,
            label: label.to_string(),
            description: description.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.contains(&event.code) && event.modifiers.contains(self.modifiers)
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyCode::*;
        let none = KeyModifiers::NONE;

        Self {
            bindings: vec![
                KeyBinding::new(&[Char('c')], KeyModifiers::CONTROL, Action::Quit, "Ctrl+C", "Quit application"),
                KeyBinding::new(&[Char('q')], none, Action::Quit, "q", "Quit application"),
                KeyBinding::new(&[Char('?')], none, Action::ToggleHelp, "?", "Show/hide help"),
                KeyBinding::new(&[Left, Char('h')], none, Action::PreviousPage, "←/h", "Previous page"),
                KeyBinding::new(&[Right, Char('l')], none, Action::NextPage, "→/l", "Next page"),
                KeyBinding::new(&[Home, Char('g')], none, Action::FirstPage, "Home/g", "First page"),
                KeyBinding::new(&[End, Char('G')], none, Action::LastPage, "End/G", "Last page"),
                KeyBinding::new(&[PageUp], none, Action::JumpBack, "PgUp", "Back five pages"),
                KeyBinding::new(&[PageDown], none, Action::JumpForward, "PgDn", "Forward five pages"),
                KeyBinding::new(&[Char(':')], none, Action::OpenJump, ":", "Go to page"),
                KeyBinding::new(&[Char('s')], none, Action::NextPageSize, "s", "Next page size"),
                KeyBinding::new(&[Char('S')], none, Action::PreviousPageSize, "S", "Previous page size"),
                KeyBinding::new(&[Char('v')], none, Action::CycleStyle, "v", "Cycle control style"),
            ],
        }
    }
}

impl KeyMap {
    /// Resolve a key press to an action
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        if let KeyCode::Char(ch @ '1'..='9') = event.code {
            if !event.modifiers.contains(KeyModifiers::CONTROL) {
                return ch.to_digit(10).map(|digit| Action::GoTo(digit as u8));
            }
        }

        self.bindings
            .iter()
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)
    }

    /// Get help text for all key bindings
    pub fn help_text(&self) -> String {
        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|binding| format!("{:<8} {}", binding.label, binding.description))
            .collect();
        lines.insert(3, format!("{:<8} {}", "1-9", "Show page 1 to 9"));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        let keys = KeyMap::default();
        assert_eq!(keys.action_for(&key(KeyCode::Left)), Some(Action::PreviousPage));
        assert_eq!(keys.action_for(&key(KeyCode::Char('l'))), Some(Action::NextPage));
        assert_eq!(keys.action_for(&key(KeyCode::PageDown)), Some(Action::JumpForward));
        assert_eq!(keys.action_for(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_shifted_letters() {
        let keys = KeyMap::default();
        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(keys.action_for(&shifted), Some(Action::LastPage));
    }

    #[test]
    fn test_digits_select_pages() {
        let keys = KeyMap::default();
        assert_eq!(keys.action_for(&key(KeyCode::Char('7'))), Some(Action::GoTo(7)));
        assert_eq!(keys.action_for(&key(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_quit_bindings() {
        let keys = KeyMap::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.action_for(&ctrl_c), Some(Action::Quit));
        assert_eq!(keys.action_for(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(keys.action_for(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_help_text_lists_bindings() {
        let help = KeyMap::default().help_text();
        assert!(help.contains("Previous page"));
        assert!(help.contains("1-9"));
        assert!(help.contains("Ctrl+C"));
    }
}
