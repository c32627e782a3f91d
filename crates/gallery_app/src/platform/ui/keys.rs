use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    CardDown,
    CardUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Insert(char),
    Backspace,
    ClearInput,
    /// Submit the search form with the current input (may be blank).
    Submit,
    LoadMore,
    Scroll(ScrollCommand),
    OpenFocused,
    CloseOverlay,
    ToggleHelp,
    Quit,
}

/// Maps a key press to a gallery command. Key releases are ignored.
pub fn map_key(key: KeyEvent) -> Option<UiCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => Some(UiCommand::Quit),
            KeyCode::Char('o') => Some(UiCommand::OpenFocused),
            KeyCode::Char('u') => Some(UiCommand::ClearInput),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(UiCommand::Insert(c))
        }
        KeyCode::Backspace => Some(UiCommand::Backspace),
        KeyCode::Enter => Some(UiCommand::Submit),
        KeyCode::Tab => Some(UiCommand::LoadMore),
        KeyCode::Down => Some(UiCommand::Scroll(ScrollCommand::CardDown)),
        KeyCode::Up => Some(UiCommand::Scroll(ScrollCommand::CardUp)),
        KeyCode::PageDown => Some(UiCommand::Scroll(ScrollCommand::PageDown)),
        KeyCode::PageUp => Some(UiCommand::Scroll(ScrollCommand::PageUp)),
        KeyCode::Home => Some(UiCommand::Scroll(ScrollCommand::Top)),
        KeyCode::End => Some(UiCommand::Scroll(ScrollCommand::Bottom)),
        KeyCode::Esc => Some(UiCommand::CloseOverlay),
        KeyCode::F(1) => Some(UiCommand::ToggleHelp),
        _ => None,
    }
}

/// Wheel scrolling moves the gallery one card at a time.
pub fn map_mouse(mouse: MouseEvent) -> Option<UiCommand> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(UiCommand::Scroll(ScrollCommand::CardDown)),
        MouseEventKind::ScrollUp => Some(UiCommand::Scroll(ScrollCommand::CardUp)),
        _ => None,
    }
}
