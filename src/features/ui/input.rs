use crate::app::UiEvent;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub(super) fn translate_event(event: Event) -> Option<UiEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(width, height) => Some(UiEvent::Resize(width, height)),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('l') => Some(UiEvent::ToggleScale),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::translate_event;
    use crate::app::UiEvent;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_keys() {
        for event in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(translate_event(event), Some(UiEvent::Quit));
        }
    }

    #[test]
    fn scale_toggle_and_resize() {
        assert_eq!(
            translate_event(key(KeyCode::Char('l'), KeyModifiers::NONE)),
            Some(UiEvent::ToggleScale)
        );
        assert_eq!(
            translate_event(Event::Resize(120, 40)),
            Some(UiEvent::Resize(120, 40))
        );
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        assert_eq!(translate_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_event(Event::Key(release)), None);
    }
}
