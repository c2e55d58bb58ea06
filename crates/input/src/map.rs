//! Key mapping from terminal events to game actions.

use blockfall_core::GameSnapshot;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{GameAction, SessionState};

/// Map a key to the action it is bound to, ignoring session state.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Enter => Some(GameAction::Restart),
        _ => None,
    }
}

/// Whether `action` may reach a session in the state `snapshot` shows.
///
/// - no mode picked yet: nothing
/// - game over: only restart
/// - paused: only the pause toggle
/// - running: everything except restart
pub fn action_allowed(action: GameAction, snapshot: &GameSnapshot) -> bool {
    if snapshot.mode.is_none() {
        return false;
    }
    match snapshot.state {
        SessionState::NotStarted => false,
        SessionState::GameOver => action == GameAction::Restart,
        SessionState::Paused => action == GameAction::Pause,
        SessionState::Running => action != GameAction::Restart,
    }
}

/// Map a key and drop it if the session would not accept it right now.
pub fn map_key(key: KeyEvent, snapshot: &GameSnapshot) -> Option<GameAction> {
    handle_key_event(key).filter(|action| action_allowed(*action, snapshot))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameMode;

    fn snapshot(state: SessionState) -> GameSnapshot {
        GameSnapshot {
            mode: Some(GameMode::Solo),
            state,
            paused: state == SessionState::Paused,
            game_over: state == SessionState::GameOver,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn test_bindings() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::SoftDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Rotate)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('P'))),
            Some(GameAction::Pause)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key = KeyEvent::from(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(key), None);
    }

    #[test]
    fn test_running_blocks_restart() {
        let snap = snapshot(SessionState::Running);
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Up), &snap),
            Some(GameAction::Rotate)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter), &snap), None);
    }

    #[test]
    fn test_paused_only_unpauses() {
        let snap = snapshot(SessionState::Paused);
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('p')), &snap),
            Some(GameAction::Pause)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' ')), &snap), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left), &snap), None);
    }

    #[test]
    fn test_game_over_only_restarts() {
        let snap = snapshot(SessionState::GameOver);
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Enter), &snap),
            Some(GameAction::Restart)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('p')), &snap), None);
    }

    #[test]
    fn test_no_mode_blocks_everything() {
        let snap = GameSnapshot::default();
        for code in [KeyCode::Left, KeyCode::Enter, KeyCode::Char('p')] {
            assert_eq!(map_key(KeyEvent::from(code), &snap), None);
        }
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
