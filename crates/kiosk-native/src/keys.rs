use kiosk_core::UserAction;
use winit::keyboard::{Key, NamedKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Action(UserAction),
    /// Back to the welcome screen from anywhere.
    Reset,
}

pub fn command_for_key(key: &Key) -> Option<KeyCommand> {
    match key.as_ref() {
        Key::Named(NamedKey::Enter) => Some(KeyCommand::Action(UserAction::Start)),
        Key::Named(NamedKey::Escape | NamedKey::Backspace) => {
            Some(KeyCommand::Action(UserAction::Back))
        }
        Key::Character(c) => match c {
            "s" | "S" => Some(KeyCommand::Action(UserAction::Start)),
            "p" | "P" => Some(KeyCommand::Action(UserAction::ChoosePayment)),
            "r" | "R" => Some(KeyCommand::Reset),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys() {
        assert_eq!(
            command_for_key(&Key::Named(NamedKey::Enter)),
            Some(KeyCommand::Action(UserAction::Start))
        );
        assert_eq!(
            command_for_key(&Key::Named(NamedKey::Backspace)),
            Some(KeyCommand::Action(UserAction::Back))
        );
        assert_eq!(command_for_key(&Key::Named(NamedKey::Tab)), None);
    }

    #[test]
    fn character_keys() {
        assert_eq!(
            command_for_key(&Key::Character("p".into())),
            Some(KeyCommand::Action(UserAction::ChoosePayment))
        );
        assert_eq!(
            command_for_key(&Key::Character("R".into())),
            Some(KeyCommand::Reset)
        );
        assert_eq!(command_for_key(&Key::Character("x".into())), None);
    }
}
