#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Title,
    UsernameEntry,
    Playing,
}

/// Outcome of a pointer press on the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay(Screen),
    Advance { from: Screen, to: Screen },
    /// Entering play; the session captures the start time and resets the run.
    StartGame,
}

impl Screen {
    pub fn advance(self) -> Transition {
        match self {
            Screen::Title => Transition::Advance {
                from: Screen::Title,
                to: Screen::UsernameEntry,
            },
            Screen::UsernameEntry => Transition::StartGame,
            Screen::Playing => Transition::Stay(Screen::Playing),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Title => "title",
            Screen::UsernameEntry => "username",
            Screen::Playing => "playing",
        }
    }

    pub fn is_playing(self) -> bool {
        self == Screen::Playing
    }
}

impl Transition {
    pub fn target(self) -> Screen {
        match self {
            Transition::Stay(screen) => screen,
            Transition::Advance { to, .. } => to,
            Transition::StartGame => Screen::Playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_title() {
        assert_eq!(Screen::default(), Screen::Title);
    }

    #[test]
    fn pointer_presses_walk_forward_only() {
        let t = Screen::Title.advance();
        assert_eq!(
            t,
            Transition::Advance {
                from: Screen::Title,
                to: Screen::UsernameEntry
            }
        );
        assert_eq!(t.target(), Screen::UsernameEntry);

        let t = Screen::UsernameEntry.advance();
        assert_eq!(t, Transition::StartGame);
        assert_eq!(t.target(), Screen::Playing);

        let t = Screen::Playing.advance();
        assert_eq!(t, Transition::Stay(Screen::Playing));
        assert_eq!(t.target(), Screen::Playing);
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Screen::Title.name(), "title");
        assert_eq!(Screen::UsernameEntry.name(), "username");
        assert_eq!(Screen::Playing.name(), "playing");
        assert!(Screen::Playing.is_playing());
        assert!(!Screen::Title.is_playing());
    }
}
