//! Slide navigation state machine.
//!
//! The deck is an intro screen followed by [`PANEL_COUNT`] panels. The last
//! panel ([`SUMMARY_INDEX`]) is paged: forward navigation first walks its
//! [`SUMMARY_PAGES`] pages and only then wraps around to the first panel.
//!
//! ```text
//!   Intro ──► 0 ──► 1 ──► … ──► 6 ──► 7·p0 ──► 7·p1 ──┐
//!     ▲       │                                        │
//!     └─ Prev ┘           0 ◄──────── Next ────────────┘
//! ```
//!
//! [`transition`] is a pure, total function: every (state, event) pair has a
//! defined successor, and pairs without a rule leave the state unchanged.

use std::fmt;

use eframe::egui;

pub const PANEL_COUNT: usize = 8;
pub const SUMMARY_INDEX: usize = PANEL_COUNT - 1;
pub const SUMMARY_PAGES: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Screen {
    Intro,
    Panel { index: usize, summary_page: u8 },
}

/// Where the presentation currently is.
///
/// The intro screen and the panels are separate variants internally, so the
/// "intro is showing iff slide is -1" rule cannot be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationState {
    screen: Screen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Leave the intro screen.
    Start,
    /// Advance one step (right arrow, space).
    Next,
    /// Retreat one step (left arrow).
    Prev,
    /// Go directly to a panel (digit keys).
    Jump(usize),
    /// Go directly to a panel from a UI control (tab click).
    Select(usize),
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl NavigationState {
    pub const INITIAL: Self = Self {
        screen: Screen::Intro,
    };

    /// Build a state from its raw parts. Returns `None` when `slide` is
    /// outside `-1..PANEL_COUNT` or the page does not exist on that slide.
    #[cfg(test)]
    pub fn at(slide: i8, summary_page: u8) -> Option<Self> {
        match slide {
            -1 if summary_page == 0 => Some(Self::INITIAL),
            s if s >= 0 && (s as usize) < PANEL_COUNT => {
                let index = s as usize;
                let pages = if index == SUMMARY_INDEX {
                    SUMMARY_PAGES
                } else {
                    1
                };
                (summary_page < pages).then_some(Self {
                    screen: Screen::Panel {
                        index,
                        summary_page,
                    },
                })
            }
            _ => None,
        }
    }

    /// First page of the panel at `index`, or `None` if there is no such panel.
    #[cfg(test)]
    pub fn panel(index: usize) -> Option<Self> {
        (index < PANEL_COUNT).then(|| Self::first_page(index))
    }

    fn first_page(index: usize) -> Self {
        Self {
            screen: Screen::Panel {
                index,
                summary_page: 0,
            },
        }
    }

    /// Slide index, `-1` for the intro screen.
    pub fn slide(&self) -> i8 {
        match self.screen {
            Screen::Intro => -1,
            Screen::Panel { index, .. } => index as i8,
        }
    }

    pub fn show_intro(&self) -> bool {
        matches!(self.screen, Screen::Intro)
    }

    /// Summary sub-page. Always 0 outside the summary panel.
    pub fn summary_page(&self) -> u8 {
        match self.screen {
            Screen::Intro => 0,
            Screen::Panel { summary_page, .. } => summary_page,
        }
    }

    pub fn panel_index(&self) -> Option<usize> {
        match self.screen {
            Screen::Intro => None,
            Screen::Panel { index, .. } => Some(index),
        }
    }

    pub fn is_summary(&self) -> bool {
        self.panel_index() == Some(SUMMARY_INDEX)
    }

    pub fn apply(self, event: NavEvent) -> Self {
        transition(self, event)
    }

    /// Position in the forward tour, used to pick a transition direction.
    pub fn ordinal(&self) -> usize {
        match self.screen {
            Screen::Intro => 0,
            Screen::Panel {
                index,
                summary_page,
            } => 1 + index + summary_page as usize,
        }
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.screen {
            Screen::Intro => write!(f, "Intro"),
            Screen::Panel {
                index: SUMMARY_INDEX,
                summary_page,
            } => write!(
                f,
                "{} / {} \u{00b7} {}/{}",
                SUMMARY_INDEX + 1,
                PANEL_COUNT,
                summary_page + 1,
                SUMMARY_PAGES
            ),
            Screen::Panel { index, .. } => write!(f, "{} / {}", index + 1, PANEL_COUNT),
        }
    }
}

/// Compute the state that follows `state` when `event` arrives.
pub fn transition(state: NavigationState, event: NavEvent) -> NavigationState {
    match (state.screen, event) {
        (Screen::Intro, NavEvent::Start | NavEvent::Next) => NavigationState::first_page(0),
        (_, NavEvent::Jump(n) | NavEvent::Select(n)) if n < PANEL_COUNT => {
            NavigationState::first_page(n)
        }
        (
            Screen::Panel {
                index: SUMMARY_INDEX,
                summary_page,
            },
            NavEvent::Next,
        ) => {
            if summary_page + 1 < SUMMARY_PAGES {
                NavigationState {
                    screen: Screen::Panel {
                        index: SUMMARY_INDEX,
                        summary_page: summary_page + 1,
                    },
                }
            } else {
                NavigationState::first_page(0)
            }
        }
        (Screen::Panel { index, .. }, NavEvent::Next) => NavigationState::first_page(index + 1),
        (
            Screen::Panel {
                index: SUMMARY_INDEX,
                summary_page,
            },
            NavEvent::Prev,
        ) if summary_page > 0 => NavigationState {
            screen: Screen::Panel {
                index: SUMMARY_INDEX,
                summary_page: summary_page - 1,
            },
        },
        (Screen::Panel { index: 0, .. }, NavEvent::Prev) => NavigationState::INITIAL,
        (Screen::Panel { index, .. }, NavEvent::Prev) => NavigationState::first_page(index - 1),
        _ => state,
    }
}

/// Map a key to a navigation event. Keys without a binding yield `None`.
pub fn event_for_key(key: egui::Key) -> Option<NavEvent> {
    use egui::Key;

    let event = match key {
        Key::ArrowRight | Key::Space => NavEvent::Next,
        Key::ArrowLeft => NavEvent::Prev,
        Key::Enter => NavEvent::Start,
        Key::Home => NavEvent::Jump(0),
        Key::End => NavEvent::Jump(SUMMARY_INDEX),
        Key::Num1 => NavEvent::Jump(0),
        Key::Num2 => NavEvent::Jump(1),
        Key::Num3 => NavEvent::Jump(2),
        Key::Num4 => NavEvent::Jump(3),
        Key::Num5 => NavEvent::Jump(4),
        Key::Num6 => NavEvent::Jump(5),
        Key::Num7 => NavEvent::Jump(6),
        Key::Num8 => NavEvent::Jump(7),
        _ => return None,
    };
    Some(event)
}

/// Navigation event carried by one raw input event, if any.
///
/// Auto-repeat presses count as separate events; chords with Ctrl, Alt or
/// Cmd are left to the host's own shortcuts.
pub fn event_for_input(event: &egui::Event) -> Option<NavEvent> {
    match event {
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } if !(modifiers.ctrl || modifiers.alt || modifiers.command) => event_for_key(*key),
        _ => None,
    }
}

/// Every distinct screen reachable by pressing Next from the initial state,
/// in order, stopping before the sequence wraps.
pub fn tour() -> Vec<NavigationState> {
    let mut screens = vec![NavigationState::INITIAL];
    let mut state = NavigationState::INITIAL.apply(NavEvent::Next);
    while !screens.contains(&state) {
        screens.push(state);
        state = state.apply(NavEvent::Next);
    }
    screens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(slide: i8, page: u8) -> NavigationState {
        NavigationState::at(slide, page).unwrap()
    }

    fn all_states() -> Vec<NavigationState> {
        let mut states = vec![NavigationState::INITIAL];
        for slide in 0..PANEL_COUNT as i8 {
            for page in 0..SUMMARY_PAGES {
                if let Some(s) = NavigationState::at(slide, page) {
                    states.push(s);
                }
            }
        }
        states
    }

    fn all_events() -> Vec<NavEvent> {
        let mut events = vec![NavEvent::Start, NavEvent::Next, NavEvent::Prev];
        for n in 0..=PANEL_COUNT + 2 {
            events.push(NavEvent::Jump(n));
            events.push(NavEvent::Select(n));
        }
        events
    }

    #[test]
    fn test_initial_state() {
        let s = NavigationState::default();
        assert_eq!(s.slide(), -1);
        assert!(s.show_intro());
        assert_eq!(s.summary_page(), 0);
        assert_eq!(s.panel_index(), None);
    }

    #[test]
    fn test_intro_iff_slide_minus_one_after_every_transition() {
        for s in all_states() {
            for e in all_events() {
                let next = transition(s, e);
                assert_eq!(
                    next.show_intro(),
                    next.slide() == -1,
                    "{s:?} + {e:?} -> {next:?}"
                );
                assert!((-1..PANEL_COUNT as i8).contains(&next.slide()));
                if !next.is_summary() {
                    assert_eq!(next.summary_page(), 0);
                }
            }
        }
    }

    #[test]
    fn test_start_leaves_intro() {
        let s = NavigationState::INITIAL.apply(NavEvent::Start);
        assert_eq!(s.slide(), 0);
        assert!(!s.show_intro());
        assert_eq!(s.summary_page(), 0);
    }

    #[test]
    fn test_next_on_intro_is_start() {
        assert_eq!(
            NavigationState::INITIAL.apply(NavEvent::Next),
            NavigationState::INITIAL.apply(NavEvent::Start)
        );
    }

    #[test]
    fn test_jump_from_intro() {
        let s = NavigationState::INITIAL.apply(NavEvent::Jump(5));
        assert_eq!(s, state(5, 0));
        assert!(!s.show_intro());
    }

    #[test]
    fn test_summary_pages_then_wrap() {
        let s = state(7, 0).apply(NavEvent::Next);
        assert_eq!(s, state(7, 1));
        let s = s.apply(NavEvent::Next);
        assert_eq!(s, state(0, 0));
    }

    #[test]
    fn test_prev_within_summary() {
        assert_eq!(state(7, 1).apply(NavEvent::Prev), state(7, 0));
        assert_eq!(state(7, 0).apply(NavEvent::Prev), state(6, 0));
    }

    #[test]
    fn test_prev_from_first_panel_returns_to_intro() {
        let s = state(0, 0).apply(NavEvent::Prev);
        assert_eq!(s, NavigationState::INITIAL);
        assert!(s.show_intro());
    }

    #[test]
    fn test_prev_from_middle_panel() {
        for k in 1..SUMMARY_INDEX as i8 {
            assert_eq!(state(k, 0).apply(NavEvent::Prev), state(k - 1, 0));
        }
    }

    #[test]
    fn test_jump_resets_summary_page() {
        for s in all_states().into_iter().filter(|s| !s.show_intro()) {
            assert_eq!(s.apply(NavEvent::Jump(3)), state(3, 0));
        }
        assert_eq!(state(7, 1).apply(NavEvent::Jump(7)), state(7, 0));
    }

    #[test]
    fn test_select_matches_jump() {
        for s in all_states() {
            for n in 0..=PANEL_COUNT {
                assert_eq!(s.apply(NavEvent::Select(n)), s.apply(NavEvent::Jump(n)));
            }
        }
    }

    #[test]
    fn test_out_of_range_jump_is_noop() {
        for s in all_states() {
            assert_eq!(s.apply(NavEvent::Jump(9)), s);
            assert_eq!(s.apply(NavEvent::Jump(PANEL_COUNT)), s);
            assert_eq!(s.apply(NavEvent::Select(42)), s);
        }
    }

    #[test]
    fn test_next_seven_times_reaches_summary() {
        let mut s = state(0, 0);
        for expected in 1..=SUMMARY_INDEX as i8 {
            s = s.apply(NavEvent::Next);
            assert_eq!(s.slide(), expected);
            assert_eq!(s.summary_page(), 0);
        }
        assert_eq!(s, state(7, 0));
    }

    #[test]
    fn test_next_from_last_content_panel_enters_summary() {
        assert_eq!(state(6, 0).apply(NavEvent::Next), state(7, 0));
    }

    #[test]
    fn test_undefined_pairs_are_noops() {
        assert_eq!(
            NavigationState::INITIAL.apply(NavEvent::Prev),
            NavigationState::INITIAL
        );
        assert_eq!(state(4, 0).apply(NavEvent::Start), state(4, 0));
        assert_eq!(state(7, 1).apply(NavEvent::Start), state(7, 1));
    }

    #[test]
    fn test_at_rejects_invalid_parts() {
        assert!(NavigationState::at(-2, 0).is_none());
        assert!(NavigationState::at(8, 0).is_none());
        assert!(NavigationState::at(-1, 1).is_none());
        assert!(NavigationState::at(3, 1).is_none());
        assert!(NavigationState::at(7, 2).is_none());
        assert!(NavigationState::at(7, 1).is_some());
        assert!(NavigationState::panel(8).is_none());
    }

    #[test]
    fn test_key_mapping() {
        use egui::Key;
        assert_eq!(event_for_key(Key::ArrowRight), Some(NavEvent::Next));
        assert_eq!(event_for_key(Key::Space), Some(NavEvent::Next));
        assert_eq!(event_for_key(Key::ArrowLeft), Some(NavEvent::Prev));
        assert_eq!(event_for_key(Key::Enter), Some(NavEvent::Start));
        assert_eq!(event_for_key(Key::Num1), Some(NavEvent::Jump(0)));
        assert_eq!(event_for_key(Key::Num8), Some(NavEvent::Jump(7)));
        assert_eq!(event_for_key(Key::Num9), None);
        assert_eq!(event_for_key(Key::Num0), None);
        assert_eq!(event_for_key(Key::A), None);
        assert_eq!(event_for_key(Key::Home), Some(NavEvent::Jump(0)));
        assert_eq!(event_for_key(Key::End), Some(NavEvent::Jump(SUMMARY_INDEX)));
    }

    #[test]
    fn test_event_for_input_ignores_releases_and_chords() {
        let key = |key, pressed, modifiers| egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers,
        };
        let none = egui::Modifiers::NONE;
        assert_eq!(
            event_for_input(&key(egui::Key::ArrowRight, true, none)),
            Some(NavEvent::Next)
        );
        assert_eq!(event_for_input(&key(egui::Key::ArrowRight, false, none)), None);
        assert_eq!(
            event_for_input(&key(egui::Key::Num3, true, egui::Modifiers::CTRL)),
            None
        );
        assert_eq!(event_for_input(&egui::Event::Text("3".into())), None);
    }

    #[test]
    fn test_tour_visits_every_screen_once() {
        let screens = tour();
        assert_eq!(screens.len(), 1 + SUMMARY_INDEX + SUMMARY_PAGES as usize);
        assert_eq!(screens[0], NavigationState::INITIAL);
        assert_eq!(screens[1], state(0, 0));
        assert_eq!(screens[screens.len() - 2], state(7, 0));
        assert_eq!(*screens.last().unwrap(), state(7, 1));
        for (i, s) in screens.iter().enumerate() {
            assert_eq!(s.ordinal(), i);
        }
    }

    #[test]
    fn test_display_position() {
        assert_eq!(NavigationState::INITIAL.to_string(), "Intro");
        assert_eq!(state(2, 0).to_string(), "3 / 8");
        assert_eq!(state(7, 1).to_string(), "8 / 8 \u{00b7} 2/2");
    }
}
