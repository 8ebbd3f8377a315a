use std::time::Instant;

use crate::navigator::NavigationState;

pub const TRANSITION_DURATION: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    SlideHorizontal,
    Fade,
    None,
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "fade" => Self::Fade,
            "none" => Self::None,
            _ => Self::SlideHorizontal,
        }
    }

    /// Config value for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SlideHorizontal => "slide",
            Self::Fade => "fade",
            Self::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SlideHorizontal => "Slide",
            Self::Fade => "Fade",
            Self::None => "None",
        }
    }

    pub fn cycled(&self) -> Self {
        match self {
            Self::SlideHorizontal => Self::Fade,
            Self::Fade => Self::None,
            Self::None => Self::SlideHorizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Forward,
    Backward,
}

impl TransitionDirection {
    /// Direction of travel through the deck. Wrapping from the summary back
    /// to the first panel counts as forward.
    pub fn between(from: NavigationState, to: NavigationState) -> Self {
        let wrapped = from.is_summary() && to.panel_index() == Some(0);
        if wrapped || to.ordinal() >= from.ordinal() {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActiveTransition {
    pub from: NavigationState,
    pub to: NavigationState,
    pub kind: TransitionKind,
    pub direction: TransitionDirection,
    start: Instant,
}

impl ActiveTransition {
    pub fn new(from: NavigationState, to: NavigationState, kind: TransitionKind) -> Self {
        Self {
            from,
            to,
            kind,
            direction: TransitionDirection::between(from, to),
            start: Instant::now(),
        }
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.kind == TransitionKind::None {
            return 1.0;
        }
        let t = (self.start.elapsed().as_secs_f32() / TRANSITION_DURATION).clamp(0.0, 1.0);
        ease_in_out(t)
    }

    pub fn is_complete(&self) -> bool {
        self.kind == TransitionKind::None
            || self.start.elapsed().as_secs_f32() >= TRANSITION_DURATION
    }
}

/// Cubic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::SUMMARY_INDEX;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            TransitionKind::SlideHorizontal,
            TransitionKind::Fade,
            TransitionKind::None,
        ] {
            assert_eq!(TransitionKind::from_name(kind.name()), kind);
        }
        assert_eq!(
            TransitionKind::from_name("spatial"),
            TransitionKind::SlideHorizontal
        );
    }

    #[test]
    fn test_cycle_visits_every_kind() {
        let start = TransitionKind::SlideHorizontal;
        assert_eq!(start.cycled().cycled().cycled(), start);
        assert_ne!(start.cycled(), start);
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_direction() {
        let intro = NavigationState::INITIAL;
        let first = NavigationState::panel(0).unwrap();
        let third = NavigationState::panel(2).unwrap();
        let last_page = NavigationState::at(SUMMARY_INDEX as i8, 1).unwrap();

        assert_eq!(
            TransitionDirection::between(intro, first),
            TransitionDirection::Forward
        );
        assert_eq!(
            TransitionDirection::between(third, first),
            TransitionDirection::Backward
        );
        assert_eq!(
            TransitionDirection::between(first, intro),
            TransitionDirection::Backward
        );
        assert_eq!(
            TransitionDirection::between(last_page, first),
            TransitionDirection::Forward
        );
    }

    #[test]
    fn test_none_completes_immediately() {
        let t = ActiveTransition::new(
            NavigationState::INITIAL,
            NavigationState::panel(0).unwrap(),
            TransitionKind::None,
        );
        assert!(t.is_complete());
        assert_eq!(t.progress(), 1.0);
    }
}
