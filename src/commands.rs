//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host event loop performs after an
//! update: repainting and waking up for the next blink.

use std::time::Instant;

/// Side effect requested by the caret layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Request a repaint
    Redraw,
    /// Wake the event loop no later than this instant to deliver the next tick
    WakeAt(Instant),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine two optional commands into one
    pub fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
        match (a, b) {
            (None, None) => None,
            (Some(cmd), None) | (None, Some(cmd)) => Some(cmd),
            (Some(Cmd::Batch(mut cmds)), Some(other)) => {
                cmds.push(other);
                Some(Cmd::Batch(cmds))
            }
            (Some(first), Some(second)) => Some(Cmd::Batch(vec![first, second])),
        }
    }

    /// Redraw, plus a wake-up when a deadline is armed
    pub fn redraw_until(deadline: Option<Instant>) -> Cmd {
        match deadline {
            Some(at) => Cmd::Batch(vec![Cmd::Redraw, Cmd::WakeAt(at)]),
            None => Cmd::Redraw,
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw => true,
            Cmd::WakeAt(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Earliest wake-up deadline carried by this command
    pub fn wake_deadline(&self) -> Option<Instant> {
        match self {
            Cmd::Redraw => None,
            Cmd::WakeAt(at) => Some(*at),
            Cmd::Batch(cmds) => cmds.iter().filter_map(|c| c.wake_deadline()).min(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_batch_needs_redraw() {
        let now = Instant::now();
        assert!(Cmd::Batch(vec![Cmd::WakeAt(now), Cmd::Redraw]).needs_redraw());
        assert!(!Cmd::Batch(vec![Cmd::WakeAt(now)]).needs_redraw());
    }

    #[test]
    fn test_wake_deadline_takes_earliest() {
        let now = Instant::now();
        let later = now + Duration::from_millis(10);
        let cmd = Cmd::Batch(vec![Cmd::WakeAt(later), Cmd::Redraw, Cmd::WakeAt(now)]);
        assert_eq!(cmd.wake_deadline(), Some(now));
        assert_eq!(Cmd::Redraw.wake_deadline(), None);
    }

    #[test]
    fn test_merge() {
        assert_eq!(Cmd::merge(None, None), None);
        assert_eq!(Cmd::merge(Some(Cmd::Redraw), None), Some(Cmd::Redraw));
        assert_eq!(
            Cmd::merge(Some(Cmd::Redraw), Some(Cmd::Redraw)),
            Some(Cmd::Batch(vec![Cmd::Redraw, Cmd::Redraw]))
        );
    }

    #[test]
    fn test_redraw_until() {
        assert_eq!(Cmd::redraw_until(None), Cmd::Redraw);
        let now = Instant::now();
        assert_eq!(
            Cmd::redraw_until(Some(now)),
            Cmd::Batch(vec![Cmd::Redraw, Cmd::WakeAt(now)])
        );
    }
}
