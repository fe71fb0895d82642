//! Observer port - abstraction for self-play observation and data collection
//!
//! This port defines the interface for observing a self-play session,
//! allowing composable data collection without coupling the match loop to
//! progress bars, metrics or exports.

use std::{cell::RefCell, rc::Rc};

use crate::{Result, chomp::MatchRecord, config::Pairing};

/// Observer trait for monitoring self-play
///
/// # Event Sequence
///
/// 1. `on_session_start(total_matches)` - Once at the beginning
/// 2. For each match:
///    - `on_match_start(match_num, pairing)`
///    - `on_match_end(match_num, pairing, record)` - after both agents learned
/// 3. `on_session_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use chomp::{chomp::MatchRecord, config::Pairing, ports::Observer};
///
/// struct LengthObserver {
///     longest: usize,
/// }
///
/// impl Observer for LengthObserver {
///     fn on_match_end(
///         &mut self,
///         _match_num: usize,
///         _pairing: Pairing,
///         record: &MatchRecord,
///     ) -> chomp::Result<()> {
///         self.longest = self.longest.max(record.turns);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called once before the first match.
    fn on_session_start(&mut self, _total_matches: usize) -> Result<()> {
        Ok(())
    }

    /// Called before each match (0-based `match_num`).
    fn on_match_start(&mut self, _match_num: usize, _pairing: Pairing) -> Result<()> {
        Ok(())
    }

    /// Called after a match has finished and both agents have learned from it.
    fn on_match_end(
        &mut self,
        _match_num: usize,
        _pairing: Pairing,
        _record: &MatchRecord,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last match.
    fn on_session_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shared observers stay readable by the caller after the session has
/// taken its boxed handle.
impl<T: Observer> Observer for Rc<RefCell<T>> {
    fn on_session_start(&mut self, total_matches: usize) -> Result<()> {
        self.borrow_mut().on_session_start(total_matches)
    }

    fn on_match_start(&mut self, match_num: usize, pairing: Pairing) -> Result<()> {
        self.borrow_mut().on_match_start(match_num, pairing)
    }

    fn on_match_end(&mut self, match_num: usize, pairing: Pairing, record: &MatchRecord) -> Result<()> {
        self.borrow_mut().on_match_end(match_num, pairing, record)
    }

    fn on_session_end(&mut self) -> Result<()> {
        self.borrow_mut().on_session_end()
    }
}
