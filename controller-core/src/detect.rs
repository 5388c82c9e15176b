//! Boot-time console detection.
//!
//! The joybus data line is probed once before any backend exists. A console
//! holds the line high through its own pull-up and then starts polling; the
//! first command that only one console family sends decides the result.

use controller_proto::{CommandFamily, JoybusCommand};

/// Host attached to the controller at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectedConsole {
    /// No console on the joybus line; the host is a USB link.
    None,
    GameCube,
    N64,
}

/// Electrical access to the joybus line during detection.
pub trait ConsoleProbe {
    /// Whether something external pulls the line high.
    fn line_pulled_high(&mut self) -> bool;

    /// Wait a bounded time for the next command and return its opcode.
    ///
    /// Returns `None` when nothing arrives in time. Implementations answer
    /// shared probe/reset commands so the console proceeds to polling.
    fn next_command(&mut self) -> Option<u8>;
}

/// Commands examined before giving up.
pub const DETECT_MAX_COMMANDS: usize = 8;

/// Classify the attached host.
///
/// Ambiguous readings (no pull-up, silence, unknown opcodes, only shared
/// commands) classify as [`ConnectedConsole::None`].
pub fn detect_console<P: ConsoleProbe + ?Sized>(probe: &mut P) -> ConnectedConsole {
    if !probe.line_pulled_high() {
        return ConnectedConsole::None;
    }

    for _ in 0..DETECT_MAX_COMMANDS {
        let Some(opcode) = probe.next_command() else {
            return ConnectedConsole::None;
        };
        match JoybusCommand::from_opcode(opcode).map(JoybusCommand::family) {
            Some(CommandFamily::Shared) => continue,
            Some(CommandFamily::GameCube) => return ConnectedConsole::GameCube,
            Some(CommandFamily::N64) => return ConnectedConsole::N64,
            None => return ConnectedConsole::None,
        }
    }
    ConnectedConsole::None
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;

    struct ScriptedLine {
        pulled_high: bool,
        commands: VecDeque<u8>,
        reads: usize,
    }

    impl ScriptedLine {
        fn new(pulled_high: bool, commands: &[u8]) -> Self {
            Self {
                pulled_high,
                commands: commands.iter().copied().collect(),
                reads: 0,
            }
        }
    }

    impl ConsoleProbe for ScriptedLine {
        fn line_pulled_high(&mut self) -> bool {
            self.pulled_high
        }

        fn next_command(&mut self) -> Option<u8> {
            self.reads += 1;
            self.commands.pop_front()
        }
    }

    #[test]
    fn test_no_pull_up_is_usb() {
        let mut line = ScriptedLine::new(false, &[0x41]);
        assert_eq!(detect_console(&mut line), ConnectedConsole::None);
        assert_eq!(line.reads, 0);
    }

    #[test]
    fn test_gamecube_after_probe() {
        let mut line = ScriptedLine::new(true, &[0x00, 0x41, 0x40]);
        assert_eq!(detect_console(&mut line), ConnectedConsole::GameCube);
        assert_eq!(line.reads, 2);
    }

    #[test]
    fn test_n64_after_reset() {
        let mut line = ScriptedLine::new(true, &[0xFF, 0x00, 0x01]);
        assert_eq!(detect_console(&mut line), ConnectedConsole::N64);
    }

    #[test]
    fn test_silence_is_none() {
        let mut line = ScriptedLine::new(true, &[0x00]);
        assert_eq!(detect_console(&mut line), ConnectedConsole::None);
    }

    #[test]
    fn test_unknown_opcode_is_none() {
        let mut line = ScriptedLine::new(true, &[0x00, 0x13, 0x40]);
        assert_eq!(detect_console(&mut line), ConnectedConsole::None);
    }

    #[test]
    fn test_endless_probing_gives_up() {
        let mut line = ScriptedLine::new(true, &[0x00; 32]);
        assert_eq!(detect_console(&mut line), ConnectedConsole::None);
        assert_eq!(line.reads, DETECT_MAX_COMMANDS);
    }
}
