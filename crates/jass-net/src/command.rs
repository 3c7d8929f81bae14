use crate::error::ProtocolError;
use core::fmt;
use std::str::FromStr;

/// Four-letter mnemonic opening every request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JassCommand {
    Plrs,
    Trmp,
    Hand,
    Trck,
    Card,
    Scor,
    Winr,
    Chtp,
    Meld,
    Wmel,
    Chbr,
}

impl JassCommand {
    pub const ALL: [JassCommand; 11] = [
        JassCommand::Plrs,
        JassCommand::Trmp,
        JassCommand::Hand,
        JassCommand::Trck,
        JassCommand::Card,
        JassCommand::Scor,
        JassCommand::Winr,
        JassCommand::Chtp,
        JassCommand::Meld,
        JassCommand::Wmel,
        JassCommand::Chbr,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            JassCommand::Plrs => "PLRS",
            JassCommand::Trmp => "TRMP",
            JassCommand::Hand => "HAND",
            JassCommand::Trck => "TRCK",
            JassCommand::Card => "CARD",
            JassCommand::Scor => "SCOR",
            JassCommand::Winr => "WINR",
            JassCommand::Chtp => "CHTP",
            JassCommand::Meld => "MELD",
            JassCommand::Wmel => "WMEL",
            JassCommand::Chbr => "CHBR",
        }
    }

    /// Whether the peer answers this command with a line of its own.
    pub const fn expects_reply(self) -> bool {
        matches!(
            self,
            JassCommand::Card | JassCommand::Chtp | JassCommand::Meld | JassCommand::Chbr
        )
    }
}

impl fmt::Display for JassCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JassCommand {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JassCommand::ALL
            .iter()
            .copied()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::JassCommand;

    #[test]
    fn mnemonics_roundtrip() {
        for command in JassCommand::ALL {
            assert_eq!(command.as_str().len(), 4);
            assert_eq!(command.as_str().parse::<JassCommand>().ok(), Some(command));
        }
        assert!("card".parse::<JassCommand>().is_err());
    }

    #[test]
    fn only_questions_expect_replies() {
        let replying: Vec<_> = JassCommand::ALL
            .into_iter()
            .filter(|c| c.expects_reply())
            .collect();
        assert_eq!(
            replying,
            vec![
                JassCommand::Card,
                JassCommand::Chtp,
                JassCommand::Meld,
                JassCommand::Chbr
            ]
        );
    }
}
