use crate::command::JassCommand;
use jass_core::model::meld::MeldError;
use jass_core::model::turn_state::TurnStateError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection failed: {0}")]
    Io(#[from] io::Error),
    #[error("peer closed the connection")]
    Disconnected,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("{command} is missing its {field}")]
    MissingField {
        command: JassCommand,
        field: &'static str,
    },
    #[error("`{0}` is not an unsigned hexadecimal number")]
    InvalidHex(String),
    #[error("`{0}` is not valid Base64 text")]
    InvalidText(String),
    #[error("invalid {what}: {value}")]
    InvalidValue { what: &'static str, value: String },
    #[error(transparent)]
    TurnState(#[from] TurnStateError),
    #[error(transparent)]
    Meld(#[from] MeldError),
    #[error("peer answered {reply}, which is not allowed here")]
    IllegalReply { reply: String },
}
