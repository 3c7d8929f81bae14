use crate::command::JassCommand;
use crate::error::ProtocolError;
use crate::serializer::{
    deserialize_string, deserialize_u32, deserialize_u64, serialize_string, serialize_u32,
    serialize_u64,
};
use jass_core::model::card::Card;
use jass_core::model::card_set::CardSet;
use jass_core::model::color::Color;
use jass_core::model::meld::Meld;
use jass_core::model::meld_set::MeldSet;
use jass_core::model::player::{PlayerId, TeamId};
use jass_core::model::score::Score;
use jass_core::model::trick::Trick;
use jass_core::model::turn_state::TurnState;

/// One line sent from the game to a remote player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Players { own_id: PlayerId, names: [String; 4] },
    Trump(Color),
    Hand(CardSet),
    Trick(Trick),
    Card { state: TurnState, hand: CardSet },
    Score(Score),
    Winner(TeamId),
    ChooseTrump(CardSet),
    Meld(CardSet),
    MeldWinner { winner: PlayerId, melds: MeldSet },
    Chibrer,
}

impl Request {
    pub fn command(&self) -> JassCommand {
        match self {
            Request::Players { .. } => JassCommand::Plrs,
            Request::Trump(_) => JassCommand::Trmp,
            Request::Hand(_) => JassCommand::Hand,
            Request::Trick(_) => JassCommand::Trck,
            Request::Card { .. } => JassCommand::Card,
            Request::Score(_) => JassCommand::Scor,
            Request::Winner(_) => JassCommand::Winr,
            Request::ChooseTrump(_) => JassCommand::Chtp,
            Request::Meld(_) => JassCommand::Meld,
            Request::MeldWinner { .. } => JassCommand::Wmel,
            Request::Chibrer => JassCommand::Chbr,
        }
    }

    /// The line for this request, without its terminating newline.
    pub fn encode(&self) -> String {
        let command = self.command();
        match self {
            Request::Players { own_id, names } => {
                let names: Vec<String> = names.iter().map(|n| serialize_string(n)).collect();
                format!(
                    "{command} {} {}",
                    serialize_u32(own_id.index() as u32),
                    names.join(",")
                )
            }
            Request::Trump(color) => format!("{command} {}", serialize_u32(*color as u32)),
            Request::Hand(hand) | Request::ChooseTrump(hand) | Request::Meld(hand) => {
                format!("{command} {}", serialize_u64(hand.packed()))
            }
            Request::Trick(trick) => format!("{command} {}", serialize_u32(trick.packed())),
            Request::Card { state, hand } => format!(
                "{command} {},{},{} {}",
                serialize_u64(state.packed_score()),
                serialize_u64(state.packed_unplayed_cards()),
                serialize_u32(state.packed_trick()),
                serialize_u64(hand.packed())
            ),
            Request::Score(score) => format!("{command} {}", serialize_u64(score.packed())),
            Request::Winner(team) => format!("{command} {}", serialize_u32(team.index() as u32)),
            Request::MeldWinner { winner, melds } => {
                let melds: Vec<String> = melds
                    .melds()
                    .iter()
                    .map(|meld| {
                        format!(
                            "{}:{}",
                            serialize_u32(meld.points()),
                            serialize_u64(meld.cards().packed())
                        )
                    })
                    .collect();
                format!(
                    "{command} {} {}",
                    serialize_u32(winner.index() as u32),
                    melds.join(",")
                )
            }
            Request::Chibrer => command.to_string(),
        }
    }

    pub fn decode(line: &str) -> Result<Request, ProtocolError> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split(' ');
        let command: JassCommand = fields.next().unwrap_or_default().parse()?;
        let mut next = |field: &'static str| {
            fields
                .next()
                .ok_or(ProtocolError::MissingField { command, field })
        };

        let request = match command {
            JassCommand::Plrs => {
                let own_id = player_id(next("player id")?)?;
                let encoded: Vec<&str> = next("player names")?.split(',').collect();
                if encoded.len() != PlayerId::COUNT {
                    return Err(ProtocolError::InvalidValue {
                        what: "player names",
                        value: encoded.join(","),
                    });
                }
                let mut names: [String; 4] = Default::default();
                for (name, text) in names.iter_mut().zip(encoded) {
                    *name = deserialize_string(text)?;
                }
                Request::Players { own_id, names }
            }
            JassCommand::Trmp => Request::Trump(color(next("trump")?)?),
            JassCommand::Hand => Request::Hand(card_set(next("hand")?)?),
            JassCommand::Trck => Request::Trick(trick(next("trick")?)?),
            JassCommand::Card => {
                let components: Vec<&str> = next("turn state")?.split(',').collect();
                let [score, unplayed, trick] = components.as_slice() else {
                    return Err(ProtocolError::InvalidValue {
                        what: "turn state",
                        value: components.join(","),
                    });
                };
                let state = TurnState::from_packed_components(
                    deserialize_u64(score)?,
                    deserialize_u64(unplayed)?,
                    deserialize_u32(trick)?,
                )?;
                let hand = card_set(next("hand")?)?;
                if state.is_terminal() || state.trick().is_full() {
                    return Err(ProtocolError::InvalidValue {
                        what: "trick to play",
                        value: serialize_u32(state.packed_trick()),
                    });
                }
                if hand.is_empty() || !state.unplayed_cards().contains_all(hand) {
                    return Err(ProtocolError::InvalidValue {
                        what: "hand",
                        value: serialize_u64(hand.packed()),
                    });
                }
                Request::Card { state, hand }
            }
            JassCommand::Scor => {
                let packed = deserialize_u64(next("score")?)?;
                Request::Score(Score::from_packed(packed).ok_or_else(|| {
                    ProtocolError::InvalidValue {
                        what: "score",
                        value: serialize_u64(packed),
                    }
                })?)
            }
            JassCommand::Winr => {
                let text = next("team")?;
                let team = TeamId::from_index(deserialize_u32(text)? as usize).ok_or_else(|| {
                    ProtocolError::InvalidValue {
                        what: "team",
                        value: text.to_string(),
                    }
                })?;
                Request::Winner(team)
            }
            JassCommand::Chtp => Request::ChooseTrump(card_set(next("hand")?)?),
            JassCommand::Meld => Request::Meld(card_set(next("hand")?)?),
            JassCommand::Wmel => {
                let winner = player_id(next("player id")?)?;
                let melds = match next("melds") {
                    Ok(text) if !text.is_empty() => meld_set(text)?,
                    _ => MeldSet::EMPTY,
                };
                Request::MeldWinner { winner, melds }
            }
            JassCommand::Chbr => Request::Chibrer,
        };
        Ok(request)
    }
}

/// Answer line to a request that expects one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Card(Card),
    Trump(Color),
    /// Position of the chosen set in [`MeldSet::all_in`] of the hand.
    MeldIndex(usize),
    Chibrer(bool),
}

impl Reply {
    pub fn encode(&self) -> String {
        match self {
            Reply::Card(card) => serialize_u32(card.packed()),
            Reply::Trump(color) => serialize_u32(*color as u32),
            Reply::MeldIndex(index) => serialize_u32(*index as u32),
            Reply::Chibrer(delegate) => serialize_u32(u32::from(*delegate)),
        }
    }

    pub fn decode_card(line: &str) -> Result<Card, ProtocolError> {
        let packed = deserialize_u32(line.trim_end())?;
        Card::from_packed(packed).ok_or_else(|| ProtocolError::InvalidValue {
            what: "card",
            value: line.trim_end().to_string(),
        })
    }

    pub fn decode_trump(line: &str) -> Result<Color, ProtocolError> {
        color(line.trim_end())
    }

    pub fn decode_meld_index(line: &str) -> Result<usize, ProtocolError> {
        deserialize_u32(line.trim_end()).map(|index| index as usize)
    }

    pub fn decode_chibrer(line: &str) -> Result<bool, ProtocolError> {
        match deserialize_u32(line.trim_end())? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ProtocolError::InvalidValue {
                what: "delegation flag",
                value: line.trim_end().to_string(),
            }),
        }
    }
}

fn player_id(text: &str) -> Result<PlayerId, ProtocolError> {
    PlayerId::from_index(deserialize_u32(text)? as usize).ok_or_else(|| {
        ProtocolError::InvalidValue {
            what: "player id",
            value: text.to_string(),
        }
    })
}

fn color(text: &str) -> Result<Color, ProtocolError> {
    Color::from_index(deserialize_u32(text)? as usize).ok_or_else(|| ProtocolError::InvalidValue {
        what: "color",
        value: text.to_string(),
    })
}

fn card_set(text: &str) -> Result<CardSet, ProtocolError> {
    CardSet::from_packed(deserialize_u64(text)?).ok_or_else(|| ProtocolError::InvalidValue {
        what: "card set",
        value: text.to_string(),
    })
}

fn trick(text: &str) -> Result<Trick, ProtocolError> {
    Trick::from_packed(deserialize_u32(text)?).ok_or_else(|| ProtocolError::InvalidValue {
        what: "trick",
        value: text.to_string(),
    })
}

fn meld_set(text: &str) -> Result<MeldSet, ProtocolError> {
    let mut melds = Vec::new();
    for pair in text.split(',') {
        let Some((points, cards)) = pair.split_once(':') else {
            return Err(ProtocolError::InvalidValue {
                what: "meld",
                value: pair.to_string(),
            });
        };
        melds.push(Meld::from_parts(card_set(cards)?, deserialize_u32(points)?)?);
    }
    Ok(MeldSet::new(melds)?)
}
