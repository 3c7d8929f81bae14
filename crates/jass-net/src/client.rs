use crate::error::ProtocolError;
use crate::message::{Reply, Request};
use jass_core::game::Player;
use jass_core::model::card::Card;
use jass_core::model::card_set::CardSet;
use jass_core::model::color::Color;
use jass_core::model::meld_set::MeldSet;
use jass_core::model::player::{PlayerId, TeamId};
use jass_core::model::score::Score;
use jass_core::model::trick::Trick;
use jass_core::model::turn_state::TurnState;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::time::Duration;
use tracing::{Level, event};

struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Connection {
    fn send(&mut self, request: &Request) -> Result<(), ProtocolError> {
        let mut line = request.encode();
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive(&mut self) -> Result<String, ProtocolError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ProtocolError::Disconnected);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Seat whose decisions are taken by a peer across a TCP connection.
///
/// Every notification is mirrored to a local fallback player. Once the peer
/// misbehaves or the connection drops, the client stops talking to it and
/// the fallback answers for the rest of the game.
pub struct RemotePlayerClient {
    connection: Option<Connection>,
    fallback: Box<dyn Player>,
}

impl RemotePlayerClient {
    pub fn connect(
        host: &str,
        port: u16,
        fallback: Box<dyn Player>,
        read_timeout: Option<Duration>,
    ) -> Result<Self, ProtocolError> {
        let stream = TcpStream::connect((host, port))?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(read_timeout)?;
        let reader = BufReader::new(stream.try_clone()?);
        event!(
            target: "jass_net::client",
            Level::INFO,
            host,
            port,
            "connected to remote player"
        );
        Ok(Self {
            connection: Some(Connection {
                reader,
                writer: stream,
            }),
            fallback,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn disconnect(&mut self, error: &ProtocolError) {
        if self.connection.take().is_some() {
            event!(
                target: "jass_net::client",
                Level::WARN,
                error = %error,
                "remote player dropped, local fallback takes over"
            );
        }
    }

    fn notify(&mut self, request: Request) {
        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        if let Err(error) = connection.send(&request) {
            self.disconnect(&error);
        }
    }

    /// Sends `request` and decodes the answer line, or `None` when the peer
    /// is gone or answered something unusable.
    fn ask<T>(
        &mut self,
        request: Request,
        decode: impl FnOnce(&str) -> Result<T, ProtocolError>,
    ) -> Option<T> {
        let connection = self.connection.as_mut()?;
        let answer = connection
            .send(&request)
            .and_then(|()| connection.receive())
            .and_then(|line| decode(&line));
        match answer {
            Ok(value) => Some(value),
            Err(error) => {
                self.disconnect(&error);
                None
            }
        }
    }
}

impl Player for RemotePlayerClient {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Card {
        let request = Request::Card {
            state: *state,
            hand,
        };
        if let Some(card) = self.ask(request, Reply::decode_card) {
            if state.trick().legal_cards(hand).contains(card) {
                return card;
            }
            self.disconnect(&ProtocolError::IllegalReply {
                reply: card.to_string(),
            });
        }
        self.fallback.card_to_play(state, hand)
    }

    fn choose_trump(&mut self, hand: CardSet) -> Color {
        match self.ask(Request::ChooseTrump(hand), Reply::decode_trump) {
            Some(trump) => trump,
            None => self.fallback.choose_trump(hand),
        }
    }

    fn delegates_trump_choice(&mut self, hand: CardSet) -> bool {
        match self.ask(Request::Chibrer, Reply::decode_chibrer) {
            Some(delegates) => delegates,
            None => self.fallback.delegates_trump_choice(hand),
        }
    }

    fn select_meld_set(&mut self, hand: CardSet) -> MeldSet {
        let Some(index) = self.ask(Request::Meld(hand), Reply::decode_meld_index) else {
            return self.fallback.select_meld_set(hand);
        };
        let mut choices = MeldSet::all_in(hand);
        if index < choices.len() {
            choices.swap_remove(index)
        } else {
            event!(
                target: "jass_net::client",
                Level::WARN,
                index,
                available = choices.len(),
                "remote meld choice out of range, announcing nothing"
            );
            MeldSet::EMPTY
        }
    }

    fn on_game_start(&mut self, own_id: PlayerId, player_names: &[String; 4]) {
        self.fallback.on_game_start(own_id, player_names);
        self.notify(Request::Players {
            own_id,
            names: player_names.clone(),
        });
    }

    fn on_hand_updated(&mut self, hand: CardSet) {
        self.fallback.on_hand_updated(hand);
        self.notify(Request::Hand(hand));
    }

    fn on_trump_set(&mut self, trump: Color) {
        self.fallback.on_trump_set(trump);
        self.notify(Request::Trump(trump));
    }

    fn on_trick_updated(&mut self, trick: Trick) {
        self.fallback.on_trick_updated(trick);
        self.notify(Request::Trick(trick));
    }

    fn on_score_updated(&mut self, score: Score) {
        self.fallback.on_score_updated(score);
        self.notify(Request::Score(score));
    }

    fn on_game_won(&mut self, winning_team: TeamId) {
        self.fallback.on_game_won(winning_team);
        self.notify(Request::Winner(winning_team));
    }

    fn on_meld_winner_determined(&mut self, winner: PlayerId, melds: &MeldSet) {
        self.fallback.on_meld_winner_determined(winner, melds);
        self.notify(Request::MeldWinner {
            winner,
            melds: melds.clone(),
        });
    }
}
