use crate::error::ProtocolError;
use crate::message::{Reply, Request};
use jass_core::game::Player;
use jass_core::model::card_set::CardSet;
use jass_core::model::meld_set::MeldSet;
use std::io::{BufRead, BufReader, Write};
use std::net::{Ipv4Addr, TcpListener};
use tracing::{Level, event};

/// Runs a local player on behalf of a game hosted elsewhere.
pub struct RemotePlayerServer<P: Player> {
    player: P,
    /// Last hand announced by the game, consulted when asked to delegate.
    hand: CardSet,
}

impl<P: Player> RemotePlayerServer<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            hand: CardSet::EMPTY,
        }
    }

    pub fn bind(port: u16) -> Result<TcpListener, ProtocolError> {
        Ok(TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))?)
    }

    /// Accepts a single game client and serves it until the game is won.
    pub fn run(&mut self, listener: &TcpListener) -> Result<(), ProtocolError> {
        let (stream, peer) = listener.accept()?;
        stream.set_nodelay(true)?;
        event!(
            target: "jass_net::server",
            Level::INFO,
            peer = %peer,
            "game client connected"
        );
        let reader = BufReader::new(stream.try_clone()?);
        self.serve(reader, stream)
    }

    /// Answers request lines from `reader` on `writer`. Returns once the
    /// winner has been announced; running out of input before that is an
    /// error.
    pub fn serve<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), ProtocolError> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(ProtocolError::Disconnected);
            }
            let request = Request::decode(&line)?;
            event!(
                target: "jass_net::server",
                Level::TRACE,
                command = %request.command(),
                "request received"
            );
            let game_over = matches!(request, Request::Winner(_));
            if let Some(reply) = self.handle(request) {
                writer.write_all(reply.encode().as_bytes())?;
                writer.write_all(b"\n")?;
                writer.flush()?;
            }
            if game_over {
                return Ok(());
            }
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn into_inner(self) -> P {
        self.player
    }

    fn handle(&mut self, request: Request) -> Option<Reply> {
        match request {
            Request::Players { own_id, names } => self.player.on_game_start(own_id, &names),
            Request::Trump(trump) => self.player.on_trump_set(trump),
            Request::Hand(hand) => {
                self.hand = hand;
                self.player.on_hand_updated(hand);
            }
            Request::Trick(trick) => self.player.on_trick_updated(trick),
            Request::Score(score) => self.player.on_score_updated(score),
            Request::Winner(team) => self.player.on_game_won(team),
            Request::MeldWinner { winner, melds } => {
                self.player.on_meld_winner_determined(winner, &melds)
            }
            Request::Card { state, hand } => {
                return Some(Reply::Card(self.player.card_to_play(&state, hand)));
            }
            Request::ChooseTrump(hand) => {
                return Some(Reply::Trump(self.player.choose_trump(hand)));
            }
            Request::Meld(hand) => return Some(Reply::MeldIndex(self.meld_index(hand))),
            Request::Chibrer => {
                return Some(Reply::Chibrer(
                    self.player.delegates_trump_choice(self.hand),
                ));
            }
        }
        None
    }

    fn meld_index(&mut self, hand: CardSet) -> usize {
        let selected = self.player.select_meld_set(hand);
        let choices = MeldSet::all_in(hand);
        match choices.iter().position(|choice| *choice == selected) {
            Some(index) => index,
            None => {
                event!(
                    target: "jass_net::server",
                    Level::WARN,
                    melds = ?selected,
                    "selected melds are not available in the hand, announcing nothing"
                );
                0
            }
        }
    }
}
