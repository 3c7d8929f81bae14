use jass_core::model::card::Card;
use jass_core::model::card_set::CardSet;
use jass_core::model::player::PlayerId;
use jass_core::model::turn_state::TurnState;

/// Search tree stored as an arena; children are addressed by index and slot
/// `i` of a node belongs to the `i`-th card of its playable set.
#[derive(Debug)]
pub(crate) struct SearchTree {
    nodes: Vec<Node>,
    own_id: PlayerId,
    hand: CardSet,
}

#[derive(Debug)]
pub(crate) struct Node {
    state: TurnState,
    playable: CardSet,
    children: Vec<Option<usize>>,
    total_points: u64,
    visits: u32,
}

pub(crate) const ROOT: usize = 0;

impl SearchTree {
    pub(crate) fn new(state: TurnState, own_id: PlayerId, hand: CardSet) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            own_id,
            hand,
        };
        tree.push_node(state);
        tree
    }

    pub(crate) fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Cards the seat to move may play, treating every card the searching
    /// player does not hold as available to the others.
    pub(crate) fn playable_cards(&self, state: &TurnState) -> CardSet {
        if state.is_terminal() {
            return CardSet::EMPTY;
        }
        let unplayed = state.unplayed_cards();
        let pool = if state.next_player() == self.own_id {
            self.hand.intersection(unplayed)
        } else {
            unplayed.difference(self.hand)
        };
        if pool.is_empty() {
            CardSet::EMPTY
        } else {
            state.trick().legal_cards(pool)
        }
    }

    fn push_node(&mut self, state: TurnState) -> usize {
        let playable = self.playable_cards(&state);
        self.nodes.push(Node {
            state,
            playable,
            children: vec![None; playable.len()],
            total_points: 0,
            visits: 0,
        });
        self.nodes.len() - 1
    }

    /// Walks down from the root, adding the first untried child found and
    /// returning the visited path (root first).
    pub(crate) fn select_and_expand(&mut self, exploration: f64) -> Vec<usize> {
        let mut path = vec![ROOT];
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current];
            if node.children.is_empty() {
                return path;
            }
            if let Some(slot) = node.children.iter().position(Option::is_none) {
                let card = node.playable.get(slot);
                let state = node.state.with_card_played_and_trick_collected(card);
                let child = self.push_node(state);
                self.nodes[current].children[slot] = Some(child);
                path.push(child);
                return path;
            }
            match self.best_child(current, exploration) {
                Some(slot) => {
                    current = self.nodes[current].children[slot].unwrap_or(current);
                    path.push(current);
                }
                None => return path,
            }
        }
    }

    /// Slot of the child with the highest upper confidence bound.
    pub(crate) fn best_child(&self, parent: usize, exploration: f64) -> Option<usize> {
        let node = &self.nodes[parent];
        let parent_visits = f64::from(node.visits.max(1));
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for (slot, child) in node.children.iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            let child = &self.nodes[*child];
            if child.visits == 0 {
                continue;
            }
            let visits = f64::from(child.visits);
            let value = child.total_points as f64 / visits
                + exploration * (2.0 * parent_visits.ln() / visits).sqrt();
            if value > best_value {
                best_value = value;
                best = Some(slot);
            }
        }
        best
    }

    /// Credits the root with `other` and every later node with the reward
    /// of the team that moved into it.
    pub(crate) fn backpropagate(&mut self, path: &[usize], mine: u32, other: u32) {
        let own_team = self.own_id.team();
        if let Some(&root) = path.first() {
            self.nodes[root].credit(other);
        }
        for pair in path.windows(2) {
            let mover = self.nodes[pair[0]].state.next_player();
            let reward = if mover.team() == own_team { mine } else { other };
            self.nodes[pair[1]].credit(reward);
        }
    }

    pub(crate) fn card_of(&self, parent: usize, slot: usize) -> Card {
        self.nodes[parent].playable.get(slot)
    }
}

impl Node {
    pub(crate) fn state(&self) -> &TurnState {
        &self.state
    }

    pub(crate) fn visits(&self) -> u32 {
        self.visits
    }

    pub(crate) fn mean_points(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_points as f64 / f64::from(self.visits)
        }
    }

    fn credit(&mut self, points: u32) {
        self.total_points += u64::from(points);
        self.visits += 1;
    }
}
