use std::fmt;

/// A card identified by its 1-based position in the deck.
///
/// Identifier `1` is the conventional starting hole card (the ace of spades
/// in a standard deal). Identifiers outside `[1, deck_size]` are
/// representable but have no rank, so they can never be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(i32);

impl Card {
    /// The fixed starting hole card.
    pub const STARTING_HOLE: Card = Card(1);

    pub fn new(id: i32) -> Self {
        Card(id)
    }

    pub fn id(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deck shape: ranks per suit and number of suits.
///
/// Cards are numbered consecutively in suit blocks of `ranks` cards each, so
/// the rank of a card is its 1-based offset within its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub ranks: i32,
    pub suits: i32,
}

impl Shape {
    pub fn new(ranks: i32, suits: i32) -> Self {
        Shape { ranks, suits }
    }

    pub fn deck_size(&self) -> i32 {
        self.ranks.saturating_mul(self.suits)
    }

    /// Suit-relative rank of `card`, or `None` when the card lies outside
    /// `[1, deck_size]` or the shape itself is degenerate.
    pub fn rank_of(&self, card: Card) -> Option<i32> {
        if self.ranks <= 0 || self.suits <= 0 {
            return None;
        }
        let id = card.id();
        if id < 1 || id > self.deck_size() {
            return None;
        }
        Some((id - 1) % self.ranks + 1)
    }

    /// Circular rank adjacency: ranks differing by exactly one, or the wrap
    /// between rank 1 and the maximum rank. A card with no rank is never
    /// adjacent to anything.
    pub fn adjacent(&self, a: Card, b: Card) -> bool {
        let (Some(ra), Some(rb)) = (self.rank_of(a), self.rank_of(b)) else {
            return false;
        };
        if (ra == 1 && rb == self.ranks) || (rb == 1 && ra == self.ranks) {
            return true;
        }
        (ra - rb).abs() == 1
    }
}
