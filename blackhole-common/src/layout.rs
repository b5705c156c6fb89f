use crate::card::{Card, Shape};
use crate::moves::Target;

use smallvec::SmallVec;

pub const DEFAULT_RANKS: i32 = 13;
pub const DEFAULT_SUITS: i32 = 4;
/// Fallback pile count used when a layout is constructed with a
/// non-positive one.
pub const DEFAULT_PILE_COUNT: usize = 17;

const PILE_INLINE: usize = 8;

type Pile = SmallVec<[Card; PILE_INLINE]>;

/// Rule set selector: plain black-hole patience, or the worm-hole variant
/// with its extra one-card holding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rules {
    #[default]
    BlackHole,
    WormHole,
}

/// Contents of the worm-hole slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    Empty,
    Holding(Card),
}

/// A puzzle position: ordered piles of cards (top = last), the card currently
/// playable-onto, and, under worm-hole rules, the holding slot.
///
/// `slot` doubles as the variant selector: `None` means plain black-hole
/// rules, `Some(_)` means worm-hole rules. Cloning a layout copies every
/// pile, so search branches never share pile storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    hole: Card,
    piles: Vec<Pile>,
    slot: Option<SlotState>,
}

impl Layout {
    pub fn new(ranks: i32, suits: i32, pile_count: i32) -> Self {
        Self::with_hole(ranks, suits, pile_count, Card::STARTING_HOLE)
    }

    pub fn with_hole(ranks: i32, suits: i32, pile_count: i32, hole: Card) -> Self {
        let pile_count = if pile_count <= 0 {
            DEFAULT_PILE_COUNT
        } else {
            pile_count as usize
        };
        Layout {
            shape: Shape::new(ranks, suits),
            hole,
            piles: vec![Pile::new(); pile_count],
            slot: None,
        }
    }

    /// Empty standard-deal layout: 13 ranks, 4 suits, 17 piles, card 1 in
    /// the hole.
    pub fn standard() -> Self {
        Self::new(DEFAULT_RANKS, DEFAULT_SUITS, DEFAULT_PILE_COUNT as i32)
    }

    /// Build a layout from the flat integer sequence
    /// `ranks suits piles hole, then per-pile cards terminated by -1`.
    ///
    /// Parsing is deliberately permissive: missing leading fields default to
    /// zero, a non-positive pile count falls back to
    /// [`DEFAULT_PILE_COUNT`], and cards past the last pile are dropped.
    pub fn from_ints(ints: &[i32]) -> Self {
        let mut it = ints.iter().copied();
        let ranks = it.next().unwrap_or(0);
        let suits = it.next().unwrap_or(0);
        let pile_count = it.next().unwrap_or(0);
        let hole = it.next().unwrap_or(0);
        let mut layout = Self::with_hole(ranks, suits, pile_count, Card::new(hole));

        let mut next_pile = 0;
        for value in it {
            if next_pile >= layout.piles.len() {
                break;
            }
            if value == -1 {
                next_pile += 1;
            } else {
                layout.piles[next_pile].push(Card::new(value));
            }
        }
        layout
    }

    /// Parse the text form of [`Layout::from_ints`]: whitespace-separated
    /// integers, stopping at the first token that is not one.
    pub fn parse(text: &str) -> Self {
        Self::from_ints(&parse_ints(text))
    }

    /// Switch to worm-hole rules, attaching an empty slot if absent.
    pub fn into_worm_hole(mut self) -> Self {
        if self.slot.is_none() {
            self.slot = Some(SlotState::Empty);
        }
        self
    }

    /// Switch to plain black-hole rules, discarding any slot.
    pub fn into_black_hole(mut self) -> Self {
        self.slot = None;
        self
    }

    /// Worm-hole layout with the slot pre-loaded.
    pub fn with_slot(mut self, card: Card) -> Self {
        self.slot = Some(SlotState::Holding(card));
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn ranks(&self) -> i32 {
        self.shape.ranks
    }

    pub fn suits(&self) -> i32 {
        self.shape.suits
    }

    pub fn deck_size(&self) -> i32 {
        self.shape.deck_size()
    }

    pub fn pile_count(&self) -> usize {
        self.piles.len()
    }

    pub fn pile_size(&self, pile: usize) -> usize {
        self.piles.get(pile).map_or(0, |p| p.len())
    }

    pub fn card_at(&self, pile: usize, position: usize) -> Option<Card> {
        self.piles.get(pile)?.get(position).copied()
    }

    pub fn hole(&self) -> Card {
        self.hole
    }

    pub fn slot(&self) -> Option<SlotState> {
        self.slot
    }

    pub fn is_worm_hole(&self) -> bool {
        self.slot.is_some()
    }

    /// Top card of a pile, or the slot's occupant. `None` when the pile is
    /// empty or out of range, or the slot is empty or absent.
    pub fn top_card(&self, target: Target) -> Option<Card> {
        match target {
            Target::Pile(pile) => self.piles.get(pile)?.last().copied(),
            Target::Slot => match self.slot {
                Some(SlotState::Holding(card)) => Some(card),
                _ => None,
            },
        }
    }

    /// Set the hole card. Rejects identifiers below 1.
    pub fn set_hole(&mut self, card: Card) -> bool {
        if card.id() < 1 {
            return false;
        }
        self.hole = card;
        true
    }

    /// Park a card in the worm-hole slot. Rejects an occupied or absent
    /// slot; the slot never holds more than one card.
    pub fn stash(&mut self, card: Card) -> bool {
        match self.slot {
            Some(SlotState::Empty) => {
                self.slot = Some(SlotState::Holding(Card::new(card.id().abs())));
                true
            }
            _ => false,
        }
    }

    /// Remove the top card of a pile, or clear the slot.
    ///
    /// Clearing the slot succeeds whenever the slot exists, matching the
    /// virtual-pile removal contract; an out-of-range or empty pile fails.
    pub fn remove_top(&mut self, target: Target) -> bool {
        match target {
            Target::Pile(pile) => match self.piles.get_mut(pile) {
                Some(pile) => pile.pop().is_some(),
                None => false,
            },
            Target::Slot => match self.slot {
                Some(_) => {
                    self.slot = Some(SlotState::Empty);
                    true
                }
                None => false,
            },
        }
    }

    /// Is `card` circularly rank-adjacent to the current hole card?
    pub fn hole_adjacent(&self, card: Card) -> bool {
        self.shape.adjacent(self.hole, card)
    }

    /// Solved test: every pile empty and, under worm-hole rules, the slot
    /// empty as well.
    pub fn is_cleared(&self) -> bool {
        self.piles.iter().all(|pile| pile.is_empty())
            && !matches!(self.slot, Some(SlotState::Holding(_)))
    }

    /// Extract the visited-set equivalence key for this position.
    pub fn state_key(&self) -> StateKey {
        StateKey {
            shape: self.shape,
            hole: self.hole,
            slot: self.slot,
            tops: self.piles.iter().map(|pile| pile.last().copied()).collect(),
        }
    }

    /// Shuffle cards `2..=deck_size` with a seeded generator and deal
    /// `num_in_layout` of them round-robin across the piles, resetting the
    /// hole to card 1. Deterministic for a given seed.
    pub fn randomise(&mut self, seed: u64, num_in_layout: usize) {
        let max_index = (self.deck_size() - 1).max(0) as usize;
        let mut cards: Vec<Card> = (0..max_index).map(|i| Card::new(i as i32 + 2)).collect();

        // Park-Miller sequence, seeded into its non-zero range.
        let mut state = seed % 0x7fff_fffe + 1;
        let mut rnd = |bound: usize| -> usize {
            state = state * 16807 % 0x7fff_ffff;
            state as usize % bound
        };

        for i in 0..max_index.saturating_sub(1) {
            let j = i + rnd(max_index - i);
            cards.swap(i, j);
        }

        for pile in &mut self.piles {
            pile.clear();
        }
        let dealt = num_in_layout.min(max_index);
        for (i, &card) in cards[..dealt].iter().enumerate() {
            let pile = i % self.piles.len();
            self.piles[pile].push(card);
        }
        self.hole = Card::STARTING_HOLE;
    }

    /// Deal every card except the starting hole card.
    pub fn randomise_full(&mut self, seed: u64) {
        self.randomise(seed, (self.deck_size() - 1).max(0) as usize);
    }

    /// Integer text encoding, the inverse of [`Layout::parse`]:
    /// `ranks suits piles`, the hole card, then one line per pile with its
    /// cards bottom-to-top terminated by `-1`.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} {}\n",
            self.shape.ranks,
            self.shape.suits,
            self.piles.len()
        ));
        out.push_str(&format!("{}\n", self.hole.id()));
        for pile in &self.piles {
            for card in pile {
                out.push_str(&format!("{card} "));
            }
            out.push_str("-1\n");
        }
        out
    }
}

/// Equivalence key for visited-state deduplication.
///
/// Two positions are equivalent iff they agree on shape, hole card, slot
/// contents, and the top card of every pile (`None` = empty). Cards beneath
/// the tops are deliberately ignored: every reachable successor depends only
/// on these observable fields, which keeps the state space tractable at the
/// cost of occasionally equating positions whose buried cards differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    shape: Shape,
    hole: Card,
    slot: Option<SlotState>,
    tops: Vec<Option<Card>>,
}

/// Read whitespace-separated integers, stopping at the first token that does
/// not parse.
pub fn parse_ints(text: &str) -> Vec<i32> {
    text.split_whitespace()
        .map_while(|token| token.parse().ok())
        .collect()
}
