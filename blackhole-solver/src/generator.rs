use blackhole_common::{Layout, Move, SlotState, Target};

use smallvec::SmallVec;

/// Inline-allocated move buffer, sized so a standard 17-pile deal never
/// spills to the heap.
pub type MoveBuf = SmallVec<[Move; 32]>;

/// Can the top card of `target` be played onto the hole right now?
pub fn can_play(layout: &Layout, target: Target) -> bool {
    match layout.top_card(target) {
        Some(card) => layout.hole_adjacent(card),
        None => false,
    }
}

/// Enumerate the legal moves of a position, in the fixed expansion order the
/// engines rely on: plays from piles in ascending index order, then — only
/// when the slot is empty — a stash of every pile top in ascending order, or
/// instead the single play from an occupied, adjacent slot.
///
/// Plain hole-moves deliberately precede any slot interaction, so
/// first-solution searches favour lines that touch the worm hole least.
pub fn legal_moves(layout: &Layout) -> MoveBuf {
    let mut moves = MoveBuf::new();

    for pile in 0..layout.pile_count() {
        let target = Target::Pile(pile);
        if can_play(layout, target)
            && let Some(card) = layout.top_card(target)
        {
            moves.push(Move::Play { from: target, card });
        }
    }

    match layout.slot() {
        Some(SlotState::Empty) => {
            // Stashing ignores rank adjacency; any top card may be parked.
            for pile in 0..layout.pile_count() {
                if let Some(card) = layout.top_card(Target::Pile(pile)) {
                    moves.push(Move::Stash { pile, card });
                }
            }
        }
        Some(SlotState::Holding(card)) => {
            if can_play(layout, Target::Slot) {
                moves.push(Move::Play {
                    from: Target::Slot,
                    card,
                });
            }
        }
        None => {}
    }

    moves
}
