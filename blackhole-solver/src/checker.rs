use blackhole_common::{Card, Layout, Rules, Target};

/// Replays an externally supplied move list against a copy of a layout to
/// decide whether it is a legal, complete solution.
///
/// Independent of the search engines, so it can validate solutions from any
/// source. The layout handed in is never mutated.
#[derive(Debug, Clone)]
pub struct Checker {
    layout: Layout,
    pairs: Vec<i32>,
    rules: Rules,
}

impl Checker {
    /// `pairs` is the flat integer list of `(pile, card)` move pairs in the
    /// external encoding: a stash carries a negated card, a play from the
    /// slot a negative pile index. A trailing unpaired integer is ignored.
    pub fn new(layout: Layout, pairs: Vec<i32>, rules: Rules) -> Self {
        Checker {
            layout,
            pairs,
            rules,
        }
    }

    /// Replay every pair in order, failing at the first mismatch. Succeeds
    /// only if the final position is fully cleared; an empty move list
    /// against an already-solved layout passes trivially.
    pub fn run(&self) -> bool {
        let mut layout = match self.rules {
            Rules::BlackHole => self.layout.clone().into_black_hole(),
            Rules::WormHole => self.layout.clone().into_worm_hole(),
        };

        for pair in self.pairs.chunks_exact(2) {
            let (pile, card) = (pair[0], pair[1]);
            let target = if pile < 0 {
                Target::Slot
            } else {
                Target::Pile(pile as usize)
            };
            match self.rules {
                Rules::BlackHole => {
                    if layout.top_card(target) != Some(Card::new(card)) {
                        return false;
                    }
                    if !layout.hole_adjacent(Card::new(card)) {
                        return false;
                    }
                    layout.remove_top(target);
                    layout.set_hole(Card::new(card));
                }
                Rules::WormHole => {
                    if layout.top_card(target) != Some(Card::new(card.abs())) {
                        return false;
                    }
                    if pile >= 0 && card < 0 {
                        // Stash: the slot must currently be empty.
                        if !layout.stash(Card::new(card)) {
                            return false;
                        }
                        layout.remove_top(target);
                    } else {
                        if !layout.hole_adjacent(Card::new(card)) {
                            return false;
                        }
                        layout.remove_top(target);
                        layout.set_hole(Card::new(card));
                    }
                }
            }
        }

        layout.is_cleared()
    }
}

/// One-shot convenience wrapper around [`Checker`].
pub fn check(layout: &Layout, pairs: &[i32], rules: Rules) -> bool {
    Checker::new(layout.clone(), pairs.to_vec(), rules).run()
}
