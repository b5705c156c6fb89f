use blackhole_common::{Layout, Move, Target};

/// One state of the search: a layout snapshot plus the moves that reached it
/// from the root.
///
/// Nodes are never mutated after construction; [`Node::child`] copies the
/// layout and log, so sibling branches cannot corrupt each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    layout: Layout,
    log: Vec<Move>,
}

impl Node {
    pub fn root(layout: Layout) -> Self {
        Node {
            layout,
            log: Vec::new(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Moves applied to reach this state, oldest first.
    pub fn log(&self) -> &[Move] {
        &self.log
    }

    pub fn depth(&self) -> usize {
        self.log.len()
    }

    /// Apply one move to a fresh copy of this node's layout.
    ///
    /// Returns `None` when any step is rejected (occupied slot, invalid hole
    /// card, empty pile): the branch simply does not exist. The parent is
    /// left untouched either way.
    pub fn child(&self, mov: Move) -> Option<Node> {
        let mut layout = self.layout.clone();
        match mov {
            Move::Stash { pile, card } => {
                if !layout.stash(card) {
                    return None;
                }
                if !layout.remove_top(Target::Pile(pile)) {
                    return None;
                }
            }
            Move::Play { from, card } => {
                if !layout.set_hole(card) {
                    return None;
                }
                if !layout.remove_top(from) {
                    return None;
                }
            }
        }
        let mut log = self.log.clone();
        log.push(mov);
        Some(Node { layout, log })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackhole_common::Card;

    #[test]
    fn test_child_leaves_parent_untouched() {
        let root = Node::root(Layout::from_ints(&[13, 4, 2, 1, 2, -1, 3, -1]));
        let child = root
            .child(Move::Play {
                from: Target::Pile(0),
                card: Card::new(2),
            })
            .expect("legal move");

        assert_eq!(root.depth(), 0);
        assert_eq!(root.layout().hole(), Card::new(1));
        assert_eq!(root.layout().pile_size(0), 1);

        assert_eq!(child.depth(), 1);
        assert_eq!(child.layout().hole(), Card::new(2));
        assert_eq!(child.layout().pile_size(0), 0);
        assert_eq!(child.log()[0].to_pair(), (0, 2));
    }

    #[test]
    fn test_child_fails_on_empty_pile() {
        let root = Node::root(Layout::from_ints(&[13, 4, 2, 1, -1, 3, -1]));
        let child = root.child(Move::Play {
            from: Target::Pile(0),
            card: Card::new(2),
        });
        assert!(child.is_none());
    }

    #[test]
    fn test_child_fails_on_invalid_hole_card() {
        let root = Node::root(Layout::from_ints(&[13, 4, 2, 1, 2, -1, -1]));
        let child = root.child(Move::Play {
            from: Target::Pile(0),
            card: Card::new(0),
        });
        assert!(child.is_none());
    }

    #[test]
    fn test_child_fails_on_occupied_slot() {
        let layout = Layout::from_ints(&[13, 4, 2, 1, 2, -1, 3, -1])
            .into_worm_hole()
            .with_slot(Card::new(9));
        let root = Node::root(layout);
        let child = root.child(Move::Stash {
            pile: 0,
            card: Card::new(2),
        });
        assert!(child.is_none());
        assert_eq!(
            root.layout().top_card(Target::Slot),
            Some(Card::new(9)),
            "failed stash must not disturb the slot"
        );
    }

    #[test]
    fn test_stash_child_records_negated_card() {
        let layout = Layout::from_ints(&[13, 4, 2, 1, 2, -1, 3, -1]).into_worm_hole();
        let root = Node::root(layout);
        let child = root
            .child(Move::Stash {
                pile: 1,
                card: Card::new(3),
            })
            .expect("legal stash");
        assert_eq!(child.layout().top_card(Target::Slot), Some(Card::new(3)));
        assert_eq!(child.layout().pile_size(1), 0);
        assert_eq!(child.log()[0].to_pair(), (1, -3));
    }

    #[test]
    fn test_play_from_slot_empties_it() {
        let layout = Layout::from_ints(&[13, 4, 2, 1, -1, -1])
            .into_worm_hole()
            .with_slot(Card::new(2));
        let root = Node::root(layout);
        let child = root
            .child(Move::Play {
                from: Target::Slot,
                card: Card::new(2),
            })
            .expect("legal slot play");
        assert_eq!(child.layout().top_card(Target::Slot), None);
        assert_eq!(child.layout().hole(), Card::new(2));
        assert!(child.layout().is_cleared());
    }
}
