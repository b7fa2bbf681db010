//! Property tests for selection, life totals, and dice.

use lifetally_state::{
    detect_outcome, DiceRoller, Outcome, PlayerCount, Selection, Session, SessionConfig,
    StartingLife, MAX_LIFE, MIN_LIFE,
};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["Alice", "Bob", "Carol", "Dan", "Eve", "Frank"];

fn player_count() -> impl Strategy<Value = PlayerCount> {
    prop::sample::select(PlayerCount::all().to_vec())
}

proptest! {
    #[test]
    fn prop_set_player_count_clears(count in player_count(), taps in prop::collection::vec(0..NAMES.len(), 0..10)) {
        let mut selection = Selection::new();
        selection.set_player_count(PlayerCount::FOUR);
        for i in taps {
            selection.toggle(NAMES[i]);
        }

        selection.set_player_count(count);
        prop_assert!(selection.selected().is_empty());
    }

    #[test]
    fn prop_selection_never_exceeds_count(count in player_count(), taps in prop::collection::vec(0..NAMES.len(), 0..40)) {
        let mut selection = Selection::new();
        selection.set_player_count(count);
        for i in taps {
            selection.toggle(NAMES[i]);
            prop_assert!(selection.selected().len() <= count.get());
        }
    }

    #[test]
    fn prop_toggle_unselected_twice_restores_order(count in player_count(), taps in prop::collection::vec(0..NAMES.len(), 0..10), pick in 0..NAMES.len()) {
        let mut selection = Selection::new();
        selection.set_player_count(count);
        for i in taps {
            selection.toggle(NAMES[i]);
        }
        prop_assume!(!selection.is_selected(NAMES[pick]));

        let before = selection.selected().to_vec();
        if selection.toggle(NAMES[pick]) {
            prop_assert!(selection.toggle(NAMES[pick]));
        }
        prop_assert_eq!(selection.selected(), before.as_slice());
    }

    #[test]
    fn prop_toggle_selected_twice_keeps_same_players(count in player_count(), taps in prop::collection::vec(0..NAMES.len(), 1..10), pick in any::<prop::sample::Index>()) {
        let mut selection = Selection::new();
        selection.set_player_count(count);
        for i in taps {
            selection.toggle(NAMES[i]);
        }
        prop_assume!(!selection.selected().is_empty());

        let name = pick.get(selection.selected()).clone();
        let mut expected = selection.selected().to_vec();
        prop_assert!(selection.toggle(&name));
        prop_assert!(selection.toggle(&name));

        // Re-added names go to the end
        prop_assert_eq!(selection.selected().last(), Some(&name));
        let mut after = selection.selected().to_vec();
        after.sort();
        expected.sort();
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn prop_life_stays_in_bounds(deltas in prop::collection::vec((0usize..4, -2000i32..2000), 0..60)) {
        let names: Vec<String> = NAMES[..4].iter().map(|n| n.to_string()).collect();
        let config = SessionConfig::new(PlayerCount::FOUR, StartingLife::Forty);
        let mut session = Session::with_roller(names, config, DiceRoller::seeded(0)).unwrap();

        for (seat, delta) in deltas {
            if session.adjust_score(seat, delta).is_err() {
                break;
            }
            for s in session.seats() {
                prop_assert!((MIN_LIFE..=MAX_LIFE).contains(&s.life));
            }
        }
    }

    #[test]
    fn prop_winner_iff_exactly_one_alive(lives in prop::collection::vec(0i32..5, 2..=4)) {
        let alive = lives.iter().filter(|l| **l > 0).count();
        match detect_outcome(&lives) {
            Outcome::Winner(seat) => {
                prop_assert_eq!(alive, 1);
                prop_assert!(lives[seat] > 0);
            }
            Outcome::Undecided => prop_assert!(alive >= 2),
            Outcome::Draw => prop_assert_eq!(alive, 0),
        }
    }

    #[test]
    fn prop_dice_in_range(seed in any::<u64>(), seats in 2usize..=4) {
        let mut roller = DiceRoller::seeded(seed);
        for pair in roller.roll_seats(seats) {
            prop_assert!((1..=6).contains(&pair.first));
            prop_assert!((1..=6).contains(&pair.second));
        }
    }
}
