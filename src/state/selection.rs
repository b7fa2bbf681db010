//! Selection phase.
//!
//! Players are picked off the roster one tap at a time until every seat is
//! filled. The selection holds copies of the names, so later roster edits
//! never reach into a running session.

use super::config::{PlayerCount, SessionConfig, StartingLife};

/// Players picked for the next session plus its settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Picked names in tap order (seat order)
    selected: Vec<String>,

    /// Seats to fill
    player_count: PlayerCount,

    /// Life each player starts with
    starting_life: StartingLife,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `name` if it isn't picked yet, deselect it if it is.
    ///
    /// Taps on an unpicked name are ignored once every seat is filled.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|n| n == name) {
            self.selected.remove(pos);
            true
        } else if !self.is_full() {
            self.selected.push(name.to_string());
            true
        } else {
            false
        }
    }

    /// Change the number of seats. Always clears the picks.
    pub fn set_player_count(&mut self, count: PlayerCount) {
        self.player_count = count;
        self.selected.clear();
    }

    /// Change starting life. Picks are kept.
    pub fn set_starting_life(&mut self, life: StartingLife) {
        self.starting_life = life;
    }

    /// Back to two seats with nobody picked. Starting life is kept.
    pub fn reset(&mut self) {
        self.set_player_count(PlayerCount::default());
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn player_count(&self) -> PlayerCount {
        self.player_count
    }

    pub fn starting_life(&self) -> StartingLife {
        self.starting_life
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig::new(self.player_count, self.starting_life)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|n| n == name)
    }

    /// 1-based seat number of a picked player.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.selected.iter().position(|n| n == name).map(|i| i + 1)
    }

    /// Seats still open.
    pub fn remaining(&self) -> usize {
        self.player_count.get().saturating_sub(self.selected.len())
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.player_count.get()
    }

    /// Whether a session can start from this selection.
    pub fn is_complete(&self) -> bool {
        self.selected.len() == self.player_count.get()
    }

    /// Convert to JSON for the selection screen.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "selected": self.selected,
            "player_count": u8::from(self.player_count),
            "starting_life": self.starting_life.value(),
            "remaining": self.remaining(),
            "can_start": self.is_complete()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(selection: &Selection) -> Vec<&str> {
        selection.selected().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_selection_new() {
        let selection = Selection::new();
        assert!(selection.selected().is_empty());
        assert_eq!(selection.player_count(), PlayerCount::TWO);
        assert_eq!(selection.starting_life(), StartingLife::Twenty);
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = Selection::new();

        assert!(selection.toggle("Alice"));
        assert!(selection.is_selected("Alice"));

        assert!(selection.toggle("Alice"));
        assert!(!selection.is_selected("Alice"));
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_toggle_ignored_when_full() {
        let mut selection = Selection::new();
        selection.toggle("Alice");
        selection.toggle("Bob");
        assert!(selection.is_full());

        assert!(!selection.toggle("Carol"));
        assert_eq!(names(&selection), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_deselect_keeps_order() {
        let mut selection = Selection::new();
        selection.set_player_count(PlayerCount::FOUR);
        for name in ["Alice", "Bob", "Carol", "Dan"] {
            selection.toggle(name);
        }

        selection.toggle("Bob");
        assert_eq!(names(&selection), vec!["Alice", "Carol", "Dan"]);
        assert_eq!(selection.position_of("Carol"), Some(2));
        assert_eq!(selection.position_of("Bob"), None);

        // Re-picked players go to the back
        selection.toggle("Bob");
        assert_eq!(selection.position_of("Bob"), Some(4));
    }

    #[test]
    fn test_set_player_count_clears() {
        let mut selection = Selection::new();
        selection.toggle("Alice");
        selection.toggle("Bob");

        selection.set_player_count(PlayerCount::THREE);
        assert!(selection.selected().is_empty());
        assert_eq!(selection.remaining(), 3);

        // Same count still clears
        selection.toggle("Alice");
        selection.set_player_count(PlayerCount::THREE);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_is_complete() {
        let mut selection = Selection::new();
        selection.set_player_count(PlayerCount::THREE);
        selection.toggle("Alice");
        selection.toggle("Bob");
        assert!(!selection.is_complete());

        selection.toggle("Carol");
        assert!(selection.is_complete());
        assert_eq!(selection.remaining(), 0);
    }

    #[test]
    fn test_reset() {
        let mut selection = Selection::new();
        selection.set_player_count(PlayerCount::FOUR);
        selection.set_starting_life(StartingLife::Forty);
        selection.toggle("Alice");

        selection.reset();
        assert_eq!(selection.player_count(), PlayerCount::TWO);
        assert_eq!(selection.starting_life(), StartingLife::Forty);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_to_json() {
        let mut selection = Selection::new();
        selection.toggle("Alice");
        selection.toggle("Bob");

        assert_eq!(
            selection.to_json(),
            serde_json::json!({
                "selected": ["Alice", "Bob"],
                "player_count": 2,
                "starting_life": 20,
                "remaining": 0,
                "can_start": true
            })
        );
    }
}
