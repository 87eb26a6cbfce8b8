//! Practice session management. A session draws one random card at a time
//! from a single category; quiz mode keeps the answer hidden until the user
//! reveals it and re-draws on demand.

use super::Flashcard;
use rand::Rng;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PracticeMode {
    /// Answer is visible from the start; the user copies the character on
    /// the sketchpad.
    Practice,
    /// Answer is hidden until revealed; "next" draws a new card.
    Quiz,
}

pub struct PracticeSession {
    pub category: String,
    pub mode: PracticeMode,
    pub current_card: Flashcard,
    pub show_answer: bool,
}

impl PracticeSession {
    /// Draws a uniform random card and enters the given mode. Refuses to
    /// start on an empty category.
    pub fn start(
        category: &str,
        cards: &[Flashcard],
        mode: PracticeMode,
        rng: &mut impl Rng,
    ) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        let index = rng.random_range(0..cards.len());
        Some(Self {
            category: category.to_string(),
            mode,
            current_card: cards[index].clone(),
            show_answer: mode == PracticeMode::Practice,
        })
    }

    /// Quiz mode only: re-draws from the category's current cards and hides
    /// the answer again. The previous card is not excluded, so repeats
    /// happen.
    pub fn next(&mut self, cards: &[Flashcard], rng: &mut impl Rng) {
        if self.mode != PracticeMode::Quiz || cards.is_empty() {
            return;
        }
        let index = rng.random_range(0..cards.len());
        self.current_card = cards[index].clone();
        self.show_answer = false;
    }

    pub fn reveal(&mut self) {
        self.show_answer = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_cards(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| Flashcard::new(&format!("word {i}"), "", "字"))
            .collect()
    }

    #[test]
    fn test_start_refuses_empty_category() {
        let mut rng = StdRng::seed_from_u64(7);

        let session = PracticeSession::start("Empty", &[], PracticeMode::Quiz, &mut rng);
        assert!(session.is_none());

        let session = PracticeSession::start("Empty", &[], PracticeMode::Practice, &mut rng);
        assert!(session.is_none());
    }

    #[test]
    fn test_start_practice_shows_answer() {
        let cards = sample_cards(3);
        let mut rng = StdRng::seed_from_u64(7);

        let session =
            PracticeSession::start("Animals", &cards, PracticeMode::Practice, &mut rng).unwrap();

        assert_eq!(session.mode, PracticeMode::Practice);
        assert!(session.show_answer);
        assert!(cards.contains(&session.current_card));
    }

    #[test]
    fn test_start_quiz_hides_answer() {
        let cards = sample_cards(3);
        let mut rng = StdRng::seed_from_u64(7);

        let session =
            PracticeSession::start("Animals", &cards, PracticeMode::Quiz, &mut rng).unwrap();

        assert_eq!(session.mode, PracticeMode::Quiz);
        assert!(!session.show_answer);
    }

    #[test]
    fn test_next_redraws_and_hides_answer() {
        let cards = sample_cards(5);
        let mut rng = StdRng::seed_from_u64(7);

        let mut session =
            PracticeSession::start("Animals", &cards, PracticeMode::Quiz, &mut rng).unwrap();
        session.reveal();
        session.next(&cards, &mut rng);

        assert_eq!(session.mode, PracticeMode::Quiz);
        assert!(!session.show_answer);
        assert!(cards.contains(&session.current_card));
    }

    #[test]
    fn test_next_is_noop_in_practice_mode() {
        let cards = sample_cards(5);
        let mut rng = StdRng::seed_from_u64(7);

        let mut session =
            PracticeSession::start("Animals", &cards, PracticeMode::Practice, &mut rng).unwrap();
        let before = session.current_card.clone();

        for _ in 0..20 {
            session.next(&cards, &mut rng);
        }

        assert_eq!(session.current_card, before);
        assert!(session.show_answer);
    }

    #[test]
    fn test_next_sees_cards_added_after_start() {
        let mut cards = sample_cards(1);
        let mut rng = StdRng::seed_from_u64(7);

        let mut session =
            PracticeSession::start("Animals", &cards, PracticeMode::Quiz, &mut rng).unwrap();

        cards.push(Flashcard::new("late arrival", "", "新"));

        let mut saw_new_card = false;
        for _ in 0..200 {
            session.next(&cards, &mut rng);
            if session.current_card.english == "late arrival" {
                saw_new_card = true;
                break;
            }
        }
        assert!(saw_new_card);
    }

    #[test]
    fn test_draws_are_roughly_uniform() {
        let cards = sample_cards(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];

        let mut session =
            PracticeSession::start("Animals", &cards, PracticeMode::Quiz, &mut rng).unwrap();
        for _ in 0..4000 {
            session.next(&cards, &mut rng);
            let index = cards
                .iter()
                .position(|c| *c == session.current_card)
                .unwrap();
            counts[index] += 1;
        }

        // Expected 1000 per card; a generous band still catches a broken
        // or biased draw.
        for count in counts {
            assert!(count > 800 && count < 1200, "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn test_quiz_end_to_end() {
        let mut store = CategoryStore::new();
        store.create_category("Animals");
        store
            .add_card("Animals", Flashcard::new("dog", "gǒu", "狗"))
            .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let session = PracticeSession::start(
            "Animals",
            store.get_cards("Animals"),
            PracticeMode::Quiz,
            &mut rng,
        )
        .unwrap();

        assert_eq!(session.mode, PracticeMode::Quiz);
        assert_eq!(session.current_card.chinese, "狗");
    }
}
