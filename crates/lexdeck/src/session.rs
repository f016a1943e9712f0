//! Navigation, mode, and quiz-scoring state.
//!
//! `Session` owns all mutable per-session state and is the only writer of
//! the persisted snapshot. Every mutation saves immediately, so a reload
//! resumes at the same slide, score, and answer history.

use std::collections::BTreeMap;

use crate::catalog::{Slide, SlideKind};
use crate::store::{Snapshot, Store};

/// Points awarded for each correctly answered quiz slide.
pub const CORRECT_ANSWER_POINTS: u32 = 10;

/// Presentation profile. Alters interaction and reveal rules, never
/// scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Student,
    Teacher,
    GameShow,
    Practice,
}

impl Mode {
    /// The fixed cycle used by the mode switch button.
    pub fn next(self) -> Self {
        match self {
            Mode::Student => Mode::Teacher,
            Mode::Teacher => Mode::GameShow,
            Mode::GameShow => Mode::Practice,
            Mode::Practice => Mode::Student,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Student => "STUDENT",
            Mode::Teacher => "TEACHER",
            Mode::GameShow => "GAME SHOW",
            Mode::Practice => "PRACTICE",
        }
    }
}

/// Outcome of a successful answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
}

pub struct Session {
    slides: &'static [Slide],
    current: usize,
    mode: Mode,
    dark_mode: bool,
    answers: BTreeMap<u32, String>,
    revealed: BTreeMap<u32, bool>,
    score: u32,
    store: Store,
}

impl Session {
    /// Restore from the store if a snapshot exists, else start fresh.
    pub fn restore(slides: &'static [Slide], store: Store) -> Self {
        let snapshot = store.load();
        let current = snapshot.slide_index.min(slides.len().saturating_sub(1));
        Self {
            slides,
            current,
            mode: Mode::Student,
            dark_mode: snapshot.dark_mode,
            answers: snapshot.answers,
            revealed: snapshot.revealed,
            score: snapshot.score,
            store,
        }
    }

    fn persist(&self) {
        self.store.save(&Snapshot {
            slide_index: self.current,
            score: self.score,
            dark_mode: self.dark_mode,
            answers: self.answers.clone(),
            revealed: self.revealed.clone(),
        });
    }

    pub fn slides(&self) -> &'static [Slide] {
        self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &'static Slide {
        &self.slides[self.current]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Advance one slide. Returns true on an actual move; the caller
    /// plays the navigation cue only then.
    pub fn go_next(&mut self) -> bool {
        if self.current + 1 >= self.slides.len() {
            return false;
        }
        self.current += 1;
        self.persist();
        true
    }

    /// Jump straight to a slide index, clamped to the deck.
    pub fn jump_to(&mut self, index: usize) {
        self.current = index.min(self.slides.len().saturating_sub(1));
        self.persist();
    }

    pub fn go_prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.persist();
        true
    }

    /// Cycle Student -> Teacher -> GameShow -> Practice -> Student.
    pub fn switch_mode(&mut self) -> Mode {
        self.mode = self.mode.next();
        self.mode
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.persist();
        self.dark_mode
    }

    /// Record an answer for a quiz slide.
    ///
    /// Silently rejected (returns None) in Teacher mode, for unknown
    /// slides or options, and for slides that already have an answer:
    /// the first answer is final even if the UI double-fires.
    pub fn submit_answer(&mut self, slide_id: u32, option_id: &str) -> Option<AnswerOutcome> {
        if self.mode == Mode::Teacher {
            return None;
        }
        if self.answers.contains_key(&slide_id) {
            return None;
        }
        let slide = self.slides.iter().find(|s| s.id == slide_id)?;
        let options = slide.options()?;
        let option = options.iter().find(|o| o.id == option_id)?;

        self.answers.insert(slide_id, option_id.to_string());
        self.revealed.insert(slide_id, true);
        if option.correct {
            self.score += CORRECT_ANSWER_POINTS;
        }
        self.persist();
        Some(AnswerOutcome {
            correct: option.correct,
        })
    }

    pub fn answer_for(&self, slide_id: u32) -> Option<&str> {
        self.answers.get(&slide_id).map(String::as_str)
    }

    /// Correctness becomes visible once answered, or always in Teacher
    /// mode.
    pub fn is_revealed(&self, slide_id: u32) -> bool {
        self.mode == Mode::Teacher || self.revealed.get(&slide_id).copied().unwrap_or(false)
    }

    /// Back to defaults and wipe persisted storage. The caller is
    /// responsible for having confirmed with the user first.
    pub fn reset(&mut self) {
        self.current = 0;
        self.mode = Mode::Student;
        self.dark_mode = Snapshot::default().dark_mode;
        self.answers.clear();
        self.revealed.clear();
        self.score = 0;
        if let Err(e) = self.store.clear() {
            log::warn!("could not clear persisted session: {e}");
        }
    }

    /// Whether the current slide shows the recording panel in the
    /// current mode.
    pub fn recording_panel_visible(&self) -> bool {
        let slide = self.current_slide();
        matches!(slide.kind, SlideKind::SpeechPractice)
            || (self.mode == Mode::Practice && slide.supports_recording())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SLIDES;

    fn session() -> Session {
        Session::restore(SLIDES, Store::disabled())
    }

    fn first_quiz() -> &'static Slide {
        SLIDES.iter().find(|s| s.is_quiz()).unwrap()
    }

    fn correct_option(slide: &Slide) -> &'static str {
        slide.options().unwrap().iter().find(|o| o.correct).unwrap().id
    }

    fn wrong_option(slide: &Slide) -> &'static str {
        slide.options().unwrap().iter().find(|o| !o.correct).unwrap().id
    }

    #[test]
    fn test_correct_first_answer_scores_and_reveals() {
        let mut s = session();
        let quiz = first_quiz();
        let picked = correct_option(quiz);

        let outcome = s.submit_answer(quiz.id, picked).unwrap();
        assert!(outcome.correct);
        assert_eq!(s.answer_for(quiz.id), Some(picked));
        assert!(s.is_revealed(quiz.id));
        assert_eq!(s.score(), CORRECT_ANSWER_POINTS);
    }

    #[test]
    fn test_wrong_answer_reveals_without_scoring() {
        let mut s = session();
        let quiz = first_quiz();

        let outcome = s.submit_answer(quiz.id, wrong_option(quiz)).unwrap();
        assert!(!outcome.correct);
        assert!(s.is_revealed(quiz.id));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_answering_is_idempotent() {
        let mut s = session();
        let quiz = first_quiz();
        let wrong = wrong_option(quiz);

        assert!(s.submit_answer(quiz.id, wrong).is_some());
        // Second submission, even with the correct option, is a no-op.
        assert!(s.submit_answer(quiz.id, correct_option(quiz)).is_none());
        assert_eq!(s.answer_for(quiz.id), Some(wrong));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_teacher_mode_is_read_only() {
        let mut s = session();
        s.switch_mode(); // Student -> Teacher
        assert_eq!(s.mode(), Mode::Teacher);

        let quiz = first_quiz();
        assert!(s.submit_answer(quiz.id, correct_option(quiz)).is_none());
        assert!(s.answer_for(quiz.id).is_none());
        assert_eq!(s.score(), 0);
        // Teacher mode reveals everything without answers.
        assert!(s.is_revealed(quiz.id));
    }

    #[test]
    fn test_unknown_slide_or_option_rejected() {
        let mut s = session();
        assert!(s.submit_answer(999_999, "A").is_none());
        let quiz = first_quiz();
        assert!(s.submit_answer(quiz.id, "Z").is_none());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_score_accumulates_per_distinct_slide() {
        let mut s = session();
        let quizzes: Vec<&Slide> = SLIDES.iter().filter(|s| s.is_quiz()).take(3).collect();
        for quiz in &quizzes {
            s.submit_answer(quiz.id, correct_option(quiz)).unwrap();
        }
        assert_eq!(s.score(), 3 * CORRECT_ANSWER_POINTS);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut s = session();
        assert!(!s.go_prev());
        assert_eq!(s.current_index(), 0);

        while s.go_next() {}
        assert_eq!(s.current_index(), s.slide_count() - 1);
        assert!(!s.go_next());
        assert_eq!(s.current_index(), s.slide_count() - 1);
    }

    #[test]
    fn test_mode_cycle() {
        let mut s = session();
        assert_eq!(s.mode(), Mode::Student);
        assert_eq!(s.switch_mode(), Mode::Teacher);
        assert_eq!(s.switch_mode(), Mode::GameShow);
        assert_eq!(s.switch_mode(), Mode::Practice);
        assert_eq!(s.switch_mode(), Mode::Student);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut s = session();
        let quizzes: Vec<&Slide> = SLIDES.iter().filter(|s| s.is_quiz()).take(2).collect();
        for quiz in &quizzes {
            s.submit_answer(quiz.id, correct_option(quiz)).unwrap();
        }
        for _ in 0..5 {
            s.go_next();
        }
        assert_eq!(s.score(), 20);
        assert_eq!(s.current_index(), 5);

        s.reset();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.mode(), Mode::Student);
        assert!(s.answer_for(quizzes[0].id).is_none());
        assert!(!s.is_revealed(quizzes[0].id));
    }

    #[test]
    fn test_reset_restores_default_theme() {
        let mut s = session();
        s.toggle_dark_mode();
        assert!(!s.dark_mode());

        // In-memory state must match what a reload would restore.
        s.reset();
        assert_eq!(s.dark_mode(), crate::store::Snapshot::default().dark_mode);
    }

    #[test]
    fn test_restore_clamps_out_of_range_index() {
        let store = Store::disabled();
        // A disabled store loads defaults; simulate a stale index by
        // saving through a real snapshot path instead.
        let path = std::env::temp_dir()
            .join("lexdeck-session-tests")
            .join(format!("clamp-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let file_store = Store::at(path);
        let mut snapshot = file_store.load();
        snapshot.slide_index = 10_000;
        file_store.save(&snapshot);

        let s = Session::restore(SLIDES, file_store.clone());
        assert!(s.current_index() < SLIDES.len());
        file_store.clear().unwrap();
        drop(store);
    }

    #[test]
    fn test_gameshow_scoring_matches_student() {
        let mut s = session();
        s.switch_mode();
        s.switch_mode(); // -> GameShow
        assert_eq!(s.mode(), Mode::GameShow);

        let quiz = first_quiz();
        let outcome = s.submit_answer(quiz.id, correct_option(quiz)).unwrap();
        assert!(outcome.correct);
        assert_eq!(s.score(), CORRECT_ANSWER_POINTS);
    }
}
