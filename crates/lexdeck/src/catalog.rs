//! The built-in slide catalog.
//!
//! Slides are immutable static data: each slide has a unique id (the key
//! for recorded answers), a kind-specific payload, and display text. The
//! deck covers IELTS Speaking Part 1-3 material on technology and global
//! connectivity.

/// One unit of displayed content with a fixed kind and ordinal position.
#[derive(Debug, Clone, Copy)]
pub struct Slide {
    pub id: u32,
    pub title: &'static str,
    /// Main display text. For quizzes this is the question stem; for
    /// speech practice it is the prompt read to the analysis service.
    pub body: &'static str,
    pub kind: SlideKind,
}

/// Kind-specific payload. Fields that only make sense for one kind live
/// on that variant, so a timeline slide without timeline data cannot be
/// constructed.
#[derive(Debug, Clone, Copy)]
pub enum SlideKind {
    /// Section divider ("Part 1: The Internet").
    Header { subtitle: &'static str },
    /// A speaking question, optionally with secondary-language renderings.
    Question {
        translations: Translations,
        insight: Option<&'static str>,
    },
    /// Multiple-choice quiz. Exactly one option is correct.
    Quiz { options: &'static [QuizOption] },
    /// Open task the student answers aloud; no options, no scoring.
    FreeResponse,
    /// Informational card (model answers, grammar notes).
    Info { insight: Option<&'static str> },
    /// Examiner's insight: the body itself is the pedagogical point.
    Reason { insight: Option<&'static str> },
    /// Vocabulary card or list. A single card has no extra entries.
    VocabList { entries: &'static [&'static str] },
    /// Grammar tense timeline.
    Timeline(TimelineSpec),
    /// Dedicated speaking task scored with the stricter rubric.
    SpeechPractice,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Translations {
    pub uzbek: Option<&'static str>,
    pub russian: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct QuizOption {
    pub id: &'static str,
    pub text: &'static str,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub markers: &'static [TimelineMarker],
    pub events: &'static [TimelineEvent],
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineMarker {
    pub label: &'static str,
    /// Horizontal position, 0..=100.
    pub position: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineEvent {
    pub label: &'static str,
    pub position: f32,
    pub kind: TimelineEventKind,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEventKind {
    /// A single moment, drawn as a floating card above the line.
    Point,
    /// A span from `from` to `position`, drawn as a band on the line.
    Range { from: f32 },
}

const fn opt(id: &'static str, text: &'static str) -> QuizOption {
    QuizOption {
        id,
        text,
        correct: false,
    }
}

const fn correct(id: &'static str, text: &'static str) -> QuizOption {
    QuizOption {
        id,
        text,
        correct: true,
    }
}

const NO_TRANSLATIONS: Translations = Translations {
    uzbek: None,
    russian: None,
};

const PRESENT_PERFECT_CONTINUOUS: TimelineSpec = TimelineSpec {
    name: "Present Perfect Continuous",
    description: "Actions starting in the past and continuing until NOW.",
    markers: &[
        TimelineMarker {
            label: "Past (2010)",
            position: 10.0,
        },
        TimelineMarker {
            label: "NOW",
            position: 90.0,
        },
        TimelineMarker {
            label: "Future",
            position: 100.0,
        },
    ],
    events: &[
        TimelineEvent {
            label: "Started using",
            position: 10.0,
            kind: TimelineEventKind::Point,
            description: "Action began here",
        },
        TimelineEvent {
            label: "have been using...",
            position: 90.0,
            kind: TimelineEventKind::Range { from: 10.0 },
            description: "Unfinished, still in progress",
        },
    ],
};

const USED_TO: TimelineSpec = TimelineSpec {
    name: "'Used to' for Past Habits",
    description: "Repeated past actions that have completely stopped.",
    markers: &[
        TimelineMarker {
            label: "Past",
            position: 10.0,
        },
        TimelineMarker {
            label: "NOW",
            position: 80.0,
        },
        TimelineMarker {
            label: "Future",
            position: 100.0,
        },
    ],
    events: &[
        TimelineEvent {
            label: "used to use Skype",
            position: 55.0,
            kind: TimelineEventKind::Range { from: 10.0 },
            description: "Habit during a finished period",
        },
        TimelineEvent {
            label: "Stopped",
            position: 55.0,
            kind: TimelineEventKind::Point,
            description: "The habit ended before now",
        },
    ],
};

/// The full deck in presentation order. Ids are stable; answer history is
/// keyed on them, so reordering slides is safe but renumbering is not.
pub static SLIDES: &[Slide] = &[
    Slide {
        id: 1,
        title: "Part 1",
        body: "Part 1: The Internet",
        kind: SlideKind::Header {
            subtitle: "Set 3: Technology and Global Connectivity",
        },
    },
    Slide {
        id: 2,
        title: "Question & Translation",
        body: "How often do you use the internet to communicate with people abroad?",
        kind: SlideKind::Question {
            translations: Translations {
                uzbek: Some(
                    "Chet eldagilar bilan muloqot qilish uchun internetdan qanchalik tez-tez foydalanasiz?",
                ),
                russian: Some(
                    "Как часто вы используете интернет для общения с людьми за границей?",
                ),
            },
            insight: None,
        },
    },
    Slide {
        id: 101,
        title: "Quiz: Prepositions",
        body: "Which preposition is correct?",
        kind: SlideKind::Quiz {
            options: &[
                opt("A", "I found it in the internet."),
                correct("B", "I found it on the internet."),
            ],
        },
    },
    Slide {
        id: 3,
        title: "Quiz: Natural Phrasing",
        body: "Which sounds more natural to an examiner?",
        kind: SlideKind::Quiz {
            options: &[
                opt("A", "I make the internet..."),
                correct("B", "I browse the internet..."),
                opt("C", "I do the internet..."),
            ],
        },
    },
    Slide {
        id: 102,
        title: "Grammar Insight",
        body: "Stative verbs (like 'prefer', 'need', 'love') are rarely used in continuous forms.",
        kind: SlideKind::Info {
            insight: Some("Say 'I prefer emailing' not 'I am preferring'."),
        },
    },
    Slide {
        id: 200,
        title: "Grammar Timeline",
        body: "Present Perfect Continuous",
        kind: SlideKind::Timeline(PRESENT_PERFECT_CONTINUOUS),
    },
    Slide {
        id: 201,
        title: "Drill 1/10",
        body: "I ____ (study) English for 5 years.",
        kind: SlideKind::Quiz {
            options: &[
                opt("A", "have studied"),
                correct("B", "have been studying"),
            ],
        },
    },
    Slide {
        id: 202,
        title: "Drill 2/10",
        body: "She ____ (wait) here since 2pm.",
        kind: SlideKind::Quiz {
            options: &[correct("A", "has been waiting"), opt("B", "is waiting")],
        },
    },
    Slide {
        id: 203,
        title: "Drill 3/10",
        body: "How long ____ (you / play) this game?",
        kind: SlideKind::Quiz {
            options: &[
                correct("A", "have you been playing"),
                opt("B", "do you play"),
            ],
        },
    },
    Slide {
        id: 204,
        title: "Drill 4/10",
        body: "We ____ (not / live) here long.",
        kind: SlideKind::Quiz {
            options: &[
                correct("A", "haven't been living"),
                opt("B", "didn't live"),
            ],
        },
    },
    Slide {
        id: 205,
        title: "Drill 5/10",
        body: "It ____ (rain) all day.",
        kind: SlideKind::Quiz {
            options: &[correct("A", "has been raining"), opt("B", "rains")],
        },
    },
    Slide {
        id: 206,
        title: "Drill 6/10",
        body: "I'm tired because I ____ (run).",
        kind: SlideKind::Quiz {
            options: &[correct("A", "have been running"), opt("B", "ran")],
        },
    },
    Slide {
        id: 207,
        title: "Drill 7/10",
        body: "____ (you / watch) the show lately?",
        kind: SlideKind::Quiz {
            options: &[
                correct("A", "Have you been watching"),
                opt("B", "Do you watch"),
            ],
        },
    },
    Slide {
        id: 208,
        title: "Drill 8/10",
        body: "He ____ (work) on this project since March.",
        kind: SlideKind::Quiz {
            options: &[correct("A", "has been working"), opt("B", "works")],
        },
    },
    Slide {
        id: 209,
        title: "Drill 9/10",
        body: "They ____ (travel) around Europe for months.",
        kind: SlideKind::Quiz {
            options: &[
                correct("A", "have been traveling"),
                opt("B", "are traveling"),
            ],
        },
    },
    Slide {
        id: 210,
        title: "Drill 10/10",
        body: "I ____ (learn) English since I was 11.",
        kind: SlideKind::Quiz {
            options: &[correct("A", "have been learning"), opt("B", "learn")],
        },
    },
    Slide {
        id: 4,
        title: "Quiz: Grammar Tense",
        body: "For a habit starting in the past and continuing now, use:",
        kind: SlideKind::Quiz {
            options: &[
                opt("A", "I used the internet..."),
                correct("B", "I have been using the internet..."),
            ],
        },
    },
    Slide {
        id: 211,
        title: "Grammar Timeline",
        body: "'Used to' for Past Habits",
        kind: SlideKind::Timeline(USED_TO),
    },
    Slide {
        id: 103,
        title: "Quiz: 'Used to'",
        body: "Select the correct structure for a past habit that has stopped:",
        kind: SlideKind::Quiz {
            options: &[
                opt("A", "I am used to using Skype."),
                correct("B", "I used to use Skype."),
            ],
        },
    },
    Slide {
        id: 104,
        title: "Grammar Challenge",
        body: "Use 'get used to' in a sentence about a new app.",
        kind: SlideKind::FreeResponse,
    },
    Slide {
        id: 5,
        title: "Quick Test",
        body: "Use \"daily basis\" in a sentence about your internet use.",
        kind: SlideKind::FreeResponse,
    },
    Slide {
        id: 6,
        title: "Model Answer Start",
        body: "To be honest, I rely on the internet almost constantly to stay in touch with my friends overseas...",
        kind: SlideKind::Info { insight: None },
    },
    Slide {
        id: 105,
        title: "Power Vocab",
        body: "\"Indispensable\" (adj.) - Absolutely necessary.",
        kind: SlideKind::VocabList { entries: &[] },
    },
    Slide {
        id: 106,
        title: "Quiz: Vocab Context",
        body: "Is 'indispensable' stronger than 'useful'?",
        kind: SlideKind::Quiz {
            options: &[
                correct("A", "Yes, much stronger."),
                opt("B", "No, they are the same."),
            ],
        },
    },
    Slide {
        id: 7,
        title: "Quiz: Synonyms",
        body: "Replace \"stay in touch\" with a formal synonym:",
        kind: SlideKind::Quiz {
            options: &[correct("A", "Maintain contact"), opt("B", "Talk to")],
        },
    },
    Slide {
        id: 8,
        title: "Quiz: Strategy",
        body: "If you forget a word, should you:",
        kind: SlideKind::Quiz {
            options: &[
                opt("A", "Stay silent."),
                correct("B", "Use a filler like \"What I'm trying to say is...\""),
            ],
        },
    },
    Slide {
        id: 9,
        title: "Quick Test",
        body: "Complete: \"I use apps like WhatsApp to call my cousins, WHEREAS...\"",
        kind: SlideKind::FreeResponse,
    },
    Slide {
        id: 10,
        title: "Examiner's Insight",
        body: "Using specific terms like \"abroad\" or \"overseas\" instead of repeating \"other countries\" shows Lexical Resource.",
        kind: SlideKind::Reason {
            insight: Some("Avoid repetition to boost your Band Score."),
        },
    },
    Slide {
        id: 107,
        title: "Power Vocab",
        body: "\"Tech-savvy\" (adj.) - Proficient with modern technology.",
        kind: SlideKind::VocabList { entries: &[] },
    },
    Slide {
        id: 108,
        title: "Quiz: Adjective Order",
        body: "Which is correct?",
        kind: SlideKind::Quiz {
            options: &[
                opt("A", "A young tech-savvy student."),
                correct("B", "A tech-savvy young student."),
            ],
        },
    },
    Slide {
        id: 11,
        title: "Quiz: Error Correction",
        body: "Correct the error: \"I use the internet for talk with friends.\"",
        kind: SlideKind::Quiz {
            options: &[correct("A", "...for talking..."), opt("B", "...to talking...")],
        },
    },
    Slide {
        id: 109,
        title: "Quiz: Adverbs of Frequency",
        body: "Where do we usually place 'hardly ever'?",
        kind: SlideKind::Quiz {
            options: &[
                correct("A", "Before the main verb (I hardly ever use...)"),
                opt("B", "After the object (I use Skype hardly ever)"),
            ],
        },
    },
    Slide {
        id: 12,
        title: "Quiz: Pronunciation",
        body: "Where is the stress in 'con-nec-TIV-i-ty'?",
        kind: SlideKind::Quiz {
            options: &[opt("A", "1st syllable"), correct("B", "3rd syllable (tiv)")],
        },
    },
    Slide {
        id: 13,
        title: "Quick Test",
        body: "Use \"instantaneous\" in a sentence about messaging.",
        kind: SlideKind::FreeResponse,
    },
    Slide {
        id: 110,
        title: "Power Vocab",
        body: "\"Glitch\" (n.) - A sudden, usually temporary malfunction.",
        kind: SlideKind::VocabList { entries: &[] },
    },
    Slide {
        id: 111,
        title: "Target Vocabulary",
        body: "Use these in your Part 2 answer:",
        kind: SlideKind::VocabList {
            entries: &[
                "indispensable - absolutely necessary",
                "tech-savvy - proficient with technology",
                "glitch - a temporary malfunction",
                "instantaneous - happening immediately",
                "stay connected - keep in regular contact",
            ],
        },
    },
    Slide {
        id: 20,
        title: "Part 2",
        body: "Part 2: Describe a piece of technology you find useful",
        kind: SlideKind::Header {
            subtitle: "You have one minute to prepare and two minutes to speak",
        },
    },
    Slide {
        id: 21,
        title: "Cue Card",
        body: "Describe a piece of technology you find useful. You should say: what it is, how you learned to use it, and explain why it is useful to you.",
        kind: SlideKind::Question {
            translations: NO_TRANSLATIONS,
            insight: Some("Structure your answer: introduce, expand, conclude."),
        },
    },
    Slide {
        id: 22,
        title: "Speaking Practice",
        body: "Describe a piece of technology you find useful and explain why.",
        kind: SlideKind::SpeechPractice,
    },
    Slide {
        id: 30,
        title: "Part 3",
        body: "Part 3: Discussion — Technology and Society",
        kind: SlideKind::Header {
            subtitle: "Abstract questions, developed answers",
        },
    },
    Slide {
        id: 31,
        title: "Discussion Question",
        body: "Do you think people rely too much on the internet these days?",
        kind: SlideKind::Question {
            translations: Translations {
                uzbek: Some(
                    "Sizningcha, hozirgi kunda odamlar internetga haddan tashqari tayanishadimi?",
                ),
                russian: Some(
                    "Как вы думаете, люди сегодня слишком полагаются на интернет?",
                ),
            },
            insight: None,
        },
    },
    Slide {
        id: 32,
        title: "Speaking Practice",
        body: "Do you think people rely too much on the internet these days? Give a developed answer with reasons and an example.",
        kind: SlideKind::SpeechPractice,
    },
    Slide {
        id: 33,
        title: "Examiner's Insight",
        body: "In Part 3, examiners reward speculation language: \"I suppose...\", \"It could be argued that...\".",
        kind: SlideKind::Reason {
            insight: Some("Hedging shows grammatical range, not uncertainty."),
        },
    },
];

impl Slide {
    /// Options attached to this slide, if its kind carries any.
    pub fn options(&self) -> Option<&'static [QuizOption]> {
        match self.kind {
            SlideKind::Quiz { options } => Some(options),
            _ => None,
        }
    }

    pub fn is_quiz(&self) -> bool {
        matches!(self.kind, SlideKind::Quiz { .. })
    }

    /// Whether the practice-mode recording panel applies to this slide.
    pub fn supports_recording(&self) -> bool {
        matches!(
            self.kind,
            SlideKind::Question { .. }
                | SlideKind::FreeResponse
                | SlideKind::Info { .. }
                | SlideKind::Reason { .. }
                | SlideKind::VocabList { .. }
                | SlideKind::SpeechPractice
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_slide_ids_unique() {
        let mut seen = BTreeSet::new();
        for slide in SLIDES {
            assert!(seen.insert(slide.id), "duplicate slide id {}", slide.id);
        }
    }

    #[test]
    fn test_quizzes_have_exactly_one_correct_option() {
        for slide in SLIDES {
            if let SlideKind::Quiz { options } = slide.kind {
                let correct = options.iter().filter(|o| o.correct).count();
                assert_eq!(
                    correct, 1,
                    "slide {} has {} correct options",
                    slide.id, correct
                );
            }
        }
    }

    #[test]
    fn test_quiz_option_ids_unique_within_slide() {
        for slide in SLIDES {
            if let Some(options) = slide.options() {
                let mut seen = BTreeSet::new();
                for o in options {
                    assert!(
                        seen.insert(o.id),
                        "slide {} repeats option id {}",
                        slide.id,
                        o.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_timeline_positions_in_range() {
        for slide in SLIDES {
            if let SlideKind::Timeline(spec) = slide.kind {
                for m in spec.markers {
                    assert!((0.0..=100.0).contains(&m.position));
                }
                for e in spec.events {
                    assert!((0.0..=100.0).contains(&e.position));
                    if let TimelineEventKind::Range { from } = e.kind {
                        assert!(from < e.position, "empty range on slide {}", slide.id);
                    }
                }
            }
        }
    }

    #[test]
    fn test_deck_is_not_empty_and_starts_with_header() {
        assert!(SLIDES.len() >= 30);
        assert!(matches!(SLIDES[0].kind, SlideKind::Header { .. }));
    }

    #[test]
    fn test_deck_contains_speech_practice() {
        assert!(
            SLIDES
                .iter()
                .any(|s| matches!(s.kind, SlideKind::SpeechPractice))
        );
    }
}
