//! Remote speech analysis.
//!
//! One recording produces one request to the Gemini generateContent
//! endpoint: base64 WAV audio plus a rubric prompt built from the current
//! slide's text. There are no retries; callers map any failure to a fixed
//! user-facing message and log the detail.

use anyhow::{Context, Result};
use regex::Regex;
use std::sync::OnceLock;

use crate::catalog::SlideKind;
use crate::config::AnalysisConfig;

/// Shown in the feedback area for any analysis failure. The technical
/// detail goes to the log, never to the user.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Sorry, the examiner could not review this recording. Please try again.";

/// Shown when the captured audio cannot be encoded for transport.
pub const ENCODING_FAILED_MESSAGE: &str =
    "The recording could not be processed. Please record again.";

/// Which evaluation instructions accompany the audio. Ordinary prompts
/// get pronunciation-focused feedback; dedicated speaking tasks get the
/// stricter coherence/task-achievement rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rubric {
    Pronunciation,
    Speaking,
}

impl Rubric {
    pub fn for_slide(kind: &SlideKind) -> Self {
        match kind {
            SlideKind::SpeechPractice => Rubric::Speaking,
            _ => Rubric::Pronunciation,
        }
    }

    pub fn score_label(self) -> &'static str {
        match self {
            Rubric::Pronunciation => "Pronunciation",
            Rubric::Speaking => "Speaking",
        }
    }

    /// The natural-language instruction sent with the audio.
    pub fn prompt(self, slide_text: &str) -> String {
        match self {
            Rubric::Pronunciation => format!(
                "Act as a strict but encouraging IELTS examiner. Analyze this audio \
                 response to the prompt: \"{slide_text}\".\n\
                 Your reply MUST start with a line of the exact form \
                 \"Pronunciation Score: N/10\".\n\
                 Then give specific feedback on:\n\
                 1. Pronunciation: identify any unclear words or stress errors.\n\
                 2. Fluency: did the speaker sound natural?\n\
                 3. Vocabulary: was the target vocabulary used correctly?\n\
                 Keep it concise (max 100 words)."
            ),
            Rubric::Speaking => format!(
                "Act as a strict IELTS examiner scoring a speaking task. The task was: \
                 \"{slide_text}\".\n\
                 Your reply MUST start with a line of the exact form \
                 \"Speaking Score: N/10\".\n\
                 Then assess, briefly and concretely:\n\
                 1. Task achievement: did the answer address the task fully?\n\
                 2. Coherence: was the answer organized with clear linking?\n\
                 3. Grammatical range and lexical resource.\n\
                 Keep it concise (max 120 words)."
            ),
        }
    }
}

/// Parsed analysis response: the displayable body with the score line
/// stripped, plus the badge extracted from it when present.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub badge: Option<ScoreBadge>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBadge {
    pub label: String,
    pub value: f32,
}

fn score_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*(pronunciation|speaking)[ \t]+score:[ \t]*([0-9]+(?:\.[0-9]+)?)[ \t]*/[ \t]*10[ \t]*\.?[ \t]*$")
            .unwrap()
    })
}

/// Split the raw response into a score badge and the remaining text.
/// Tolerates decimal scores and any casing on the label; if no score
/// line is found, the whole text becomes the body and there is no badge.
pub fn parse_feedback(raw: &str) -> Feedback {
    let re = score_line_regex();
    let Some(caps) = re.captures(raw) else {
        return Feedback {
            badge: None,
            body: raw.trim().to_string(),
        };
    };

    let label = match caps[1].to_ascii_lowercase().as_str() {
        "speaking" => "Speaking",
        _ => "Pronunciation",
    };
    let value: f32 = caps[2].parse().unwrap_or(0.0);

    let whole = caps.get(0).unwrap();
    let mut body = String::with_capacity(raw.len());
    body.push_str(&raw[..whole.start()]);
    body.push_str(&raw[whole.end()..]);

    Feedback {
        badge: Some(ScoreBadge {
            label: label.to_string(),
            value,
        }),
        body: body.trim().to_string(),
    }
}

/// Send one recording for analysis and return the raw feedback text.
pub fn analyze(
    config: &AnalysisConfig,
    wav_base64: &str,
    slide_text: &str,
    rubric: Rubric,
) -> Result<String> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured. Set analysis.api_key or the {} environment variable.",
            AnalysisConfig::ENV_VAR
        )
    })?;

    let body = serde_json::json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": "audio/wav",
                        "data": wav_base64
                    }
                },
                {
                    "text": rubric.prompt(slide_text)
                }
            ]
        }]
    });

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={api_key}",
        config.model()
    );

    let response: serde_json::Value = ureq::post(&url)
        .header("Content-Type", "application/json")
        .send_json(&body)
        .context("Failed to call analysis API")?
        .body_mut()
        .read_json()
        .context("Failed to parse analysis response")?;

    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("No parts in analysis response"))?;

    let mut text = String::new();
    for part in parts {
        if let Some(t) = part["text"].as_str() {
            text.push_str(t);
        }
    }

    if text.trim().is_empty() {
        anyhow::bail!("Empty analysis response");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pronunciation_score_line() {
        let feedback = parse_feedback("Pronunciation Score: 7/10\n- good fluency");
        let badge = feedback.badge.unwrap();
        assert_eq!(badge.label, "Pronunciation");
        assert_eq!(badge.value, 7.0);
        assert_eq!(feedback.body, "- good fluency");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let feedback = parse_feedback("SPEAKING SCORE: 6/10\nWork on linking words.");
        let badge = feedback.badge.unwrap();
        assert_eq!(badge.label, "Speaking");
        assert_eq!(badge.value, 6.0);
        assert_eq!(feedback.body, "Work on linking words.");
    }

    #[test]
    fn test_parse_tolerates_decimal_scores() {
        let feedback = parse_feedback("Speaking Score: 6.5/10\nSolid answer.");
        assert_eq!(feedback.badge.unwrap().value, 6.5);
    }

    #[test]
    fn test_parse_without_score_line_is_plain_text() {
        let raw = "Good effort. Watch the stress in 'connectivity'.";
        let feedback = parse_feedback(raw);
        assert!(feedback.badge.is_none());
        assert_eq!(feedback.body, raw);
    }

    #[test]
    fn test_parse_score_line_not_at_start() {
        let feedback = parse_feedback("Here is my verdict.\nPronunciation Score: 8/10\nWell done.");
        assert_eq!(feedback.badge.unwrap().value, 8.0);
        assert_eq!(feedback.body, "Here is my verdict.\n\nWell done.");
    }

    #[test]
    fn test_unrelated_score_labels_ignored() {
        let raw = "Vocabulary Score: 9/10\nNice range.";
        let feedback = parse_feedback(raw);
        assert!(feedback.badge.is_none());
        assert_eq!(feedback.body, raw);
    }

    #[test]
    fn test_rubric_selection_by_slide_kind() {
        assert_eq!(
            Rubric::for_slide(&SlideKind::SpeechPractice),
            Rubric::Speaking
        );
        assert_eq!(
            Rubric::for_slide(&SlideKind::FreeResponse),
            Rubric::Pronunciation
        );
    }

    #[test]
    fn test_rubric_prompt_embeds_slide_text_and_score_line() {
        let prompt = Rubric::Speaking.prompt("Describe a useful gadget.");
        assert!(prompt.contains("Describe a useful gadget."));
        assert!(prompt.contains("Speaking Score: N/10"));

        let prompt = Rubric::Pronunciation.prompt("Say 'connectivity'.");
        assert!(prompt.contains("Pronunciation Score: N/10"));
    }
}
