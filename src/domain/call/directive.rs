//! Directive parsing
//!
//! The classifier returns free text that usually, but not always, contains
//! one of the recognized action verbs. All of the string sniffing lives in
//! [`Directive::parse`] so the fragile model-output contract is isolated in
//! one translation function.

/// Next action decided from a classified IVR utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A live person is on the line
    HumanDetected,
    /// Send touch-tone digits
    PressDigits(String),
    /// Speak text into the call
    Speak(String),
    /// No recognized action; deliberately a no-op, never an error
    Unrecognized,
}

/// Substrings that indicate a live person, matched case-insensitively
const HUMAN_KEYWORDS: &[&str] = &["human", "representative", "agent"];

impl Directive {
    /// Translate classifier output into a directive
    ///
    /// Precedence: human keywords win over everything, then "press" with
    /// its first contiguous digit run, then the text after the first
    /// `say:` marker.
    pub fn parse(text: &str) -> Directive {
        let lowered = text.to_lowercase();

        if HUMAN_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return Directive::HumanDetected;
        }

        if lowered.contains("press") {
            if let Some(digits) = first_digit_run(text) {
                return Directive::PressDigits(digits);
            }
            return Directive::Unrecognized;
        }

        if let Some((_, rest)) = text.split_once("say:") {
            let spoken = rest.trim();
            if !spoken.is_empty() {
                return Directive::Speak(spoken.to_string());
            }
        }

        Directive::Unrecognized
    }
}

/// First contiguous run of ASCII digits in `text`
fn first_digit_run(text: &str) -> Option<String> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let run: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_keywords_are_case_insensitive_substrings() {
        assert_eq!(
            Directive::parse("I'll connect you to a Human now"),
            Directive::HumanDetected
        );
        assert_eq!(
            Directive::parse("transferring to a REPRESENTATIVE"),
            Directive::HumanDetected
        );
        // Substring match, not whole-word
        assert_eq!(Directive::parse("reagent detected"), Directive::HumanDetected);
    }

    #[test]
    fn test_human_takes_precedence_over_press() {
        assert_eq!(
            Directive::parse("press 0 to reach an agent"),
            Directive::HumanDetected
        );
    }

    #[test]
    fn test_press_extracts_first_digit_run() {
        assert_eq!(
            Directive::parse("please press 1"),
            Directive::PressDigits("1".to_string())
        );
        assert_eq!(
            Directive::parse("Press 42 then 7"),
            Directive::PressDigits("42".to_string())
        );
    }

    #[test]
    fn test_press_without_digits_is_unrecognized() {
        assert_eq!(Directive::parse("press the pound key"), Directive::Unrecognized);
    }

    #[test]
    fn test_say_takes_text_after_marker() {
        assert_eq!(
            Directive::parse("say: member id please"),
            Directive::Speak("member id please".to_string())
        );
    }

    #[test]
    fn test_say_without_marker_is_unrecognized() {
        assert_eq!(Directive::parse("say something"), Directive::Unrecognized);
        assert_eq!(Directive::parse("say:   "), Directive::Unrecognized);
    }

    #[test]
    fn test_press_checked_before_say() {
        assert_eq!(
            Directive::parse("press 3 or say: billing"),
            Directive::PressDigits("3".to_string())
        );
    }

    #[test]
    fn test_unrelated_text_is_unrecognized() {
        assert_eq!(Directive::parse("please hold"), Directive::Unrecognized);
        assert_eq!(Directive::parse(""), Directive::Unrecognized);
    }
}
