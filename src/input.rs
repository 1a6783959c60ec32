//! Turning raw text (flags, config files, interactive prompts) into a
//! [`SampleSummary`]. The numerical core never sees strings.

use std::io;

use linefeed::{DefaultTerminal, Interface, ReadResult};

use crate::config::SampleInput;
use crate::error::{ConvolveError, Result};
use crate::sample::SampleSummary;

pub const PROBABILITY_FIELD: &str = "target probability";
pub const OBSTACLE1_FIELD: &str = "obstacle 1 times";
pub const OBSTACLE2_FIELD: &str = "obstacle 2 times";

pub fn parse_probability(raw: &str) -> Result<f64> {
    parse_number(PROBABILITY_FIELD, raw)
}

/// Parses a comma separated list such as `"1.5, 2, 3.25"`. A blank answer is
/// an empty list; an empty entry inside a list is rejected.
pub fn parse_times(field: &'static str, raw: &str) -> Result<Vec<f64>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(|token| parse_number(field, token)).collect()
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    let token = raw.trim();
    token.parse::<f64>().map_err(|_| ConvolveError::NotANumber {
        field,
        token: token.to_string(),
    })
}

/// Source of answers for fields that were not supplied up front.
pub trait Prompt {
    /// `Ok(None)` means the input was closed.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

/// Interactive prompt on the controlling terminal. The terminal is only
/// opened on the first question, so fully specified runs never touch it.
#[derive(Default)]
pub struct TerminalPrompt {
    interface: Option<Interface<DefaultTerminal>>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let interface = match self.interface.take() {
            Some(interface) => interface,
            None => Interface::new("obstacle_convolve")?,
        };
        let interface = self.interface.insert(interface);
        interface.set_prompt(question)?;
        match interface.read_line()? {
            ReadResult::Input(line) => Ok(Some(line)),
            ReadResult::Eof | ReadResult::Signal(_) => Ok(None),
        }
    }
}

fn ask_field<P: Prompt>(prompt: &mut P, field: &'static str, question: &str) -> Result<String> {
    match prompt.ask(question) {
        Ok(Some(line)) => Ok(line),
        Ok(None) => Err(ConvolveError::InvalidInput(format!(
            "input closed before {} was entered",
            field
        ))),
        Err(e) => Err(ConvolveError::InvalidInput(format!(
            "could not read {}: {}",
            field, e
        ))),
    }
}

/// Fills whatever `input` is missing by asking `prompt`, one field at a time,
/// then validates the lot.
pub fn collect_samples<P: Prompt>(input: SampleInput, prompt: &mut P) -> Result<SampleSummary> {
    let probability = match input.probability {
        Some(p) => p,
        None => parse_probability(&ask_field(
            prompt,
            PROBABILITY_FIELD,
            "Enter the probability model: ",
        )?)?,
    };
    let obstacle1 = match input.obstacle1 {
        Some(times) => times,
        None => parse_times(
            OBSTACLE1_FIELD,
            &ask_field(
                prompt,
                OBSTACLE1_FIELD,
                "Enter the times for Obstacle 1 (comma-separated): ",
            )?,
        )?,
    };
    let obstacle2 = match input.obstacle2 {
        Some(times) => times,
        None => parse_times(
            OBSTACLE2_FIELD,
            &ask_field(
                prompt,
                OBSTACLE2_FIELD,
                "Enter the times for Obstacle 2 (comma-separated): ",
            )?,
        )?,
    };
    SampleSummary::new(probability, obstacle1, obstacle2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Obstacle;
    use std::collections::VecDeque;

    struct Scripted {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Scripted {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for Scripted {
        fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
            self.asked.push(question.to_string());
            Ok(self.answers.pop_front().map(String::from))
        }
    }

    #[test]
    fn parses_comma_separated_times() {
        assert_eq!(
            parse_times(OBSTACLE1_FIELD, " 1.5, 2 ,3.25").unwrap(),
            vec![1.5, 2.0, 3.25]
        );
        assert!(parse_times(OBSTACLE1_FIELD, "").unwrap().is_empty());
        assert!(parse_times(OBSTACLE1_FIELD, "   ").unwrap().is_empty());
    }

    #[test]
    fn empty_entries_are_not_dropped() {
        for raw in ["1,,2", "1, 2,", ",1", "1, ,2"] {
            assert_eq!(
                parse_times(OBSTACLE1_FIELD, raw),
                Err(ConvolveError::NotANumber {
                    field: OBSTACLE1_FIELD,
                    token: String::new()
                }),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn reports_the_offending_token() {
        assert_eq!(
            parse_times(OBSTACLE2_FIELD, "1, two, 3"),
            Err(ConvolveError::NotANumber {
                field: OBSTACLE2_FIELD,
                token: "two".to_string()
            })
        );
        assert!(matches!(
            parse_probability("ninety"),
            Err(ConvolveError::NotANumber { .. })
        ));
        assert_eq!(parse_probability(" 0.9 ").unwrap(), 0.9);
    }

    #[test]
    fn prompts_only_for_missing_fields() {
        let mut prompt = Scripted::new(&["2, 2, 2"]);
        let input = SampleInput {
            probability: Some(0.5),
            obstacle1: Some(vec![1.0, 2.0, 3.0]),
            obstacle2: None,
        };
        let summary = collect_samples(input, &mut prompt).unwrap();
        assert_eq!(prompt.asked.len(), 1);
        assert!(prompt.asked[0].contains("Obstacle 2"));
        assert_eq!(summary.mean2(), 2.0);
    }

    #[test]
    fn prompts_in_order_when_nothing_is_given() {
        let mut prompt = Scripted::new(&["0.9", "1,2,3", "4"]);
        let summary = collect_samples(SampleInput::default(), &mut prompt).unwrap();
        assert_eq!(prompt.asked.len(), 3);
        assert_eq!(summary.target_probability(), 0.9);
        assert_eq!(summary.mean1(), 2.0);
        assert_eq!(summary.mean2(), 4.0);
    }

    #[test]
    fn blank_answer_is_an_empty_sequence() {
        let mut prompt = Scripted::new(&["0.9", "  ", "4"]);
        let err = collect_samples(SampleInput::default(), &mut prompt).unwrap_err();
        assert_eq!(err, ConvolveError::EmptySamples(Obstacle::One));
    }

    #[test]
    fn closed_input_names_the_field() {
        let mut prompt = Scripted::new(&["0.9"]);
        match collect_samples(SampleInput::default(), &mut prompt) {
            Err(ConvolveError::InvalidInput(msg)) => assert!(msg.contains(OBSTACLE1_FIELD)),
            other => panic!("unexpected {:?}", other),
        }
    }
}
