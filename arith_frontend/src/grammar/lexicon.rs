//! Automata for the expression language's token vocabulary
//!
//! Each token kind gets its own hand-assembled DFA. Character classes are
//! spelled out as explicit transitions; there is no pattern compiler.

use crate::automaton::{Automaton, AutomatonResult};
use crate::config::runtime::LexicalPreferences;
use crate::lexical::{LexerError, LexicalAnalyzer};
use crate::logging::codes;
use crate::tokens::TokenKind;
use crate::{log_error, log_success};

const DIGITS: &str = "0123456789";
const WHITESPACE: &str = " \n\r\t";

/// `[0-9]*\.[0-9]+`: the fractional part is mandatory
pub fn num_automaton() -> AutomatonResult<Automaton> {
    const START: u32 = 0;
    const INTEGER: u32 = 1;
    const POINT: u32 = 2;
    const FRACTION: u32 = 3;

    let mut automaton = Automaton::new();
    automaton.add_state(START, true, false)?;
    automaton.add_state(INTEGER, false, false)?;
    automaton.add_state(POINT, false, false)?;
    automaton.add_state(FRACTION, false, true)?;

    automaton.add_transitions(START, DIGITS.chars(), INTEGER)?;
    automaton.add_transitions(INTEGER, DIGITS.chars(), INTEGER)?;
    automaton.add_transition(START, '.', POINT)?;
    automaton.add_transition(INTEGER, '.', POINT)?;
    automaton.add_transitions(POINT, DIGITS.chars(), FRACTION)?;
    automaton.add_transitions(FRACTION, DIGITS.chars(), FRACTION)?;

    Ok(automaton)
}

/// Two states: start, and accepting after exactly `ch`
pub fn single_char_automaton(ch: char) -> AutomatonResult<Automaton> {
    let mut automaton = Automaton::new();
    automaton.add_state(0, true, false)?;
    automaton.add_state(1, false, true)?;
    automaton.add_transition(0, ch, 1)?;
    Ok(automaton)
}

/// One accepting start state looping on blanks.
///
/// The start state accepts the empty string; the lexer never lets a
/// zero-length match win.
pub fn whitespace_automaton() -> AutomatonResult<Automaton> {
    let mut automaton = Automaton::new();
    automaton.add_state(0, true, true)?;
    automaton.add_transitions(0, WHITESPACE.chars(), 0)?;
    Ok(automaton)
}

/// Every (kind, automaton) pair of the language, in declaration order.
///
/// An assembly failure names the kind whose automaton was being built.
pub fn standard_automata() -> Result<Vec<(TokenKind, Automaton)>, LexerError> {
    Ok(vec![
        tagged(TokenKind::Num, num_automaton())?,
        tagged(TokenKind::Plus, single_char_automaton('+'))?,
        tagged(TokenKind::Minus, single_char_automaton('-'))?,
        tagged(TokenKind::Times, single_char_automaton('*'))?,
        tagged(TokenKind::Div, single_char_automaton('/'))?,
        tagged(TokenKind::LParen, single_char_automaton('('))?,
        tagged(TokenKind::RParen, single_char_automaton(')'))?,
        tagged(TokenKind::WhiteSpace, whitespace_automaton())?,
    ])
}

fn tagged(
    kind: TokenKind,
    built: AutomatonResult<Automaton>,
) -> Result<(TokenKind, Automaton), LexerError> {
    built
        .map(|automaton| (kind, automaton))
        .map_err(|source| LexerError::InvalidAutomaton { kind, source })
}

/// Lexer for the expression language
pub fn create_lexer(preferences: LexicalPreferences) -> Result<LexicalAnalyzer, LexerError> {
    let automata = standard_automata().inspect_err(|error| {
        log_error!(error.error_code(), "Failed to assemble token automata",
            "error" => error
        );
    })?;

    let mut lexer = LexicalAnalyzer::with_preferences(preferences);
    for (kind, automaton) in automata {
        lexer.add_automaton(kind, automaton)?;
    }

    log_success!(codes::success::LEXER_CONSTRUCTED, "Lexer constructed",
        "automata" => lexer.automaton_count()
    );
    Ok(lexer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomatonError;
    use assert_matches::assert_matches;

    #[test]
    fn test_num_automaton_requires_fraction() {
        let num = num_automaton().unwrap();
        assert_eq!(num.state_count(), 4);

        for accepted in ["12.5", ".5", "0.0", "007.250"] {
            assert!(num.accepts(accepted), "{accepted} should be a NUM");
        }
        for rejected in ["5", "5.", ".", "", "1.2.3", "-1.0"] {
            assert!(!num.accepts(rejected), "{rejected} should not be a NUM");
        }
    }

    #[test]
    fn test_single_char_automaton() {
        let plus = single_char_automaton('+').unwrap();
        assert_eq!(plus.state_count(), 2);
        assert_eq!(plus.transition_count(), 1);
        assert!(plus.accepts("+"));
        assert!(!plus.accepts("++"));
        assert!(!plus.accepts(""));
    }

    #[test]
    fn test_whitespace_automaton_accepts_empty_and_blanks() {
        let ws = whitespace_automaton().unwrap();
        assert_eq!(ws.state_count(), 1);
        assert!(ws.accepts(""));
        assert!(ws.accepts(" \t\r\n "));
        assert!(!ws.accepts(" x"));
    }

    #[test]
    fn test_standard_automata_follow_declaration_order() {
        let kinds: Vec<TokenKind> = standard_automata()
            .unwrap()
            .into_iter()
            .map(|(kind, _)| kind)
            .collect();

        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
        assert_eq!(kinds.len(), 8);
        assert!(!kinds.contains(&TokenKind::Eof));
    }

    #[test]
    fn test_assembly_failure_names_its_kind() {
        let built = single_char_automaton('/')
            .and_then(|mut automaton| automaton.add_state(0, false, false).map(|_| automaton));
        let error = tagged(TokenKind::Div, built).unwrap_err();

        assert_matches!(
            error,
            LexerError::InvalidAutomaton {
                kind: TokenKind::Div,
                source: AutomatonError::DuplicateState { .. }
            }
        );
        assert_matches!(
            tagged(TokenKind::WhiteSpace, Err(AutomatonError::MissingStartState)),
            Err(LexerError::InvalidAutomaton {
                kind: TokenKind::WhiteSpace,
                ..
            })
        );
    }

    #[test]
    fn test_create_lexer() {
        let lexer = create_lexer(LexicalPreferences::default()).unwrap();
        assert_eq!(lexer.automaton_count(), 8);

        let stream = lexer.tokenize(" 12.5*(3.0) ").unwrap();
        assert_eq!(
            stream.kinds(),
            vec![
                TokenKind::Num,
                TokenKind::Times,
                TokenKind::LParen,
                TokenKind::Num,
                TokenKind::RParen,
                TokenKind::Eof
            ]
        );
        assert_eq!(stream.peek_token(0).value.lexeme, "12.5");
    }

    #[test]
    fn test_dot_failures_point_at_the_dot() {
        let lexer = create_lexer(LexicalPreferences::default()).unwrap();

        assert_eq!(
            lexer.tokenize("."),
            Err(LexerError::NoViableToken {
                offset: 0,
                scan_start: 0
            })
        );
        assert_eq!(
            lexer.tokenize("5."),
            Err(LexerError::NoViableToken {
                offset: 1,
                scan_start: 0
            })
        );
        assert_eq!(
            lexer.tokenize("1.0 + 5"),
            Err(LexerError::NoViableToken {
                offset: 6,
                scan_start: 6
            })
        );
        assert_eq!(
            lexer.tokenize("$"),
            Err(LexerError::NoViableToken {
                offset: 0,
                scan_start: 0
            })
        );
    }
}
