//! Import/export line format.
//!
//! # Format
//! One flashcard per line:
//! ```text
//! Math@next@2+2=?@next@3@next@@correct@4@end@
//! ```
//! Field 0 is the category, field 1 the question, the rest are answers. Answers
//! prefixed with `@correct@` are correct. Lines without `@end@` are skipped.

use crate::error::{ParseError, Result};
use crate::types::AnswerDraft;
use serde::{Deserialize, Serialize};

pub const FIELD_SEPARATOR: &str = "@next@";
pub const LINE_TERMINATOR: &str = "@end@";
pub const CORRECT_MARKER: &str = "@correct@";

/// One flashcard read from an import line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub category: String,
    pub question: String,
    pub answers: Vec<AnswerDraft>,
    pub line_number: usize,
}

/// A line that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// Result of parsing a whole import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedImport {
    pub records: Vec<ImportRecord>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse import content. Malformed lines are collected, not fatal.
pub fn parse(content: &str) -> ParsedImport {
    let mut parsed = ParsedImport::default();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line, line_num) {
            Ok(Some(record)) => parsed.records.push(record),
            Ok(None) => parsed.skipped.push(SkippedLine {
                line: line_num,
                reason: format!("missing {LINE_TERMINATOR} terminator"),
            }),
            Err(e) => parsed.skipped.push(SkippedLine {
                line: line_num,
                reason: e.to_string(),
            }),
        }
    }

    parsed
}

/// Parse a single line. Returns `Ok(None)` when the line has no terminator.
pub fn parse_line(line: &str, line_num: usize) -> Result<Option<ImportRecord>> {
    let Some(end) = line.find(LINE_TERMINATOR) else {
        return Ok(None);
    };

    let mut fields = line[..end].split(FIELD_SEPARATOR).map(str::trim);

    let category = match fields.next() {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => return Err(ParseError::MissingCategory { line: line_num }),
    };
    let question = match fields.next() {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return Err(ParseError::MissingQuestion { line: line_num }),
    };

    let answers: Vec<AnswerDraft> = fields
        .filter(|f| !f.is_empty())
        .filter_map(|field| match field.strip_prefix(CORRECT_MARKER) {
            Some(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| AnswerDraft::correct(text))
            }
            None => Some(AnswerDraft::incorrect(field)),
        })
        .collect();

    if answers.is_empty() {
        return Err(ParseError::MissingAnswers { line: line_num });
    }

    Ok(Some(ImportRecord {
        category,
        question,
        answers,
        line_number: line_num,
    }))
}

/// Format one flashcard as an export line (without trailing newline).
pub fn format_line<'a, I>(category: &str, question: &str, answers: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let mut line = String::new();
    line.push_str(category);
    line.push_str(FIELD_SEPARATOR);
    line.push_str(question);
    for (text, is_correct) in answers {
        line.push_str(FIELD_SEPARATOR);
        if is_correct {
            line.push_str(CORRECT_MARKER);
        }
        line.push_str(text);
    }
    line.push_str(LINE_TERMINATOR);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_marks_correct_answers() {
        let record = parse_line("Math@next@2+2=?@next@3@next@@correct@4@end@", 1)
            .unwrap()
            .unwrap();
        assert_eq!(record.category, "Math");
        assert_eq!(record.question, "2+2=?");
        assert_eq!(
            record.answers,
            vec![AnswerDraft::incorrect("3"), AnswerDraft::correct("4")]
        );
    }

    #[test]
    fn line_without_terminator_is_skipped() {
        assert_eq!(parse_line("Math@next@2+2=?@next@@correct@4", 1), Ok(None));
    }

    #[test]
    fn text_after_terminator_is_ignored() {
        let record = parse_line("Geo@next@Capital of France?@next@@correct@Paris@end@ trailing", 3)
            .unwrap()
            .unwrap();
        assert_eq!(record.answers, vec![AnswerDraft::correct("Paris")]);
        assert_eq!(record.line_number, 3);
    }

    #[test]
    fn empty_answer_fields_are_dropped() {
        let record = parse_line("Math@next@1+1?@next@@next@@correct@2@next@@end@", 1)
            .unwrap()
            .unwrap();
        assert_eq!(record.answers, vec![AnswerDraft::correct("2")]);
    }

    #[test]
    fn reject_missing_parts() {
        assert_eq!(
            parse_line("@next@Q@next@A@end@", 4),
            Err(ParseError::MissingCategory { line: 4 })
        );
        assert_eq!(
            parse_line("Math@end@", 5),
            Err(ParseError::MissingQuestion { line: 5 })
        );
        assert_eq!(
            parse_line("Math@next@Q@end@", 6),
            Err(ParseError::MissingAnswers { line: 6 })
        );
    }

    #[test]
    fn parse_collects_records_and_skips() {
        let content = "Math@next@Q1@next@@correct@A@end@\n\nno terminator here\nMath@next@@end@\r\nMath@next@Q2@next@B@next@@correct@C@end@\r\n";
        let parsed = parse(content);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].question, "Q2");
        assert_eq!(parsed.records[1].line_number, 5);
        let skipped: Vec<usize> = parsed.skipped.iter().map(|s| s.line).collect();
        assert_eq!(skipped, vec![3, 4]);
    }

    #[test]
    fn format_line_matches_parse() {
        let line = format_line("Math", "2+2=?", [("3", false), ("4", true)]);
        assert_eq!(line, "Math@next@2+2=?@next@3@next@@correct@4@end@");

        let record = parse_line(&line, 1).unwrap().unwrap();
        assert_eq!(record.question, "2+2=?");
        assert_eq!(record.answers.len(), 2);
    }
}
