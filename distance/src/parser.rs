use nom::{
    bytes::complete::take_while1,
    character::complete::{digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, separated_pair},
    IResult,
};

use crate::{
    error::ValidationError,
    model::{is_safe_integer, ParsedLists},
};

/// Default upload ceiling: 10 MiB.
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Written at the start of UTF-8 files by some editors.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    pub max_bytes: usize,
    /// Stop after this many data lines; `None` reads everything. Must not be
    /// `Some(0)`.
    pub max_lines: Option<usize>,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_lines: None,
        }
    }
}

impl ParseLimits {
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }
}

/// Optionally signed run of ASCII digits.
fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), str::parse::<i64>)(input)
}

fn row(input: &str) -> IResult<&str, (i64, i64)> {
    separated_pair(integer, take_while1(char::is_whitespace), integer)(input)
}

/// Works out why `line` was rejected so the error can say something useful.
fn rejection_reason(line: &str) -> String {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.len() != 2 {
        return format!("expected 2 columns, found {}", tokens.len());
    }
    match tokens.iter().find(|token| integer(token).map_or(true, |(rest, _)| !rest.is_empty())) {
        Some(token) if looks_numeric(token) => format!("`{token}` is out of range"),
        Some(token) => format!("`{token}` is not a whole number"),
        None => "expected two integers".to_string(),
    }
}

fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses two whitespace separated integer columns with the default limits.
pub fn parse(input: &str) -> Result<ParsedLists, ValidationError> {
    parse_with_limits(input, &ParseLimits::default())
}

#[tracing::instrument(skip(input), fields(bytes = input.len()))]
pub fn parse_with_limits(
    input: &str,
    limits: &ParseLimits,
) -> Result<ParsedLists, ValidationError> {
    if input.len() > limits.max_bytes {
        return Err(ValidationError::FileTooLarge {
            size: input.len(),
            limit: limits.max_bytes,
        });
    }
    if limits.max_lines == Some(0) {
        return Err(ValidationError::InvalidFormat("line limit must be at least 1".to_string()));
    }

    let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);

    let mut lists = ParsedLists::default();

    for (index, raw) in input.lines().enumerate() {
        if limits.max_lines.is_some_and(|max| lists.len() >= max) {
            break;
        }

        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (_, (left, right)) = all_consuming(row)(line)
            .map_err(|_| ValidationError::malformed(index + 1, line, rejection_reason(line)))?;

        if let Some(value) = [left, right].into_iter().find(|v| !is_safe_integer(*v)) {
            return Err(ValidationError::malformed(
                index + 1,
                line,
                format!("`{value}` is outside the safe integer range"),
            ));
        }

        lists.extend([(left, right)]);
    }

    if lists.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    tracing::debug!(rows = lists.len(), "parsed input");
    Ok(lists)
}

/// First `lines` rows only, for showing a sample of an upload. `lines` must be
/// at least 1.
pub fn preview(input: &str, lines: usize) -> Result<ParsedLists, ValidationError> {
    parse_with_limits(input, &ParseLimits::default().with_max_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_SAFE_INTEGER;
    use rstest::rstest;

    const EXAMPLE: &str = "3   4
4   3
2   5
1   3
3   9
3   3";

    #[test]
    fn test_parse_example() -> miette::Result<()> {
        let lists = parse(EXAMPLE)?;
        assert_eq!(vec![3, 4, 2, 1, 3, 3], lists.list1);
        assert_eq!(vec![4, 3, 5, 3, 9, 3], lists.list2);
        Ok(())
    }

    #[rstest]
    #[case::single_spaces("3 4\n4 3\n2 5\n1 3\n3 9\n3 3")]
    #[case::tabs("3\t4\n4\t3\n2\t5\n1\t3\n3\t9\n3\t3")]
    #[case::crlf("3 4\r\n4 3\r\n2 5\r\n1 3\r\n3 9\r\n3 3\r\n")]
    #[case::blank_lines("\n3 4\n\n4 3\n   \n2 5\n1 3\n3 9\n3 3\n\n")]
    #[case::padded("  3 4  \n4 3\n2 5\n1 3\n3 9\n3 3")]
    #[case::byte_order_mark("\u{FEFF}3 4\n4 3\n2 5\n1 3\n3 9\n3 3")]
    fn test_parse_layouts(#[case] input: &str) -> miette::Result<()> {
        assert_eq!(parse(EXAMPLE)?, parse(input)?);
        Ok(())
    }

    #[test]
    fn test_parse_signed() -> miette::Result<()> {
        let lists = parse("-3 +4\n0 -0")?;
        assert_eq!(vec![-3, 0], lists.list1);
        assert_eq!(vec![4, 0], lists.list2);
        Ok(())
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace_only(" \n\t\n  \r\n")]
    fn test_parse_empty(#[case] input: &str) {
        assert_eq!(ValidationError::EmptyInput, parse(input).unwrap_err());
    }

    #[rstest]
    #[case::words("not a valid format\ninvalid data", 1, "expected 2 columns, found 4")]
    #[case::one_column("1 2\n3", 2, "expected 2 columns, found 1")]
    #[case::three_columns("1 2 3", 1, "expected 2 columns, found 3")]
    #[case::decimal("1.5 2", 1, "`1.5` is not a whole number")]
    #[case::thousands("1,000 2", 1, "`1,000` is not a whole number")]
    #[case::comma_separated("1,2", 1, "expected 2 columns, found 1")]
    #[case::overflow("1 99999999999999999999", 1, "`99999999999999999999` is out of range")]
    #[case::unsafe_integer(
        "9007199254740992 1",
        1,
        "`9007199254740992` is outside the safe integer range"
    )]
    #[case::inner_byte_order_mark("3 4\n\u{FEFF}4 3", 2, "`\u{FEFF}4` is not a whole number")]
    #[case::late_line("1 2\n\n3 4\nx 5", 4, "`x` is not a whole number")]
    fn test_parse_malformed(
        #[case] input: &str,
        #[case] expected_line: usize,
        #[case] expected_reason: &str,
    ) {
        match parse(input).unwrap_err() {
            ValidationError::MalformedLine { line, reason, .. } => {
                assert_eq!(expected_line, line);
                assert_eq!(expected_reason, reason);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_max_safe_integer() -> miette::Result<()> {
        let lists = parse(&format!("{MAX_SAFE_INTEGER} -{MAX_SAFE_INTEGER}"))?;
        assert_eq!(vec![MAX_SAFE_INTEGER], lists.list1);
        assert_eq!(vec![-MAX_SAFE_INTEGER], lists.list2);
        Ok(())
    }

    #[test]
    fn test_parse_too_large() {
        let limits = ParseLimits::default().with_max_bytes(4);
        assert_eq!(
            ValidationError::FileTooLarge { size: 7, limit: 4 },
            parse_with_limits("1 2\n3 4", &limits).unwrap_err()
        );
    }

    #[test_log::test]
    fn test_preview_stops_early() -> miette::Result<()> {
        // the malformed tail is never inspected
        let lists = preview("1 2\n\n3 4\n5 6\nbroken", 2)?;
        assert_eq!(vec![1, 3], lists.list1);
        assert_eq!(vec![2, 4], lists.list2);
        Ok(())
    }

    #[test]
    fn test_preview_rejects_zero_lines() {
        assert_eq!("INVALID_FORMAT", preview("1 2\n3 4", 0).unwrap_err().kind().code());
    }

    #[test]
    fn test_default_limits() {
        let limits = ParseLimits::default();
        assert_eq!(10 * 1024 * 1024, limits.max_bytes);
        assert_eq!(None, limits.max_lines);
    }
}
