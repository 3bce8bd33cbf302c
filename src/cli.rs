use std::ffi::OsString;

use crate::error::{BubblesError, Result};

/// Reads the circle count from `args` (program name first). The argument must
/// start with a digit; trailing garbage after the leading digits is ignored.
/// Arguments that are not valid UTF-8 are read lossily.
pub fn parse_circle_count<I>(args: I) -> Result<usize>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter().map(|arg| arg.to_string_lossy().into_owned());
    let program = args.next().unwrap_or_else(|| "bubbles".to_string());
    let usage = || BubblesError::Usage { program: program.clone() };

    let (Some(arg), None) = (args.next(), args.next()) else {
        return Err(usage());
    };

    if !arg.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(usage());
    }

    let count = arg
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0usize, |n, d| n.saturating_mul(10).saturating_add(d as usize));

    if count < 1 {
        return Err(usage());
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<usize> {
        parse_circle_count(args.iter().map(OsString::from))
    }

    #[test]
    fn accepts_positive_count() {
        assert_eq!(parse(&["bubbles", "3"]).unwrap(), 3);
        assert_eq!(parse(&["bubbles", "120"]).unwrap(), 120);
    }

    #[test]
    fn ignores_trailing_characters() {
        assert_eq!(parse(&["bubbles", "12abc"]).unwrap(), 12);
    }

    #[test]
    fn rejects_zero() {
        assert!(matches!(parse(&["bubbles", "0"]), Err(BubblesError::Usage { .. })));
        assert!(matches!(parse(&["bubbles", "000"]), Err(BubblesError::Usage { .. })));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(matches!(parse(&["bubbles", "abc"]), Err(BubblesError::Usage { .. })));
        assert!(matches!(parse(&["bubbles", "-4"]), Err(BubblesError::Usage { .. })));
        assert!(matches!(parse(&["bubbles", ""]), Err(BubblesError::Usage { .. })));
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(matches!(parse(&["bubbles"]), Err(BubblesError::Usage { .. })));
        assert!(matches!(parse(&["bubbles", "1", "2"]), Err(BubblesError::Usage { .. })));
    }

    #[test]
    fn usage_names_program() {
        let err = parse(&["./bubbles", "x"]).unwrap_err();
        assert_eq!(err.to_string(), "Usage: ./bubbles <number of circles>");
    }

    #[test]
    fn saturates_huge_counts() {
        assert_eq!(parse(&["bubbles", "99999999999999999999999"]).unwrap(), usize::MAX);
    }

    #[cfg(unix)]
    #[test]
    fn rejects_invalid_unicode() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![OsString::from("bubbles"), OsString::from_vec(vec![0xff])];
        assert!(matches!(parse_circle_count(args), Err(BubblesError::Usage { .. })));

        let args = vec![OsString::from("bubbles"), OsString::from_vec(vec![b'4', 0xff])];
        assert_eq!(parse_circle_count(args).unwrap(), 4);
    }
}
