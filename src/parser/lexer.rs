// Lexical helpers shared by the script parsers

use nom::{
    character::complete::{digit1, multispace0},
    combinator::map_res,
    number::complete::double,
    sequence::delimited,
    IResult,
};

/// Wrap a parser so it tolerates surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// A non-negative integer, e.g. a record index
pub fn index_literal(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// A decimal number such as `120` or `12.5`
pub fn number_literal(input: &str) -> IResult<&str, f64> {
    double(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_literal() {
        assert_eq!(index_literal("42)"), Ok((")", 42)));
        assert!(index_literal("-1").is_err());
    }

    #[test]
    fn test_number_literal() {
        assert_eq!(number_literal("12.5 "), Ok((" ", 12.5)));
        assert_eq!(number_literal("700"), Ok(("", 700.0)));
    }

    #[test]
    fn test_ws() {
        let mut p = ws(index_literal);
        assert_eq!(p("  7  |"), Ok(("|", 7)));
    }
}
