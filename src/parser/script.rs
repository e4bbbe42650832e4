// Pipeline parser for interaction scripts
//
// Format: step | step | ...
//   hover(N)  leave(N)  click(N)  clear()  wait(MS)

use super::ast::Step;
use super::lexer::{index_literal, number_literal, ws};
use crate::interaction::Interaction;
use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{eof, map, opt, verify},
    multi::separated_list0,
    sequence::{delimited, preceded},
    IResult,
};

fn parse_indexed<'a>(
    name: &'static str,
    build: fn(usize) -> Interaction,
) -> impl FnMut(&'a str) -> IResult<&'a str, Step> {
    map(
        preceded(ws(tag(name)), delimited(ws(char('(')), ws(index_literal), ws(char(')')))),
        move |idx| Step::Event(build(idx)),
    )
}

fn parse_clear(input: &str) -> IResult<&str, Step> {
    let (input, _) = ws(tag("clear"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, _) = ws(char(')'))(input)?;
    Ok((input, Step::Event(Interaction::ClickBackground)))
}

fn parse_wait(input: &str) -> IResult<&str, Step> {
    let (input, _) = ws(tag("wait"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, ms) = ws(verify(number_literal, |ms: &f64| ms.is_finite() && *ms >= 0.0))(input)?;
    let (input, _) = ws(char(')'))(input)?;
    Ok((input, Step::Wait(ms)))
}

fn parse_step(input: &str) -> IResult<&str, Step> {
    alt((
        parse_indexed("hover", Interaction::HoverEnter),
        parse_indexed("leave", Interaction::HoverExit),
        parse_indexed("click", Interaction::Click),
        parse_clear,
        parse_wait,
    ))(input)
}

/// Parse a complete script; an empty script yields no steps
pub fn parse_script(input: &str) -> IResult<&str, Vec<Step>> {
    // If input starts with "|", consume it
    let (input, _) = opt(ws(tag("|")))(input)?;

    let (input, steps) = separated_list0(ws(tag("|")), parse_step)(input)?;

    // Consume trailing whitespace and ensure end of input
    let (input, _) = ws(eof)(input)?;

    Ok((input, steps))
}

/// Parse a script, turning nom's error into a readable one
pub fn parse_steps(input: &str) -> Result<Vec<Step>> {
    parse_script(input)
        .map(|(_, steps)| steps)
        .map_err(|e| anyhow!("Parse error: {}", e))
}
