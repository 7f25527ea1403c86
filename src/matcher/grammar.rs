use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, recognize},
    error::{Error, ErrorKind},
    multi::separated_list1,
    sequence::{pair, tuple},
    Err as NomErr, IResult, Parser as NomParser,
};

pub const THEME_KEYWORD: &str = "theme";
pub const PROPS_KEYWORD: &str = "props";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowParam<'a> {
    /// `({ ... })` with the raw text between the braces.
    Destructured(&'a str),
    /// `(name)`
    Ident(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeBinding {
    /// `theme` is bound under its own name.
    Bound,
    /// `theme: other` rebinds it, so a later `theme.` is something else.
    Renamed,
    Absent,
}

pub fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|ch: char| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')(input)
}

/// `IDENT ("." IDENT)*` with an optional trailing dot; may be empty.
pub fn path(input: &str) -> IResult<&str, &str> {
    recognize(opt(pair(separated_list1(char('.'), ident), opt(char('.'))))).parse(input)
}

/// `theme.` followed by a possibly partial path.
pub fn theme_access(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag(THEME_KEYWORD)(input)?;
    let (input, _) = char('.')(input)?;
    path(input)
}

/// `{ ... }` with nested braces balanced; yields the text between the
/// outermost pair.
pub fn braced(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(NomErr::Error(Error::new(input, ErrorKind::Char)));
    }
    let mut depth = 0usize;
    for (idx, ch) in input.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[idx + 1..], &input[1..idx]));
                }
            }
            _ => {}
        }
    }
    Err(NomErr::Error(Error::new(input, ErrorKind::TakeUntil)))
}

/// `( param ) =>` with surrounding whitespace, consuming up to the arrow body.
pub fn arrow_head(input: &str) -> IResult<&str, ArrowParam<'_>> {
    let destructured = map(braced, ArrowParam::Destructured);
    let named = map(ident, ArrowParam::Ident);
    let (input, (_, _, param, _, _, _, _, _)) = tuple((
        char('('),
        multispace0,
        alt((destructured, named)),
        multispace0,
        char(')'),
        multispace0,
        tag("=>"),
        multispace0,
    ))
    .parse(input)?;
    Ok((input, param))
}

/// Tagged-template or factory call that introduces styled CSS:
/// `styled.div`, `styled(Button)`, and the `css`, `keyframes` and
/// `createGlobalStyle` helpers used as a tag (``css` ``) or called (`css(`).
pub fn styled_tag(input: &str) -> IResult<&str, &str> {
    let factory = recognize(pair(
        tag("styled"),
        alt((recognize(pair(char('.'), ident)), tag("("))),
    ));
    let helper = recognize(pair(
        alt((tag("css"), tag("keyframes"), tag("createGlobalStyle"))),
        alt((char('`'), char('('))),
    ));
    alt((factory, helper)).parse(input)
}

/// Splits a destructure pattern on commas that are not nested inside
/// braces, brackets or parentheses.
fn top_level_entries(pattern: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in pattern.char_indices() {
        match ch {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&pattern[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    entries.push(&pattern[start..]);
    entries
}

pub fn theme_binding(pattern: &str) -> ThemeBinding {
    for entry in top_level_entries(pattern) {
        let entry = entry.trim();
        let entry = entry.split('=').next().unwrap_or(entry).trim();
        let (name, alias) = match entry.split_once(':') {
            Some((name, alias)) => (name.trim(), Some(alias.trim())),
            None => (entry, None),
        };
        if name != THEME_KEYWORD {
            continue;
        }
        return match alias {
            None => ThemeBinding::Bound,
            Some(alias) if alias == THEME_KEYWORD => ThemeBinding::Bound,
            Some(_) => ThemeBinding::Renamed,
        };
    }
    ThemeBinding::Absent
}
