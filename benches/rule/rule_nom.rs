use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::space0,
    combinator::rest,
    sequence::{delimited, tuple},
    IResult,
};

/// `{name} = value` or `[name] = value`
pub fn nom_parser(s: &str) -> IResult<&str, (&str, &str)> {
    let (s, _) = space0(s)?;
    let (s, name) = alt((
        delimited(tag("["), is_not("]"), tag("]")),
        delimited(tag("{"), is_not("}"), tag("}")),
    ))(s)?;
    let (s, _) = tuple((space0, tag("="), space0))(s)?;
    let (s, value) = rest(s)?;
    Ok((s, (name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nom_parser() {
        let (_, (name, value)) = nom_parser(crate::INPUT).unwrap();
        assert_eq!(name, "NameHere");
        assert_eq!(value, "some longer VALUE with spaces");
    }
}
