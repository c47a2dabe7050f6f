use std::cell::RefCell;

use crate::{flow::Switch, prelude::*};
use strum::VariantNames;
use strum_macros::{EnumString, EnumVariantNames};

// Example using strum crate.
//
// strum gives us
//   derive(EnumVariantNames) + trait strum::VariantNames => FancyColor::VARIANTS
//   derive(EnumString) + trait FromStr => FancyColor::from_str
// the grammar is built from VARIANTS, and into::parsed uses FromStr
//

#[derive(PartialEq, Eq, Debug, Default, EnumVariantNames, EnumString)]
pub enum FancyColor {
    #[default]
    Burgundy,
    Azure,
    Lime,
}

/// one literal per variant, tried in declaration order
pub fn variants() -> Switch<'static> {
    FancyColor::VARIANTS
        .iter()
        .fold(Switch::new(), |alts, &name| alts.or(literal(name)))
}

/// eg "Azure Arrow" - returns the color and the number of bytes it took up
pub fn parse_fancy_enum(s: &str) -> Result<(FancyColor, usize), DiagnosticError> {
    let color = RefCell::new(FancyColor::default());
    let mut plate = BytePlate::from(s);
    Rule::new()
        .named("FancyColor")
        .then(take(into::parsed(&color), variants()))
        .eat(&Context::background(), &mut plate)?;
    Ok((color.into_inner(), plate.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_enum() -> Result<(), DiagnosticError> {
        let (color, len) = parse_fancy_enum("Burgundy Arrow")?;
        assert_eq!(color, FancyColor::Burgundy);
        assert_eq!(len, 8);
        assert_eq!(parse_fancy_enum("Lime")?.0, FancyColor::Lime);

        let e = parse_fancy_enum("Azur").unwrap_err();
        assert_eq!(e.breadcrumbs.last().map(|c| c.name), Some("FancyColor"));
        assert!(e.to_string().contains("Switch[2]"));
        Ok(())
    }
}
