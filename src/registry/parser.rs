// ============================================================================
// Unit String Parser
// Recursive-descent parser for generic unit expressions
// ============================================================================
//
// Grammar:
//   expr    := product ('/' product)*
//   product := factor (( ws | '*' | '.' | '·' ) factor)*
//   factor  := base power?
//   base    := number | identifier | '(' expr ')'
//   power   := attached-int | '(' rational ')' | ('**' | '^') exponent
//
// Identifiers never contain digits, so `m2` is meter squared and `s-1`
// is per second.

use super::units::unit_registry;
use crate::domain::{Unit, UnitError, UnitResult};
use crate::numeric::Rational;

/// Parse a unit expression (`"km / s"`, `"kg m-3"`, `"J / (kg K)"`).
///
/// The empty string is the dimensionless unit.
pub fn parse_unit(input: &str) -> UnitResult<Unit> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    if parser.at_end() {
        return Ok(Unit::dimensionless());
    }
    let unit = parser.parse_expr()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error(format!("unexpected '{}'", parser.rest())));
    }
    Ok(unit)
}

/// Resolve one registered symbol, name or alias.
pub fn lookup_symbol(symbol: &str) -> UnitResult<Unit> {
    if symbol == "dimensionless" || symbol == "one" {
        return Ok(Unit::dimensionless());
    }
    unit_registry()
        .get(symbol)
        .map(|u| Unit::from_named(u.clone()))
        .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))
}

fn is_ident_char(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '%' || c == '°'
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> UnitError {
        UnitError::invalid_unit_string(self.input, reason)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn rest(&self) -> String {
        self.chars[self.pos..].iter().collect()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char) -> UnitResult<()> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", c)))
        }
    }

    // ========================================================================
    // Grammar
    // ========================================================================

    fn parse_expr(&mut self) -> UnitResult<Unit> {
        let mut unit = self.parse_product()?;
        loop {
            self.skip_ws();
            if self.peek() == Some('/') {
                self.pos += 1;
                let denominator = self.parse_product()?;
                unit = unit.checked_div(&denominator)?;
            } else {
                return Ok(unit);
            }
        }
    }

    fn starts_factor(&self) -> bool {
        match self.peek() {
            Some(c) if is_ident_char(c) => true,
            Some(c) if c.is_ascii_digit() => true,
            Some('(') => true,
            _ => false,
        }
    }

    fn parse_product(&mut self) -> UnitResult<Unit> {
        let mut unit = self.parse_factor()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('*') if self.peek_at(1) != Some('*') => {
                    self.pos += 1;
                    let rhs = self.parse_factor()?;
                    unit = unit.checked_mul(&rhs)?;
                },
                Some('·') => {
                    self.pos += 1;
                    let rhs = self.parse_factor()?;
                    unit = unit.checked_mul(&rhs)?;
                },
                Some('.') if self.peek_at(1).is_some_and(is_ident_char) => {
                    self.pos += 1;
                    let rhs = self.parse_factor()?;
                    unit = unit.checked_mul(&rhs)?;
                },
                _ if self.starts_factor() => {
                    let rhs = self.parse_factor()?;
                    unit = unit.checked_mul(&rhs)?;
                },
                _ => return Ok(unit),
            }
        }
    }

    fn parse_factor(&mut self) -> UnitResult<Unit> {
        self.skip_ws();
        let base = match self.peek() {
            Some('(') => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                self.skip_ws();
                self.expect(')')?;
                inner
            },
            Some(c) if c.is_ascii_digit() || c == '.' => Unit::scaled(self.parse_number()?),
            Some(c) if is_ident_char(c) => {
                let symbol = self.parse_ident();
                let unit = lookup_symbol(&symbol)?;
                match self.parse_attached_power()? {
                    Some(power) => unit.checked_pow(power)?,
                    None => unit,
                }
            },
            Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
            None => return Err(self.error("unexpected end of input")),
        };

        let save = self.pos;
        self.skip_ws();
        let explicit = if self.peek() == Some('*') && self.peek_at(1) == Some('*') {
            self.pos += 2;
            true
        } else if self.peek() == Some('^') {
            self.pos += 1;
            true
        } else {
            false
        };
        if !explicit {
            self.pos = save;
            return Ok(base);
        }

        let power = self.parse_exponent()?;
        Ok(base.checked_pow(power)?)
    }

    // ========================================================================
    // Lexical Pieces
    // ========================================================================

    fn parse_ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn parse_number(&mut self) -> UnitResult<f64> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            self.pos += 1;
        }
        // Scientific notation: 1e-3, 2.5E6
        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign = matches!(self.peek_at(1), Some('-') | Some('+'));
            let digit_at = if sign { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digit_at;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map_err(|_| self.error(format!("invalid number '{}'", text)))
    }

    /// Signed integer written directly after a symbol (`m2`, `s-1`), or a
    /// parenthesised rational (`m(1/2)`, `m(-3/2)`).
    fn parse_attached_power(&mut self) -> UnitResult<Option<Rational>> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => Ok(Some(self.parse_signed_int()?)),
            Some('-') | Some('+') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                Ok(Some(self.parse_signed_int()?))
            },
            Some('(') if self.looks_like_rational_group() => {
                self.pos += 1;
                let power = self.parse_rational_until(')')?;
                Ok(Some(power))
            },
            _ => Ok(None),
        }
    }

    fn looks_like_rational_group(&self) -> bool {
        let mut i = self.pos + 1;
        let mut saw_digit = false;
        while let Some(c) = self.chars.get(i) {
            match c {
                ')' => return saw_digit,
                '0'..='9' => saw_digit = true,
                '-' | '+' | '/' | '.' | ' ' => {},
                _ => return false,
            }
            i += 1;
        }
        false
    }

    fn parse_signed_int(&mut self) -> UnitResult<Rational> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<Rational>()
            .map_err(|_| self.error(format!("invalid power '{}'", text)))
    }

    fn parse_rational_until(&mut self, close: char) -> UnitResult<Rational> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != close) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        self.expect(close)?;
        text.parse::<Rational>()
            .map_err(|_| self.error(format!("invalid power '{}'", text)))
    }

    fn parse_exponent(&mut self) -> UnitResult<Rational> {
        self.skip_ws();
        if self.peek() == Some('(') {
            self.pos += 1;
            return self.parse_rational_until(')');
        }
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if text.is_empty() || text == "-" || text == "+" {
            return Err(self.error("missing exponent"));
        }
        text.parse::<Rational>()
            .map_err(|_| self.error(format!("invalid power '{}'", text)))
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_unit(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BaseDimension, Dimension};
    use crate::numeric::NumericError;

    #[test]
    fn test_simple_and_composite() {
        assert_eq!(parse_unit("km / s").unwrap().to_string(), "km / s");
        assert_eq!(parse_unit("kg m-3").unwrap().to_string(), "kg / m3");
        assert_eq!(parse_unit("m**2/s").unwrap().to_string(), "m2 / s");
        assert_eq!(parse_unit("m^2 / s").unwrap().to_string(), "m2 / s");
        assert_eq!(parse_unit("J / (kg K)").unwrap().to_string(), "J / (kg K)");
        assert_eq!(parse_unit("W / m2 / Hz").unwrap().to_string(), "W / (m2 Hz)");
        assert_eq!(parse_unit("N*m").unwrap().to_string(), "N m");
        assert_eq!(parse_unit("N·m").unwrap().to_string(), "N m");
        assert_eq!(parse_unit("N.m").unwrap().to_string(), "N m");
    }

    #[test]
    fn test_rational_powers() {
        let root = parse_unit("m(1/2)").unwrap();
        assert_eq!(root.to_string(), "m(1/2)");
        assert_eq!(root.powi(2), parse_unit("m").unwrap());
        assert_eq!(parse_unit("m**(3/2)").unwrap().to_string(), "m(3/2)");
        assert_eq!(parse_unit("m**0.5").unwrap().to_string(), "m(1/2)");
        assert_eq!(parse_unit("s(-1/2)").unwrap().to_string(), "1 / s(1/2)");
    }

    #[test]
    fn test_numbers_are_scale_factors() {
        let per_second = parse_unit("1 / s").unwrap();
        assert_eq!(per_second.to_string(), "1 / s");
        assert_eq!(per_second.dimension(), Dimension::FREQUENCY);

        let scaled = parse_unit("1000 m").unwrap();
        assert_eq!(scaled.to_string(), "1000 m");
        assert_eq!(scaled, parse_unit("km").unwrap());

        let tiny = parse_unit("1e-3 g").unwrap();
        assert!((tiny.si_scale() - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_group_is_not_power() {
        // "(kg K)" after a space is a group, not an exponent
        let unit = parse_unit("J/(kg K)").unwrap();
        assert_eq!(unit.to_string(), "J / (kg K)");
    }

    #[test]
    fn test_aliases_and_special_symbols() {
        assert_eq!(parse_unit("µm").unwrap(), parse_unit("um").unwrap());
        assert_eq!(parse_unit("%").unwrap(), parse_unit("percent").unwrap());
        assert!(parse_unit("Å").unwrap().is_compatible(&parse_unit("m").unwrap()));
        assert!(parse_unit("").unwrap().is_unity());
        assert!(parse_unit("dimensionless").unwrap().is_unity());
        assert!(parse_unit("kilometer").unwrap() == parse_unit("km").unwrap());
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        let overflow = UnitError::Numeric(NumericError::Overflow);
        assert_eq!(parse_unit("m2147483647 m").unwrap_err(), overflow);
        assert_eq!(parse_unit("m2147483647 km").unwrap_err(), overflow);
        assert_eq!(parse_unit("m2147483647 / m-1").unwrap_err(), overflow);
        assert_eq!(parse_unit("(m2147483647)**2").unwrap_err(), overflow);
        assert!(matches!(
            parse_unit("m-2147483648"),
            Err(UnitError::InvalidUnitString { .. })
        ));

        let huge = parse_unit("m2147483647").unwrap();
        assert_eq!(
            huge.dimension().exponent(BaseDimension::Length),
            Rational::from_integer(i32::MAX)
        );
        assert!(parse_unit("m2147483647 / m").is_ok());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_unit("furlong").unwrap_err(),
            UnitError::UnknownUnit("furlong".to_string())
        );
        assert!(matches!(
            parse_unit("m /"),
            Err(UnitError::InvalidUnitString { .. })
        ));
        assert!(matches!(
            parse_unit("(m s"),
            Err(UnitError::InvalidUnitString { .. })
        ));
        assert!(matches!(
            parse_unit("m ** x"),
            Err(UnitError::InvalidUnitString { .. })
        ));
        assert!(matches!(
            parse_unit("m )"),
            Err(UnitError::InvalidUnitString { .. })
        ));
    }
}
