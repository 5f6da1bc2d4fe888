use strum::{Display, EnumString};

/// Register names that may appear in an operand.
/// `A` selects accumulator mode, `X`/`Y` select indexed modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum Reg {
    A,
    X,
    Y,
}

impl Reg {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(r) => Ok(r),
            Err(_) => Err(format!("Unknown reg name: {s}")),
        }
    }
}

#[test]
fn test() {
    assert_eq!(Reg::parse("x"), Ok(Reg::X));
    assert_eq!(Reg::parse("A"), Ok(Reg::A));
    assert!(Reg::parse("z").is_err());
    assert_eq!(Reg::Y.to_string(), "Y");
}
