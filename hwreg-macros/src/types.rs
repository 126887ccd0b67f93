use std::fmt::{self, Display, Formatter};

use proc_macro2::{Ident, Span};
use syn::{Error, Result};

/// The unsigned integer type backing a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    U8,
    U16,
    U32,
    U64,
}

impl ValueType {
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "u8" => Ok(Self::U8),
            "u16" => Ok(Self::U16),
            "u32" => Ok(Self::U32),
            "u64" => Ok(Self::U64),
            x => Err(Error::new(
                ident.span(),
                format!("unsupported register value type `{x}`; expected u8, u16, u32, or u64"),
            )),
        }
    }

    pub fn width(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
            Self::U64 => 64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }

    pub fn to_ident(self, span: Span) -> Ident {
        Ident::new(self.as_str(), span)
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_types() {
        for (name, width) in [("u8", 8), ("u16", 16), ("u32", 32), ("u64", 64)] {
            let ident = Ident::new(name, Span::call_site());
            let value_type = ValueType::from_ident(&ident).unwrap();
            assert_eq!(value_type.width(), width);
            assert_eq!(value_type.to_string(), name);
        }
    }

    #[test]
    fn unsupported_types() {
        for name in ["u128", "i32", "usize", "U5"] {
            let ident = Ident::new(name, Span::call_site());
            assert!(ValueType::from_ident(&ident).is_err());
        }
    }
}
