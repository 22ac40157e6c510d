//! Move type tags and call targets.
//!
//! Variant order of [`TypeTag`] is the BCS enum order used on chain and must not change.

use paystream_types::{ObjectId, SuiAddress};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TransactionError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    pub address: SuiAddress,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    /// `0x2::sui::SUI`
    pub fn sui() -> Self {
        Self::Struct(Box::new(StructTag {
            address: paystream_types::SUI_FRAMEWORK_ADDRESS,
            module: "sui".into(),
            name: "SUI".into(),
            type_params: Vec::new(),
        }))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::U8 => f.write_str("u8"),
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
            Self::U64 => f.write_str("u64"),
            Self::U128 => f.write_str("u128"),
            Self::U256 => f.write_str("u256"),
            Self::Address => f.write_str("address"),
            Self::Signer => f.write_str("signer"),
            Self::Vector(inner) => write!(f, "vector<{inner}>"),
            Self::Struct(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if !self.type_params.is_empty() {
            f.write_str("<")?;
            for (i, p) in self.type_params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{p}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeTag {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input: s, rest: s };
        let tag = parser.type_tag()?;
        if !parser.rest.trim().is_empty() {
            return Err(parser.error("trailing characters"));
        }
        Ok(tag)
    }
}

struct Parser<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: &str) -> TransactionError {
        TransactionError::InvalidTypeTag {
            input: self.input.to_string(),
            reason: reason.to_string(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(r) => {
                self.rest = r;
                true
            }
            None => false,
        }
    }

    fn ident(&mut self) -> Result<&'a str, TransactionError> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.error("expected identifier"));
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(ident)
    }

    fn type_tag(&mut self) -> Result<TypeTag, TransactionError> {
        let word = self.ident()?;
        let tag = match word {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                if !self.eat("<") {
                    return Err(self.error("expected '<' after vector"));
                }
                let inner = self.type_tag()?;
                if !self.eat(">") {
                    return Err(self.error("expected '>'"));
                }
                TypeTag::Vector(Box::new(inner))
            }
            addr if addr.starts_with("0x") => {
                let address = SuiAddress::from_hex_literal(addr)
                    .map_err(|e| self.error(&e.to_string()))?;
                if !self.eat("::") {
                    return Err(self.error("expected '::' after address"));
                }
                let module = self.ident()?.to_string();
                if !self.eat("::") {
                    return Err(self.error("expected '::' after module"));
                }
                let name = self.ident()?.to_string();
                let mut type_params = Vec::new();
                if self.eat("<") {
                    loop {
                        type_params.push(self.type_tag()?);
                        if self.eat(">") {
                            break;
                        }
                        if !self.eat(",") {
                            return Err(self.error("expected ',' or '>'"));
                        }
                    }
                }
                TypeTag::Struct(Box::new(StructTag {
                    address,
                    module,
                    name,
                    type_params,
                }))
            }
            _ => return Err(self.error("unknown type")),
        };
        Ok(tag)
    }
}

/// A Move entry function: `package::module::function`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveTarget {
    pub package: ObjectId,
    pub module: &'static str,
    pub function: &'static str,
}

impl MoveTarget {
    pub const fn new(package: ObjectId, module: &'static str, function: &'static str) -> Self {
        Self {
            package,
            module,
            function,
        }
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}
