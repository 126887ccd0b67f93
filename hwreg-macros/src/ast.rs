use proc_macro2::Span;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    braced, parenthesized, token, Attribute, Ident, LitInt, Path, Result, Token, Type, Visibility,
};

pub struct Input {
    _paren_token: token::Paren,
    pub crate_path: Path,
    _comma_token: Token![,],
    pub structs: Vec<Struct>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> Result<Self> {
        let content;
        Ok(Input {
            _paren_token: parenthesized!(content in input),
            crate_path: content.parse()?,
            _comma_token: content.parse()?,
            structs: {
                let mut structs = Vec::new();
                while !content.is_empty() {
                    structs.push(content.parse()?);
                }
                structs
            },
        })
    }
}

pub struct Struct {
    pub attrs: Vec<Attribute>,
    pub visibility: Visibility,
    _struct_token: Token![struct],
    pub name: Ident,
    _colon_token: Token![:],
    pub value_type: Ident,
    pub addr: Option<StructAddr>,
    _brace_token: token::Brace,
    pub fields: Punctuated<Field, Token![,]>,
}

impl Parse for Struct {
    fn parse(input: ParseStream) -> Result<Self> {
        let body;
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            visibility: Visibility::parse(input)?,
            _struct_token: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            value_type: input.parse()?,
            addr: if input.peek(Token![@]) {
                Some(input.parse()?)
            } else {
                None
            },
            _brace_token: braced!(body in input),
            fields: body.parse_terminated(Field::parse, Token![,])?,
        })
    }
}

/// The optional `@ 0x1234` suffix binding a register to a fixed address.
pub struct StructAddr {
    _at_token: Token![@],
    pub addr: LitInt,
}

impl Parse for StructAddr {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            _at_token: input.parse()?,
            addr: input.parse()?,
        })
    }
}

pub struct Field {
    pub attrs: Vec<Attribute>,
    pub visibility: Visibility,
    pub name: FieldName,
    _colon_token: Token![:],
    pub spec: FieldSpec,
    pub accessor_type: AccessorType,
    pub subfields: Option<Subfields>,
}

impl Field {
    pub fn name_to_string(&self) -> String {
        match &self.name {
            FieldName::Ident(ident) => ident.to_string(),
            FieldName::Placeholder(_) => "_".to_string(),
        }
    }

    pub fn name_span(&self) -> Span {
        match &self.name {
            FieldName::Ident(ident) => ident.span(),
            FieldName::Placeholder(underscore) => underscore.span(),
        }
    }
}

impl Parse for Field {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            visibility: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            spec: input.parse()?,
            accessor_type: input.parse()?,
            subfields: if input.peek(token::Brace) {
                Some(input.parse()?)
            } else {
                None
            },
        })
    }
}

pub enum FieldName {
    Ident(Ident),
    Placeholder(Token![_]),
}

impl Parse for FieldName {
    fn parse(input: ParseStream) -> Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(Ident) {
            input.parse().map(Self::Ident)
        } else if lookahead.peek(Token![_]) {
            input.parse().map(Self::Placeholder)
        } else {
            Err(lookahead.error())
        }
    }
}

/// A field kind keyword applied to its bit indices, like `field(24, 20)` or `bit(31)`.
pub struct FieldSpec {
    pub keyword: Ident,
    _paren_token: token::Paren,
    pub bits: Punctuated<LitInt, Token![,]>,
}

impl FieldSpec {
    pub fn span(&self) -> Span {
        self.keyword.span()
    }
}

impl Parse for FieldSpec {
    fn parse(input: ParseStream) -> Result<Self> {
        let content;
        Ok(Self {
            keyword: input.parse()?,
            _paren_token: parenthesized!(content in input),
            bits: content.parse_terminated(|input| input.parse::<LitInt>(), Token![,])?,
        })
    }
}

#[derive(Clone)]
pub enum AccessorType {
    Overridden { _as_token: Token![as], type_: Type },
    Default,
}

impl AccessorType {
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Overridden { type_, .. } => Some(type_.span()),
            Self::Default => None,
        }
    }
}

impl Parse for AccessorType {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(Token![as]) {
            Ok(AccessorType::Overridden {
                _as_token: input.parse()?,
                type_: input.parse()?,
            })
        } else {
            Ok(AccessorType::Default)
        }
    }
}

pub struct Subfields {
    pub brace_token: token::Brace,
    pub fields: Punctuated<Field, Token![,]>,
}

impl Parse for Subfields {
    fn parse(input: ParseStream) -> Result<Self> {
        let body;
        Ok(Self {
            brace_token: braced!(body in input),
            fields: body.parse_terminated(Field::parse, Token![,])?,
        })
    }
}
