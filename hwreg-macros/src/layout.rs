use std::collections::HashSet;

use syn::spanned::Spanned;
use syn::{Error, Ident, Result, Type, TypePath};

use crate::ast::{AccessorType, Field, FieldName, Subfields};
use crate::types::ValueType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Field,
    Bit,
    RsvdzField,
    RsvdzBit,
    Subfield,
    Subbit,
}

impl FieldKind {
    fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "field" => Ok(Self::Field),
            "bit" => Ok(Self::Bit),
            "rsvdz_field" => Ok(Self::RsvdzField),
            "rsvdz_bit" => Ok(Self::RsvdzBit),
            "subfield" => Ok(Self::Subfield),
            "subbit" => Ok(Self::Subbit),
            x => Err(Error::new(
                ident.span(),
                format!(
                    "unknown field kind `{x}`; expected one of `field`, `bit`, `rsvdz_field`, \
                        `rsvdz_bit`, `subfield`, `subbit`",
                ),
            )),
        }
    }

    pub fn is_single_bit(self) -> bool {
        matches!(self, Self::Bit | Self::RsvdzBit | Self::Subbit)
    }

    pub fn is_reserved(self) -> bool {
        matches!(self, Self::RsvdzField | Self::RsvdzBit)
    }

    pub fn is_subfield(self) -> bool {
        matches!(self, Self::Subfield | Self::Subbit)
    }

    fn arity(self) -> usize {
        if self.is_single_bit() {
            1
        } else {
            2
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Bit => "bit",
            Self::RsvdzField => "rsvdz_field",
            Self::RsvdzBit => "rsvdz_bit",
            Self::Subfield => "subfield",
            Self::Subbit => "subbit",
        }
    }
}

/// An inclusive bit range, as written in the declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bits {
    pub high: u32,
    pub low: u32,
}

impl Bits {
    pub fn width(self) -> u32 {
        self.high - self.low + 1
    }

    pub fn overlaps(self, other: Bits) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

pub struct ValueField<'a> {
    pub field: &'a Field,
    pub name: &'a Ident,
    pub kind: FieldKind,
    pub bits: Bits,
    pub as_bool: bool,
    pub subfields: Vec<ValueField<'a>>,
}

pub struct ReservedField<'a> {
    pub field: &'a Field,
    pub kind: FieldKind,
    pub bits: Bits,
}

pub struct Layout<'a> {
    pub value_fields: Vec<ValueField<'a>>,
    pub reserved: Vec<ReservedField<'a>>,
}

/// Validates a register's field table against its value type.
///
/// Every check that the declaration can fail lives here so that errors point at the offending
/// tokens instead of surfacing as const evaluation failures in generated code.
pub fn lay_out<'a>(
    value_type: ValueType,
    has_addr: bool,
    fields: impl IntoIterator<Item = &'a Field>,
) -> Result<Layout<'a>> {
    let mut value_fields = Vec::new();
    let mut reserved = Vec::new();

    for field in fields {
        let kind = FieldKind::from_ident(&field.spec.keyword)?;
        if kind.is_subfield() {
            return Err(Error::new(
                field.spec.span(),
                format!(
                    "`{}` may only appear inside the braces of a multi-bit field",
                    kind.keyword(),
                ),
            ));
        }
        let bits = parse_bits(field, kind)?;
        check_range(field, kind, bits, value_type.width(), &format!("`{value_type}`"))?;

        if kind.is_reserved() {
            if let FieldName::Ident(ident) = &field.name {
                return Err(Error::new(
                    ident.span(),
                    format!(
                        "reserved-zero ranges have no accessors; write `_: {}(..)`",
                        kind.keyword(),
                    ),
                ));
            }
            if let Some(span) = field.accessor_type.span() {
                return Err(Error::new(span, "reserved-zero ranges have no accessor type"));
            }
            if let Some(subfields) = &field.subfields {
                return Err(Error::new(
                    subfields.brace_token.span.open(),
                    "reserved-zero ranges cannot declare subfields",
                ));
            }
            reserved.push(ReservedField { field, kind, bits });
        } else {
            let name = require_name(field)?;
            let as_bool = check_accessor_type(field, kind)?;
            let subfields = match &field.subfields {
                None => Vec::new(),
                Some(subfields) if kind == FieldKind::Field => {
                    lay_out_subfields(name, bits, subfields)?
                }
                Some(subfields) => {
                    return Err(Error::new(
                        subfields.brace_token.span.open(),
                        "only multi-bit fields can declare subfields",
                    ))
                }
            };
            value_fields.push(ValueField {
                field,
                name,
                kind,
                bits,
                as_bool,
                subfields,
            });
        }
    }

    // Reserved-zero bits are cleared on every write, so a value field sharing them could never
    // be written.
    for reserved_field in &reserved {
        for value_field in &value_fields {
            if reserved_field.bits.overlaps(value_field.bits) {
                return Err(Error::new(
                    reserved_field.field.spec.span(),
                    format!(
                        "reserved-zero bits {}:{} overlap field `{}` (bits {}:{})",
                        reserved_field.bits.high,
                        reserved_field.bits.low,
                        value_field.name,
                        value_field.bits.high,
                        value_field.bits.low,
                    ),
                ));
            }
        }
    }

    check_method_names(has_addr, &value_fields)?;

    Ok(Layout {
        value_fields,
        reserved,
    })
}

fn lay_out_subfields<'a>(
    parent_name: &Ident,
    parent_bits: Bits,
    subfields: &'a Subfields,
) -> Result<Vec<ValueField<'a>>> {
    let mut result = Vec::new();
    for field in &subfields.fields {
        let kind = FieldKind::from_ident(&field.spec.keyword)?;
        if !kind.is_subfield() {
            return Err(Error::new(
                field.spec.span(),
                format!("fields inside `{parent_name}` must be declared with `subfield` or `subbit`"),
            ));
        }
        if let Some(nested) = &field.subfields {
            return Err(Error::new(
                nested.brace_token.span.open(),
                "subfields cannot declare further subfields",
            ));
        }
        let name = require_name(field)?;
        let bits = parse_bits(field, kind)?;
        check_range(
            field,
            kind,
            bits,
            parent_bits.width(),
            &format!("field `{parent_name}` ({} bits)", parent_bits.width()),
        )?;
        let as_bool = check_accessor_type(field, kind)?;
        result.push(ValueField {
            field,
            name,
            kind,
            bits,
            as_bool,
            subfields: Vec::new(),
        });
    }
    Ok(result)
}

fn parse_bits(field: &Field, kind: FieldKind) -> Result<Bits> {
    let bits = field
        .spec
        .bits
        .iter()
        .map(|lit| lit.base10_parse::<u32>())
        .collect::<Result<Vec<_>>>()?;
    match (kind.arity(), bits.as_slice()) {
        (1, &[bit]) => Ok(Bits {
            high: bit,
            low: bit,
        }),
        (2, &[high, low]) => Ok(Bits { high, low }),
        (1, _) => Err(Error::new(
            field.spec.span(),
            format!("`{}` takes one bit index", kind.keyword()),
        )),
        _ => Err(Error::new(
            field.spec.span(),
            format!(
                "`{}` takes an upper and a lower bit index, both inclusive",
                kind.keyword(),
            ),
        )),
    }
}

fn check_range(
    field: &Field,
    kind: FieldKind,
    bits: Bits,
    container_width: u32,
    container: &str,
) -> Result<()> {
    let high_span = field
        .spec
        .bits
        .first()
        .map_or_else(|| field.spec.span(), |lit| lit.span());
    if !kind.is_single_bit() && bits.high <= bits.low {
        let single = if kind.is_subfield() {
            "subbit"
        } else if kind.is_reserved() {
            "rsvdz_bit"
        } else {
            "bit"
        };
        return Err(Error::new(
            high_span,
            format!("upper bit goes before lower bit; use `{single}(..)` for a single bit"),
        ));
    }
    if bits.high >= container_width {
        return Err(Error::new(
            high_span,
            format!("bit {} is out of range for {container}", bits.high),
        ));
    }
    Ok(())
}

fn require_name(field: &Field) -> Result<&Ident> {
    match &field.name {
        FieldName::Ident(ident) => Ok(ident),
        FieldName::Placeholder(underscore) => Err(Error::new(
            underscore.span(),
            "value fields must be named; only reserved-zero ranges may use `_`",
        )),
    }
}

fn check_accessor_type(field: &Field, kind: FieldKind) -> Result<bool> {
    match &field.accessor_type {
        AccessorType::Default => Ok(false),
        AccessorType::Overridden { type_, .. } => {
            if !is_bool(type_) {
                return Err(Error::new(
                    type_.span(),
                    "the only supported accessor type override is `as bool`",
                ));
            }
            if !kind.is_single_bit() {
                return Err(Error::new(
                    type_.span(),
                    "`as bool` requires a single-bit field",
                ));
            }
            Ok(true)
        }
    }
}

fn is_bool(type_: &Type) -> bool {
    matches!(type_, Type::Path(TypePath { qself: None, path }) if path.is_ident("bool"))
}

/// Methods every register gets from the `Register` trait. An inherent method of the same name
/// would take precedence at call sites.
const REGISTER_METHODS: &[&str] = &[
    "new",
    "from_base",
    "base",
    "base_mut",
    "reg_addr",
    "set_reg_addr",
    "reg_value",
    "set_reg_value",
    "reg_value_mut",
    "rsvdz_mask",
    "read_from",
    "write_to",
];

/// Rejects declarations whose generated methods would collide with each other or with the
/// methods of `Register`.
fn check_method_names(has_addr: bool, value_fields: &[ValueField]) -> Result<()> {
    let mut taken = HashSet::new();
    if has_addr {
        taken.insert("get".to_string());
    }
    let all_fields = value_fields
        .iter()
        .flat_map(|field| std::iter::once(field).chain(field.subfields.iter()));
    for field in all_fields {
        for method in method_names(field) {
            if REGISTER_METHODS.contains(&method.as_str()) {
                return Err(Error::new(
                    field.name.span(),
                    format!(
                        "field `{}` generates a method `{method}` that would shadow \
                            `Register::{method}`",
                        field.name,
                    ),
                ));
            }
            if !taken.insert(method.clone()) {
                return Err(Error::new(
                    field.name.span(),
                    format!(
                        "field `{}` generates a method `{method}` that is already defined",
                        field.name,
                    ),
                ));
            }
        }
    }
    Ok(())
}

pub fn method_names(field: &ValueField) -> Vec<String> {
    let name = field.name.to_string();
    let mut names = vec![
        name.clone(),
        format!("set_{name}"),
        format!("with_{name}"),
    ];
    if !field.as_bool {
        names.push(format!("try_set_{name}"));
    }
    names
}
