use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{Ident, Path, Result};

use crate::ast::{self, Input};
use crate::layout::{lay_out, Bits, FieldKind, ValueField};
use crate::types::ValueType;

struct Config {
    crate_path: Path,
}

impl Config {
    /// Builds the `BitRange` constructor call for a top-level field or reserved range.
    ///
    /// The constructors are `const fn`s that panic on invalid ranges, and every generated use
    /// sits in a `const` item, so a range that slipped past `lay_out` still fails the build.
    fn range_expr(&self, value_type: &Ident, kind: FieldKind, bits: Bits) -> TokenStream {
        let crate_path = &self.crate_path;
        let high = Literal::u32_unsuffixed(bits.high);
        let low = Literal::u32_unsuffixed(bits.low);
        if kind.is_single_bit() {
            quote! { #crate_path::BitRange::bit::<#value_type>(#high) }
        } else {
            quote! { #crate_path::BitRange::field::<#value_type>(#high, #low) }
        }
    }

    fn sub_range_expr(&self, parent: TokenStream, kind: FieldKind, bits: Bits) -> TokenStream {
        let high = Literal::u32_unsuffixed(bits.high);
        let low = Literal::u32_unsuffixed(bits.low);
        if kind.is_single_bit() {
            quote! { #parent.sub_bit(#high) }
        } else {
            quote! { #parent.sub_field(#high, #low) }
        }
    }
}

pub fn register_impl(input: Input) -> TokenStream {
    let cfg = Config {
        crate_path: input.crate_path,
    };
    let results: Vec<_> = input
        .structs
        .into_iter()
        .map(|struct_| generate_struct(&cfg, struct_))
        .collect();
    quote! { #(#results)* }
}

fn generate_struct(cfg: &Config, input: ast::Struct) -> TokenStream {
    match generate_struct_impl(cfg, &input) {
        Ok(result) => result,
        Err(e) => {
            let compile_error = e.into_compile_error();
            let name = &input.name;
            quote! {
                #compile_error
                struct #name {}
            }
        }
    }
}

fn generate_struct_impl(cfg: &Config, input: &ast::Struct) -> Result<TokenStream> {
    let value_type = ValueType::from_ident(&input.value_type)?;
    let addr = input
        .addr
        .as_ref()
        .map(|addr| addr.addr.base10_parse::<u32>())
        .transpose()?;
    let layout = lay_out(value_type, addr.is_some(), &input.fields)?;

    let crate_path = &cfg.crate_path;
    let value_ident = value_type.to_ident(input.value_type.span());

    let reserved_ranges = layout
        .reserved
        .iter()
        .map(|reserved| cfg.range_expr(&value_ident, reserved.kind, reserved.bits));

    let get_method = addr.map(|addr| {
        let doc = format!("Returns the typed address of this register, `{addr:#x}`.");
        let addr = Literal::u32_unsuffixed(addr);
        let visibility = &input.visibility;
        quote! {
            #[doc = #doc]
            #[inline]
            #visibility const fn get() -> #crate_path::RegisterAddr<Self> {
                #crate_path::RegisterAddr::new(#addr)
            }
        }
    });

    let mut field_items = Vec::new();
    for field in &layout.value_fields {
        let range = cfg.range_expr(&value_ident, field.kind, field.bits);
        field_items.push(generate_accessors(
            cfg,
            &value_ident,
            field,
            &Storage::Register { range: &range },
        ));
        for subfield in &field.subfields {
            field_items.push(generate_accessors(
                cfg,
                &value_ident,
                subfield,
                &Storage::Parent {
                    parent: field,
                    parent_range: &range,
                },
            ));
        }
    }

    let attrs = &input.attrs;
    let visibility = &input.visibility;
    let name = &input.name;
    Ok(quote! {
        #[derive(
            ::core::clone::Clone,
            ::core::marker::Copy,
            ::core::fmt::Debug,
            ::core::cmp::PartialEq,
            ::core::cmp::Eq,
        )]
        #(#attrs)*
        #visibility struct #name {
            base: #crate_path::RegisterBase<#value_ident>,
        }

        impl #crate_path::Register for #name {
            type Value = #value_ident;

            const RESERVED_ZERO: &'static [#crate_path::BitRange] = &[#(#reserved_ranges),*];

            #[inline]
            fn from_base(base: #crate_path::RegisterBase<#value_ident>) -> Self {
                Self { base }
            }

            #[inline]
            fn base(&self) -> &#crate_path::RegisterBase<#value_ident> {
                &self.base
            }

            #[inline]
            fn base_mut(&mut self) -> &mut #crate_path::RegisterBase<#value_ident> {
                &mut self.base
            }
        }

        impl ::core::default::Default for #name {
            fn default() -> Self {
                <Self as #crate_path::Register>::new()
            }
        }

        #[allow(dead_code)]
        impl #name {
            #get_method
            #(#field_items)*
        }
    })
}

/// Where a field's bits live.
enum Storage<'a> {
    /// Directly in the register value.
    Register { range: &'a TokenStream },
    /// Inside another field's value, which is read and written through its accessors.
    Parent {
        parent: &'a ValueField<'a>,
        parent_range: &'a TokenStream,
    },
}

fn generate_accessors(
    cfg: &Config,
    value_type: &Ident,
    field: &ValueField,
    storage: &Storage,
) -> TokenStream {
    let crate_path = &cfg.crate_path;
    let register: Path = syn::parse_quote! { #crate_path::Register };

    let visibility = &field.field.visibility;
    let attrs = &field.field.attrs;
    let name = field.name;
    let name_span = name.span();

    let get_method_name = format_ident!("{}", name, span = name_span);
    let set_method_name = format_ident!("set_{}", name, span = name_span);
    let with_method_name = format_ident!("with_{}", name, span = name_span);
    let try_set_method_name = format_ident!("try_set_{}", name, span = name_span);

    let bits_doc = match (field.kind.is_single_bit(), storage) {
        (true, Storage::Register { .. }) => format!("bit {}", field.bits.high),
        (false, Storage::Register { .. }) => {
            format!("bits {}:{}", field.bits.high, field.bits.low)
        }
        (true, Storage::Parent { parent, .. }) => {
            format!("bit {} of `{}`", field.bits.high, parent.name)
        }
        (false, Storage::Parent { parent, .. }) => format!(
            "bits {}:{} of `{}`",
            field.bits.high, field.bits.low, parent.name,
        ),
    };

    let consts = match storage {
        Storage::Register { range } => quote! {
            const RANGE: #crate_path::BitRange = #range;
        },
        Storage::Parent { parent_range, .. } => {
            let range = cfg.sub_range_expr(quote! { PARENT }, field.kind, field.bits);
            quote! {
                const PARENT: #crate_path::BitRange = #parent_range;
                const RANGE: #crate_path::BitRange = #range;
            }
        }
    };

    let container = match storage {
        Storage::Register { .. } => quote! { <Self as #register>::reg_value(self) },
        Storage::Parent { parent, .. } => {
            let parent_getter = format_ident!("{}", parent.name);
            quote! { self.#parent_getter() }
        }
    };

    // Applies `$op` to a `BitfieldRef` over the field's container and evaluates to `&mut Self`.
    let modify = |op: TokenStream| match storage {
        Storage::Register { .. } => quote! {
            #crate_path::BitfieldRef::new(<Self as #register>::reg_value_mut(self), RANGE).#op;
            self
        },
        Storage::Parent { parent, .. } => {
            let parent_getter = format_ident!("{}", parent.name);
            let parent_setter = format_ident!("set_{}", parent.name);
            quote! {
                let mut parent = self.#parent_getter();
                #crate_path::BitfieldRef::new(&mut parent, RANGE).#op;
                self.#parent_setter(parent)
            }
        }
    };

    let (accessor_type, from_raw, to_raw) = if field.as_bool {
        (
            quote! { bool },
            quote! { value != 0 },
            quote! { let value = value as #value_type; },
        )
    } else {
        (quote! { #value_type }, quote! { value }, quote! {})
    };

    let get_method = {
        let doc = format!("Returns the `{name}` field ({bits_doc}).");
        quote! {
            #[doc = #doc]
            #(#attrs)*
            #[inline]
            #[must_use]
            #visibility fn #get_method_name(&self) -> #accessor_type {
                #consts
                let value = #crate_path::bitfield::get_bits(#container, RANGE);
                #from_raw
            }
        }
    };

    let set_method = {
        let doc = format!(
            "Sets the `{name}` field ({bits_doc}).\n\n\
                # Panics\n\n\
                Panics if the value does not fit in the field.",
        );
        let body = modify(quote! { set(value) });
        quote! {
            #[doc = #doc]
            #[inline]
            #visibility fn #set_method_name(&mut self, value: #accessor_type) -> &mut Self {
                #consts
                #to_raw
                #body
            }
        }
    };

    let with_method = {
        let doc = format!("Returns a copy of this snapshot with the `{name}` field set.");
        quote! {
            #[doc = #doc]
            #[inline]
            #[must_use]
            #visibility fn #with_method_name(mut self, value: #accessor_type) -> Self {
                self.#set_method_name(value);
                self
            }
        }
    };

    // A `bool` always fits, so there is nothing to try.
    let try_set_method = (!field.as_bool).then(|| {
        let doc = format!(
            "Sets the `{name}` field ({bits_doc}), or returns an error if the value does not fit.",
        );
        let body = modify(quote! { try_set(value)? });
        quote! {
            #[doc = #doc]
            #[inline]
            #visibility fn #try_set_method_name(
                &mut self,
                value: #value_type,
            ) -> ::core::result::Result<&mut Self, #crate_path::FieldError> {
                #consts
                ::core::result::Result::Ok({ #body })
            }
        }
    });

    quote! {
        #get_method
        #set_method
        #with_method
        #try_set_method
    }
}
