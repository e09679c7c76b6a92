//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::{Literal, Span};
use quote::quote;
use syn::{Attribute, DeriveInput, LitInt, LitStr, parse_macro_input};

/// Implements `Solver` by dispatching each part to its `PartSolver<N>` impl.
///
/// `#[aoc_solver(max_parts = N)]` sets `Solver::PARTS`. Every part from 1
/// to `N` must have a `PartSolver` impl.
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct Day16;
///
/// impl PartSolver<1> for Day16 { /* ... */ }
/// impl PartSolver<2> for Day16 { /* ... */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = find_attr(&input.attrs, "aoc_solver", name.span())?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let lit: LitInt = meta.value()?.parse()?;
            max_parts = Some(lit.base10_parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `max_parts = N`"))
        }
    })?;

    let max_parts = match max_parts {
        Some(0) => {
            return Err(syn::Error::new_spanned(attr, "`max_parts` must be at least 1"));
        }
        Some(n) => n,
        None => return Err(syn::Error::new_spanned(attr, "missing `max_parts = N`")),
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let arms = (1..=max_parts).map(|part| {
        let part = Literal::u8_unsuffixed(part);
        quote! {
            #part => <Self as ::aoc_solver::PartSolver<#part>>::solve(shared),
        }
    });
    let parts = Literal::u8_unsuffixed(max_parts);

    Ok(quote! {
        impl #impl_generics ::aoc_solver::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #parts;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::std::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::std::result::Result::Err(
                        ::aoc_solver::SolveError::PartNotImplemented(part),
                    ),
                }
            }
        }
    })
}

/// Submits the solver to the plugin registry through `inventory`.
///
/// `#[aoc(year = Y, day = D, tags = ["a", "b"])]`; `tags` is optional.
/// The type must implement `Solver`, usually via `#[derive(AocSolver)]`.
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2024, day = 16, tags = ["grid", "dijkstra"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "AutoRegisterSolver needs a concrete type to submit",
        ));
    }
    let attr = find_attr(&input.attrs, "aoc", name.span())?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<LitStr> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let lit: LitInt = meta.value()?.parse()?;
            year = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let lit: LitInt = meta.value()?.parse()?;
            day = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("tags") {
            let content;
            meta.value()?;
            syn::bracketed!(content in meta.input);
            let list =
                content.parse_terminated(<LitStr as syn::parse::Parse>::parse, syn::Token![,])?;
            tags.extend(list);
        } else {
            return Err(meta.error("expected `year`, `day` or `tags`"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(attr, "missing `year = ...`"))?;
    let day = day.ok_or_else(|| syn::Error::new_spanned(attr, "missing `day = ...`"))?;
    if !(1..=25).contains(&day) {
        return Err(syn::Error::new_spanned(attr, "`day` must be between 1 and 25"));
    }

    Ok(quote! {
        // Gives a readable error when the type does not implement `Solver`.
        const _: () = {
            trait MustImplementSolver: ::aoc_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}

fn find_attr<'a>(attrs: &'a [Attribute], ident: &str, span: Span) -> syn::Result<&'a Attribute> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident(ident))
        .ok_or_else(|| syn::Error::new(span, format!("missing #[{ident}(...)] attribute")))
}
