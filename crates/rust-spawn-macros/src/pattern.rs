//! Compile-time validated command pattern macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{LitStr, Result, Token, bracketed};

/// The pattern! macro input.
pub enum PatternInput {
    /// `["prog", "arg", ...]`
    Argv(Vec<LitStr>),
    /// `"shell line"`
    Shell(LitStr),
}

impl Parse for PatternInput {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(syn::token::Bracket) {
            let content;
            let bracket = bracketed!(content in input);
            let tokens: Punctuated<LitStr, Token![,]> =
                content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
            if tokens.is_empty() {
                return Err(syn::Error::new(
                    bracket.span.join(),
                    "command pattern needs at least one token",
                ));
            }
            Ok(Self::Argv(tokens.into_iter().collect()))
        } else {
            Ok(Self::Shell(input.parse()?))
        }
    }
}

/// Check a token the way the matcher will compile it.
fn validate(token: &LitStr) -> Result<()> {
    let anchored = format!("^(?:{})", token.value());
    regex::Regex::new(&anchored)
        .map(|_| ())
        .map_err(|e| syn::Error::new(token.span(), format!("invalid pattern token: {e}")))
}

/// Generate code for the pattern! macro.
pub fn expand(input: PatternInput) -> TokenStream {
    let checked = match &input {
        PatternInput::Argv(tokens) => tokens.iter().try_for_each(validate),
        PatternInput::Shell(line) => validate(line),
    };
    if let Err(e) = checked {
        return e.to_compile_error();
    }

    match input {
        PatternInput::Argv(tokens) => quote! {
            ::rust_spawn_mock::Command::argv([#(#tokens),*])
        },
        PatternInput::Shell(line) => quote! {
            ::rust_spawn_mock::Command::shell(#line)
        },
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn parse_argv() {
        let input: PatternInput = parse_quote! { ["ls", "-l",] };
        match input {
            PatternInput::Argv(tokens) => {
                let values: Vec<_> = tokens.iter().map(LitStr::value).collect();
                assert_eq!(values, ["ls", "-l"]);
            }
            PatternInput::Shell(_) => panic!("expected argv"),
        }
    }

    #[test]
    fn parse_shell() {
        let input: PatternInput = parse_quote! { "make all" };
        assert!(matches!(input, PatternInput::Shell(ref l) if l.value() == "make all"));
    }

    #[test]
    fn empty_list_rejected() {
        assert!(syn::parse2::<PatternInput>(quote! { [] }).is_err());
    }

    #[test]
    fn expands_argv() {
        let out = expand(parse_quote! { ["foo", "--lol=.+"] }).to_string();
        assert!(out.contains("Command :: argv"));
        assert!(out.contains(r#""--lol=.+""#));
    }

    #[test]
    fn expands_shell() {
        let out = expand(parse_quote! { "foo" }).to_string();
        assert!(out.contains("Command :: shell"));
    }

    #[test]
    fn invalid_token_is_compile_error() {
        let out = expand(parse_quote! { ["ls", "[unclosed"] }).to_string();
        assert!(out.contains("compile_error"));
        assert!(out.contains("invalid pattern token"));
    }
}
