use proc_macro::TokenStream as TokenStream1;
use proc_macro2::Span;
use quote::ToTokens;
use syn::{self, punctuated::Punctuated, Ident, Token};

/// This macro is added before a transition method of `GameState` in the impl block.
/// Use this macro to first check if the current game phase is one of the phases in
/// the attribute.
///
/// For example, `#[allowed_phase(PlayerTurn, DealerTurn)]` will make a method first
/// check if the current phase is `PlayerTurn` or `DealerTurn`. If not, the method
/// returns `GameError::PhaseViolation` naming itself and the phase it was called in.
///
/// `GamePhase` and `GameError` must be in scope where the method is defined, and the
/// method must return `Result<_, GameError>`.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phases =
        syn::parse_macro_input!(attr with Punctuated::<Ident, Token![,]>::parse_terminated);
    let mut ast = syn::parse_macro_input!(item as syn::ImplItemFn);

    if phases.is_empty() {
        return syn::Error::new(Span::call_site(), "allowed_phase needs at least one phase")
            .to_compile_error()
            .into();
    }
    if ast.sig.receiver().is_none() {
        return syn::Error::new_spanned(&ast.sig, "allowed_phase can only guard methods")
            .to_compile_error()
            .into();
    }

    let phases: Vec<&Ident> = phases.iter().collect();
    let action = ast.sig.ident.to_string();
    let early_return: syn::Stmt = syn::parse_quote! {
        if !matches!(self.phase, #(GamePhase::#phases)|*) {
            return Err(GameError::PhaseViolation {
                action: #action,
                phase: self.phase,
            });
        }
    };
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}
