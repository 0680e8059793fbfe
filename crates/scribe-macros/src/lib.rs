//! scribe-macros - Procedural macros behind the scribe logging call sites
//!
//! This crate provides `log_event!`, the expansion shared by `log_info!` and
//! the other leveled macros of `scribe-logging`. It is not meant to be used
//! directly: the first argument is the path of the logging crate, which the
//! wrappers fill in with `$crate`.
//!
//! A call site expands to:
//! 1. a single lookup of the ambient logger (`logger` in scope, or the
//!    expression given as `logger: <expr>,`);
//! 2. a threshold check, so no argument is evaluated for a filtered call;
//! 3. the timestamp and each argument evaluated exactly once, then the event
//!    (tagged with the call site's file and line) and, for `"[{}] "` formats
//!    with a diagnosable first argument, the diagnostic;
//! 4. a flush of the logger's registry at `Error` and `Critical`, whether or
//!    not the event passed the threshold.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{Expr, Ident, LitStr, Token, parse_macro_input};

/// Format prefix that marks a call whose first argument may be diagnosable
const DIAGNOSTICS_FORMAT_PREFIX: &str = "[{}] ";

/// Severities a call site can log at
const LEVELS: [&str; 6] = ["Trace", "Debug", "Info", "Warning", "Error", "Critical"];

/// Expand one logging call site
///
/// ```text
/// log_event!(<crate>, <Level>, "<category>", [logger: <expr>,] "<format>", args...)
/// ```
///
/// The format must be a string literal using only `{}` placeholders (with
/// `{{` and `}}` escapes), and the number of placeholders must match the
/// number of arguments.
#[proc_macro]
pub fn log_event(input: TokenStream) -> TokenStream {
    let call = parse_macro_input!(input as LogCall);
    match call.expand() {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

/// A parsed call site
struct LogCall {
    krate: Ident,
    level: Ident,
    category: LitStr,
    logger: Option<Expr>,
    format: LitStr,
    args: Vec<Expr>,
}

impl Parse for LogCall {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let krate = input.call(Ident::parse_any)?;
        input.parse::<Token![,]>()?;

        let level: Ident = input.parse()?;
        if !LEVELS.iter().any(|name| level == name) {
            return Err(syn::Error::new(
                level.span(),
                format!("unknown log level `{level}`, expected one of {}", LEVELS.join(", ")),
            ));
        }
        input.parse::<Token![,]>()?;

        let category: LitStr = input.parse()?;
        input.parse::<Token![,]>()?;

        let logger = if input.peek(Ident) && input.peek2(Token![:]) && !input.peek2(Token![::]) {
            let keyword: Ident = input.parse()?;
            if keyword != "logger" {
                return Err(syn::Error::new(
                    keyword.span(),
                    "expected `logger: <expr>,` or a format string",
                ));
            }
            input.parse::<Token![:]>()?;
            let expr: Expr = input.parse()?;
            input.parse::<Token![,]>()?;
            Some(expr)
        } else {
            None
        };

        let format: LitStr = input
            .parse()
            .map_err(|err| syn::Error::new(err.span(), "log format must be a string literal"))?;

        let mut args = Vec::new();
        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            args.push(input.parse::<Expr>()?);
        }

        Ok(Self {
            krate,
            level,
            category,
            logger,
            format,
            args,
        })
    }
}

impl LogCall {
    fn expand(&self) -> syn::Result<TokenStream2> {
        let format_value = self.format.value();
        let placeholders = count_placeholders(&format_value)
            .map_err(|reason| syn::Error::new(self.format.span(), reason))?;
        if placeholders != self.args.len() {
            return Err(syn::Error::new(
                self.format.span(),
                format!(
                    "format string has {placeholders} placeholder(s) \
                     but {} argument(s) were given",
                    self.args.len()
                ),
            ));
        }

        let krate = &self.krate;
        let level = &self.level;
        let category = &self.category;
        let format = &self.format;
        let args = &self.args;

        // The ambient `logger` resolves where the format string was written.
        let provider = match &self.logger {
            Some(expr) => quote!(#expr),
            None => {
                let ident = Ident::new("logger", self.format.span());
                quote!(#ident)
            }
        };

        let provider_var = Ident::new("__scribe_provider", Span::mixed_site());
        let logger_var = Ident::new("__scribe_logger", Span::mixed_site());
        let level_var = Ident::new("__scribe_level", Span::mixed_site());
        let time_var = Ident::new("__scribe_time", Span::mixed_site());
        let arg_vars: Vec<Ident> = (0..args.len())
            .map(|i| Ident::new(&format!("__scribe_arg{i}"), Span::mixed_site()))
            .collect();

        let diagnostic = match arg_vars.split_first() {
            Some((first, rest)) if format_value.starts_with(DIAGNOSTICS_FORMAT_PREFIX) => {
                let message = LitStr::new(
                    &format_value[DIAGNOSTICS_FORMAT_PREFIX.len()..],
                    self.format.span(),
                );
                quote! {
                    {
                        use #krate::__private::{RouteNowhere as _, RouteToSink as _};
                        (&#krate::__private::DiagnosticRoute(#first)).route(
                            #logger_var.writer(),
                            #level_var,
                            #time_var,
                            || ::std::format!(#message #(, #rest)*),
                        );
                    }
                }
            }
            Some((first, _)) => quote! {
                #krate::__private::assert_not_diagnosable(#first);
            },
            None => TokenStream2::new(),
        };

        Ok(quote! {
            {
                let #provider_var = &(#provider);
                let #logger_var: &#krate::Logger = {
                    use #krate::LoggerProvider as _;
                    #provider_var.current()
                };
                let #level_var: #krate::Severity = #krate::Severity::#level;
                if #level_var >= #logger_var.level() {
                    let #time_var = #krate::__private::now();
                    match (#(&#args,)*) {
                        (#(#arg_vars,)*) => {
                            #diagnostic
                            #logger_var.writer().add_event(
                                #level_var,
                                #category,
                                #time_var,
                                ::std::option::Option::Some(#krate::SourceLocation::new(
                                    ::std::file!(),
                                    ::std::line!(),
                                )),
                                #format,
                                ::std::vec![#(::std::string::ToString::to_string(#arg_vars)),*],
                            );
                        }
                    }
                }
                if #level_var.forces_flush() {
                    #logger_var.writer().flush();
                }
            }
        })
    }
}

/// Count `{}` placeholders, rejecting any other brace usage
fn count_placeholders(format: &str) -> Result<usize, String> {
    let mut count = 0;
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' => match chars.next() {
                Some('}') => count += 1,
                _ => {
                    return Err(
                        "only `{}` placeholders are supported; use `{{` for a literal brace"
                            .to_string(),
                    );
                }
            },
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            '}' => return Err("unmatched `}`; use `}}` for a literal brace".to_string()),
            _ => {}
        }
    }
    Ok(count)
}
