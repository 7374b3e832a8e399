//! Error types for form submission resolution.
//!
//! # Design
//! Variants fall into three groups that callers usually treat differently:
//! usage errors (the caller passed something invalid and can fix the call),
//! capability gaps (the markup asks for something this crate does not
//! implement, such as `multipart/form-data`), and input errors (the form
//! cannot be resolved at all, e.g. it has no base URL). No variant carries a
//! partially built request.

use thiserror::Error;

/// Errors returned by `convert` and the individual resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The form has no base URL to resolve its action against.
    #[error("form has no base URL set")]
    MissingBaseUrl,

    /// `Click::Require` was used on a form without submit-like controls.
    #[error(
        "no clickable elements found in form; use Click::Skip or point Click::Control \
         at the element to be clicked"
    )]
    NoSubmitControl,

    /// The caller overrode the method with something other than GET or POST.
    #[error("the specified form method ({0:?}) is not supported")]
    UnsupportedMethod(String),

    /// The markup declares a method that is recognized but not implemented.
    #[error("found unsupported form method {value:?} in the {attribute} attribute")]
    UnhandledMethod {
        value: String,
        attribute: &'static str,
    },

    /// The caller overrode the enctype with an unsupported value.
    #[error(
        "the specified form enctype ({0:?}) is not supported for forms with the POST method"
    )]
    UnsupportedEnctype(String),

    /// The markup declares an enctype that is recognized but not implemented.
    #[error(
        "the {attribute} attribute is set to {value:?}, which is not supported for forms \
         with the POST method"
    )]
    UnhandledEnctype {
        value: String,
        attribute: &'static str,
    },

    /// The base URL could not be parsed while resolving a relative action.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FormError {
    /// True for errors caused by invalid caller arguments.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            FormError::NoSubmitControl
                | FormError::UnsupportedMethod(_)
                | FormError::UnsupportedEnctype(_)
        )
    }

    /// True when the markup requires a feature this crate does not implement.
    pub fn is_unhandled(&self) -> bool {
        matches!(
            self,
            FormError::UnhandledMethod { .. } | FormError::UnhandledEnctype { .. }
        )
    }
}
