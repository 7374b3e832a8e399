//! `#[repr(C)]` types for the FFI boundary, plus the JSON options document.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers and lengths instead of
//! `Vec`, and enums with explicit discriminants. The body is a byte buffer
//! with a length because submitted values may contain NUL bytes. Conversion
//! functions live here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use form2request_core::{
    Click, ConvertOptions, Element, FormError, HttpMethod, HttpRequest, UserData,
};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Click choice as written in JSON: a flag or a CSS selector.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClickOption {
    Flag(bool),
    Selector(String),
}

/// Conversion options accepted by `form2request_convert`, as JSON.
///
/// ```json
/// {"form": "#login", "data": {"user": "a", "debug": null}, "click": "[name=go]"}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FfiOptions {
    /// CSS selector picking the form; the first `<form>` when absent.
    pub form: Option<String>,
    pub data: Option<UserData>,
    pub click: Option<ClickOption>,
    pub method: Option<String>,
    pub enctype: Option<String>,
}

impl FfiOptions {
    /// Locate the form element. `Ok(None)` when nothing matches.
    pub(crate) fn find_form<'a>(&self, document: &'a Html) -> Result<Option<ElementRef<'a>>, String> {
        match &self.form {
            None => Ok(form2request_core::find_forms(document).into_iter().next()),
            Some(selector) => {
                let selector = parse_selector(selector)?;
                Ok(document
                    .select(&selector)
                    .find(|element| element.tag_name() == "form"))
            }
        }
    }

    /// Build core options, resolving a click selector inside `form`.
    pub(crate) fn to_convert_options<'a>(
        &self,
        form: ElementRef<'a>,
    ) -> Result<ConvertOptions<ElementRef<'a>>, String> {
        let click = match &self.click {
            None => Click::Auto,
            Some(ClickOption::Flag(flag)) => Click::from(*flag),
            Some(ClickOption::Selector(selector)) => {
                let parsed = parse_selector(selector)?;
                Click::first_of(form.select(&parsed))
                    .ok_or_else(|| format!("click selector {selector:?} matched nothing"))?
            }
        };
        Ok(ConvertOptions {
            data: self.data.clone(),
            click,
            method: self.method.clone(),
            enctype: self.enctype.clone(),
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, String> {
    Selector::parse(selector).map_err(|err| format!("invalid selector {selector:?}: {err:?}"))
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A converted form submission described as C-compatible plain data.
///
/// `body` is null when `body_len` is 0.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut u8,
    pub body_len: usize,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = CString::new(req.url).unwrap_or_default().into_raw();

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: CString::new(k).unwrap_or_default().into_raw(),
                    value: CString::new(v).unwrap_or_default().into_raw(),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        let body_len = req.body.len();
        let body = if req.body.is_empty() {
            std::ptr::null_mut()
        } else {
            Box::into_raw(req.body.into_boxed_slice()) as *mut u8
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
            body_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiConvertResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    MissingBaseUrl = 1,
    NoSubmitControl = 2,
    UnsupportedMethod = 3,
    UnhandledMethod = 4,
    UnsupportedEnctype = 5,
    UnhandledEnctype = 6,
    InvalidUrl = 7,
    NoForm = 8,
    InvalidOptions = 9,
    NullArg = 10,
    Panic = 11,
    InvalidUtf8 = 12,
}

impl From<&FormError> for FfiErrorCode {
    fn from(err: &FormError) -> Self {
        match err {
            FormError::MissingBaseUrl => FfiErrorCode::MissingBaseUrl,
            FormError::NoSubmitControl => FfiErrorCode::NoSubmitControl,
            FormError::UnsupportedMethod(_) => FfiErrorCode::UnsupportedMethod,
            FormError::UnhandledMethod { .. } => FfiErrorCode::UnhandledMethod,
            FormError::UnsupportedEnctype(_) => FfiErrorCode::UnsupportedEnctype,
            FormError::UnhandledEnctype { .. } => FfiErrorCode::UnhandledEnctype,
            FormError::InvalidUrl(_) => FfiErrorCode::InvalidUrl,
        }
    }
}

/// Result envelope for `form2request_convert`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `request`
/// points to the converted request. On failure `error_code` describes the
/// category, `error_message` is a human-readable C string and `request` is
/// null.
#[repr(C)]
pub struct FfiConvertResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub request: *mut FfiHttpRequest,
}

impl FfiConvertResult {
    pub(crate) fn ok(req: HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiConvertResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            request: FfiHttpRequest::from_core(req),
        }))
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiConvertResult {
            error_code,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            request: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn from_error(err: &FormError) -> *mut Self {
        Self::error(err.into(), &err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }
}
