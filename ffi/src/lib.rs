//! C-ABI wrapper around `form2request-core`.
//!
//! # Overview
//! Exposes form conversion through `extern "C"` functions so any language
//! with a C FFI can turn HTML form markup into request data without linking
//! against an HTML parser of its own.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Options travel as a JSON document (`FfiOptions`) instead of a pile of
//!   nullable arguments.
//! - A single `FfiConvertResult` envelope conveys the request or the error.
//! - The C caller owns all returned pointers and must call
//!   `form2request_free_result` to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use form2request_core::{convert, Form};
use scraper::Html;
use tracing::debug;

use types::*;

/// Read a nullable C string. Invalid UTF-8 is reported as an
/// `InvalidUtf8` result naming `arg`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn opt_str<'a>(ptr: *const c_char, arg: &str) -> Result<Option<&'a str>, *mut FfiConvertResult> {
    if ptr.is_null() {
        return Ok(None);
    }
    match unsafe { CStr::from_ptr(ptr) }.to_str() {
        Ok(s) => Ok(Some(s)),
        Err(e) => Err(FfiConvertResult::error(
            FfiErrorCode::InvalidUtf8,
            &format!("{arg} is not valid UTF-8: {e}"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert a form of `html` into request data.
///
/// `base_url` may be null, which fails with `MissingBaseUrl`. `options_json`
/// may be null for default options. Always returns a result; the caller must
/// free it with `form2request_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn form2request_convert(
    html: *const c_char,
    base_url: *const c_char,
    options_json: *const c_char,
) -> *mut FfiConvertResult {
    catch_unwind(|| {
        let html = match unsafe { opt_str(html, "html") } {
            Ok(Some(html)) => html,
            Ok(None) => return FfiConvertResult::null_arg("html"),
            Err(result) => return result,
        };
        let base_url = match unsafe { opt_str(base_url, "base_url") } {
            Ok(base_url) => base_url,
            Err(result) => return result,
        };
        let options_json = match unsafe { opt_str(options_json, "options_json") } {
            Ok(options_json) => options_json,
            Err(result) => return result,
        };
        let options: FfiOptions = match options_json {
            None => FfiOptions::default(),
            Some(json) => match serde_json::from_str(json) {
                Ok(options) => options,
                Err(e) => {
                    return FfiConvertResult::error(
                        FfiErrorCode::InvalidOptions,
                        &format!("invalid options: {e}"),
                    )
                }
            },
        };

        let document = Html::parse_document(html);
        let element = match options.find_form(&document) {
            Ok(Some(element)) => element,
            Ok(None) => return FfiConvertResult::error(FfiErrorCode::NoForm, "no form found"),
            Err(msg) => return FfiConvertResult::error(FfiErrorCode::InvalidOptions, &msg),
        };
        let convert_options = match options.to_convert_options(element) {
            Ok(convert_options) => convert_options,
            Err(msg) => return FfiConvertResult::error(FfiErrorCode::InvalidOptions, &msg),
        };

        let form = Form::new(element, base_url);
        match convert(&form, &convert_options) {
            Ok(req) => {
                debug!(url = %req.url, method = %req.method, "converted form over FFI");
                FfiConvertResult::ok(req)
            }
            Err(e) => FfiConvertResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiConvertResult::panic("panic in form2request_convert"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` and everything it owns.
fn free_request(req: *mut FfiHttpRequest) {
    let req = unsafe { Box::from_raw(req) };
    if !req.url.is_null() {
        drop(unsafe { CString::from_raw(req.url) });
    }
    if !req.headers.is_null() && req.headers_len > 0 {
        let headers = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                req.headers,
                req.headers_len as usize,
            ))
        };
        for h in headers.iter() {
            if !h.key.is_null() {
                drop(unsafe { CString::from_raw(h.key) });
            }
            if !h.value.is_null() {
                drop(unsafe { CString::from_raw(h.value) });
            }
        }
    }
    if !req.body.is_null() && req.body_len > 0 {
        drop(unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.body, req.body_len)) });
    }
}

/// Free an `FfiConvertResult` returned by `form2request_convert`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn form2request_free_result(result: *mut FfiConvertResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.request.is_null() {
            free_request(result.request);
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const BASE: &str = "https://example.com";

    fn run(html: &str, base_url: Option<&str>, options: Option<&str>) -> *mut FfiConvertResult {
        let html = CString::new(html).unwrap();
        let base_url = base_url.map(|b| CString::new(b).unwrap());
        let options = options.map(|o| CString::new(o).unwrap());
        form2request_convert(
            html.as_ptr(),
            base_url.as_ref().map_or(std::ptr::null(), |b| b.as_ptr()),
            options.as_ref().map_or(std::ptr::null(), |o| o.as_ptr()),
        )
    }

    fn error_code(result: *mut FfiConvertResult) -> FfiErrorCode {
        let r = unsafe { &*result };
        assert!(r.request.is_null());
        assert!(!r.error_message.is_null());
        r.error_code
    }

    #[test]
    fn get_request_has_query_and_no_body() {
        let result = run(
            r#"<form><input type="hidden" name="a" value="b"></form>"#,
            Some(BASE),
            None,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());

        let req = unsafe { &*r.request };
        assert!(matches!(req.method, FfiHttpMethod::Get));
        let url = unsafe { CStr::from_ptr(req.url) }.to_str().unwrap();
        assert_eq!(url, "https://example.com?a=b");
        assert_eq!(req.headers_len, 0);
        assert!(req.headers.is_null());
        assert_eq!(req.body_len, 0);
        assert!(req.body.is_null());

        form2request_free_result(result);
    }

    #[test]
    fn post_request_carries_header_and_body() {
        let result = run(
            r#"<form method="post"><input name="a" value="b"></form>"#,
            Some(BASE),
            Some(r#"{"data": {"c": "d e"}}"#),
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);

        let req = unsafe { &*r.request };
        assert!(matches!(req.method, FfiHttpMethod::Post));
        assert_eq!(req.headers_len, 1);
        let headers = unsafe { std::slice::from_raw_parts(req.headers, req.headers_len as usize) };
        let key = unsafe { CStr::from_ptr(headers[0].key) }.to_str().unwrap();
        let value = unsafe { CStr::from_ptr(headers[0].value) }.to_str().unwrap();
        assert_eq!(key, "Content-Type");
        assert_eq!(value, "application/x-www-form-urlencoded");

        let body = unsafe { std::slice::from_raw_parts(req.body, req.body_len) };
        assert_eq!(body, b"a=b&c=d+e");

        form2request_free_result(result);
    }

    #[test]
    fn options_select_form_and_click() {
        let html = r#"
            <form id="search"><input name="q" value="x"></form>
            <form id="login" method="post">
                <input type="submit" name="go" value="first">
                <input type="submit" name="go" value="second">
            </form>"#;
        let result = run(
            html,
            Some(BASE),
            Some(r##"{"form": "#login", "click": "[value=second]", "enctype": "text/plain"}"##),
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let req = unsafe { &*r.request };
        let body = unsafe { std::slice::from_raw_parts(req.body, req.body_len) };
        assert_eq!(body, b"go=second");

        form2request_free_result(result);
    }

    #[test]
    fn core_errors_map_to_codes() {
        let result = run("<form></form>", None, None);
        assert_eq!(error_code(result), FfiErrorCode::MissingBaseUrl);
        form2request_free_result(result);

        let result = run("<form></form>", Some(BASE), Some(r#"{"click": true}"#));
        assert_eq!(error_code(result), FfiErrorCode::NoSubmitControl);
        form2request_free_result(result);

        let result = run(r#"<form method="dialog"></form>"#, Some(BASE), None);
        assert_eq!(error_code(result), FfiErrorCode::UnhandledMethod);
        form2request_free_result(result);

        let result = run("<form></form>", Some(BASE), Some(r#"{"method": "put"}"#));
        assert_eq!(error_code(result), FfiErrorCode::UnsupportedMethod);
        form2request_free_result(result);

        let result = run(r#"<form method="post" enctype="multipart/form-data"></form>"#, Some(BASE), None);
        assert_eq!(error_code(result), FfiErrorCode::UnhandledEnctype);
        form2request_free_result(result);
    }

    #[test]
    fn missing_form_is_reported() {
        let result = run("<p>no form here</p>", Some(BASE), None);
        assert_eq!(error_code(result), FfiErrorCode::NoForm);
        form2request_free_result(result);
    }

    #[test]
    fn bad_options_are_reported() {
        for options in [r#"{"unknown": 1}"#, "not json", r#"{"click": "[value=nope]"}"#, r#"{"form": "[["}"#] {
            let result = run("<form></form>", Some(BASE), Some(options));
            assert_eq!(error_code(result), FfiErrorCode::InvalidOptions, "{options}");
            form2request_free_result(result);
        }
    }

    #[test]
    fn null_html_is_reported() {
        let result = form2request_convert(std::ptr::null(), std::ptr::null(), std::ptr::null());
        assert_eq!(error_code(result), FfiErrorCode::NullArg);
        form2request_free_result(result);
    }

    #[test]
    fn invalid_utf8_arguments_are_reported() {
        let html = CString::new(r#"<form><input name="a" value="b"></form>"#).unwrap();
        let bad = CString::new(vec![0xff, b'x']).unwrap();
        let base = CString::new(BASE).unwrap();

        let result = form2request_convert(html.as_ptr(), bad.as_ptr(), std::ptr::null());
        assert_eq!(error_code(result), FfiErrorCode::InvalidUtf8);
        let msg = unsafe { CStr::from_ptr((*result).error_message) }.to_str().unwrap();
        assert!(msg.starts_with("base_url"), "{msg}");
        form2request_free_result(result);

        let result = form2request_convert(bad.as_ptr(), base.as_ptr(), std::ptr::null());
        assert_eq!(error_code(result), FfiErrorCode::InvalidUtf8);
        form2request_free_result(result);

        let result = form2request_convert(html.as_ptr(), base.as_ptr(), bad.as_ptr());
        assert_eq!(error_code(result), FfiErrorCode::InvalidUtf8);
        form2request_free_result(result);
    }

    #[test]
    fn free_null_is_safe() {
        form2request_free_result(std::ptr::null_mut());
    }
}
