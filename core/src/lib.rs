//! Turn an HTML form into the HTTP request a browser would send for it.
//!
//! # Overview
//! Given a parsed `<form>`, optional caller data and an optional clicked
//! control, `convert` produces an `HttpRequest` (URL, method, headers, body)
//! without touching the network (host-does-IO pattern). The caller executes
//! the request with any HTTP client.
//!
//! # Design
//! - Resolution is split into pure steps: click (`click`), target URL
//!   (`action`), method (`method`), submitted fields (`fields`) and, for POST,
//!   body encoding (`enctype`). `convert` composes them.
//! - Resolvers are generic over `dom::Element`, so any parsed tree can be
//!   used; `scraper::ElementRef` works out of the box.
//! - Unknown method and enctype values in markup degrade to the browser
//!   defaults. Caller overrides are validated strictly. `dialog` and
//!   `multipart/form-data` in markup are reported as unhandled.
//! - Disabled controls are not excluded.

pub mod action;
pub mod click;
pub mod convert;
pub mod dom;
pub mod enctype;
pub mod error;
pub mod fields;
pub mod method;
pub mod request;

pub use action::resolve_url;
pub use click::{resolve_click, Click};
pub use convert::{convert, ConvertOptions};
pub use dom::{find_forms, Element, Form};
pub use enctype::{resolve_enctype, Enctype};
pub use error::FormError;
pub use fields::{collect_fields, FieldValue, UserData};
pub use method::resolve_method;
pub use request::{HttpMethod, HttpRequest};
