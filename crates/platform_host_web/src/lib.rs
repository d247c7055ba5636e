//! Browser (`wasm32`) implementation of the [`platform_host::DesktopApi`] contract.
//!
//! Transport glue lives under `transport/`, split into `wasm` (`fetch` through `web-sys`) and
//! `non_wasm` (always fails with a transport error so native test builds link).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod http_api;
mod transport;

use std::rc::Rc;

use platform_host::DesktopApi;

pub use http_api::{content_type_for, HttpDesktopApi, DEFAULT_API_BASE};

/// Returns the API client the runtime is wired with in the browser.
pub fn desktop_api() -> Rc<dyn DesktopApi> {
    Rc::new(HttpDesktopApi::default())
}
