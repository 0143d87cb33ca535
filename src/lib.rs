//! # sheetforge-web
//!
//! Leptos + WASM frontend for SheetForge: describe a spreadsheet in plain
//! language, get a generated Excel workbook back.
//!
//! The crate is laid out as a `lib/` support layer (HTTP wrapper, config,
//! errors, storage, browser interop), `features/` domain modules (auth,
//! billing, generation, token metering, bot detection), thin `routes/`
//! pages, and a small `components/` UI kit. Browser APIs sit behind
//! `cfg(target_arch = "wasm32")` seams with native fallbacks, so unit tests
//! run on the host toolchain.

pub mod app;
#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod components;
pub mod features;
pub mod routes;

pub use app::App;
