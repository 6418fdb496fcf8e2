//! Captioned "excuse" image generation.
//!
//! The library holds everything both front ends share: the text fitter and
//! renderer, the caption cache, the imgur upload client, and the HTTP layer.
//! The `excuse` binary renders straight to a local file; `excuse-server`
//! exposes the same pipeline behind a redirecting HTTP route.

pub mod cache;
pub mod config;
pub mod errors;
pub mod render;
pub mod services;
pub mod upload;
pub mod web;
