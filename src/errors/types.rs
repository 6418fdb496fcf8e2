//! Error type definitions for the excuse image service
//!
//! Every error here is terminal for the current unit of work: one CLI run or
//! one HTTP request. There is no retry or partial-success state anywhere in
//! the pipeline; either a complete bitmap is produced and handed off, or
//! nothing is.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type
///
/// Aggregates the domain errors of the render/upload pipeline. The server
/// maps any variant to a bare 500 after logging it; the CLI lets it surface
/// through `anyhow` as a diagnostic with exit code 1.
#[derive(Error, Debug)]
pub enum AppError {
    /// Template/font loading, compositing or encoding failures
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Image-hosting service failures
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    /// Scratch-file I/O failures between rendering and uploading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while composing the captioned bitmap
#[derive(Error, Debug)]
pub enum RenderError {
    /// Template file missing or unreadable
    #[error("template image unreadable at {path}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template bytes are not a decodable image
    #[error("template image at {path} did not decode: {source}")]
    TemplateDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Template decoded into a pixel format other than 8-bit RGBA
    #[error("template decoded as {found}, expected 8-bit RGBA")]
    PixelFormat { found: String },

    /// Font file missing or unreadable
    #[error("font unreadable at {path}: {source}")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font bytes are not a parseable TrueType font
    #[error("font data at {path} is not a parseable TrueType font")]
    FontParse { path: PathBuf },

    /// Caption still overflows its bounding box at the minimum font size
    #[error("caption {text:?} does not fit a {box_width}px box at any usable size")]
    CaptionTooLong { text: String, box_width: i32 },

    /// Output bitmap serialization failed
    #[error("failed to encode output image: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },
}

/// Errors produced while handing the bitmap to the image-hosting service
#[derive(Error, Debug)]
pub enum UploadError {
    /// Rendered file vanished or is unreadable before the upload
    #[error("rendered image unreadable at {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network or protocol failure talking to the hosting service
    #[error("http request to image host failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Hosting service answered but refused the upload
    #[error("image host rejected the upload: status {status}")]
    Rejected { status: i32 },

    /// Hosting service answered with a body we cannot use
    #[error("image host returned a malformed response: {detail}")]
    MalformedResponse { detail: String },
}
