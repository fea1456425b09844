//! Document rendering
//!
//! - [`traits`] - The [`DocumentRenderer`] seam
//! - [`html_pdf`] - Handlebars template plus external HTML-to-PDF converter

pub mod html_pdf;
pub mod traits;

pub use html_pdf::HtmlPdfRenderer;
pub use traits::DocumentRenderer;
