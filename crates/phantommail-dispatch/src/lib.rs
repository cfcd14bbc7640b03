//! Turning generated content into deliverable emails.
//!
//! A [`DocumentAssembler`] renders entity JSON into subject and HTML, a
//! [`PdfRenderer`] turns attachment HTML into PDF bytes and a [`Transport`]
//! hands the result to a mail provider. [`Pipeline`] chains the three.

pub mod assembler;
pub mod errors;
pub mod pdf;
pub mod pipeline;
pub mod transport;

pub use assembler::{DocumentAssembler, DocumentRequest, TemplateAssembler, response_schema};
pub use errors::{DispatchError, Result};
pub use pdf::{CommandPdfRenderer, PdfRenderer, encode_pdf, wrap_a4};
pub use pipeline::{DeliveryOutcome, Pipeline, PipelineConfig};
pub use transport::{LogTransport, ResendTransport, Transport, deliver};
