use std::process::Stdio;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{DispatchError, Result};

/// Turns an HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>>;
}

const A4_STYLE: &str = r#"@page {
    size: A4;
    margin: 0;
}
body {
    width: 100%;
    font-family: Arial, sans-serif;
    margin: 0;
    padding: 1cm;
    box-sizing: border-box;
}
table {
    width: 100%;
    margin-bottom: 1em;
    border-collapse: collapse;
    font-size: 12px;
    table-layout: fixed;
}
td, th {
    padding: 4px;
    word-wrap: break-word;
    word-break: break-word;
    overflow-wrap: break-word;
    hyphens: auto;
}"#;

/// Wrap an HTML fragment in a document styled for A4 pages.
pub fn wrap_a4(html: &str) -> String {
    format!(
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{A4_STYLE}\n</style>\n</head>\n<body>\n{html}\n</body>\n</html>\n"
    )
}

pub fn encode_pdf(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Render `html` as an A4 PDF and return it base64-encoded.
pub async fn render_attachment(renderer: &dyn PdfRenderer, html: &str) -> Result<String> {
    let bytes = renderer.render(&wrap_a4(html)).await?;
    Ok(encode_pdf(&bytes))
}

/// Renderer delegating to an external program that reads HTML on stdin and
/// writes PDF on stdout.
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandPdfRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for CommandPdfRenderer {
    fn default() -> Self {
        Self::new(
            "wkhtmltopdf",
            ["--quiet", "--page-size", "A4", "-", "-"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        )
    }
}

#[async_trait]
impl PdfRenderer for CommandPdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| DispatchError::Pdf(format!("failed to start {}: {err}", self.program)))?;

        // Stdin is fed concurrently with draining stdout.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(html.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        let output = output?;
        if !output.status.success() {
            return Err(DispatchError::Pdf(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        fed?;
        if output.stdout.is_empty() {
            return Err(DispatchError::Pdf(format!(
                "{} produced no output",
                self.program
            )));
        }

        debug!(program = %self.program, bytes = output.stdout.len(), "pdf rendered");
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_fragment_in_a4_document() {
        let html = wrap_a4("<table><tr><td>1</td></tr></table>");
        assert!(html.contains("size: A4;"));
        assert!(html.contains("<body>\n<table><tr><td>1</td></tr></table>\n</body>"));
    }

    #[test]
    fn encodes_standard_base64() {
        assert_eq!(encode_pdf(b"%PDF-1.4"), "JVBERi0xLjQ=");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn large_documents_stream_through_the_renderer() {
        let renderer = CommandPdfRenderer::new("cat", Vec::new());
        let html = "<p>row</p>\n".repeat(100_000);
        let bytes = renderer.render(&html).await.expect("render through cat");
        assert_eq!(bytes.len(), html.len());
        assert_eq!(bytes, html.as_bytes());
    }

    #[tokio::test]
    async fn missing_program_is_a_pdf_error() {
        let renderer = CommandPdfRenderer::new("phantommail-no-such-renderer", Vec::new());
        let result = renderer.render("<p>hi</p>").await;
        assert!(matches!(result, Err(DispatchError::Pdf(_))));
    }
}
