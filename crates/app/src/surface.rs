//! Rendering surfaces
//!
//! Where the dispatcher sends the pages it builds. The HTML and table
//! surfaces buffer the latest render so the CLI can print it.

use std::io;

use mockall::automock;
use parking_lot::Mutex;
use petgo::{
    mutations::OperationKey,
    render::{RenderError, html, table},
    view::CartPage,
};
use rustc_hash::FxHashSet;
use tracing::debug;

/// A target for rendered cart pages.
#[automock]
pub trait CartSurface: Send + Sync {
    /// Replace the displayed page.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the page cannot be rendered.
    fn render(&self, page: &CartPage, busy: &FxHashSet<OperationKey>) -> Result<(), RenderError>;

    /// Update the header badge after a successful mutation.
    fn cart_updated(&self, item_count: u32);
}

/// Output format for buffered surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Storefront markup.
    Html,

    /// Terminal table.
    Table,
}

/// Keeps the latest rendered page and badge count.
#[derive(Debug)]
pub struct BufferedSurface {
    format: OutputFormat,
    state: Mutex<SurfaceState>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    output: String,
    item_count: Option<u32>,
}

impl BufferedSurface {
    /// Create an empty surface rendering in `format`.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            state: Mutex::new(SurfaceState::default()),
        }
    }

    /// The latest rendered page.
    pub fn output(&self) -> String {
        self.state.lock().output.clone()
    }

    /// The latest published badge count, if any.
    pub fn item_count(&self) -> Option<u32> {
        self.state.lock().item_count
    }

    /// Write the latest rendered page to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::IO`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), RenderError> {
        out.write_all(self.output().as_bytes())
            .and_then(|()| out.flush())
            .map_err(|_err| RenderError::IO)
    }
}

impl CartSurface for BufferedSurface {
    fn render(&self, page: &CartPage, busy: &FxHashSet<OperationKey>) -> Result<(), RenderError> {
        let output = match self.format {
            OutputFormat::Html => html::render_page(page, busy)?,
            OutputFormat::Table => {
                let mut out = Vec::new();
                table::write_page(&mut out, page)?;

                String::from_utf8_lossy(&out).into_owned()
            }
        };

        self.state.lock().output = output;

        Ok(())
    }

    fn cart_updated(&self, item_count: u32) {
        debug!(item_count, "cart updated");

        self.state.lock().item_count = Some(item_count);
    }
}
