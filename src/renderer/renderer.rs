use std::io::{self, Write};

use tracing::debug;

use crate::config::DumpConfig;
use crate::error::{DumpError, DumpResult};
use crate::renderer::renders::render_inspect;
use crate::renderer::traits::*;
use crate::value::Inspect;

/// Top-level dump engine. Every value passed in starts at depth 0.
#[derive(Debug, Clone, Default)]
pub struct Dumper {
    config: DumpConfig,
}

impl Dumper {
    pub fn new(config: DumpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Renders a single value without a trailing newline
    pub fn render(&self, value: &dyn Inspect) -> DumpResult<String> {
        let context = RenderContext::new(&self.config);
        render_inspect(value, &context)
    }

    /// Renders every value independently, each followed by a newline
    pub fn sdump(&self, values: &[&dyn Inspect]) -> DumpResult<String> {
        let mut output = String::new();
        for (i, value) in values.iter().enumerate() {
            debug!(index = i, "dumping value");
            output.push_str(&self.render(*value)?);
            output.push('\n');
        }
        Ok(output)
    }

    /// Writes the [`sdump`](Self::sdump) text into `sink`, returning the byte count
    pub fn fdump<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        values: &[&dyn Inspect],
    ) -> DumpResult<usize> {
        let output = self.sdump(values)?;
        write_once(sink, output.as_bytes())
    }

    /// Writes each value to stdout as soon as it is rendered
    pub fn dump(&self, values: &[&dyn Inspect]) -> DumpResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for value in values {
            self.fdump(&mut handle, &[*value])?;
        }
        Ok(())
    }
}

// A single pass over the buffer: a fault is reported with the byte count that
// made it out, and nothing is retried.
fn write_once<W: Write + ?Sized>(sink: &mut W, bytes: &[u8]) -> DumpResult<usize> {
    let mut written = 0;
    while written < bytes.len() {
        match sink.write(&bytes[written..]) {
            Ok(0) => return Err(DumpError::ShortWrite { written }),
            Ok(n) => written += n,
            Err(source) => return Err(DumpError::Sink { written, source }),
        }
    }
    Ok(written)
}
