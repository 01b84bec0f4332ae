//! Routing of per-source rows to their output streams
//!
//! Each input file `<name>` gets its own `<name>.hist`; when reading from
//! standard input the single source writes to standard output.

use robust_core::{Error, Result, SourceId};
use robust_histogram::{BinRow, BinSink};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix appended to an input file name to form its output file name
pub const OUTPUT_SUFFIX: &str = ".hist";

/// Output path for the histogram of `input`
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

struct Channel {
    name: String,
    writer: Box<dyn Write>,
}

/// Maps every source to the stream its rows are written to
#[derive(Default)]
pub struct SinkRouter {
    channels: BTreeMap<SourceId, Channel>,
}

impl SinkRouter {
    /// Create a router with no channels
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `source` to `writer`, replacing any previous channel
    pub fn add_writer<W>(&mut self, source: SourceId, name: impl Into<String>, writer: W)
    where
        W: Write + 'static,
    {
        self.channels.insert(
            source,
            Channel {
                name: name.into(),
                writer: Box::new(writer),
            },
        );
    }

    /// Create (or truncate) `<input>.hist` for each input, in order
    ///
    /// Input `i` is routed as `SourceId::new(i)`.
    pub fn for_files<P: AsRef<Path>>(inputs: &[P]) -> Result<Self> {
        let mut router = Self::new();
        for (index, input) in inputs.iter().enumerate() {
            let path = output_path(input.as_ref());
            let name = path.display().to_string();
            let file = File::create(&path).map_err(|e| Error::channel_open(name.as_str(), e))?;
            debug!("Writing {} to {}", SourceId::new(index), name);
            router.add_writer(SourceId::new(index), name, BufWriter::new(file));
        }
        Ok(router)
    }

    /// Route the single implicit source to standard output
    pub fn stdout() -> Self {
        let mut router = Self::new();
        router.add_writer(SourceId::default(), "<stdout>", BufWriter::new(io::stdout()));
        router
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Name of the channel `source` is routed to
    pub fn channel_name(&self, source: SourceId) -> Option<&str> {
        self.channels.get(&source).map(|c| c.name.as_str())
    }

    /// Flush every channel, consuming the router
    pub fn finish(self) -> Result<()> {
        for (_, mut channel) in self.channels {
            channel.writer.flush()?;
        }
        Ok(())
    }
}

impl BinSink for SinkRouter {
    fn emit(&mut self, source: SourceId, row: BinRow) -> Result<()> {
        let channel = self
            .channels
            .get_mut(&source)
            .ok_or_else(|| Error::InvalidInput(format!("no output channel for {source}")))?;
        writeln!(channel.writer, "{row}")?;
        Ok(())
    }
}
