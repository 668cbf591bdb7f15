use anyhow::Context;
use std::io::Read;
use std::time::Duration;
use sweepcore::prelude::{DecodeStats, FrameDecoder, SampleStore};

/// Non-blocking source of raw transport bytes.
pub trait ByteSource {
    /// Whatever is readable right now, or `None` when nothing arrived this
    /// cycle (including transient read failures, which must not stall the
    /// frame cadence).
    fn poll(&mut self) -> Option<Vec<u8>>;
}

/// Serial-port transport with a short bounded read timeout.
pub struct SerialSource {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialSource {
    pub fn open(path: &str, baud: u32) -> anyhow::Result<Self> {
        let port = serialport::new(path, baud)
            .timeout(Duration::from_millis(10))
            .open()
            .with_context(|| format!("opening serial port {path}"))?;
        Ok(Self { port })
    }
}

impl ByteSource for SerialSource {
    fn poll(&mut self) -> Option<Vec<u8>> {
        let available = match self.port.bytes_to_read() {
            Ok(count) => count as usize,
            Err(err) => {
                log::debug!("serial availability query failed: {err}");
                return None;
            }
        };
        if available == 0 {
            return None;
        }

        let mut chunk = vec![0u8; available];
        match self.port.read(&mut chunk) {
            Ok(read) => {
                chunk.truncate(read);
                Some(chunk)
            }
            Err(err) if err.kind() == std::io::ErrorKind::TimedOut => None,
            Err(err) => {
                log::debug!("serial read failed: {err}");
                None
            }
        }
    }
}

/// One poll cycle: drain available bytes into the decoder and fold the
/// outcomes into the sample store and counters. Malformed frames are logged
/// and dropped; the previous sample stays current.
pub fn pump<S: ByteSource>(
    source: &mut S,
    decoder: &mut FrameDecoder,
    store: &mut SampleStore,
    stats: &mut DecodeStats,
) {
    let Some(chunk) = source.poll() else {
        return;
    };
    if chunk.is_empty() {
        return;
    }

    stats.record_bytes(chunk.len());
    for outcome in decoder.feed(&chunk) {
        match outcome {
            Ok(sample) => {
                store.record(sample);
                stats.record_sample();
            }
            Err(err) => {
                log::debug!("dropping frame: {err}");
                stats.record_malformed();
            }
        }
    }
}
