//! Scene-sequence export over msgpack.

use crate::driver::Renderer;
use crate::scene::Scene;
use anyhow::Context;
use log::info;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// Leading document of the exported stream.
#[derive(Serialize)]
struct StreamHeader {
    version: u32,
    interval_ms: u64,
}

const STREAM_VERSION: u32 = 1;

/// A [`Renderer`] that streams each scene as one msgpack document to the
/// underlying writer, preceded by a header carrying the inter-frame interval
/// hint. A graphical backend consumes the stream to produce the final
/// animation artifact.
pub struct MsgpackSceneSink<W: Write> {
    writer: W,
    scenes: u64,
}

impl<W: Write> MsgpackSceneSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, scenes: 0 }
    }

    /// Number of scenes written so far.
    pub fn scenes_written(&self) -> u64 {
        self.scenes
    }
}

impl<W: Write> Renderer for MsgpackSceneSink<W> {
    fn begin(&mut self, interval: Duration) -> anyhow::Result<()> {
        let header = StreamHeader {
            version: STREAM_VERSION,
            interval_ms: interval.as_millis() as u64,
        };
        rmp_serde::encode::write(&mut self.writer, &header).context("writing stream header")
    }

    fn draw(&mut self, scene: &Scene) -> anyhow::Result<()> {
        rmp_serde::encode::write(&mut self.writer, scene)
            .with_context(|| format!("writing scene {}", scene.index))?;
        self.scenes += 1;
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.writer.flush().context("flushing scene stream")?;
        info!("exported {} scenes", self.scenes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Bounds;

    fn mkscene(index: usize) -> Scene {
        Scene {
            index,
            title: format!("Step: {index}"),
            bounds: Bounds::square(60.0),
            markers: Vec::new(),
            edges: Vec::new(),
            legend: Vec::new(),
        }
    }

    #[test]
    fn writes_header_then_scenes() {
        let mut buffer = Vec::new();
        let mut sink = MsgpackSceneSink::new(&mut buffer);
        sink.begin(Duration::from_millis(600)).unwrap();
        sink.draw(&mkscene(0)).unwrap();
        sink.draw(&mkscene(1)).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.scenes_written(), 2);
        assert!(!buffer.is_empty());

        // The header must round-trip at the head of the stream.
        let mut cursor = std::io::Cursor::new(&buffer);
        let header: (u32, u64) = rmp_serde::decode::from_read(&mut cursor).unwrap();
        assert_eq!(header, (STREAM_VERSION, 600));
    }

    #[test]
    fn identical_scenes_encode_identically() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        MsgpackSceneSink::new(&mut first).draw(&mkscene(7)).unwrap();
        MsgpackSceneSink::new(&mut second).draw(&mkscene(7)).unwrap();
        assert_eq!(first, second);
    }
}
