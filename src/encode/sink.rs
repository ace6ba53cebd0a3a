use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::RotaskResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before any frames are pushed.
#[derive(Debug, Clone, Copy)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in sequence order.
///
/// Ordering contract: `push_frame` is called in strictly increasing
/// `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RotaskResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RotaskResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RotaskResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RotaskResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RotaskResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RotaskResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_sink_captures_in_order() {
        let mut sink = InMemorySink::new();
        sink.begin(SinkConfig {
            width: 2,
            height: 2,
            fps: Fps::new(8, 1).unwrap(),
        })
        .unwrap();
        let frame = FrameRGBA {
            width: 2,
            height: 2,
            data: vec![0u8; 16],
            premultiplied: true,
        };
        sink.push_frame(FrameIndex(0), &frame).unwrap();
        sink.push_frame(FrameIndex(1), &frame).unwrap();
        sink.end().unwrap();
        assert_eq!(sink.frames().len(), 2);
        assert_eq!(sink.frames()[1].0, FrameIndex(1));
        assert_eq!(sink.config().unwrap().width, 2);
    }
}
