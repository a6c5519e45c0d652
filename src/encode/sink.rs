use std::path::PathBuf;

use anyhow::Context;

use crate::compose::frame::FrameRGBA;
use crate::foundation::error::{LayoutError, LayoutResult};

/// Configuration provided to a [`FrameSink`] before frames are pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl SinkConfig {
    /// Config matching `frame`.
    pub fn for_frame(frame: &FrameRGBA) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
        }
    }
}

/// Consumer of generated frames.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> LayoutResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, frame: &FrameRGBA) -> LayoutResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> LayoutResult<()>;
}

/// Hand a single frame to `sink` with a matching `begin` / `end`.
pub fn write_single(sink: &mut dyn FrameSink, frame: &FrameRGBA) -> LayoutResult<()> {
    sink.begin(SinkConfig::for_frame(frame))?;
    sink.push_frame(frame)?;
    sink.end()
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameRGBA>,
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
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> LayoutResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> LayoutResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> LayoutResult<()> {
        Ok(())
    }
}

/// Writes each pushed frame as a straight-alpha PNG at `path`.
#[derive(Debug)]
pub struct PngSink {
    path: PathBuf,
    cfg: Option<SinkConfig>,
    written: usize,
}

impl PngSink {
    /// Sink writing to `path`; parent directories are created on `begin`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cfg: None,
            written: 0,
        }
    }

    /// Frames written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngSink {
    fn begin(&mut self, cfg: SinkConfig) -> LayoutResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> LayoutResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| LayoutError::validation("PngSink::push_frame called before begin"))?;
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(LayoutError::validation(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let straight = frame.to_straight_rgba()?;
        image::save_buffer_with_format(
            &self.path,
            &straight,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", self.path.display()))?;
        self.written += 1;
        tracing::info!(path = %self.path.display(), "frame written");
        Ok(())
    }

    fn end(&mut self) -> LayoutResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
