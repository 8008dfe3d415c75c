use std::path::Path;
use std::time::Instant;

use crate::filter::context::FilterContext;
use crate::filter::edge_filter::FrameFilter;
use crate::io::image_reader::ImageReader;
use crate::io::image_writer::ImageWriter;
use crate::pipeline::filter_logger::FilterLogger;

/// Single-image pipeline: read → filter → write.
///
/// Owns one [`FilterContext`], so repeated `execute` calls on
/// same-sized inputs reuse the scratch buffers.
pub struct FilterImageUseCase {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    filter: Box<dyn FrameFilter>,
    ctx: FilterContext,
}

impl FilterImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        filter: Box<dyn FrameFilter>,
    ) -> Self {
        Self {
            reader,
            writer,
            filter,
            ctx: FilterContext::new(),
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
        logger: &mut dyn FilterLogger,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let start = Instant::now();
        let mut frame = self.reader.read(input_path, 0)?;
        logger.timing("read", start.elapsed().as_secs_f64() * 1000.0);

        let start = Instant::now();
        {
            let mut view = frame.view_mut();
            self.filter.process(&mut view, &mut self.ctx);
        }
        logger.timing("filter", start.elapsed().as_secs_f64() * 1000.0);

        let start = Instant::now();
        self.writer.write(output_path, &frame)?;
        logger.timing("write", start.elapsed().as_secs_f64() * 1000.0);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ImageIoError;
    use crate::pipeline::filter_logger::{NullFilterLogger, StdoutFilterLogger};
    use crate::shared::frame::{Frame, FrameView};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubReader {
        frame: Frame,
    }

    impl ImageReader for StubReader {
        fn read(&self, _path: &Path, _index: usize) -> Result<Frame, ImageIoError> {
            Ok(self.frame.clone())
        }
    }

    struct FailingReader;

    impl ImageReader for FailingReader {
        fn read(&self, path: &Path, _index: usize) -> Result<Frame, ImageIoError> {
            Err(ImageIoError::Decode {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "missing",
                )),
            })
        }
    }

    struct StubWriter {
        written: Arc<Mutex<Vec<(PathBuf, Frame)>>>,
    }

    impl StubWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ImageWriter for StubWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), ImageIoError> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    /// Inverts the red channel so filtering is observable.
    struct InvertingFilter;

    impl FrameFilter for InvertingFilter {
        fn process(&self, frame: &mut FrameView<'_>, _ctx: &mut FilterContext) {
            for px in frame.data_mut().chunks_exact_mut(4) {
                px[0] = 255 - px[0];
            }
        }
    }

    fn make_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![128; (w * h * 4) as usize], w, h, 0)
    }

    // --- Tests ---

    #[test]
    fn test_filtered_frame_reaches_writer() {
        let writer = StubWriter::new();
        let written = writer.written.clone();

        let mut uc = FilterImageUseCase::new(
            Box::new(StubReader {
                frame: make_frame(10, 10),
            }),
            Box::new(writer),
            Box::new(InvertingFilter),
        );

        uc.execute(
            Path::new("in.png"),
            Path::new("out.png"),
            &mut NullFilterLogger,
        )
        .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("out.png"));
        assert_eq!(written[0].1.data()[0], 127, "filter ran before write");
    }

    #[test]
    fn test_output_dimensions_preserved() {
        let writer = StubWriter::new();
        let written = writer.written.clone();

        let mut uc = FilterImageUseCase::new(
            Box::new(StubReader {
                frame: make_frame(20, 15),
            }),
            Box::new(writer),
            Box::new(InvertingFilter),
        );

        uc.execute(
            Path::new("in.png"),
            Path::new("out.png"),
            &mut NullFilterLogger,
        )
        .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].1.width(), 20);
        assert_eq!(written[0].1.height(), 15);
    }

    #[test]
    fn test_reader_error_propagates_and_skips_write() {
        let writer = StubWriter::new();
        let written = writer.written.clone();

        let mut uc = FilterImageUseCase::new(
            Box::new(FailingReader),
            Box::new(writer),
            Box::new(InvertingFilter),
        );

        let result = uc.execute(
            Path::new("in.png"),
            Path::new("out.png"),
            &mut NullFilterLogger,
        );

        assert!(result.is_err());
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stage_timings_recorded() {
        let mut logger = StdoutFilterLogger::new(10);

        let mut uc = FilterImageUseCase::new(
            Box::new(StubReader {
                frame: make_frame(10, 10),
            }),
            Box::new(StubWriter::new()),
            Box::new(InvertingFilter),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png"), &mut logger)
            .unwrap();

        for stage in ["read", "filter", "write"] {
            assert_eq!(logger.timings_for(stage).unwrap().len(), 1);
        }
    }
}
