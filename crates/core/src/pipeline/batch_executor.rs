use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::filter::context::FilterContext;
use crate::filter::edge_filter::FrameFilter;
use crate::io::image_reader::{ImageFileReader, ImageReader};
use crate::io::image_writer::{ImageFileWriter, ImageWriter};
use crate::io::ImageIoError;
use crate::pipeline::filter_logger::FilterLogger;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// One unit of work: filter `input` into `output`.
#[derive(Clone, Debug)]
pub struct FilterJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Error, Debug)]
#[error("{input}: {source}")]
pub struct BatchError {
    pub input: PathBuf,
    #[source]
    pub source: ImageIoError,
}

/// Runs filter jobs across a fixed pool of worker threads.
///
/// Layout: `feeder → workers → main [progress/errors]`. Each worker
/// owns its own [`FilterContext`], so scratch reuse needs no locking;
/// the filter itself is shared immutably. A failing job does not stop
/// the batch; remaining jobs drain and the first error is reported.
pub struct BatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl BatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn execute(
        &self,
        jobs: Vec<FilterJob>,
        filter: Arc<dyn FrameFilter>,
        logger: &mut dyn FilterLogger,
    ) -> Result<(), BatchError> {
        let total = jobs.len();
        if total == 0 {
            return Ok(());
        }

        let (job_tx, job_rx) =
            crossbeam_channel::bounded::<(usize, FilterJob)>(self.channel_capacity);
        let (done_tx, done_rx) =
            crossbeam_channel::bounded::<Result<usize, BatchError>>(self.channel_capacity);

        let feeder = thread::spawn(move || {
            for job in jobs.into_iter().enumerate() {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        let mut workers = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            let job_rx = job_rx.clone();
            let done_tx = done_tx.clone();
            let filter = Arc::clone(&filter);
            workers.push(thread::spawn(move || {
                let reader = ImageFileReader::new();
                let writer = ImageFileWriter::new();
                let mut ctx = FilterContext::new();
                for (index, job) in job_rx.iter() {
                    let result = run_job(&reader, &writer, &*filter, &mut ctx, index, &job)
                        .map(|_| index)
                        .map_err(|source| BatchError {
                            input: job.input,
                            source,
                        });
                    if done_tx.send(result).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(job_rx);
        drop(done_tx);

        let mut first_error: Option<BatchError> = None;
        let mut done = 0usize;
        for result in done_rx.iter() {
            done += 1;
            logger.progress(done, total);
            if let Err(e) = result {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        let _ = feeder.join();
        for handle in workers {
            let _ = handle.join();
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for BatchExecutor {
    fn default() -> Self {
        let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self::new(workers)
    }
}

fn run_job(
    reader: &dyn ImageReader,
    writer: &dyn ImageWriter,
    filter: &dyn FrameFilter,
    ctx: &mut FilterContext,
    index: usize,
    job: &FilterJob,
) -> Result<(), ImageIoError> {
    let mut frame = reader.read(&job.input, index)?;
    {
        let mut view = frame.view_mut();
        filter.process(&mut view, ctx);
    }
    writer.write(&job.output, &frame)
}
