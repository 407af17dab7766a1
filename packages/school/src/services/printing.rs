//! Console printing demonstrations: the same six names written from three
//! tasks, once without coordination and once with a per-line lock.

use std::io::Write;
use std::sync::{Arc, Mutex};

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use crate::error::AppError;
use crate::repository::StudentRepository;

/// Names needed by the printing demonstrations.
pub const REQUIRED_STUDENTS: usize = 6;

/// Destination of printed fragments.
pub trait LineSink: Send + Sync {
    fn write(&self, fragment: &str);
}

/// Writes to the process stdout.
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write(&self, fragment: &str) {
        if let Err(e) = write_fragment(&mut std::io::stdout(), fragment) {
            warn!("Failed to write to stdout: {e}");
        }
    }
}

fn write_fragment(out: &mut impl Write, fragment: &str) -> std::io::Result<()> {
    out.write_all(fragment.as_bytes())?;
    out.flush()
}

/// Collects output in memory.
#[derive(Default)]
pub struct MemorySink {
    buf: Mutex<String>,
}

impl MemorySink {
    pub fn contents(&self) -> String {
        self.buf.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl LineSink for MemorySink {
    fn write(&self, fragment: &str) {
        if let Ok(mut buf) = self.buf.lock() {
            buf.push_str(fragment);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrintMode {
    Parallel,
    Synchronized,
}

#[derive(Clone)]
pub struct PrintingService {
    db: DatabaseConnection,
    sink: Arc<dyn LineSink>,
    lock: Arc<AsyncMutex<()>>,
}

impl PrintingService {
    pub fn new(db: DatabaseConnection, sink: Arc<dyn LineSink>) -> Self {
        Self {
            db,
            sink,
            lock: Arc::new(AsyncMutex::new(())),
        }
    }

    /// Print the first six student names and return the confirmation text.
    pub async fn print(&self, mode: PrintMode) -> Result<&'static str, AppError> {
        info!(?mode, "Printing student names");
        let names = StudentRepository::new(&self.db).names().await?;
        if names.len() < REQUIRED_STUDENTS {
            return Err(AppError::InsufficientStudents {
                required: REQUIRED_STUDENTS,
                found: names.len(),
            });
        }

        print_names(&self.sink, &self.lock, mode, &names[..REQUIRED_STUDENTS]).await?;

        Ok(match mode {
            PrintMode::Parallel => "Students printed in parallel mode",
            PrintMode::Synchronized => "Students printed in synchronized mode",
        })
    }
}

/// Names 0-1 from the caller, 2-3 and 4-5 from two spawned tasks.
async fn print_names(
    sink: &Arc<dyn LineSink>,
    lock: &Arc<AsyncMutex<()>>,
    mode: PrintMode,
    names: &[String],
) -> Result<(), AppError> {
    for name in &names[0..2] {
        print_line(sink, lock, mode, "Main Thread", name).await;
    }

    let tasks = [("Parallel Thread 1", &names[2..4]), ("Parallel Thread 2", &names[4..6])]
        .map(|(label, chunk)| {
            let sink = Arc::clone(sink);
            let lock = Arc::clone(lock);
            let chunk = chunk.to_vec();
            tokio::spawn(async move {
                for name in &chunk {
                    print_line(&sink, &lock, mode, label, name).await;
                }
            })
        });

    for task in tasks {
        task.await
            .map_err(|e| AppError::Internal(format!("Printing task failed: {e}")))?;
    }
    Ok(())
}

async fn print_line(
    sink: &Arc<dyn LineSink>,
    lock: &AsyncMutex<()>,
    mode: PrintMode,
    label: &str,
    name: &str,
) {
    match mode {
        PrintMode::Parallel => {
            sink.write(label);
            tokio::task::yield_now().await;
            sink.write(&format!(": {name}"));
            sink.write("\n");
        }
        PrintMode::Synchronized => {
            let _guard = lock.lock().await;
            sink.write(&format!("{label}: {name}\n"));
        }
    }
}
