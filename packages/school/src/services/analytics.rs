use std::time::Instant;

use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::error::AppError;
use crate::repository::{FacultyRepository, StudentRepository};

/// Upper bound of the demonstration sums.
pub const SUM_LIMIT: i64 = 1_000_000;

const DEFAULT_LETTER: &str = "A";

#[derive(Clone)]
pub struct AnalyticsService {
    db: DatabaseConnection,
}

impl AnalyticsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upper-cased names starting with `letter` (case-insensitive), sorted.
    ///
    /// An absent letter means `A`. A blank one matches nothing.
    pub async fn names_starting_with(&self, letter: Option<&str>) -> Result<Vec<String>, AppError> {
        let prefix = letter.unwrap_or(DEFAULT_LETTER).trim().to_uppercase();
        info!(prefix, "Listing names by initial");
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let names = StudentRepository::new(&self.db).names().await?;
        Ok(filter_names(names, &prefix))
    }

    /// Mean student age computed in application code.
    pub async fn average_age(&self) -> Result<f64, AppError> {
        info!("Computing average age in application");
        let ages = StudentRepository::new(&self.db).ages().await?;
        Ok(mean(&ages))
    }

    /// Longest faculty name; the first by id wins ties. Empty without faculties.
    pub async fn longest_faculty_name(&self) -> Result<String, AppError> {
        info!("Finding longest faculty name");
        let faculties = FacultyRepository::new(&self.db).find_all().await?;
        Ok(longest(faculties.into_iter().map(|f| f.name)))
    }

    /// Sequential 32-bit accumulation, wrapping on overflow.
    pub fn original_sum(&self) -> i32 {
        timed("original", || wrapping_sum(SUM_LIMIT as i32))
    }

    /// Chunked 64-bit sum across worker threads.
    pub async fn optimized_sum(&self) -> Result<i64, AppError> {
        tokio::task::spawn_blocking(|| timed("optimized", || parallel_sum(SUM_LIMIT)))
            .await
            .map_err(|e| AppError::Internal(format!("Sum task failed: {e}")))?
    }

    pub fn math_sum(&self) -> i64 {
        timed("math", || closed_form_sum(SUM_LIMIT))
    }
}

fn filter_names(names: Vec<String>, prefix: &str) -> Vec<String> {
    let mut matched: Vec<String> = names
        .into_iter()
        .map(|n| n.to_uppercase())
        .filter(|n| n.starts_with(prefix))
        .collect();
    matched.sort();
    matched
}

fn mean(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}

fn longest(names: impl Iterator<Item = String>) -> String {
    names.fold(String::new(), |best, name| {
        if name.chars().count() > best.chars().count() {
            name
        } else {
            best
        }
    })
}

fn timed<T: std::fmt::Debug>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    info!(label, ?result, elapsed_us = start.elapsed().as_micros() as u64, "Sum computed");
    result
}

fn wrapping_sum(limit: i32) -> i32 {
    (1..=limit).fold(0i32, |acc, n| acc.wrapping_add(n))
}

fn parallel_sum(limit: i64) -> Result<i64, AppError> {
    let workers = std::thread::available_parallelism()
        .map(|n| n.get() as i64)
        .unwrap_or(1);
    let chunk = (limit + workers - 1) / workers;
    debug!(workers, chunk, "Splitting sum");

    crossbeam::thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let start = w * chunk + 1;
                let end = ((w + 1) * chunk).min(limit);
                s.spawn(move |_| (start..=end).sum::<i64>())
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join())
            .sum::<Result<i64, _>>()
    })
    .and_then(|r| r)
    .map_err(|_| AppError::Internal("Sum worker panicked".into()))
}

fn closed_form_sum(n: i64) -> i64 {
    n * (n + 1) / 2
}
