use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_timing::{Builder, Histogram};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use std::cell::RefCell;
use anyhow::{Context, Result};

/// Upper bound for recorded durations (one minute, in nanoseconds)
const HISTOGRAM_MAX_NS: u64 = 60_000_000_000;
const HISTOGRAM_SIGFIG: u8 = 3;

// Define categories for different types of operations
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Training,
    Evaluation,
    TableUpdate,
    FileIO {
        subcategory: FileIOType,
    },
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    QTableSave,
    QTableLoad,
    TextDump,
    MetricsExport,
    ConfigLoad,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Training => "Training".to_string(),
            OperationCategory::Evaluation => "Evaluation".to_string(),
            OperationCategory::TableUpdate => "Table Update".to_string(),
            OperationCategory::FileIO { subcategory } => {
                format!("File I/O - {}", match subcategory {
                    FileIOType::QTableSave => "Q-Table Save",
                    FileIOType::QTableLoad => "Q-Table Load",
                    FileIOType::TextDump => "Text Dump",
                    FileIOType::MetricsExport => "Metrics Export",
                    FileIOType::ConfigLoad => "Config Load",
                })
            },
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref HIERARCHICAL_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize, Vec<String>)>>> = Arc::new(RwLock::new(HashMap::new()));
}

/// Records the elapsed time of the enclosing scope when dropped
pub struct TimingGuard {
    function_name: &'static str,
    category: OperationCategory,
    start: Instant,
    active: bool,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if self.active {
            record_timing_end(self.function_name, self.start.elapsed(), &self.category);
        }
    }
}

pub fn start_timing(function_name: &'static str, category: OperationCategory) -> TimingGuard {
    let active = is_timing_enabled();
    if active {
        TIMING_STACK.with(|stack| stack.borrow_mut().push(function_name.to_string()));
    }

    TimingGuard {
        function_name,
        category,
        start: Instant::now(),
        active,
    }
}

fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, HISTOGRAM_SIGFIG).ok()
}

fn record_into<K>(map: &RwLock<HashMap<K, Histogram<u64>>>, key: K, duration_ns: u64)
where
    K: std::hash::Hash + Eq,
{
    let mut map = map.write();
    let histogram = match map.entry(key) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => match new_histogram() {
            Some(histogram) => entry.insert(histogram),
            None => return,
        },
    };
    // Values beyond the upper bound are dropped
    let _ = histogram.record(duration_ns.max(1));
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    let duration_ns = duration.as_nanos().min(u64::MAX as u128) as u64;

    // Pop from timing stack and note the caller
    TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.pop().is_some() {
            let mut hierarchical = HIERARCHICAL_TIMINGS.write();
            let entry = hierarchical
                .entry(function_name.to_string())
                .or_insert((Duration::from_nanos(0), 0, Vec::new()));

            entry.0 += duration;
            entry.1 += 1;

            if let Some(parent_name) = stack.last() {
                if !entry.2.contains(parent_name) {
                    entry.2.push(parent_name.clone());
                }
            }
        }
    });

    record_into(&FUNCTION_TIMINGS, function_name.to_string(), duration_ns);
    record_into(&CATEGORY_TIMINGS, category.clone(), duration_ns);
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` is honoured; the crate itself logs at debug level when `debug` is set.
pub fn init_logging(enable_timing: bool, debug: bool) -> Result<()> {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let crate_level = if debug { "qbreakout=debug" } else { "qbreakout=info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive(crate_level.parse().context("invalid log directive")?);

    if enable_timing {
        let histogram = || {
            Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, HISTOGRAM_SIGFIG)
                .expect("histogram bounds are constant and valid")
        };

        let timing_layer = Builder::default().layer(histogram);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set up tracing subscriber")?;
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false));

        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set up tracing subscriber")?;
    }

    Ok(())
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    info!("Detailed Performance Report");

    let hierarchical = HIERARCHICAL_TIMINGS.read();
    let mut entries: Vec<_> = hierarchical.iter().collect();
    entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));

    for (function_name, (total_duration, count, parents)) in entries {
        let avg_duration = total_duration.div_f64(*count as f64);
        info!(
            "{}: total={:.2}s, count={}, avg={:.3}ms{}",
            function_name,
            total_duration.as_secs_f64(),
            count,
            avg_duration.as_secs_f64() * 1000.0,
            if !parents.is_empty() {
                format!(", called by: {}", parents.join(", "))
            } else {
                String::new()
            }
        );
    }

    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        let b_total = b.1.mean() * b.1.len() as f64;
        let a_total = a.1.mean() * a.1.len() as f64;
        b_total.partial_cmp(&a_total).unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_time: f64 = category_vec.iter()
        .map(|(_, hist)| hist.mean() * (hist.len() as f64))
        .sum();

    for (category, histogram) in category_vec {
        let category_total = histogram.mean() * (histogram.len() as f64);
        let percentage = if total_time > 0.0 { category_total / total_time * 100.0 } else { 0.0 };
        info!(
            "{}: {:.1}% of total time, mean={:.3}ms, p95={:.3}ms, p99={:.3}ms, count={}",
            category.as_str(),
            percentage,
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.value_at_quantile(0.99) as f64 / 1_000_000.0,
            histogram.len(),
        );
    }
}
