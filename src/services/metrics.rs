use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

use crate::error::AnnouncementError;

lazy_static! {
    pub static ref WRITES_COUNTER: CounterVec = register_counter_vec!(
        "announcements_writes_total",
        "Announcement mutations by operation and outcome",
        &["operation", "outcome"]
    ).unwrap();

    pub static ref READS_COUNTER: CounterVec = register_counter_vec!(
        "announcements_reads_total",
        "Announcement listings served, by view",
        &["view"]
    ).unwrap();
}

pub fn record_write<T>(operation: &str, result: &Result<T, AnnouncementError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    WRITES_COUNTER.with_label_values(&[operation, outcome]).inc();
}

pub fn record_read(view: &str) {
    READS_COUNTER.with_label_values(&[view]).inc();
}
