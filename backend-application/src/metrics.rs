use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events_created: AtomicU64,
    events_deleted: AtomicU64,
    bookings_created: AtomicU64,
    bookings_cancelled: AtomicU64,
    bookings_rejected_full: AtomicU64,
    external_redirects: AtomicU64,
    catalog_failures: AtomicU64,
    catalog_records_skipped: AtomicU64,
    consistency_faults: AtomicU64,
}

impl Metrics {
    pub fn record_event_created(&self) {
        self.events_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_deleted(&self) {
        self.events_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_booking(&self) {
        self.bookings_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancellation(&self) {
        self.bookings_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_full(&self) {
        self.bookings_rejected_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_external_redirect(&self) {
        self.external_redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_failure(&self) {
        self.catalog_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped_records(&self, count: usize) {
        self.catalog_records_skipped
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_consistency_fault(&self) {
        self.consistency_faults.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bookings_created(&self) -> u64 {
        self.bookings_created.load(Ordering::Relaxed)
    }

    pub fn catalog_failures(&self) -> u64 {
        self.catalog_failures.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let counters = [
            ("gatherly_events_created_total", &self.events_created),
            ("gatherly_events_deleted_total", &self.events_deleted),
            ("gatherly_bookings_created_total", &self.bookings_created),
            ("gatherly_bookings_cancelled_total", &self.bookings_cancelled),
            ("gatherly_bookings_rejected_full_total", &self.bookings_rejected_full),
            ("gatherly_external_redirects_total", &self.external_redirects),
            ("gatherly_catalog_failures_total", &self.catalog_failures),
            ("gatherly_catalog_records_skipped_total", &self.catalog_records_skipped),
            ("gatherly_consistency_faults_total", &self.consistency_faults),
        ];
        let mut out = String::new();
        for (name, counter) in counters {
            out.push_str(&format!(
                "# TYPE {name} counter\n{name} {}\n",
                counter.load(Ordering::Relaxed)
            ));
        }
        out
    }
}
