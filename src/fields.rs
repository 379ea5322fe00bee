use crate::record::ProjectRecord;

/// Date lines in report order, each paired with the record field it reads.
const ORDER_DATES: &[(&str, &[&str])] = &[
    ("_Order received:_", &["details", "order_received"]),
    ("_Contract received:_", &["details", "contract_received"]),
    ("_Samples received:_", &["details", "samples_received"]),
    ("_Queue date:_", &["details", "queue_date"]),
    ("_All data delivered:_", &["project_summary", "all_samples_sequenced"]),
];

const REPORT_DATE: &str = "_Report date:_";

/// Distinct minimum read counts ordered across samples, e.g. `"30M, 50M"`.
///
/// Samples without `details.reads_min` are skipped. In rare cases different
/// pools were ordered with different amounts, hence more than one value.
pub fn ordered_reads(record: &ProjectRecord) -> String {
    let mut reads = Vec::<String>::new();
    for sample in record.samples() {
        let Some(reads_min) = sample.reads_min() else {
            tracing::debug!(sample = sample.id(), "no reads_min, skipping");
            continue;
        };
        let formatted = format!("{reads_min}M");
        if !reads.contains(&formatted) {
            reads.push(formatted);
        }
    }
    reads.join(", ")
}

/// Human-readable project milestones, only listing the ones that are known.
pub fn order_dates(record: &ProjectRecord, creation_date: Option<&str>) -> String {
    let mut dates = ORDER_DATES
        .iter()
        .filter_map(|(label, path)| {
            record
                .present_text(path)
                .map(|value| format!("{label} {value}"))
        })
        .collect::<Vec<_>>();
    if let Some(date) = creation_date.filter(|date| !date.is_empty()) {
        dates.push(format!("{REPORT_DATE} {date}"));
    }
    dates.join(", ")
}
