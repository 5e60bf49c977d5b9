// File: ./src/demo.rs
// Synthetic demo rows covering a contiguous window of days that ends yesterday.
use crate::model::Record;
use chrono::{Days, NaiveDate};

/// Builds `count` records dated `today - count` through `today - 1`, oldest first.
///
/// Ids run `1..=count`; the phone number ends in one random digit drawn from `rng`.
pub fn generate_records(today: NaiveDate, count: usize, rng: &mut fastrand::Rng) -> Vec<Record> {
    (0..count)
        .filter_map(|i| {
            let id = u32::try_from(i + 1).ok()?;
            let date = today.checked_sub_days(Days::new((count - i) as u64))?;
            Some(Record {
                id,
                name: format!("Demo Name {}", id),
                email: format!("demo{}@example.com", id),
                phone: format!("123-456-789{}", rng.u8(0..10)),
                date,
            })
        })
        .collect()
}
