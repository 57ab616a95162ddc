//! Date-range export of diary records.
//!
//! This module walks a [`DateRange`](crate::models::DateRange), calls the remote
//! [`DiaryApi`](crate::client::DiaryApi) once per day (food, exercise) or once per
//! remote month window (weight), and turns the payloads into [`Record`](crate::models::Record)s
//! with a readable `date` column. The main entry point is [`Exporter`].

mod daily;
pub mod normalize;
mod throttle;
mod weight;

use crate::client::DiaryApi;
use crate::errors::AppResult;
use crate::models::{DataKind, DateRange, Record};
use daily::Daily;
use tracing::info;

// Re-export public API
pub use throttle::Throttle;

/// Records collected over a date range, with the columns they are written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBatch {
    pub records: Vec<Record>,
    pub fields: &'static [&'static str],
}

/// Runs the range fetch loops against a [`DiaryApi`], one call at a time.
pub struct Exporter<'a, A: DiaryApi + ?Sized> {
    api: &'a A,
    throttle: Throttle,
}

impl<'a, A: DiaryApi + ?Sized> Exporter<'a, A> {
    pub fn new(api: &'a A, throttle: Throttle) -> Self {
        Self { api, throttle }
    }

    /// Fetches the records of `kind` for every day in `range`.
    ///
    /// # Errors
    ///
    /// The first failing remote call or malformed payload aborts the export; no
    /// partial batch is returned.
    pub async fn export(&self, kind: DataKind, range: DateRange) -> AppResult<ExportBatch> {
        info!(
            data_kind = kind.display_name(),
            start = %range.start(),
            end = %range.end(),
            days = range.len_days(),
            "Starting export"
        );

        let batch = match kind {
            DataKind::Food => self.fetch_food(range).await?,
            DataKind::Exercise => self.fetch_exercises(range).await?,
            DataKind::Weight => self.fetch_weight(range).await?,
        };

        info!(
            data_kind = kind.display_name(),
            records = batch.records.len(),
            "Export fetched"
        );
        Ok(batch)
    }

    /// Food diary entries, one `food_entries.get` call per day.
    pub async fn fetch_food(&self, range: DateRange) -> AppResult<ExportBatch> {
        let records = daily::fetch_daily(self.api, range, self.throttle, Daily::Food).await?;
        Ok(ExportBatch {
            records,
            fields: DataKind::Food.schema(),
        })
    }

    /// Exercise diary entries, one `exercise_entries.get` call per day.
    pub async fn fetch_exercises(&self, range: DateRange) -> AppResult<ExportBatch> {
        let records =
            daily::fetch_daily(self.api, range, self.throttle, Daily::Exercise).await?;
        Ok(ExportBatch {
            records,
            fields: DataKind::Exercise.schema(),
        })
    }

    /// Weight readings, one `weights.get_month` call per remote month window.
    pub async fn fetch_weight(&self, range: DateRange) -> AppResult<ExportBatch> {
        let records = weight::fetch_weight(self.api, range, self.throttle).await?;
        Ok(ExportBatch {
            records,
            fields: DataKind::Weight.schema(),
        })
    }
}
