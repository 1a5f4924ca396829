//! ConverterService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use converter_types::{
        ConversionError, ConversionRecord, CurrencyCode, HistoryRepository, RateError,
        RateSource, RecordId, RepoError,
    };

    use crate::ConverterService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        records: Mutex<Vec<ConversionRecord>>,
        fail_with: Option<RepoError>,
        report_none: bool,
        inserts: AtomicUsize,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail_with: None,
                report_none: false,
                inserts: AtomicUsize::new(0),
            }
        }

        pub fn with_records(records: Vec<ConversionRecord>) -> Self {
            let repo = Self::new();
            *repo.records.lock().unwrap() = records;
            repo
        }

        pub fn failing(err: RepoError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::new()
            }
        }

        /// Answers `query_recent` with `None`, like an empty document cursor.
        pub fn reporting_none() -> Self {
            Self {
                report_none: true,
                ..Self::new()
            }
        }

        pub fn insert_count(&self) -> usize {
            self.inserts.load(Ordering::SeqCst)
        }

        pub fn stored(&self) -> Vec<ConversionRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HistoryRepository for MockRepo {
        async fn insert(&self, record: &ConversionRecord) -> Result<(), RepoError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.inserts.fetch_add(1, Ordering::SeqCst);
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn query_recent(
            &self,
            limit: i64,
        ) -> Result<Option<Vec<ConversionRecord>>, RepoError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            if self.report_none {
                return Ok(None);
            }
            let mut records = self.records.lock().unwrap().clone();
            records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            records.truncate(limit as usize);
            Ok(Some(records))
        }

        async fn query_by_currency(
            &self,
            currency: &CurrencyCode,
        ) -> Result<Vec<ConversionRecord>, RepoError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let mut records: Vec<_> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.target_currency == currency)
                .cloned()
                .collect();
            records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            Ok(records)
        }
    }

    /// Rate source that always answers the same way.
    pub struct FixedRates(pub Result<f64, RateError>);

    #[async_trait]
    impl RateSource for FixedRates {
        async fn get_rate(&self, _currency: &CurrencyCode) -> Result<f64, RateError> {
            self.0.clone()
        }
    }

    /// Rate source that never answers.
    struct StalledRates;

    #[async_trait]
    impl RateSource for StalledRates {
        async fn get_rate(&self, _currency: &CurrencyCode) -> Result<f64, RateError> {
            std::future::pending().await
        }
    }

    /// History store whose calls never complete.
    struct StalledRepo;

    #[async_trait]
    impl HistoryRepository for StalledRepo {
        async fn insert(&self, _record: &ConversionRecord) -> Result<(), RepoError> {
            std::future::pending().await
        }

        async fn query_recent(
            &self,
            _limit: i64,
        ) -> Result<Option<Vec<ConversionRecord>>, RepoError> {
            std::future::pending().await
        }

        async fn query_by_currency(
            &self,
            _currency: &CurrencyCode,
        ) -> Result<Vec<ConversionRecord>, RepoError> {
            std::future::pending().await
        }
    }

    fn stalled_store_service() -> ConverterService<StalledRepo, FixedRates> {
        ConverterService::new(StalledRepo, FixedRates(Ok(5.0)))
            .with_dependency_timeout(Duration::from_millis(20))
    }

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn record_at(currency: &str, rate: f64, minute: u32) -> ConversionRecord {
        ConversionRecord::from_parts(
            RecordId::new(),
            code(currency),
            rate,
            100.0,
            100.0 / rate,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap(),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // convert
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_success() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(5.0)));

        let result = service.convert(&code("USD"), 100.0).await.unwrap();

        assert_eq!(result, 20.0);
        assert_eq!(service.repo().insert_count(), 1);

        let stored = service.repo().stored();
        assert_eq!(stored[0].target_currency, code("USD"));
        assert_eq!(stored[0].rate, 5.0);
        assert_eq!(stored[0].input_amount, 100.0);
        assert_eq!(stored[0].converted_amount, 20.0);
    }

    #[tokio::test]
    async fn test_convert_negative_amount_is_accepted() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(4.0)));

        let result = service.convert(&code("EUR"), -8.0).await.unwrap();

        assert_eq!(result, -2.0);
        assert_eq!(service.repo().insert_count(), 1);
    }

    #[tokio::test]
    async fn test_convert_zero_rate_fails_without_insert() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(0.0)));

        let result = service.convert(&code("BTC"), 100.0).await;

        assert!(matches!(result, Err(ConversionError::InvalidRate(r)) if r == 0.0));
        assert_eq!(service.repo().insert_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_negative_rate_fails() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(-1.0)));

        let result = service.convert(&code("USD"), 100.0).await;

        assert!(matches!(result, Err(ConversionError::InvalidRate(_))));
        assert_eq!(service.repo().insert_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_unknown_currency() {
        let service = ConverterService::new(
            MockRepo::new(),
            FixedRates(Err(RateError::UnknownCurrency("XYZ".into()))),
        );

        let result = service.convert(&code("XYZ"), 100.0).await;

        assert!(matches!(result, Err(ConversionError::UnknownCurrency(ref c)) if c == "XYZ"));
        assert_eq!(service.repo().insert_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_provider_failure_propagates() {
        let service = ConverterService::new(
            MockRepo::new(),
            FixedRates(Err(RateError::Unavailable("api_error".into()))),
        );

        let result = service.convert(&code("EUR"), 100.0).await;

        match result {
            Err(ConversionError::RateSource(err)) => {
                assert_eq!(err, RateError::Unavailable("api_error".into()))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(service.repo().insert_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_store_failure_is_persistence_failure() {
        let service = ConverterService::new(
            MockRepo::failing(RepoError::Database("disk full".into())),
            FixedRates(Ok(5.0)),
        );

        let result = service.convert(&code("USD"), 100.0).await;

        assert!(matches!(result, Err(ConversionError::PersistenceFailure)));
    }

    #[tokio::test]
    async fn test_convert_rejects_non_finite_amount() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(5.0)));

        let result = service.convert(&code("USD"), f64::NAN).await;

        assert!(matches!(result, Err(ConversionError::InvalidAmount(_))));
        assert_eq!(service.repo().insert_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_stalled_rate_source_times_out() {
        let service = ConverterService::new(MockRepo::new(), StalledRates)
            .with_dependency_timeout(Duration::from_millis(20));

        let result = service.convert(&code("USD"), 100.0).await;

        assert!(matches!(
            result,
            Err(ConversionError::RateSource(RateError::Unavailable(_)))
        ));
        assert_eq!(service.repo().insert_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_stalled_store_is_persistence_failure() {
        let service = stalled_store_service();

        let result = service.convert(&code("USD"), 100.0).await;

        assert!(matches!(result, Err(ConversionError::PersistenceFailure)));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // recent
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_recent_returns_records() {
        let repo = MockRepo::with_records(vec![
            record_at("USD", 5.0, 0),
            record_at("EUR", 6.0, 1),
        ]);
        let service = ConverterService::new(repo, FixedRates(Ok(1.0)));

        let records = service.recent().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].target_currency, code("EUR"));
        assert_eq!(records[1].target_currency, code("USD"));
    }

    #[tokio::test]
    async fn test_recent_caps_at_ten() {
        let records = (0..15).map(|m| record_at("USD", 5.0, m)).collect();
        let service = ConverterService::new(MockRepo::with_records(records), FixedRates(Ok(1.0)));

        let recent = service.recent().await.unwrap();

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].timestamp.format("%M").to_string(), "14");
    }

    #[tokio::test]
    async fn test_recent_with_custom_limit() {
        let records = (0..5).map(|m| record_at("USD", 5.0, m)).collect();
        let service = ConverterService::new(MockRepo::with_records(records), FixedRates(Ok(1.0)))
            .with_recent_limit(3);

        assert_eq!(service.recent().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_recent_empty_store() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(1.0)));

        let records = service.recent().await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_recent_none_is_normalized_to_empty() {
        let service = ConverterService::new(MockRepo::reporting_none(), FixedRates(Ok(1.0)));

        let records = service.recent().await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_recent_store_failure_propagates_unchanged() {
        let service = ConverterService::new(
            MockRepo::failing(RepoError::Database("mongo timeout".into())),
            FixedRates(Ok(1.0)),
        );

        let result = service.recent().await;

        match result {
            Err(ConversionError::Store(err)) => {
                assert_eq!(err, RepoError::Database("mongo timeout".into()))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recent_stalled_store_times_out() {
        let service = stalled_store_service();

        let result = service.recent().await;

        assert!(matches!(
            result,
            Err(ConversionError::Store(RepoError::Database(ref msg))) if msg.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn test_recent_is_idempotent() {
        let repo = MockRepo::with_records(vec![
            record_at("USD", 5.0, 0),
            record_at("EUR", 6.0, 1),
            record_at("JPY", 0.03, 2),
        ]);
        let service = ConverterService::new(repo, FixedRates(Ok(1.0)));

        let first = service.recent().await.unwrap();
        let second = service.recent().await.unwrap();

        assert_eq!(first, second);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // variation_for
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_variation_success() {
        let repo = MockRepo::with_records(vec![
            record_at("JPY", 30.0, 0),
            record_at("JPY", 33.0, 30),
        ]);
        let service = ConverterService::new(repo, FixedRates(Ok(1.0)));

        let variations = service.variation_for(&code("JPY")).await.unwrap();

        assert_eq!(variations.len(), 2);
        assert_eq!(variations[0].value_delta, 0.0);
        assert_eq!(variations[0].percent_delta, 0.0);
        assert_eq!(variations[1].value_delta, 3.0);
        assert_eq!(variations[1].percent_delta, 10.0);
    }

    #[tokio::test]
    async fn test_variation_ignores_other_currencies() {
        let repo = MockRepo::with_records(vec![
            record_at("USD", 4.0, 0),
            record_at("EUR", 100.0, 1),
            record_at("USD", 5.0, 2),
        ]);
        let service = ConverterService::new(repo, FixedRates(Ok(1.0)));

        let variations = service.variation_for(&code("USD")).await.unwrap();

        assert_eq!(variations.len(), 2);
        assert_eq!(variations[1].value_delta, 1.0);
        assert_eq!(variations[1].percent_delta, 25.0);
    }

    #[tokio::test]
    async fn test_variation_empty_history() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(1.0)));

        let variations = service.variation_for(&code("USD")).await.unwrap();

        assert!(variations.is_empty());
    }

    #[tokio::test]
    async fn test_variation_store_failure_propagates_unchanged() {
        let service = ConverterService::new(
            MockRepo::failing(RepoError::Database("db connection lost".into())),
            FixedRates(Ok(1.0)),
        );

        let result = service.variation_for(&code("USD")).await;

        match result {
            Err(ConversionError::Store(err)) => {
                assert_eq!(err, RepoError::Database("db connection lost".into()))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_variation_stalled_store_times_out() {
        let service = stalled_store_service();

        let result = service.variation_for(&code("USD")).await;

        assert!(matches!(
            result,
            Err(ConversionError::Store(RepoError::Database(ref msg))) if msg.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn test_converted_records_feed_variation() {
        let service = ConverterService::new(MockRepo::new(), FixedRates(Ok(5.0)));

        service.convert(&code("USD"), 100.0).await.unwrap();
        service.convert(&code("USD"), 50.0).await.unwrap();

        let variations = service.variation_for(&code("USD")).await.unwrap();

        assert_eq!(variations.len(), 2);
        assert!(variations.iter().all(|v| v.value_delta == 0.0));
    }
}
