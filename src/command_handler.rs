use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::advisory::refresh_advisory;
use crate::exchange_client::{ExchangeApi, FetchError};
use crate::exchange_model::{find_record, ExchangeRecord, Grade, World};
use crate::reply::Reply;
use crate::valuation::ValuationError;

/// One parsed command invocation, as produced by the gateway router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The `!가격`, `!주화`, `!손익` aliases: a normal-world gold-grade lookup.
    DefaultLookup,
    /// `!maple [world] [grade]`, both arguments optional and positional.
    Exchange {
        world: Option<String>,
        grade: Option<String>,
    },
}

/// Everything that can cut a command short. `Display` is the user-facing
/// reply text; `Internal` additionally gets logged at the dispatch boundary.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("오류: '{0}'는 유효한 서버명이 아닙니다.")]
    InvalidWorld(String),
    #[error("오류: '{0}'는 유효한 티어명이 아닙니다.")]
    InvalidGrade(String),
    #[error("API 요청에 실패했습니다.")]
    FetchFailed,
    #[error("{world} 월드의 {grade} 등급 토큰 정보를 찾을 수 없습니다.")]
    NotFound { world: World, grade: Grade },
    #[error("오류 발생: {0}")]
    Internal(anyhow::Error),
}

/// Decides the reply for each invocation: validate arguments, fetch the
/// snapshot, select records, compute the break-even value. Sending the reply
/// and logging happen at the gateway boundary, not here.
pub struct CommandHandler {
    api: Arc<dyn ExchangeApi>,
}

impl CommandHandler {
    pub fn new(api: Arc<dyn ExchangeApi>) -> Self {
        Self { api }
    }

    pub async fn handle(&self, invocation: Invocation, now_kst: DateTime<FixedOffset>) -> Result<Reply, CommandError> {
        match invocation {
            Invocation::DefaultLookup => self.single_lookup(World::Normal, Grade::Gold, now_kst).await,
            Invocation::Exchange { world, grade } => {
                // world is validated first; with two bad arguments only the
                // world error reaches the user
                let world = validate_world(world)?;
                let grade = validate_grade(grade)?;

                match (world, grade) {
                    (Some(world), Some(grade)) => self.single_lookup(world, grade, now_kst).await,
                    (Some(world), None) => {
                        let records = self.fetch().await?;
                        Reply::world_report(world, &records).map_err(internal)
                    }
                    // a grade cannot be passed without a world; the arguments
                    // are positional
                    (None, _) => {
                        let records = self.fetch().await?;
                        Reply::full_report(&records).map_err(internal)
                    }
                }
            }
        }
    }

    async fn single_lookup(&self, world: World, grade: Grade, now_kst: DateTime<FixedOffset>) -> Result<Reply, CommandError> {
        let advisory = refresh_advisory(now_kst);
        let records = self.fetch().await?;

        let record = find_record(&records, world, grade).ok_or(CommandError::NotFound { world, grade })?;

        Reply::single_record(record, world, grade, advisory).map_err(internal)
    }

    async fn fetch(&self) -> Result<Vec<ExchangeRecord>, CommandError> {
        self.api.fetch_all().await.map_err(|err| match err {
            FetchError::BadStatus(_) | FetchError::Transport(_) => CommandError::FetchFailed,
            FetchError::Decode(source) => CommandError::Internal(source),
        })
    }
}

fn validate_world(raw: Option<String>) -> Result<Option<World>, CommandError> {
    raw.map(|value| value.parse::<World>().map_err(|_| CommandError::InvalidWorld(value)))
        .transpose()
}

fn validate_grade(raw: Option<String>) -> Result<Option<Grade>, CommandError> {
    raw.map(|value| value.parse::<Grade>().map_err(|_| CommandError::InvalidGrade(value)))
        .transpose()
}

fn internal(err: ValuationError) -> CommandError {
    CommandError::Internal(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{kst, REFRESH_NOTICE};
    use crate::exchange_client::MockExchangeApi;
    use anyhow::anyhow;
    use chrono::TimeZone;
    use reqwest::StatusCode;

    fn record(world: &str, name: &str, price: u64, date: &str) -> ExchangeRecord {
        ExchangeRecord {
            world: world.to_string(),
            name: name.to_string(),
            price,
            date: date.to_string(),
        }
    }

    fn snapshot() -> Vec<ExchangeRecord> {
        vec![
            record("일반", "브론즈", 21, "2024-01-01"),
            record("일반", "골드", 87, "2024-01-01"),
            record("일반", "골드", 91, "2024-01-02"),
            record("리부트", "골드", 45, "2024-01-01"),
        ]
    }

    fn handler_returning(records: Vec<ExchangeRecord>) -> CommandHandler {
        let mut api = MockExchangeApi::new();
        api.expect_fetch_all().returning(move || Ok(records.clone()));
        CommandHandler::new(Arc::new(api))
    }

    fn exchange(world: Option<&str>, grade: Option<&str>) -> Invocation {
        Invocation::Exchange {
            world: world.map(str::to_string),
            grade: grade.map(str::to_string),
        }
    }

    fn afternoon() -> DateTime<FixedOffset> {
        kst().with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn invalid_world_short_circuits_without_fetching() {
        let mut api = MockExchangeApi::new();
        api.expect_fetch_all().never();
        let handler = CommandHandler::new(Arc::new(api));

        let result = handler.handle(exchange(Some("무효서버"), None), afternoon()).await;

        let err = result.unwrap_err();
        assert!(matches!(&err, CommandError::InvalidWorld(world) if world == "무효서버"));
        assert_eq!(err.to_string(), "오류: '무효서버'는 유효한 서버명이 아닙니다.");
    }

    #[tokio::test]
    async fn invalid_grade_short_circuits_without_fetching() {
        let mut api = MockExchangeApi::new();
        api.expect_fetch_all().never();
        let handler = CommandHandler::new(Arc::new(api));

        let result = handler.handle(exchange(Some("일반"), Some("무효등급")), afternoon()).await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "오류: '무효등급'는 유효한 티어명이 아닙니다.");
    }

    #[tokio::test]
    async fn world_error_wins_when_both_arguments_are_invalid() {
        let mut api = MockExchangeApi::new();
        api.expect_fetch_all().never();
        let handler = CommandHandler::new(Arc::new(api));

        let result = handler.handle(exchange(Some("무효서버"), Some("무효등급")), afternoon()).await;

        assert!(matches!(result.unwrap_err(), CommandError::InvalidWorld(_)));
    }

    #[tokio::test]
    async fn failed_fetch_becomes_the_generic_failure_reply() {
        let mut api = MockExchangeApi::new();
        api.expect_fetch_all()
            .returning(|| Err(FetchError::BadStatus(StatusCode::INTERNAL_SERVER_ERROR)));
        let handler = CommandHandler::new(Arc::new(api));

        let err = handler.handle(exchange(None, None), afternoon()).await.unwrap_err();

        assert!(matches!(err, CommandError::FetchFailed));
        assert_eq!(err.to_string(), "API 요청에 실패했습니다.");
    }

    #[tokio::test]
    async fn decode_failure_surfaces_through_the_catch_all() {
        let mut api = MockExchangeApi::new();
        api.expect_fetch_all()
            .returning(|| Err(FetchError::Decode(anyhow!("error decoding exchange snapshot"))));
        let handler = CommandHandler::new(Arc::new(api));

        let err = handler.handle(exchange(None, None), afternoon()).await.unwrap_err();

        assert!(matches!(err, CommandError::Internal(_)));
        assert!(err.to_string().starts_with("오류 발생: "));
    }

    #[tokio::test]
    async fn pair_lookup_uses_the_first_matching_record() {
        let handler = handler_returning(snapshot());

        let reply = handler
            .handle(exchange(Some("일반"), Some("골드")), afternoon())
            .await
            .unwrap();

        let Reply::Single(single) = reply else {
            panic!("expected a single-record reply")
        };
        // the snapshot holds two 일반/골드 rows; the earlier one (price 87) wins
        assert_eq!(single.date, "2024-01-01");
        assert!(single.description.contains("1,317"));
    }

    #[tokio::test]
    async fn pair_lookup_without_match_reports_the_missing_pair() {
        let handler = handler_returning(vec![record("일반", "골드", 87, "2024-01-01")]);

        let err = handler
            .handle(exchange(Some("리부트"), Some("다이아")), afternoon())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "리부트 월드의 다이아 등급 토큰 정보를 찾을 수 없습니다.");
    }

    #[tokio::test]
    async fn default_lookup_resolves_to_normal_gold() {
        let handler = handler_returning(snapshot());

        let reply = handler.handle(Invocation::DefaultLookup, afternoon()).await.unwrap();

        let Reply::Single(single) = reply else {
            panic!("expected a single-record reply")
        };
        assert_eq!(single.title, "일반 월드 골드 등급 토큰 교환 정보");
    }

    #[tokio::test]
    async fn default_lookup_not_found_names_normal_gold() {
        let handler = handler_returning(vec![record("리부트", "골드", 45, "2024-01-01")]);

        let err = handler.handle(Invocation::DefaultLookup, afternoon()).await.unwrap_err();

        assert_eq!(err.to_string(), "일반 월드의 골드 등급 토큰 정보를 찾을 수 없습니다.");
    }

    #[tokio::test]
    async fn lookup_in_the_refresh_window_carries_the_notice() {
        let handler = handler_returning(snapshot());
        let morning = kst().with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

        let reply = handler.handle(Invocation::DefaultLookup, morning).await.unwrap();

        let Reply::Single(single) = reply else {
            panic!("expected a single-record reply")
        };
        assert!(single.description.starts_with(REFRESH_NOTICE));
    }

    #[tokio::test]
    async fn bare_command_reports_every_record() {
        let handler = handler_returning(snapshot());

        let reply = handler.handle(exchange(None, None), afternoon()).await.unwrap();

        let Reply::List(list) = reply else {
            panic!("expected a list reply")
        };
        assert_eq!(list.title, "모든 서버의 토큰 교환 정보");
        assert_eq!(list.blocks.len(), 4);
    }

    #[tokio::test]
    async fn world_argument_restricts_the_report() {
        let handler = handler_returning(snapshot());

        let reply = handler.handle(exchange(Some("리부트"), None), afternoon()).await.unwrap();

        let Reply::List(list) = reply else {
            panic!("expected a list reply")
        };
        assert_eq!(list.title, "리부트 서버의 토큰 교환 정보");
        assert_eq!(list.blocks.len(), 1);
        assert_eq!(list.blocks[0].header, "골드 등급");
    }
}
