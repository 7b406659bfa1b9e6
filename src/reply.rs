use itertools::Itertools;
use thousands::Separable;

use crate::exchange_model::{records_for_world, ExchangeRecord, Grade, World};
use crate::valuation::{break_even_value, ValuationError};

pub const ATTRIBUTION: &str = "Data by 메애기 (https://meaegi.com)";
pub const LIST_FOOTER: &str = "**손익 계산보다 메포값이 낮으면 손해\n\nData by 메애기 (https://meaegi.com)**";

const BREAK_EVEN_HEADING: &str = "**손익 계산값**";
const BREAK_EVEN_DISCLAIMER: &str = "@@손익 계산값보다 메포값이 낮으면 손해@@";

/// An icon file sent along with the message and referenced from the embed
/// via an `attachment://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAttachment {
    pub path: String,
    pub filename: String,
}

impl IconAttachment {
    fn grade(grade: Grade) -> Self {
        Self {
            path: format!("./name/{}.png", grade.icon_slug()),
            filename: format!("{}.png", grade.icon_slug()),
        }
    }

    fn world(world: World) -> Self {
        Self {
            path: format!("./world/{}.png", world.icon_slug()),
            filename: format!("{}.png", world.icon_slug()),
        }
    }

    pub fn attachment_url(&self) -> String {
        format!("attachment://{}", self.filename)
    }
}

/// Embed content for one (world, grade) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleRecordReply {
    pub title: String,
    pub description: String,
    pub date: String,
    pub price_line: String,
    pub thumbnail: IconAttachment,
    pub image: IconAttachment,
}

/// One record's slice of a list embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBlock {
    pub header: String,
    pub break_even: String,
    pub date: String,
    pub price_line: String,
}

impl RecordBlock {
    fn new(header: String, record: &ExchangeRecord) -> Result<Self, ValuationError> {
        let value = break_even_value(record.price)?;

        Ok(Self {
            header,
            break_even: format!("{BREAK_EVEN_HEADING}\n{}", value.separate_with_commas()),
            date: record.date.clone(),
            price_line: format!("{} 메소", record.price.separate_with_commas()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordListReply {
    pub title: String,
    pub blocks: Vec<RecordBlock>,
}

/// What a successful command sends back, independent of the chat gateway.
/// Rendering into gateway message types happens at the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Single(SingleRecordReply),
    List(RecordListReply),
}

impl Reply {
    pub fn single_record(
        record: &ExchangeRecord,
        world: World,
        grade: Grade,
        advisory: Option<&str>,
    ) -> Result<Self, ValuationError> {
        let value = break_even_value(record.price)?;

        Ok(Reply::Single(SingleRecordReply {
            title: format!("{} 월드 {} 등급 토큰 교환 정보", record.world, record.name),
            description: format!(
                "{}{BREAK_EVEN_HEADING}\n{}\n\n{BREAK_EVEN_DISCLAIMER}",
                advisory.unwrap_or(""),
                value.separate_with_commas()
            ),
            date: record.date.clone(),
            price_line: format!("{} 메소", record.price.separate_with_commas()),
            thumbnail: IconAttachment::grade(grade),
            image: IconAttachment::world(world),
        }))
    }

    /// Every record of the snapshot, in snapshot order.
    pub fn full_report(records: &[ExchangeRecord]) -> Result<Self, ValuationError> {
        let blocks: Vec<RecordBlock> = records
            .iter()
            .map(|record| RecordBlock::new(format!("{} 월드 {} 등급", record.world, record.name), record))
            .try_collect()?;

        Ok(Reply::List(RecordListReply {
            title: "모든 서버의 토큰 교환 정보".to_string(),
            blocks,
        }))
    }

    /// One world's records, in snapshot order. A world without records yields
    /// a titled embed with no blocks.
    pub fn world_report(world: World, records: &[ExchangeRecord]) -> Result<Self, ValuationError> {
        let blocks: Vec<RecordBlock> = records_for_world(records, world)
            .into_iter()
            .map(|record| RecordBlock::new(format!("{} 등급", record.name), record))
            .try_collect()?;

        Ok(Reply::List(RecordListReply {
            title: format!("{world} 서버의 토큰 교환 정보"),
            blocks,
        }))
    }
}
