//! Discord-facing layer: routes incoming messages to the command handler and
//! renders its replies with serenity's builders. All reply sending and
//! operator logging happens here; the handler itself stays side-effect-free.

use anyhow::Result;
use chrono::Utc;
use serenity::all::{Colour, Context, EventHandler, Message, Ready};
use serenity::async_trait;
use serenity::builder::{CreateAttachment, CreateEmbed, CreateEmbedFooter, CreateMessage};
use tracing::{error, info};

use crate::advisory::kst;
use crate::command_handler::{CommandError, CommandHandler, Invocation};
use crate::reply::{Reply, ATTRIBUTION, LIST_FOOTER};

pub const COMMAND_PREFIX: char = '!';

const EMBED_BLUE: Colour = Colour(0x3498DB);
const EMBED_GREEN: Colour = Colour(0x2ECC71);

// zero-width-space field name renders as a bare separator line
const SEPARATOR_FIELD_NAME: &str = "\u{200B}";
const SINGLE_SEPARATOR: &str = "------------";
const LIST_SEPARATOR: &str = "-----";

/// Maps a raw message to an invocation. Anything that is not a recognized
/// `!`-prefixed command yields `None` and gets no reply; surplus arguments
/// are ignored.
pub fn parse_invocation(content: &str) -> Option<Invocation> {
    let stripped = content.strip_prefix(COMMAND_PREFIX)?;
    let mut parts = stripped.split_whitespace();

    match parts.next()? {
        "가격" | "주화" | "손익" => Some(Invocation::DefaultLookup),
        "maple" => Some(Invocation::Exchange {
            world: parts.next().map(str::to_string),
            grade: parts.next().map(str::to_string),
        }),
        _ => None,
    }
}

pub struct ExchangeBot {
    handler: CommandHandler,
}

impl ExchangeBot {
    pub fn new(handler: CommandHandler) -> Self {
        Self { handler }
    }

    async fn dispatch(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let Some(invocation) = parse_invocation(&msg.content) else {
            return Ok(());
        };

        let now_kst = Utc::now().with_timezone(&kst());

        match self.handler.handle(invocation, now_kst).await {
            Ok(reply) => send_reply(ctx, msg, reply).await,
            Err(err) => {
                if let CommandError::Internal(source) = &err {
                    error!("command '{}' failed: {source:#}", msg.content);
                }
                msg.channel_id.say(&ctx.http, err.to_string()).await?;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl EventHandler for ExchangeBot {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(err) = self.dispatch(&ctx, &msg).await {
            error!("failed to handle '{}': {err:#}", msg.content);
            let _ = msg.channel_id.say(&ctx.http, format!("오류 발생: {err}")).await;
        }
    }
}

async fn send_reply(ctx: &Context, msg: &Message, reply: Reply) -> Result<()> {
    match reply {
        Reply::Single(single) => {
            let embed = CreateEmbed::new()
                .title(&single.title)
                .description(&single.description)
                .colour(EMBED_BLUE)
                .field(SEPARATOR_FIELD_NAME, SINGLE_SEPARATOR, false)
                .field("날짜", &single.date, false)
                .field("가격", &single.price_line, false)
                .footer(CreateEmbedFooter::new(ATTRIBUTION))
                .thumbnail(single.thumbnail.attachment_url())
                .image(single.image.attachment_url());

            let files = vec![
                CreateAttachment::path(&single.thumbnail.path).await?,
                CreateAttachment::path(&single.image.path).await?,
            ];

            msg.channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(embed).add_files(files))
                .await?;
        }
        Reply::List(list) => {
            let mut embed = CreateEmbed::new().title(&list.title).colour(EMBED_GREEN);

            for block in &list.blocks {
                embed = embed
                    .field(&block.header, &block.break_even, false)
                    .field(SEPARATOR_FIELD_NAME, LIST_SEPARATOR, false)
                    .field("날짜", &block.date, false)
                    .field("가격", &block.price_line, false);
            }

            embed = embed.footer(CreateEmbedFooter::new(LIST_FOOTER));

            msg.channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(embed))
                .await?;
        }
    }

    Ok(())
}
