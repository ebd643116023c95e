mod cli;


use crate::cli::{Cli, Command, ListArgs};
use anyhow::Context;
use serde::Serialize;
use sqd_pagination::db::{Database, DatabaseSettings};
use sqd_pagination::{decode_page_token, encode_page_token, Order, Pagination, Visit};
use std::io::Write;
use tracing::info;


const DEFAULT_PAGE_LIMIT: usize = 100;


#[derive(Serialize)]
struct RecordLine {
    key: String,
    value: String
}


#[derive(Serialize)]
struct PageFooter<'a> {
    next_page: Option<String>,
    page: &'a Pagination
}


fn init_logging(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV)
            .unwrap_or("info".to_string()),
    );

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}


fn database_settings(args: &Cli) -> anyhow::Result<DatabaseSettings> {
    let cache_size = args.cache_size.checked_mul(1024 * 1024)
        .context("cache size is too large")?;

    let block_size = args.block_size.checked_mul(1024)
        .context("block size is too large")?;

    let settings = DatabaseSettings::default()
        .with_cache_size(cache_size)
        .with_block_size(block_size);

    Ok(match &args.command {
        Command::Put { bucket, .. } => settings.with_bucket(bucket.as_str()),
        // listing a mistyped path must not leave an empty database behind
        Command::List(_) => settings.with_create_if_missing(false)
    })
}


fn build_page(args: &ListArgs) -> anyhow::Result<Pagination> {
    let page = if let Some(token) = args.page_token.as_deref() {
        let prev = decode_page_token(token)?;
        prev.next_page(
            args.limit.unwrap_or(prev.limit),
            args.order.map(Order::from).unwrap_or(prev.order)
        )
    } else {
        let from = match args.from.as_deref() {
            Some(key) if args.hex => Some(
                hex::decode(key).context("--from is not a valid hex string")?
            ),
            Some(key) => Some(key.as_bytes().to_vec()),
            None => None
        };
        Pagination::new(
            from,
            args.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            args.order.map(Order::from).unwrap_or(Order::Ascending)
        ).with_exclude_first(!args.inclusive)
    };
    Ok(page)
}


fn display_bytes(bytes: &[u8], as_hex: bool) -> String {
    if as_hex {
        hex::encode(bytes)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}


fn list(db: &Database, args: &ListArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut page = build_page(args)?;

    let snapshot = db.snapshot();
    snapshot.paginate(&args.bucket, &mut page, |key, value| {
        let line = RecordLine {
            key: display_bytes(&key, args.hex),
            value: display_bytes(&value, args.hex)
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
        Ok(Visit::Accept)
    })?;

    let footer = PageFooter {
        next_page: page.has_next_page().then(|| encode_page_token(&page)),
        page: &page
    };
    serde_json::to_writer(&mut *out, &footer)?;
    writeln!(out)?;
    Ok(())
}


fn main() -> anyhow::Result<()> {
    let args = <Cli as clap::Parser>::parse();

    init_logging(args.json_log);

    let db = database_settings(&args)?.open(&args.database_dir)?;

    match &args.command {
        Command::Put { bucket, key, value } => {
            db.put(bucket, key.as_bytes(), value.as_bytes())?;
            info!(bucket = %bucket, key = %key, "record written");
        },
        Command::List(list_args) => list(&db, list_args, &mut std::io::stdout().lock())?
    }

    Ok(())
}
