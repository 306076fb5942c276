use clap::Parser;
use libgen_scraper::config::Config;
use libgen_scraper::{BookRecord, LibgenClient, SearchColumn};
use std::path::PathBuf;

/// Search Library Genesis and print the matching books
#[derive(Parser, Debug)]
#[command(name = "libgen-scraper", version, about)]
struct Cli {
    /// Search term
    term: String,

    /// Column to search (def, title, author, series, publisher, year, identifier, ...)
    #[arg(short, long)]
    column: Option<SearchColumn>,

    /// Number of results to return
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,

    /// Mirror base URL, tried in the order given (overrides the config file)
    #[arg(short, long = "mirror")]
    mirrors: Vec<String>,

    /// Config file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print results as a JSON array
    #[arg(long)]
    json: bool,
}

fn print_record(index: usize, book: &BookRecord) {
    let field = |v: &Option<String>| v.as_deref().unwrap_or("-").trim().to_string();

    println!("[{}] {}", index + 1, field(&book.title));
    println!("    author:    {}", field(&book.author));
    if let Some(series) = &book.series {
        println!("    series:    {}", series.trim());
    }
    if let Some(edition) = &book.edition {
        println!("    edition:   {}", edition.trim());
    }
    if let Some(isbn) = &book.isbn {
        println!("    isbn:      {}", isbn.join(", "));
    }
    println!(
        "    publisher: {} ({})",
        field(&book.publisher),
        field(&book.year)
    );
    println!(
        "    file:      {} {}, {} pages, {}",
        field(&book.extension),
        field(&book.size),
        field(&book.pages),
        field(&book.language)
    );
    for mirror in &book.mirrors {
        println!("    mirror:    {}", mirror);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(),
    };

    let mirrors = if cli.mirrors.is_empty() {
        cfg.mirrors.clone()
    } else {
        cli.mirrors.clone()
    };
    let column = cli.column.unwrap_or(cfg.column);
    let count = cli.count.map(|n| n as usize).unwrap_or(cfg.results);

    let http = cfg.http.create_http_client()?;
    log::debug!("HTTP timeout: {}s", cfg.http.timeout_secs);

    let mut client = LibgenClient::new(http, mirrors).with_pacer(cfg.pacer());
    let books = client.search(&cli.term, column, count).await?;
    log::info!("Found {} book(s)", books.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else {
        for (i, book) in books.iter().enumerate() {
            print_record(i, book);
        }
    }

    Ok(())
}
