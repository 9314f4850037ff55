use std::path::Path;

use dotenv::dotenv;
use unisport_scrape::{
    CoursePage, CourseRef, IndexScraper, ScrapingContext, SessionTable,
    course_scraper::{extract_session_tables, fetch_course_pages},
    export::{write_csv, write_json},
};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::{error, info};

const CSV_EXPORT_PATH: &str = "unisport_courses.csv";
const JSON_EXPORT_PATH: &str = "unisport_courses.json";

async fn run_index_scrape_job(ctx: &ScrapingContext) -> anyhow::Result<Vec<CourseRef>> {
    let mut index_scraper = IndexScraper::new(ctx.config.index_url().to_string());
    index_scraper
        .scrape(&ctx.request_client, &ctx.config.selectors)
        .await?;
    info!("index page lists {} courses", index_scraper.course_refs.len());
    Ok(index_scraper.course_refs)
}

async fn run_course_pages_fetch_job(
    ctx: &ScrapingContext,
    course_refs: &[CourseRef],
) -> Vec<CoursePage> {
    fetch_course_pages(&ctx.request_client, ctx.config.base_url(), course_refs).await
}

fn run_session_extraction_job(ctx: &ScrapingContext, pages: &[CoursePage]) -> Vec<SessionTable> {
    extract_session_tables(pages, &ctx.config.selectors, ctx.config.currency_marker)
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let ctx = match ScrapingContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("failed to set up scraping context: {e:#}");
            std::process::exit(1);
        }
    };

    // Nothing downstream is meaningful without the index, so a failure
    // here aborts the run.
    let course_refs = match run_index_scrape_job(&ctx).await {
        Ok(course_refs) => course_refs,
        Err(e) => {
            error!("index scrape failed: {e:#}");
            std::process::exit(1);
        }
    };

    let pages = run_course_pages_fetch_job(&ctx, &course_refs).await;
    let tables = run_session_extraction_job(&ctx, &pages);

    let dataset = match SessionTable::concat(tables) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("aggregation failed: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "extracted {} session records from {} course pages",
        dataset.len(),
        pages.len()
    );

    if let Err(e) = write_csv(&dataset, Path::new(CSV_EXPORT_PATH)) {
        error!("csv export failed: {e:#}");
    }
    if let Err(e) = write_json(&dataset, Path::new(JSON_EXPORT_PATH)) {
        error!("json export failed: {e:#}");
    }
}
