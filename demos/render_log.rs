use aoc_leaderboard_log::{
    run, AocClient, FileStorage, HtmlPage, PageLocation, RenderOptions, SystemClock,
};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};

/// Usage: `AOC_SESSION=<cookie> cargo run --example render_log -- <leaderboard url>`
///
/// Prints the leaderboard page with the activity log appended.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .ok_or("usage: render_log <private leaderboard url>")?;
    let session = std::env::var("AOC_SESSION")?;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(&format!("session={session}"))?);
    let http = reqwest::Client::builder().default_headers(headers).build()?;
    let client = AocClient::with_client(http);

    let page = PageLocation::parse(&url)?;
    let mut storage = FileStorage::new(std::env::temp_dir().join("aoc-leaderboard-log"));
    let mut html = HtmlPage::new(client.get_page_source(page.path()).await?);

    run(
        &page,
        &mut storage,
        &SystemClock,
        &client,
        &RenderOptions::default(),
        &mut html,
    )
    .await?;

    println!("{}", html.into_source());
    Ok(())
}
