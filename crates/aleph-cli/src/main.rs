//! Aleph demo driver
//!
//! Loads an HTML snapshot for a page URL, runs one engine session over it,
//! and reports which elements were flipped right-to-left.

use std::fs;

use anyhow::{Context, Result};
use aleph_engine::{JsonStore, Session, reconcile};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(url)) = (args.next(), args.next()) else {
        eprintln!("usage: aleph <snapshot.html> <page-url>");
        std::process::exit(2);
    };

    let html = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let document = aleph_html::parse(&html, &url);

    let store = JsonStore::open("aleph-prefs.json");
    let mut session = Session::new(document, store);
    tracing::info!(
        "aleph v{} on {} ({})",
        aleph_engine::VERSION,
        url,
        if session.enabled() { "enabled" } else { "disabled" }
    );
    session.bootstrap(0);

    let tree = session.document().tree();
    let flipped = reconcile::rtl_nodes(tree);
    println!(
        "{} adapter: {} element(s) aligned right-to-left",
        session.site().name(),
        flipped.len()
    );
    for id in &flipped {
        let tag = tree.tag_name(*id).unwrap_or("?");
        let text = tree.text_content(*id);
        let snippet: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let snippet: String = snippet.chars().take(48).collect();
        println!("  <{tag}> {snippet}");
    }

    Ok(())
}
