use std::env;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use menurec_core::config::{resolve_with_base, Config, Settings};
use menurec_core::records::{load_catalog, load_history};
use menurec_core::types::CatalogItem;
use menurec_recommend::ContentRecommender;
use menurec_vector::FileModelStore;

const USAGE: &str = "<recommend|rebuild|inspect> [--top N] [--catalog PATH] [--history PATH]";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Recommend,
    Rebuild,
    Inspect,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    top: Option<usize>,
    catalog: Option<PathBuf>,
    history: Option<PathBuf>,
}

fn parse_args(mut args: Vec<String>) -> Result<Args, String> {
    if args.is_empty() { return Err("missing command".to_string()); }
    let command = match args.remove(0).as_str() {
        "recommend" => Command::Recommend,
        "rebuild" => Command::Rebuild,
        "inspect" => Command::Inspect,
        other => return Err(format!("Unknown command: {}", other)),
    };
    let mut parsed = Args { command, top: None, catalog: None, history: None };
    let mut it = args.into_iter();
    while let Some(flag) = it.next() {
        let value = it.next().ok_or_else(|| format!("{} needs a value", flag))?;
        match flag.as_str() {
            "--top" => parsed.top = Some(value.parse().map_err(|_| format!("--top expects a number, got '{}'", value))?),
            "--catalog" => parsed.catalog = Some(PathBuf::from(value)),
            "--history" => parsed.history = Some(PathBuf::from(value)),
            _ => return Err(format!("Unknown flag: {}", flag)),
        }
    }
    Ok(parsed)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn catalog_path(args: &Args, settings: &Settings, base: &Path) -> PathBuf {
    args.catalog.clone().unwrap_or_else(|| resolve_with_base(base, &settings.data.catalog_path))
}

fn history_path(args: &Args, settings: &Settings, base: &Path) -> PathBuf {
    args.history.clone().unwrap_or_else(|| resolve_with_base(base, &settings.data.history_path))
}

fn describe(item: &CatalogItem) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        item.id,
        item.name,
        item.category,
        if item.veg { "Veg" } else { "Non-Veg" },
        item.price
    )
}

fn format_built_at(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut raw: Vec<String> = env::args().collect();
    let prog = if raw.is_empty() { "menurec".to_string() } else { raw.remove(0) };
    let args = match parse_args(raw) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Usage: {} {}", prog, USAGE);
            std::process::exit(1);
        }
    };

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let base = env::current_dir()?;
    let model_path = settings.cache.resolved_path(&base);
    debug!(path = %model_path.display(), "model store");
    let recommender = ContentRecommender::from_settings(FileModelStore::new(&model_path), &settings);

    match args.command {
        Command::Recommend => {
            let catalog = load_catalog(&catalog_path(&args, &settings, &base))?;
            let history = load_history(&history_path(&args, &settings, &base))?;
            let top_n = args.top.unwrap_or(recommender.default_top_n());
            for rec in recommender.recommend_scored(&catalog, &history, top_n) {
                match rec.score {
                    Some(score) => println!("{}\t{:.4}", describe(&rec.item), score),
                    None => println!("{}", describe(&rec.item)),
                }
            }
        }
        Command::Rebuild => {
            let catalog = load_catalog(&catalog_path(&args, &settings, &base))?;
            let model = recommender.cache().rebuild(&catalog);
            println!(
                "Rebuilt model: {} items, {} vocabulary terms -> {}",
                model.len(),
                model.dim(),
                model_path.display()
            );
        }
        Command::Inspect => match recommender.cache().load() {
            Some(model) => {
                println!("path:       {}", model_path.display());
                println!("built at:   {}", format_built_at(model.built_at));
                println!("items:      {}", model.len());
                println!("vocabulary: {}", model.dim());
            }
            None => println!("No valid model stored at {}", model_path.display()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_recommend_flags() {
        let args = parse_args(strings(&["recommend", "--top", "3", "--catalog", "menu.json"])).expect("args");
        assert_eq!(args.command, Command::Recommend);
        assert_eq!(args.top, Some(3));
        assert_eq!(args.catalog, Some(PathBuf::from("menu.json")));
        assert_eq!(args.history, None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(vec![]).is_err());
        assert!(parse_args(strings(&["serve"])).is_err());
        assert!(parse_args(strings(&["recommend", "--top"])).is_err());
        assert!(parse_args(strings(&["recommend", "--top", "many"])).is_err());
        assert!(parse_args(strings(&["inspect", "--verbose", "1"])).is_err());
    }

    #[test]
    fn describes_items_tab_separated() {
        let item = CatalogItem::new(2, "Chicken Biryani", "Rice", false, 150.0);
        assert_eq!(describe(&item), "2\tChicken Biryani\tRice\tNon-Veg\t150");
    }

    #[test]
    fn built_at_renders_as_rfc3339() {
        assert_eq!(format_built_at(0), "1970-01-01T00:00:00+00:00");
    }
}
