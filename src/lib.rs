pub mod cli;
pub mod config;
pub mod display;
pub mod filter;
pub mod request;

use crate::config::ConsoleConfig;
use crate::display::{format_filter_json, format_filter_text, format_term_diff};
use crate::filter::{EntityType, Filter, FilterRecord, Relation, SortOrder, canonical_filter};
use anyhow::Context;
pub use cli::{Cli, ColorMode, Commands, MergeMode, OutputFormat, cli_parse};
pub use request::FilterParam;

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse a filter given on the command line, restoring defaults when asked
fn input_filter(raw: &str, config: &ConsoleConfig, with_defaults: bool) -> Filter {
    let filter = Filter::from_string(raw);
    if with_defaults {
        config.apply_defaults(&filter)
    } else {
        filter
    }
}

fn print_filter(filter: &Filter, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_filter_text(filter)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&format_filter_json(filter))
                .context("Failed to serialize filter")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(&cli);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let config = crate::config::load_config(cli.config.as_deref())
        .context("Failed to load config")?;
    let format = cli.format;
    let parse = |raw: &str| input_filter(raw, &config, cli.defaults);

    match &cli.command {
        Commands::Parse { filter } => print_filter(&parse(filter), format)?,
        Commands::Next { filter } => print_filter(&parse(filter).next(), format)?,
        Commands::Previous { filter } => print_filter(&parse(filter).previous(), format)?,
        Commands::First { filter, row } => print_filter(&parse(filter).first(*row), format)?,
        Commands::All { filter } => print_filter(&parse(filter).all(), format)?,
        Commands::Simple { filter } => print_filter(&parse(filter).simple(), format)?,
        Commands::Set {
            filter,
            keyword,
            value,
            relation,
        } => {
            let relation: Relation = relation.parse()?;
            let mut filter = parse(filter);
            filter.set_with_relation(keyword, value.as_str(), relation);
            print_filter(&filter, format)?;
        }
        Commands::Delete { filter, keyword } => {
            let mut filter = parse(filter);
            filter.delete(keyword);
            print_filter(&filter, format)?;
        }
        Commands::Sort { filter, by, order } => {
            let mut filter = parse(filter);
            if let Some(order) = order {
                let order: SortOrder = order.parse()?;
                filter.set_sort_order(order);
            }
            if let Some(field) = by {
                filter.set_sort_by(field);
            }
            print_filter(&filter, format)?;
        }
        Commands::Merge { base, other, mode } => {
            let mut base = parse(base);
            let other = Filter::from_string(other);
            let merged = match mode {
                MergeMode::Append => base.merge(&other).copy(),
                MergeMode::Keywords => base.merge_keywords(&other).copy(),
                MergeMode::Extra => base.merge_extra_keywords(&other),
                MergeMode::And => base.and(&other).copy(),
            };
            print_filter(&merged, format)?;
        }
        Commands::Compare { first, second } => {
            let first = parse(first);
            let second = parse(second);
            let equal = first.equals(&second);
            match format {
                OutputFormat::Text => {
                    println!("{}", if equal { "equal" } else { "different" });
                    print!("{}", format_term_diff(&first, &second));
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "equal": equal,
                        "first": first.to_filter_string(),
                        "second": second.to_filter_string(),
                    })
                ),
            }
        }
        Commands::Canonical { entity } => match entity {
            Some(entity) => {
                let entity: EntityType = entity.parse()?;
                print_filter(canonical_filter(entity), format)?;
            }
            None => {
                for entity in EntityType::ALL {
                    println!("{:<16} {}", entity.canonical_name(), canonical_filter(*entity));
                }
            }
        },
        Commands::Param { filter, id } => {
            let mut filter = parse(filter);
            if let Some(id) = id {
                filter = filter.with_id(id.clone());
            }
            let param = FilterParam::from_filter(&filter);
            let (name, value) = param.query_pair();
            println!("{name}={value}");
        }
        Commands::Record { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read record '{}'", file.display()))?;
            let record = FilterRecord::parse(&raw)
                .with_context(|| format!("Failed to parse record '{}'", file.display()))?;
            let filter = Filter::from_record(&record);
            print_filter(&filter, format)?;
            let param = FilterParam::from_filter(&filter);
            let (name, value) = param.query_pair();
            println!("{name}={value}");
        }
    }

    Ok(())
}
