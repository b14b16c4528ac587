//! specref command-line tool
//!
//! Usage:
//!   specref --data-dir data convert 10 u-m u-ft
//!   specref solve "how many BTU/h are in 150 tons"
//!   specref path u-gal u-m3

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use specref_assistant::{build_parser, AssistantSettings, Provider};
use specref_data::{
    filter_units_by_group, paginate, search_units, DataSources, DataStore, SortKey, SortOrder,
    SpecQuery,
};
use specref_units::{Converter, Unit};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "specref", version, about = "MEP reference data and unit conversion")]
struct Cli {
    /// Directory holding the reference data files
    #[arg(long, global = true, env = "SPECREF_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Component types CSV, if not `<data-dir>/component-types.csv`
    #[arg(long, global = true)]
    component_types: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a value between two units
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: String,
        from: String,
        to: String,
        /// Treat FROM and TO as symbols or abbreviations instead of unit ids
        #[arg(short, long)]
        symbols: bool,
    },
    /// Parse a free-text conversion request and evaluate it
    Solve {
        equation: String,
        #[arg(long, value_enum, default_value_t = ProviderArg::Auto)]
        provider: ProviderArg,
        /// Falls back to ANTHROPIC_API_KEY
        #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Show the conversion path between two unit ids
    Path { from: String, to: String },
    /// List units
    Units {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long)]
        group: Option<String>,
    },
    /// List spec types
    Specs {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        value_type: Option<String>,
        #[arg(long, default_value = "primaryName")]
        sort_by: String,
        #[arg(long, default_value = "asc")]
        sort_order: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 50)]
        page_size: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProviderArg {
    Auto,
    Anthropic,
    Pattern,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Auto => Provider::Auto,
            ProviderArg::Anthropic => Provider::Anthropic,
            ProviderArg::Pattern => Provider::Pattern,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,specref_cli=info,specref_data=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut sources = DataSources::new(&cli.data_dir);
    if let Some(file) = cli.component_types {
        sources = sources.with_component_types_file(file);
    }
    let data = DataStore::load(&sources)
        .with_context(|| format!("Failed to load data from {}", cli.data_dir.display()))?;

    let output = match cli.command {
        Command::Convert {
            value,
            from,
            to,
            symbols,
        } => {
            let converter = Converter::new(&data.catalog);
            let conversion = if symbols {
                converter.convert_symbols(value.as_str(), &from, &to)?
            } else {
                converter.convert(value.as_str(), &from, &to)?
            };
            serde_json::to_value(conversion.to_response())?
        }
        Command::Solve {
            equation,
            provider,
            api_key,
            model,
        } => {
            let mut settings = AssistantSettings {
                provider: provider.into(),
                api_key,
                ..AssistantSettings::default()
            };
            if let Some(model) = model {
                settings.model = model;
            }
            let parser = build_parser(&settings)?;
            tracing::info!(parser = parser.name(), "Solving");

            let parsed = parser.parse(&equation, data.catalog.units()).await?;
            let conversion = Converter::new(&data.catalog).convert_symbols(
                parsed.value,
                &parsed.from_unit,
                &parsed.to_unit,
            )?;
            json!({
                "originalEquation": equation,
                "parsed": parsed,
                "result": conversion.to_response(),
            })
        }
        Command::Path { from, to } => {
            let steps = Converter::new(&data.catalog).path(&from, &to)?;
            let hops: Vec<_> = steps
                .iter()
                .map(|step| {
                    json!({
                        "from": step.source_unit_id(),
                        "to": step.target_unit_id(),
                        "equationId": step.equation.id,
                        "direction": step.direction,
                        "description": step.equation.description,
                    })
                })
                .collect();
            json!({ "hops": hops.len(), "steps": hops })
        }
        Command::Units { query, group } => {
            let mut units: Vec<&Unit> = data.catalog.units().iter().collect();
            if let Some(query) = query.as_deref() {
                units = search_units(query, units);
            }
            let units = filter_units_by_group(group.as_deref(), units);
            json!({ "total": units.len(), "data": units })
        }
        Command::Specs {
            query,
            domain,
            value_type,
            sort_by,
            sort_order,
            page,
            page_size,
        } => {
            let matched: Vec<_> = SpecQuery {
                query,
                domain,
                value_type,
                sort_by: SortKey::parse(&sort_by),
                sort_order: SortOrder::parse(&sort_order),
            }
            .apply(&data.spec_types)
            .into_iter()
            .cloned()
            .collect();
            serde_json::to_value(paginate(&matched, page, page_size))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_accepts_negative_values() {
        let cli = Cli::try_parse_from(["specref", "convert", "-40", "u-f", "u-c"]).unwrap();
        match cli.command {
            Command::Convert {
                value,
                from,
                to,
                symbols,
            } => {
                assert_eq!(value, "-40");
                assert_eq!(from, "u-f");
                assert_eq!(to, "u-c");
                assert!(!symbols);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["specref", "convert", "-s", "-3.5e2", "°F", "°C"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Convert { ref value, symbols: true, .. } if value == "-3.5e2"
        ));
    }

    #[test]
    fn test_unknown_flag_is_still_rejected() {
        assert!(Cli::try_parse_from(["specref", "convert", "--bogus", "1", "a", "b"]).is_err());
    }
}
