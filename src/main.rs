use anyhow::Context;
use clap::Parser;
use docsift::cli::{Cli, Commands};
use docsift::config::Settings;
use docsift::format::format_outcome;
use docsift::i18n::BuiltinMessages;
use docsift::index::{IndexBuilder, WriteOutcome, write_index};
use docsift::server::DocsServer;
use docsift::session::{SearchOutcome, SearchSession};
use docsift::source::source_for;
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only results and MCP traffic
    docsift::tracing::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Build { input, output } => {
            let output = output.unwrap_or_else(|| settings.index_path.clone());
            let builder = IndexBuilder::new(settings.languages.clone())
                .with_excerpt_max_len(settings.index.excerpt_max_len);

            let entries = builder
                .build(&input)
                .with_context(|| format!("Failed to build index from {}", input.display()))?;
            let outcome = write_index(&entries, &output)
                .with_context(|| format!("Failed to write index to {}", output.display()))?;

            let summary = match outcome {
                WriteOutcome::Written(_) => format!("Wrote {} entries to {}", entries.len(), output.display()),
                WriteOutcome::Unchanged(_) => {
                    format!("{} is up to date: {} entries", output.display(), entries.len())
                }
            };
            println!("{} (digest {})", summary, outcome.digest());
        }
        Commands::Search {
            query,
            index,
            lang,
            limit,
        } => {
            let location = index.unwrap_or_else(|| settings.index_path.display().to_string());
            let lang = lang.unwrap_or_else(|| settings.default_lang.clone());

            let mut search_settings = settings.search;
            if let Some(limit) = limit {
                search_settings.max_results = limit;
            }

            let session = SearchSession::open(source_for(&location, &settings.base_path), search_settings);
            session.wait_ready().await;

            let outcome = session.search(&query, &lang);
            println!(
                "{}",
                format_outcome(
                    &outcome,
                    &query,
                    &lang,
                    search_settings.snippet_options(),
                    &BuiltinMessages::default(),
                )
            );
            if let SearchOutcome::Results(hits) = &outcome {
                tracing::debug!("{} hits for {:?}", hits.len(), query);
            }
        }
        Commands::Serve { index, lang } => {
            let mut settings = settings;
            if let Some(lang) = lang {
                settings.default_lang = lang;
            }
            let location = index.unwrap_or_else(|| settings.index_path.display().to_string());

            tracing::info!("Starting docsift MCP server");

            let server = DocsServer::new(source_for(&location, &settings.base_path), &settings);
            let service = server.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Error serving MCP server: {:?}", e);
            })?;

            service.waiting().await?;
        }
    }

    Ok(())
}
