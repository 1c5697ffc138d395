mod render;

use anyhow::Context;
use campus_client::LocalizedFetchClient;
use campus_core::{
    config::{self, Config},
    i18n::Translator,
    locale::{environment_language, Locale, LocaleResolver},
    traits::{ContentSource, PreferenceStore},
};
use campus_pages::pages::{
    EventFilter, EventsData, EventsPage, ManagementPage, MissionPage, NewsPage,
    ResearchManagementPage, PAGE_NAMES,
};
use campus_pages::{Page, PageSession};
use campus_store::Store;
use clap::{Parser, Subcommand};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, reload, EnvFilter};

#[derive(Parser)]
#[command(
    name = "campus",
    version,
    about = "Campus: localized content from the university backend"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page and print it.
    Show {
        /// management, news, events, mission, or research.
        page: String,
        /// Language for this run only (ru, en, kg/ky).
        #[arg(short, long)]
        lang: Option<String>,
        /// Events page filter: upcoming, past, or all.
        #[arg(long, default_value = "upcoming")]
        filter: String,
    },
    /// Show or change the saved interface language.
    Lang {
        /// New language tag; omit to print the current one.
        tag: Option<String>,
        /// Forget the saved choice and go back to system/default detection.
        #[arg(long, conflicts_with = "tag")]
        reset: bool,
    },
    /// Check configuration and backend availability.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter, log_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = config::load(&cli.config)?;
    if std::env::var_os("RUST_LOG").is_none() {
        apply_log_level(&log_handle, &cfg.campus.log_level);
    }

    match cli.command {
        Commands::Show { page, lang, filter } => {
            if let Some(tag) = &lang {
                if Locale::from_tag(tag).is_none() {
                    anyhow::bail!("unsupported language: {tag}. Use one of: ru, en, kg");
                }
            }
            let filter: EventFilter = filter.parse().map_err(anyhow::Error::msg)?;

            let store = Arc::new(Store::new(&cfg.store).await?);
            let translator = build_translator(&cfg, store, lang.as_deref()).await?;
            let source: Arc<dyn ContentSource> =
                Arc::new(LocalizedFetchClient::from_config(&cfg.api)?);

            let text = match page.as_str() {
                "management" => {
                    show(ManagementPage, source, &translator, render::management).await?
                }
                "news" => show(NewsPage, source, &translator, render::news).await?,
                "events" => {
                    let render_events = |out: &mut String, data: &EventsData, locale: Locale| {
                        render::events(out, data, filter, locale)
                    };
                    show(EventsPage, source, &translator, render_events).await?
                }
                "mission" => show(MissionPage, source, &translator, render::mission).await?,
                "research" => {
                    show(ResearchManagementPage, source, &translator, render::research).await?
                }
                other => anyhow::bail!(
                    "unknown page: {other}. Available: {}",
                    PAGE_NAMES.join(", ")
                ),
            };
            print!("{text}");
        }
        Commands::Lang { tag, reset } => {
            let store = Arc::new(Store::new(&cfg.store).await?);
            if reset && store.remove(&cfg.locale.preference_key).await? {
                info!("saved language cleared");
            }
            let translator = build_translator(&cfg, store, None).await?;
            match tag {
                Some(tag) => {
                    let locale = translator.change_language(&tag).await?;
                    println!(
                        "{}: {} ({locale})",
                        translator.t("common.languageChanged"),
                        locale.native_name()
                    );
                }
                None => {
                    let current = translator.language();
                    println!("{}: {}", translator.t("common.language"), current.native_name());
                    for locale in Locale::ALL {
                        let marker = if locale == current { "*" } else { " " };
                        println!("  {marker} {:<3} {}", locale.code(), locale.native_name());
                    }
                }
            }
        }
        Commands::Status => {
            println!("Campus status\n");
            println!("Config: {}", cli.config);
            println!("Backend: {}", cfg.api.base_url);

            let client = LocalizedFetchClient::from_config(&cfg.api)?;
            println!("Locale transport: {}", client.transport_name());
            println!(
                "  backend: {}",
                if client.is_available().await {
                    "available"
                } else {
                    "unreachable (pages will show offline content)"
                }
            );

            let store = Store::new(&cfg.store).await?;
            let saved = store.get(&cfg.locale.preference_key).await?;
            println!(
                "  language: {}",
                saved.as_deref().unwrap_or("not set, using system or default")
            );
            println!("  data dir: {}", config::shellexpand(&cfg.campus.data_dir));
            println!("  database: {}", config::shellexpand(&cfg.store.db_path));

            println!("\nPages:");
            for (name, endpoints) in [
                (ManagementPage.name(), ManagementPage.endpoints()),
                (NewsPage.name(), NewsPage.endpoints()),
                (EventsPage.name(), EventsPage.endpoints()),
                (MissionPage.name(), MissionPage.endpoints()),
                (ResearchManagementPage.name(), ResearchManagementPage.endpoints()),
            ] {
                println!("  {name:<11} {}", endpoints.join(", "));
            }
        }
    }

    Ok(())
}

/// Switch the log filter to the configured level. An invalid level keeps
/// the current filter.
fn apply_log_level<S>(handle: &reload::Handle<EnvFilter, S>, level: &str) {
    match EnvFilter::try_new(level) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                warn!("failed to apply log level {level:?}: {e}");
            }
        }
        Err(e) => warn!("invalid campus.log_level {level:?}: {e}"),
    }
}

/// Resolve the starting language and build a persisting translator.
async fn build_translator(
    cfg: &Config,
    store: Arc<Store>,
    explicit: Option<&str>,
) -> anyhow::Result<Translator> {
    let saved = store.get(&cfg.locale.preference_key).await?;
    let system = environment_language();
    let locale = LocaleResolver::new(cfg.locale.default).resolve(
        explicit,
        saved.as_deref(),
        system.as_deref(),
    );
    info!("active language: {locale}");
    Ok(Translator::with_store(
        locale,
        store,
        cfg.locale.preference_key.clone(),
    ))
}

/// Mount `page`, wait for it to settle, render, and unmount. Ctrl-C
/// cancels the in-flight requests.
async fn show<P, F>(
    page: P,
    source: Arc<dyn ContentSource>,
    translator: &Translator,
    render: F,
) -> anyhow::Result<String>
where
    P: Page,
    F: Fn(&mut String, &P::Data, Locale) -> fmt::Result,
{
    let mut session = PageSession::mount(page, source, translator);
    let settled = tokio::select! {
        settled = session.ready() => settled,
        _ = tokio::signal::ctrl_c() => None,
    };
    let name = session.name();
    session.unmount().await;

    let (locale, data) = settled.with_context(|| format!("{name}: interrupted before loading"))?;
    let mut out = String::new();
    render(&mut out, &data, locale)?;
    Ok(out)
}
