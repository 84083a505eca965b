use env_logger::Env;
use prodsec_query::adapters::outbound::console::{SilentProgressReporter, StderrProgressReporter};
use prodsec_query::adapters::outbound::network::HttpSessionProvider;
use prodsec_query::application::dto::{QueryOutput, QueryRequest};
use prodsec_query::application::factories::{
    FormatterFactory, FormatterOptions, PresenterFactory, PresenterType,
};
use prodsec_query::application::use_cases::RunQueryUseCase;
use prodsec_query::cli::Args;
use prodsec_query::config::{
    discover_config, load_config_from_path, CliOverrides, EnvOverrides, Settings,
};
use prodsec_query::ports::outbound::ProgressReporter;
use prodsec_query::query_engine::services::PaginatedFetcher;
use prodsec_query::shared::error::ExitCode;
use prodsec_query::shared::Result;
use std::io::IsTerminal;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::init_from_env(Env::default().default_filter_or(log_level));
}

async fn run(args: Args) -> Result<()> {
    let Args {
        verbose,
        format,
        no_color,
        show_purl,
        output,
        config,
        registry_url,
        incident_db_url,
        command,
    } = args;

    let config_file = match config {
        Some(path) => Some(load_config_from_path(&path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let settings = Settings::resolve(
        config_file,
        EnvOverrides::from_env(),
        CliOverrides {
            registry_url,
            incident_db_url,
            format,
        },
    )?;

    let provider = HttpSessionProvider::new(
        settings.registry_url.clone(),
        settings.incident_db_url.clone(),
        settings.session_settings(),
    );
    let fetcher = settings.fetcher()?;
    let open_browser = command.opens_browser();
    let request = command.into_request();

    // log lines and the spinner share stderr
    let result = if verbose > 0 {
        answer(provider, SilentProgressReporter, fetcher, request).await?
    } else {
        answer(provider, StderrProgressReporter::new(), fetcher, request).await?
    };

    let color = !no_color && output.is_none() && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(settings.format, FormatterOptions { color, show_purl });
    let rendered = formatter.format(&result)?;

    let presenter = PresenterFactory::create(PresenterType::from(output));
    presenter.present(&rendered)?;

    if open_browser {
        open_link(&result);
    }

    Ok(())
}

fn open_link(result: &QueryOutput) {
    match result.link() {
        Some(link) => {
            if let Err(e) = open::that(link) {
                log::warn!("Could not open {} in a browser: {}", link, e);
            }
        }
        None => log::warn!("Result has no link to open"),
    }
}

async fn answer<PR: ProgressReporter>(
    provider: HttpSessionProvider,
    progress_reporter: PR,
    fetcher: PaginatedFetcher,
    request: QueryRequest,
) -> Result<QueryOutput> {
    RunQueryUseCase::new(provider, progress_reporter, fetcher)
        .execute(request)
        .await
}
