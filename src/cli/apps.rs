use anyhow::Result;
use tracing::info;

use super::AppsArgs;
use crate::core::history::{self, AppStatus, HistoryClient};
use crate::core::store::AppStore;
use crate::core::terminal::{print_status, print_success, print_warn};

/// Flag wins over the environment, which wins over the compiled-in default.
fn resolve_api_url(flag: Option<String>, env_value: Option<String>) -> String {
    flag.or(env_value)
        .unwrap_or_else(|| history::DEFAULT_API_URL.to_string())
}

pub(crate) async fn run_apps_command(args: AppsArgs) -> Result<()> {
    let base_url = resolve_api_url(args.api_url.clone(), std::env::var("SPARKHIST_API_URL").ok());
    let client = HistoryClient::new(&base_url)?;

    if args.completed && args.running {
        print_warn("Both --completed and --running were given; --completed wins");
    }

    if args.completed {
        info!("Listing all completed applications");
        let body = client
            .fetch_applications_text(Some(AppStatus::Completed))
            .await?;
        println!("{}", body);
        return Ok(());
    }

    if args.running {
        info!("Listing all running applications");
        let body = client
            .fetch_applications_text(Some(AppStatus::Running))
            .await?;
        println!("{}", body);
        return Ok(());
    }

    info!("Listing all applications");
    let body = client.fetch_applications(None).await?;
    let apps = history::decode_applications(&body)?;

    // The store lives for this invocation only and is dropped with the scope.
    let mut store = AppStore::open_in_memory()?;
    let loaded = store.load(&apps)?;
    let counts = store.aggregate()?;

    info!(
        "Total Applications: {} (Completed: {}, Incomplete: {})",
        counts.total_applications, counts.completed_attempts, counts.incomplete_attempts
    );

    print_success(&format!(
        "Loaded {} attempt rows from {} applications",
        loaded,
        apps.len()
    ));
    print_status("Total applications", &counts.total_applications.to_string());
    print_status("Completed attempts", &counts.completed_attempts.to_string());
    print_status(
        "Incomplete attempts",
        &counts.incomplete_attempts.to_string(),
    );
    Ok(())
}
