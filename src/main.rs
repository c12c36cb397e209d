//! linkshelf demo: two sessions of the same user and one of another user
//! share an in-memory backend. Bookmarks added in one session show up in
//! the other through the change feed.

use std::rc::Rc;

use linkshelf::app::App;
use linkshelf::logging;
use linkshelf::managers::bookmark_card::ListView;
use linkshelf::managers::dashboard::Dashboard;
use linkshelf::services::identity::LocalIdentity;
use linkshelf::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linkshelf::types::errors::DashboardError;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_list(label: &str, dashboard: &Dashboard) {
    match dashboard.list_view() {
        ListView::Empty { title, .. } => println!("  [{}] {}", label, title),
        ListView::Cards { heading, cards } => {
            println!("  [{}] {}", label, heading);
            for card in cards {
                println!("      • {} <{}> {}", card.title, card.url, card.added_label);
            }
        }
    }
}

/// Lets the feed pumps apply whatever was published.
async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::new(None);
    let settings = engine.load()?;
    logging::init_tracing(&settings.log_filter);

    let app = App::in_memory(settings)?;

    section("Login redirect");
    match Dashboard::open(&app.context()).await {
        Err(DashboardError::Unauthenticated { redirect_to }) => {
            println!("  No session, redirecting to {}", redirect_to)
        }
        Err(e) => return Err(e.into()),
        Ok(_) => println!("  unexpected: dashboard opened without a session"),
    }

    section("Two sessions, one user");
    app.identity.sign_in("ada", Some("ada@example.com"));
    let laptop = Dashboard::open(&app.context()).await?;
    let phone_ctx = app
        .context()
        .with_identity(Rc::new(LocalIdentity::signed_in("ada", None)));
    let phone = Dashboard::open(&phone_ctx).await?;
    let other_ctx = app
        .context()
        .with_identity(Rc::new(LocalIdentity::signed_in("grace", None)));
    let other = Dashboard::open(&other_ctx).await?;
    println!("  Active feed subscriptions: {}", app.hub.active_subscriptions());

    let laptop_ui = laptop.handle();
    laptop_ui.open_form();
    laptop_ui.set_title("");
    laptop_ui.set_url("https://www.rust-lang.org");
    if let Err(e) = laptop_ui.submit().await {
        println!("  Validation: {}", e);
    }
    laptop_ui.set_title("Rust");
    laptop_ui.set_url("not-a-url");
    if let Err(e) = laptop_ui.submit().await {
        println!("  Validation: {}", e);
    }
    laptop_ui.set_url("  https://www.rust-lang.org  ");
    let rust = laptop_ui.submit().await?;
    laptop_ui.set_title("Tokio");
    laptop_ui.set_url("https://tokio.rs");
    laptop_ui.submit().await?;
    settle().await;

    print_list("laptop", &laptop);
    print_list("phone", &phone);
    print_list("grace", &other);

    section("Delete");
    let declined = phone.delete(&rust.id, &|_: &str| false).await?;
    println!("  Declined prompt: {:?}", declined);
    let confirm = |prompt: &str| {
        println!("  Prompt: {}", prompt);
        true
    };
    let deleted = phone.delete(&rust.id, &confirm).await?;
    println!("  Outcome: {:?}", deleted);
    settle().await;
    print_list("laptop", &laptop);
    print_list("phone", &phone);

    section("Teardown");
    laptop.close().await;
    phone.close().await;
    other.close().await;
    println!("  Active feed subscriptions: {}", app.hub.active_subscriptions());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("  linkshelf v{} demo", env!("CARGO_PKG_VERSION"));
    println!();

    let local = tokio::task::LocalSet::new();
    local.run_until(run()).await
}
