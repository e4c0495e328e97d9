//! Load the user directory from its endpoint and print a filtered list.
//!
//! Usage: `cargo run --example user_list -- [config.toml] [query]`

use std::path::PathBuf;
use std::sync::Arc;

use roster::{logger, Config, Directory, LogNotifier, RemoteLoader, UserDraft};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let query = args.next().unwrap_or_default();

    let config = Config::load(config_path.as_deref())?;
    config.validate()?;
    logger::initialize(&config.logging)?;
    config.log_summary();

    let directory = Directory::new(&config, Arc::new(LogNotifier));
    let loader = RemoteLoader::new(&config.remote)?;

    println!("=== Loading users ===\n");
    if directory.load(&loader).await.is_err() {
        println!("Could not load users; starting with an empty directory.");
    }

    let mut draft = UserDraft::new("Ana Example", "ana@example.com");
    draft.city = "Lisbon".into();
    directory.submit(draft)?;

    directory.set_query(query.as_str());
    println!("\n=== Users matching {query:?} ===\n");
    for user in directory.visible_users() {
        println!("{:>14}  {:<26} {}", user.id, user.name, user.email);
        if let Some(company) = user.company_name() {
            println!("{:>14}  {company}", "");
        }
        if let Some(city) = user.city() {
            println!("{:>14}  {city}", "");
        }
    }

    Ok(())
}
