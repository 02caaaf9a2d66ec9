//! Headless feed client.
//!
//! Loads the session, opens the feed page, logs what it shows, then follows
//! the event stream until Ctrl+C.

use feed::app::{FeedEvent, FeedPage, FeedServices};
use feed::config::FeedConfig;
use feed::services::session::SessionStore;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    feed::debug::init();

    let config = FeedConfig::from_env();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("{}", e);
        std::process::exit(2);
    }
    info!(
        api = %config.api_base_url,
        socket = %config.socket_url,
        origin = %config.page_origin,
        "Starting feed client"
    );

    let session = SessionStore::new(&config.session_file).load();
    if session.is_none() {
        warn!("No signed-in user; likes and comments are disabled");
    }

    let services = FeedServices::production(&config);
    let (mut page, events) = FeedPage::new(&config, session, services);

    match page.activate().await {
        Ok(count) => {
            for post in page.engine().posts() {
                info!(
                    post_id = %post.id,
                    author = %post.username,
                    likes = post.like_count(),
                    comments = post.comment_count(),
                    media = %page.engine().media_url(&post),
                    "Post"
                );
            }
            println!("Loaded {} posts from {}", count, config.api_base_url);
        }
        Err(e) => {
            error!(error = %e, "Could not load feed");
            eprintln!("Could not load feed: {}", e);
        }
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            event = events.recv() => match event {
                Ok(FeedEvent::NotificationReceived) => println!("You have new notifications"),
                Ok(FeedEvent::ChannelClosed(username)) => {
                    info!(username = %username, "Notification channel ended");
                }
                Ok(other) => tracing::debug!(event = ?other, "Feed event"),
                Err(_) => break,
            },
        }
    }

    page.deactivate();
    info!("Feed client stopped");
}
