use iced::{Element, Task, Theme};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod display;
mod error;
mod state;
mod ui;

use api::{AdminApi, HttpApi};
use config::Config;
use error::DashboardError;
use state::app::{AppState, Request};
use state::data::{ImageSource, UserRecord};
use state::directory::{fetch_directory, fetch_user_images};
use state::session::{submit_login, Authenticated};
use state::token_store::TokenStore;

#[derive(Parser, Debug)]
#[command(name = "admin-dashboard")]
#[command(author, version, about = "Admin dashboard for the user directory", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the admin API (overrides the config file)
    #[arg(long, env = "DASHBOARD_API_URL")]
    api_url: Option<String>,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,
}

/// Main application state
struct AdminDashboard {
    /// Session, directory and overlay
    state: AppState,
    /// Remote service
    api: Arc<dyn AdminApi>,
    /// Where the token survives restarts
    store: TokenStore,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    TogglePasswordVisibility,
    /// User pressed "Sign In" or Enter in the form
    SubmitLogin,
    LoginComplete(Result<Authenticated, DashboardError>),
    /// User asked to reload the directory
    Refresh,
    DirectoryLoaded {
        epoch: u64,
        result: Result<Vec<UserRecord>, DashboardError>,
    },
    /// User clicked "Images" on a row
    ShowImages(i64),
    ImagesLoaded {
        epoch: u64,
        user_id: i64,
        result: Result<Vec<ImageSource>, DashboardError>,
    },
    /// Put one overlay image on the clipboard as a data URI
    CopyImageUri(usize),
    DismissImages,
    Logout,
}

impl AdminDashboard {
    /// Create the application, restoring a saved session if there is one
    fn new(api: Arc<dyn AdminApi>, store: TokenStore) -> (Self, Task<Message>) {
        let token = store.load().unwrap_or_else(|e| {
            warn!("Could not read saved token at {}: {}", store.path().display(), e);
            None
        });

        let (state, request) = AppState::restore(token);
        let app = AdminDashboard { state, api, store };
        let task = app.dispatch(request);

        (app, task)
    }

    /// Turn a state request into a background task
    fn dispatch(&self, request: Option<Request>) -> Task<Message> {
        match request {
            Some(Request::Directory { token, epoch }) => Task::perform(
                fetch_directory(self.api.clone(), token),
                move |result| Message::DirectoryLoaded { epoch, result },
            ),
            Some(Request::Images { user_id, token, epoch }) => Task::perform(
                fetch_user_images(self.api.clone(), user_id, token),
                move |result| Message::ImagesLoaded {
                    epoch,
                    user_id,
                    result,
                },
            ),
            None => Task::none(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EmailChanged(email) => {
                self.state.session_mut().email = email;
                Task::none()
            }
            Message::PasswordChanged(password) => {
                self.state.session_mut().password = password;
                Task::none()
            }
            Message::TogglePasswordVisibility => {
                self.state.session_mut().toggle_password_visibility();
                Task::none()
            }
            Message::SubmitLogin => match self.state.begin_login() {
                Some(credentials) => {
                    info!("Signing in as {}", credentials.email());
                    Task::perform(
                        submit_login(self.api.clone(), credentials),
                        Message::LoginComplete,
                    )
                }
                None => Task::none(),
            },
            Message::LoginComplete(result) => {
                let request = self.state.complete_login(result, &self.store);
                self.dispatch(request)
            }
            Message::Refresh => {
                let request = self.state.request_directory();
                self.dispatch(request)
            }
            Message::DirectoryLoaded { epoch, result } => {
                self.state.complete_directory(epoch, result);
                Task::none()
            }
            Message::ShowImages(user_id) => {
                let request = self.state.request_images(user_id);
                self.dispatch(request)
            }
            Message::ImagesLoaded { epoch, user_id, result } => {
                self.state.complete_images(epoch, user_id, result);
                Task::none()
            }
            Message::CopyImageUri(index) => {
                match self.state.directory().overlay().images.get(index) {
                    Some(source) => iced::clipboard::write(source.data_uri.clone()),
                    None => Task::none(),
                }
            }
            Message::DismissImages => {
                self.state.dismiss_images();
                Task::none()
            }
            Message::Logout => {
                self.state.logout(&self.store);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::view(&self.state)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }

    // Initialize logging
    let log_level = cli.log_level.unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let http = HttpApi::new(&config.api.base_url)?;
    info!("Starting admin dashboard v{} against {}", env!("CARGO_PKG_VERSION"), http.base_url());

    let api: Arc<dyn AdminApi> = Arc::new(http);
    let store = TokenStore::new(config.token_file());

    iced::application("Admin Dashboard", AdminDashboard::update, AdminDashboard::view)
        .theme(AdminDashboard::theme)
        .centered()
        .run_with(move || AdminDashboard::new(api, store))?;

    Ok(())
}
