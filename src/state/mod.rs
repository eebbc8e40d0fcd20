/// State management module
/// 
/// This module handles all application state, including:
/// - The top-level state and view-state machine (app.rs)
/// - Login form and bearer token (session.rs)
/// - User list and image overlay (directory.rs)
/// - Shared data structures (data.rs)
/// - Token persistence across restarts (token_store.rs)

pub mod app;
pub mod data;
pub mod directory;
pub mod session;
pub mod token_store;
