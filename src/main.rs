//! campaign-tui - A terminal dashboard for outbound voice campaigns
//!
//! This is the main entry point for the campaign-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::{ApiClient, RequestRunner};
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    logging::init();

    let config = Config::resolve();
    let client = ApiClient::new(&config.base_url, config.request_timeout())?;
    info!(base_url = %client.base_url(), "starting campaign-tui");
    let runner = RequestRunner::new(client)?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state
    let mut app = App::new(runner, &config);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        // Check for a clip waiting to be played
        if let Some(path) = app.pending_audio.take() {
            launch_audio_player(tui, app, &path)?;
            continue;
        }

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - drain completions and expire notices
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

/// Hand a saved clip to the configured audio player
fn launch_audio_player(tui: &mut Tui, app: &mut App, path: &Path) -> Result<()> {
    tui.suspend()?;
    let status = Command::new(&app.audio_player).arg(path).status();
    tui.resume()?;

    match status {
        Ok(exit_status) if !exit_status.success() => {
            app.status_message = Some(format!("Audio player exited with status: {}", exit_status));
        }
        Ok(_) => {}
        Err(e) => {
            app.status_message = Some(format!(
                "Failed to launch audio player '{}': {}",
                app.audio_player, e
            ));
        }
    }

    Ok(())
}
