use anyhow::Result;
use chatbox_core::{ChatWidget, EventBus};
use crossterm::event;
use ratatui::{backend::Backend, Frame, Terminal};
use std::time::Duration;
use tracing::info;

use crate::{
    components::{ChatComponent, InputComponent, StatusComponent},
    handlers::{EventHandler, InputHandler},
    state::AppState,
    utils::{layout, terminal},
};

/// Main application
pub struct App {
    state: AppState,
}

impl App {
    /// Create a new application instance around a widget
    pub fn new(widget: ChatWidget, event_bus: EventBus) -> Self {
        Self {
            state: AppState::new(widget, event_bus),
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        let mut terminal = terminal::setup()?;

        info!("TUI initialized, starting main loop");

        let result = self.run_app(&mut terminal).await;

        // Restore terminal even when the loop failed
        terminal::restore(&mut terminal)?;

        result
    }

    /// Main application loop
    async fn run_app<B: Backend + std::io::Write>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.state.update_cursor_blink();

            terminal.draw(|f| self.ui(f))?;

            tokio::select! {
                // Terminal events (keyboard, mouse, paste)
                terminal_event = async {
                    loop {
                        if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                            return event::read().ok();
                        }
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                } => {
                    if let Some(event) = terminal_event {
                        InputHandler::handle_event(&mut self.state, event);
                    }
                },

                // Application events (replies from the endpoint)
                app_event = self.state.event_receiver.recv() => {
                    if let Some(event) = app_event {
                        EventHandler::handle_event(&mut self.state, event);
                    }
                },

                // Timeout to ensure regular UI updates
                _ = tokio::time::sleep(Duration::from_millis(50)) => {},
            }

            if self.state.should_quit {
                break;
            }
        }

        info!("Leaving main loop");
        Ok(())
    }

    /// Draw the user interface
    fn ui(&mut self, f: &mut Frame) {
        let main_chunks = layout::create_main_layout(f.size());

        ChatComponent::render(&mut self.state, f, main_chunks[0]);
        InputComponent::render(&mut self.state, f, main_chunks[1]);
        StatusComponent::render(&self.state, f, main_chunks[2]);
    }
}
