use std::{sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use todo_client::{
    config::ClientConfig,
    domain::gateway::TodoGateway,
    infrastructure::http_gateway::HttpTodoGateway,
    telemetry,
    ui::{
        app::{dispatch, App, Outcome, Request},
        view,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env()?;
    telemetry::init(&config)?;
    let gateway = Arc::new(HttpTodoGateway::from_config(&config)?);
    tracing::info!(base_url = %gateway.base_url(), "starting todo client");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, gateway).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res { tracing::error!(error = %e, "todo client exited with error"); }
    res
}

async fn run_app<G: TodoGateway>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, gateway: Arc<G>) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let mut app = App::new();
    dispatch(gateway.clone(), Request::Load, tx.clone());

    while !app.should_quit {
        while let Ok(outcome) = rx.try_recv() { app.apply(outcome); }

        terminal.draw(|f| view::draw(f, &app))?;

        // Polling blocks this thread, so step off the runtime's worker while waiting
        let ready = tokio::task::block_in_place(|| event::poll(tick_rate))?;
        if ready {
            if let Event::Key(key) = event::read()? {
                if let Some(request) = app.handle_key(key) { dispatch(gateway.clone(), request, tx.clone()); }
            }
        }
    }
    tracing::info!("shutdown");
    Ok(())
}
