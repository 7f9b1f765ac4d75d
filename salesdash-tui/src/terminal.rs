//! Blocking figure display on the alternate screen.

use std::io::{self, Stdout};
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::figure::{ChartData, Figure, FigureView};
use crate::theme::Theme;

static PANIC_HOOK: Once = Once::new();

/// Keys that close the current figure.
pub fn is_dismiss_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}

/// Restores the terminal when dropped, including on early return.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stderr(), LeaveAlternateScreen);
            default_hook(info);
        }));
    });
}

/// Show each figure full-screen until the user dismisses it, in order.
pub fn show_figures(figures: &[Figure], data: &ChartData<'_>) -> Result<()> {
    if figures.is_empty() {
        return Ok(());
    }
    install_panic_hook();

    let theme = Theme::default();
    let mut guard = TerminalGuard::enter()?;
    let total = figures.len();

    for (i, figure) in figures.iter().enumerate() {
        tracing::debug!(figure = figure.name(), "showing figure");
        loop {
            guard.terminal.draw(|f| {
                let view = FigureView::new(*figure, *data, &theme).position(i + 1, total);
                f.render_widget(view, f.area());
            })?;

            // Poll so a resize redraws promptly.
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if is_dismiss_key(&key) {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn q_esc_and_enter_dismiss() {
        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Enter] {
            assert!(is_dismiss_key(&KeyEvent::new(code, KeyModifiers::NONE)));
        }
    }

    #[test]
    fn other_keys_and_releases_do_not_dismiss() {
        assert!(!is_dismiss_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_dismiss_key(&release));
    }

    #[test]
    fn no_figures_is_a_no_op() {
        let summary = salesdash_core::SalesSummary::default();
        let options = crate::ChartOptions::default();
        let data = ChartData {
            summary: &summary,
            options: &options,
        };
        show_figures(&[], &data).unwrap();
    }
}
