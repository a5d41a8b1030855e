//! Application state, key handling and the terminal UI.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyEventKind;
use log::info;
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::event_source::{Event, EventSource, KeyCode, KeyEvent};
use crate::render::{Command, PageGallery, RenderService, ServiceEvent};
use crate::settings::Settings;
use crate::widget::halfblock::Halfblocks;

/// Actions the app loop must act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

pub struct App {
    service: RenderService,
    doc_name: String,
    doc_title: Option<String>,
    gallery: Option<Arc<PageGallery>>,
    error: Option<String>,
    /// First visible gallery tile row
    scroll_row: u16,
    gallery_columns: u16,
}

impl App {
    #[must_use]
    pub fn new(doc_path: PathBuf, settings: &Settings, size_override: Option<u32>) -> Self {
        let doc_name = doc_path
            .file_name()
            .map_or_else(|| doc_path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let mut service = RenderService::new(doc_path);
        service.set_initial_size(size_override.unwrap_or(settings.page_size));

        Self {
            service,
            doc_name,
            doc_title: None,
            gallery: None,
            error: None,
            scroll_row: 0,
            gallery_columns: settings.gallery_columns.max(1),
        }
    }

    /// Handle one key press. Navigation and size keys become Commands;
    /// scrolling only touches presentation state.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppAction::Quit),

            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                let before = self.service.state().current_page;
                self.service.apply_command(Command::NextPage);
                if self.service.state().current_page != before {
                    self.scroll_row = 0;
                }
            }

            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                let before = self.service.state().current_page;
                self.service.apply_command(Command::PrevPage);
                if self.service.state().current_page != before {
                    self.scroll_row = 0;
                }
            }

            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.service.apply_command(Command::SizeUp);
            }

            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.service.apply_command(Command::SizeDown);
            }

            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_row = self.scroll_row.saturating_add(1);
            }

            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_row = self.scroll_row.saturating_sub(1);
            }

            KeyCode::Char('r') => {
                self.service.apply_command(Command::Reload);
                self.gallery = None;
                self.error = None;
            }

            _ => {}
        }
        None
    }

    /// Current value of the size control, for persisting on exit.
    #[must_use]
    pub fn current_size(&self) -> u32 {
        self.service.state().size.value
    }

    /// Drain render service events into display state.
    pub fn on_tick(&mut self) {
        for event in self.service.poll_events() {
            match event {
                ServiceEvent::DocumentReady(doc) => {
                    info!("document ready: {} pages", doc.page_count);
                    self.doc_title = doc.title;
                    self.error = None;
                }

                ServiceEvent::Gallery(gallery) => {
                    self.gallery = Some(gallery);
                    self.error = None;
                }

                ServiceEvent::Failed(error) => {
                    self.error = Some(error.to_string());
                }
            }
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(f.area());

        self.draw_header(f, chunks[0]);

        if let Some(message) = self.error.clone() {
            self.draw_error(f, chunks[1], &message);
        } else if let Some(gallery) = self.gallery.clone() {
            self.draw_gallery(f, chunks[1], &gallery);
        } else {
            let status = if self.service.document_info().is_some() {
                "Rendering page..."
            } else {
                "Opening document..."
            };
            f.render_widget(
                Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let state = self.service.state();
        let title = self.doc_title.clone().unwrap_or_else(|| self.doc_name.clone());

        let pages_line = match self.service.document_info() {
            Some(doc) => format!("{} Pages", doc.page_count),
            None => "Loading...".to_string(),
        };

        let status = Line::from(vec![
            nav_chip(" Prev (p) ", state.can_prev()),
            Span::raw(" "),
            nav_chip(" Next (n) ", state.can_next()),
            Span::raw(format!("  Page {}/{}  ", state.current_page, state.page_count)),
            Span::styled(
                format!(
                    "Size {} px [{}-{}, +/-]",
                    state.size.value, state.size.min, state.size.max
                ),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                if self.service.is_rendering() { "  ..." } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {pages_line}"),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            status,
        ])
        .block(Block::bordered());

        f.render_widget(header, area);
    }

    fn draw_error(&self, f: &mut Frame, area: Rect, message: &str) {
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                "Could not display the document",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::raw(message.to_string()),
            Line::raw(""),
            Line::from(Span::styled(
                "r to retry, q to quit",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: false });
        f.render_widget(body, area);
    }

    fn draw_gallery(&mut self, f: &mut Frame, area: Rect, gallery: &PageGallery) {
        if area.height < 2 || area.width < 8 {
            return;
        }

        // Page caption above the tiles.
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("Page {}", gallery.page_number),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Rect::new(area.x, area.y, area.width, 1),
        );

        let tiles_area = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        let columns = self.gallery_columns.min(gallery.surfaces.len() as u16).max(1);
        let tile_w = tiles_area.width / columns;
        if tile_w < 4 {
            return;
        }

        let rows: Vec<&[crate::render::FilteredSurface]> =
            gallery.surfaces.chunks(columns as usize).collect();
        self.scroll_row = self.scroll_row.min(rows.len().saturating_sub(1) as u16);

        let mut y = tiles_area.y;
        let bottom = tiles_area.y + tiles_area.height;

        for row in rows.iter().skip(self.scroll_row as usize) {
            if y >= bottom {
                break;
            }
            let row_height = row
                .iter()
                .map(|s| tile_height(s, tile_w))
                .max()
                .unwrap_or(0)
                .min(bottom - y);
            if row_height < 3 {
                break;
            }

            for (i, surface) in row.iter().enumerate() {
                let tile_area = Rect::new(tiles_area.x + i as u16 * tile_w, y, tile_w, row_height);
                draw_tile(f, tile_area, surface);
            }

            y += row_height;
        }
    }
}

fn nav_chip(label: &str, enabled: bool) -> Span<'_> {
    if enabled {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(label, Style::default().fg(Color::DarkGray))
    }
}

/// Rows a tile occupies at the given width: borders, optional caption line,
/// and the half-block raster.
fn tile_height(surface: &crate::render::FilteredSurface, tile_w: u16) -> u16 {
    let inner_w = tile_w.saturating_sub(2);
    let caption_rows = u16::from(surface.caption.is_some());
    Halfblocks::rows_for_width(&surface.image, inner_w)
        .saturating_add(caption_rows)
        .saturating_add(2)
}

fn draw_tile(f: &mut Frame, area: Rect, surface: &crate::render::FilteredSurface) {
    let block = Block::bordered().title(surface.name);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut image_area = inner;
    if let Some(caption) = surface.caption {
        f.render_widget(
            Paragraph::new(Span::styled(
                caption,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );
        image_area = Rect::new(
            inner.x,
            inner.y + 1,
            inner.width,
            inner.height.saturating_sub(1),
        );
    }

    f.render_widget(Halfblocks::new(&surface.image), image_area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::event_source::{KeyCode, KeyModifiers};
    use crate::test_utils::minimal_pdf;

    fn press(app: &mut App, c: char) {
        let _ = app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()));
    }

    fn wait_for_document(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.service.document_info().is_none() {
            app.on_tick();
            assert!(Instant::now() < deadline, "document did not open");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn boundary_noop_keeps_scroll_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two-pages.pdf");
        std::fs::write(&path, minimal_pdf(612, 792, 2)).unwrap();

        let mut app = App::new(path, &Settings::default(), None);
        wait_for_document(&mut app);
        app.scroll_row = 3;

        // Prev at page 1 is a no-op and must leave the scroll untouched.
        press(&mut app, 'p');
        assert_eq!(app.service.state().current_page, 1);
        assert_eq!(app.scroll_row, 3);

        // An actual page change resets it.
        press(&mut app, 'n');
        assert_eq!(app.service.state().current_page, 2);
        assert_eq!(app.scroll_row, 0);
    }
}

/// Main application loop, driven by an injectable event source.
pub fn run_app_with_event_source<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(50);

    loop {
        let mut should_quit = false;
        let mut events_processed = 0;

        while event_source.poll(Duration::from_millis(0))? && events_processed < 50 {
            let event = event_source.read()?;
            events_processed += 1;

            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key_event(key) == Some(AppAction::Quit) {
                        should_quit = true;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        app.on_tick();
        terminal.draw(|f| app.draw(f))?;

        if should_quit {
            break;
        }

        // Sleep until the next event or tick.
        let _ = event_source.poll(tick_rate)?;
    }

    Ok(())
}
