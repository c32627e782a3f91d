use gallery_core::{GalleryViewModel, ImageRecord, Notification, SessionPhase};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::{
    CARD_ROWS, GALLERY_TITLE, HELP_KEYS, HELP_TITLE, IDLE_HINT, SEARCH_TITLE,
};
use super::notify::label;
use super::viewport::Viewport;
use super::GallerySurface;

/// Full-size targets of the cards currently on the surface, by card number.
#[derive(Debug, Default)]
pub struct Lightbox {
    targets: Vec<String>,
}

impl Lightbox {
    /// Rebuilds the index from every card on the surface.
    pub fn refresh(&mut self, cards: &[ImageRecord]) {
        self.targets = cards
            .iter()
            .map(|card| card.large_image_url.clone())
            .collect();
    }

    /// Card numbers start at 1.
    pub fn target(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.targets.get(index))
            .map(String::as_str)
    }
}

/// Cards rendered so far, numbered continuously across pages.
#[derive(Debug, Default)]
pub struct CardList {
    cards: Vec<ImageRecord>,
    lightbox: Lightbox,
}

impl CardList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[ImageRecord] {
        &self.cards
    }

    /// The card and its full-size target; numbers start at 1.
    pub fn enlarged(&self, number: usize) -> Option<(&ImageRecord, &str)> {
        let target = self.lightbox.target(number)?;
        self.cards.get(number - 1).map(|card| (card, target))
    }
}

impl GallerySurface for CardList {
    fn clear(&mut self) {
        self.cards.clear();
        self.lightbox.refresh(&self.cards);
    }

    fn append(&mut self, items: &[ImageRecord]) {
        self.cards.extend_from_slice(items);
        self.lightbox.refresh(&self.cards);
    }

    fn len(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Help,
    /// Full-size view of a card, by card number.
    Lightbox(usize),
}

/// Everything one frame shows.
pub struct ScreenView<'a> {
    pub input: &'a str,
    pub cards: &'a CardList,
    pub viewport: &'a Viewport,
    pub gallery: &'a GalleryViewModel,
    pub notice: Option<&'a Notification>,
    pub overlay: Overlay,
}

/// Search box, card pane, status line, notice line.
pub fn screen_areas(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Rows available for cards inside the bordered pane.
pub fn gallery_rows(area: Rect) -> u32 {
    let [_, gallery, _, _] = screen_areas(area);
    u32::from(gallery.height.saturating_sub(2))
}

pub fn draw(frame: &mut Frame, screen: &ScreenView<'_>) {
    let [search_area, gallery_area, status_area, notice_area] = screen_areas(frame.area());

    draw_search(frame, search_area, screen.input);
    draw_gallery(frame, gallery_area, screen);
    if let Some(status) = status_line(screen.gallery) {
        frame.render_widget(
            Paragraph::new(status).style(Style::default().add_modifier(Modifier::REVERSED)),
            status_area,
        );
    }
    if let Some(notification) = screen.notice {
        frame.render_widget(Paragraph::new(notice_line(notification)), notice_area);
    }

    match screen.overlay {
        Overlay::None => {}
        Overlay::Help => draw_popup(frame, HELP_TITLE, help_lines()),
        Overlay::Lightbox(number) => {
            if let Some((card, target)) = screen.cards.enlarged(number) {
                let title = format!(" #{number} ");
                draw_popup(frame, &title, lightbox_lines(card, target));
            }
        }
    }
}

fn draw_search(frame: &mut Frame, area: Rect, input: &str) {
    let block = Block::bordered().title(SEARCH_TITLE);
    let inner = block.inner(area);
    let room = usize::from(inner.width.saturating_sub(1));
    let shown: String = {
        let len = input.chars().count();
        input.chars().skip(len.saturating_sub(room)).collect()
    };
    let cursor_x = inner.x + u16::try_from(shown.chars().count()).unwrap_or(inner.width);
    frame.render_widget(Paragraph::new(shown).block(block), area);
    frame.set_cursor_position((cursor_x, inner.y));
}

fn draw_gallery(frame: &mut Frame, area: Rect, screen: &ScreenView<'_>) {
    let block = Block::bordered().title(GALLERY_TITLE);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if screen.cards.is_empty() {
        if screen.gallery.phase == SessionPhase::Idle {
            let hint = Paragraph::new(IDLE_HINT).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, inner);
        }
        return;
    }

    let lines = visible_lines(
        screen.cards.cards(),
        screen.viewport.offset(),
        u32::from(inner.height),
        screen.viewport.focused_card(),
    );
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_popup(frame: &mut Frame, title: &str, lines: Vec<Line<'_>>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(frame.area(), 72, height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(title.to_string())),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// The rows of the card list that fall inside the viewport.
pub fn visible_lines(
    cards: &[ImageRecord],
    offset: u32,
    rows: u32,
    focused: usize,
) -> Vec<Line<'_>> {
    let first = (offset / CARD_ROWS) as usize;
    let skip = (offset % CARD_ROWS) as usize;
    cards
        .iter()
        .enumerate()
        .skip(first)
        .flat_map(|(index, card)| card_lines(index + 1, card, index == focused))
        .skip(skip)
        .take(rows as usize)
        .collect()
}

fn card_lines(number: usize, card: &ImageRecord, focused: bool) -> Vec<Line<'_>> {
    let mut title = Style::default().add_modifier(Modifier::BOLD);
    if focused {
        title = title.add_modifier(Modifier::REVERSED);
    }
    vec![
        Line::from(vec![
            Span::styled(format!("#{number} "), title),
            Span::styled(card.tags.as_str(), title),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(card.webformat_url.as_str(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(format!(
            "  Likes {} | Views {} | Comments {} | Downloads {}",
            card.likes, card.views, card.comments, card.downloads
        )),
        Line::default(),
    ]
}

fn lightbox_lines<'a>(card: &'a ImageRecord, target: &'a str) -> Vec<Line<'a>> {
    vec![
        Line::styled(card.tags.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Line::default(),
        Line::from(format!("Full size: {target}")),
        Line::from(format!("Page:      {}", card.page_url)),
        Line::from(format!("By:        {}", card.user)),
        Line::default(),
        Line::styled("Esc closes", Style::default().fg(Color::DarkGray)),
    ]
}

fn help_lines() -> Vec<Line<'static>> {
    HELP_KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:<12}"), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(*action),
            ])
        })
        .collect()
}

fn notice_line(notification: &Notification) -> Line<'static> {
    let color = match notification {
        Notification::Warning(_) => Color::Yellow,
        Notification::Success { .. } => Color::Green,
        Notification::Failure(_) => Color::Red,
        Notification::Info(_) => Color::Cyan,
    };
    Line::from(vec![
        Span::styled(
            format!("[{}] ", label(notification)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(notification.message()),
    ])
}

/// One-line summary of the session; `None` before the first search.
pub fn status_line(view: &GalleryViewModel) -> Option<String> {
    let phase = match view.phase {
        SessionPhase::Idle => return None,
        SessionPhase::Active => "more available",
        SessionPhase::Exhausted => "end of results",
    };
    let total = view
        .total_available
        .map(|total| format!(" of {total}"))
        .unwrap_or_default();
    let mut line = format!(
        "\"{query}\" | page {page} | {shown}{total} images | {phase}",
        query = view.query,
        page = view.page,
        shown = view.rendered_count,
    );
    if view.fetch_in_flight {
        line.push_str(" | loading...");
    }
    if view.load_more_visible {
        line.push_str(" | Tab: load more");
    }
    if view.scroll_to_top_visible {
        line.push_str(" | Home: top");
    }
    Some(line)
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
