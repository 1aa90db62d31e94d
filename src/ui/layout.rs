use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Content pane needs at least this many columns next to a full sidebar.
const MIN_CONTENT_WIDTH: u16 = 48;
const COMPACT_SIDEBAR_WIDTH: u16 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // full lesson titles in the sidebar
    Narrow, // sidebar shows lesson numbers only
}

impl LayoutTier {
    pub fn from_area(area: Rect, sidebar_width: u16) -> Self {
        if area.width >= sidebar_width.saturating_add(MIN_CONTENT_WIDTH) {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn compact_sidebar(&self) -> bool {
        *self == LayoutTier::Narrow
    }
}

pub struct AppLayout {
    pub sidebar: Rect,
    pub header: Rect,
    pub tabs: Rect,
    pub content: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect, sidebar_width: u16, footer_lines: u16) -> Self {
        let tier = LayoutTier::from_area(area, sidebar_width);
        let sidebar_width = if tier.compact_sidebar() {
            COMPACT_SIDEBAR_WIDTH
        } else {
            sidebar_width
        };

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(footer_lines),
            ])
            .split(horizontal[1]);

        Self {
            sidebar: horizontal[0],
            header: vertical[0],
            tabs: vertical[1],
            content: vertical[2],
            footer: vertical[3],
            tier,
        }
    }

    /// Where tab content is drawn: the content pane minus its padding.
    pub fn body(&self) -> Rect {
        self.content.inner(Margin::new(2, 1))
    }
}

/// Greedily pack footer hints into as few lines as fit in `width` columns.
/// A hint wider than the footer gets a line of its own.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const INDENT: &str = " ";
    const GAP: &str = "  ";

    if width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        match lines.last_mut() {
            Some(line) if line.chars().count() + GAP.len() + hint.chars().count() <= width => {
                line.push_str(GAP);
                line.push_str(hint);
            }
            _ => lines.push(format!("{INDENT}{hint}")),
        }
    }
    lines
}

/// Index of the first item to draw so that `selected` stays visible when
/// every item is `item_height` rows tall.
pub fn scroll_offset(selected: usize, item_height: u16, visible_height: u16) -> usize {
    let per_page = (visible_height / item_height.max(1)).max(1) as usize;
    if selected < per_page {
        0
    } else {
        selected + 1 - per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminal_keeps_full_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40), 32, 1);
        assert_eq!(layout.tier, LayoutTier::Wide);
        assert_eq!(layout.sidebar.width, 32);
        assert_eq!(layout.content.x, 32);
        assert_eq!(layout.footer.height, 1);
    }

    #[test]
    fn narrow_terminal_collapses_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 70, 30), 32, 2);
        assert_eq!(layout.tier, LayoutTier::Narrow);
        assert_eq!(layout.sidebar.width, COMPACT_SIDEBAR_WIDTH);
        assert_eq!(layout.footer.height, 2);
    }

    #[test]
    fn body_is_padded_inside_content() {
        let layout = AppLayout::new(Rect::new(0, 0, 107, 40), 32, 1);
        let body = layout.body();
        assert_eq!(body.x, layout.content.x + 2);
        assert_eq!(body.width, layout.content.width - 4);
        assert_eq!(body.height, layout.content.height - 2);
    }

    #[test]
    fn hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[a] one", "[b] two", "[c] three"], 18);
        assert_eq!(lines, vec![" [a] one  [b] two", " [c] three"]);
    }

    #[test]
    fn hints_empty_when_no_room() {
        assert!(pack_hint_lines(&["[a] one"], 0).is_empty());
        assert!(pack_hint_lines(&[], 80).is_empty());
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 3, 9), 0);
        assert_eq!(scroll_offset(2, 3, 9), 0);
        assert_eq!(scroll_offset(3, 3, 9), 1);
        assert_eq!(scroll_offset(10, 3, 9), 8);
        // taller than the viewport still shows the selected item
        assert_eq!(scroll_offset(4, 20, 9), 4);
    }
}
