/// Terminal rows per card: title, preview link, stats, spacer.
pub const CARD_ROWS: u32 = 4;
/// Scroll metrics are reported in pixels; one terminal row stands for this many.
pub const ROW_PX: u32 = 20;
/// Cards the viewport advances by after new cards are appended.
pub const AUTO_SCROLL_CARDS: u32 = 2;

pub const SEARCH_TITLE: &str = " Search images ";
pub const GALLERY_TITLE: &str = " Gallery ";
pub const HELP_TITLE: &str = " Keys ";
pub const IDLE_HINT: &str = "Type a search term and press Enter. F1 shows all keys.";

pub const HELP_KEYS: &[(&str, &str)] = &[
    ("Enter", "search for the typed term"),
    ("Tab", "load more (while more results are available)"),
    ("Down / Up", "scroll by one card"),
    ("PgDn / PgUp", "scroll by one screen"),
    ("End", "jump to the bottom; the next page loads near the end"),
    ("Home", "scroll back to the top"),
    ("Ctrl+O", "show the full-size image of the top card"),
    ("Ctrl+U", "clear the search input"),
    ("Esc", "close the open overlay"),
    ("F1", "toggle this help"),
    ("Ctrl+C", "quit"),
];
