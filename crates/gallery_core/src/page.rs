/// Number of images requested per page. Fixed by the upstream request contract.
pub const PAGE_SIZE: u32 = 40;

/// Token identifying one in-flight page request.
pub type RequestId = u64;

/// One image as shown in the gallery. No uniqueness is enforced across pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageRecord {
    pub id: u64,
    pub page_url: String,
    pub tags: String,
    pub preview_url: String,
    /// Medium-size image shown in the card.
    pub webformat_url: String,
    /// Full-size image opened when a card is enlarged.
    pub large_image_url: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub downloads: u64,
    pub user: String,
}

/// What the engine must fetch for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub request_id: RequestId,
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

/// Items of one fetched page, plus whether it was the last one.
///
/// A last page may still carry items; they are rendered before the session
/// becomes exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub items: Vec<ImageRecord>,
    pub total_available: u64,
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Page(PageResult),
    Failure { message: String },
}

impl PageOutcome {
    /// Classifies a fetched page.
    ///
    /// The page is the last one when it is empty or when
    /// `page * page_size` reaches `total_available`.
    pub fn classify(items: Vec<ImageRecord>, total_available: u64, page: u32, page_size: u32) -> Self {
        let fetched_so_far = u64::from(page) * u64::from(page_size);
        let exhausted = items.is_empty() || total_available <= fetched_so_far;
        PageOutcome::Page(PageResult {
            items,
            total_available,
            exhausted,
        })
    }

    pub fn failure(message: impl Into<String>) -> Self {
        PageOutcome::Failure {
            message: message.into(),
        }
    }
}
