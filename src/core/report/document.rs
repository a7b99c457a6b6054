//! Format-neutral report document
//!
//! Builders in [`super::history`] and [`super::detail`] produce a
//! [`Document`]; the reporters in [`super::formats`] serialize it.

/// Left-column header of every measurement table
pub const LABEL_HEADER: &str = "Medida";
/// Right-column header of every measurement table
pub const VALUE_HEADER: &str = "Valor";
/// Placeholder for a missing reading
pub const MISSING_VALUE: &str = "N/A";

/// One row of a two-column table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Full-width subsection title
    Group(String),
    /// Label and value
    Entry {
        /// Left column
        label: String,
        /// Right column
        value: String,
    },
}

impl Row {
    /// Shorthand for [`Row::Entry`]
    #[must_use]
    pub fn entry(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Entry {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Two-column `Medida | Valor` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Rows in display order
    pub rows: Vec<Row>,
}

impl Table {
    /// Entry rows only
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().filter_map(|r| match r {
            Row::Entry { label, value } => Some((label.as_str(), value.as_str())),
            Row::Group(_) => None,
        })
    }

    /// Value shown for `label`, if the table has it
    #[must_use]
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.entries().find(|(l, _)| *l == label).map(|(_, v)| v)
    }
}

/// Document content unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Large heading at the top of the first page
    Title(String),
    /// Secondary line under the title
    Subtitle(String),
    /// Standalone message (empty-state notice)
    Notice(String),
    /// Section heading
    Heading(String),
    /// Measurement table
    Table(Table),
    /// Generation stamp at the bottom of the final page
    Footer(String),
}

/// One printed page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

/// A paginated report ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Document title (also the HTML `<title>`)
    pub title: String,
    /// Output file name without extension
    pub file_stem: String,
    /// Pages, never empty
    pub pages: Vec<Page>,
}

impl Document {
    /// All blocks across every page
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// Section headings in order
    #[must_use]
    pub fn headings(&self) -> Vec<&str> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Tables in order
    #[must_use]
    pub fn tables(&self) -> Vec<&Table> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Notices in order
    #[must_use]
    pub fn notices(&self) -> Vec<&str> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Notice(n) => Some(n.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Footer text, if present
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.blocks().find_map(|b| match b {
            Block::Footer(f) => Some(f.as_str()),
            _ => None,
        })
    }
}

/// Vertical cursor deciding where pages break
///
/// Units follow an A4 page in millimetres.
#[derive(Debug, Clone)]
pub struct PageCursor {
    page_height: f32,
    y: f32,
    pages: Vec<Page>,
}

impl PageCursor {
    /// Top margin where content starts
    pub const TOP: f32 = 20.0;
    /// Space reserved at the bottom before breaking
    pub const BOTTOM_RESERVE: f32 = 30.0;
    /// Advance after the title and after the subtitle
    pub const TITLE_STEP: f32 = 10.0;
    /// Offset between a section heading and its table
    pub const HEADING_STEP: f32 = 10.0;
    /// Height of one table row (header included)
    pub const ROW_HEIGHT: f32 = 7.0;
    /// Gap after each table
    pub const SECTION_GAP: f32 = 15.0;

    /// Cursor at the top of a fresh first page
    #[must_use]
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            y: Self::TOP,
            pages: vec![Page::default()],
        }
    }

    /// Current vertical position
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Append `block` to the current page and move down by `advance`
    pub fn push(&mut self, block: Block, advance: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
        self.y += advance;
    }

    /// Append a heading followed by its table, consuming section height
    #[allow(clippy::cast_precision_loss)]
    pub fn push_section(&mut self, heading: String, table: Table) {
        let rows = table.rows.len() + 1;
        self.push(Block::Heading(heading), Self::HEADING_STEP);
        self.push(
            Block::Table(table),
            rows as f32 * Self::ROW_HEIGHT + Self::SECTION_GAP,
        );
    }

    /// True when the cursor is past the break threshold
    #[must_use]
    pub fn is_near_bottom(&self) -> bool {
        self.y > self.page_height - Self::BOTTOM_RESERVE
    }

    /// Start a new page and return to the top margin
    pub fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.y = Self::TOP;
    }

    /// Finished pages
    #[must_use]
    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}
