/// Current page position within a funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pager {
    current: usize,
    page_count: usize,
}

impl Pager {
    pub fn new(page_count: usize) -> Self {
        Self {
            current: 0,
            page_count,
        }
    }

    /// Zero-based index of the page on screen.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn last_index(&self) -> usize {
        self.page_count.saturating_sub(1)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.last_index()
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Back to the first page of a document with `page_count` pages.
    pub fn reset(&mut self, page_count: usize) {
        *self = Self::new(page_count);
    }

    /// "Page X/Y" label, 1-based.
    pub fn label(&self) -> String {
        if self.page_count == 0 {
            return "Page 0/0".to_string();
        }
        format!("Page {}/{}", self.current + 1, self.page_count)
    }
}
