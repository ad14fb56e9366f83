//! Work-list of pages waiting to be mirrored
//!
//! The frontier is a LIFO stack. Links discovered on a page are pushed in
//! reverse document order, so popping visits them first-to-last and each
//! subtree is finished before its next sibling starts. This is the same order
//! a recursive depth-first walk would produce, without the recursion.

use url::Url;

/// A page waiting to be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTask {
    /// Absolute URL of the page
    pub url: Url,

    /// Number of link edges between the root and this page
    pub depth: u32,
}

impl PageTask {
    /// Creates the task for the crawl root
    pub fn root(url: Url) -> Self {
        Self { url, depth: 0 }
    }
}

/// Depth-first work-list of page tasks
#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<PageTask>,
}

impl Frontier {
    /// Creates a frontier seeded with one task
    pub fn new(seed: PageTask) -> Self {
        Self { stack: vec![seed] }
    }

    /// Schedules links found on a page, in document order, at `depth`
    pub fn push_links(&mut self, links: Vec<Url>, depth: u32) {
        self.stack
            .extend(links.into_iter().rev().map(|url| PageTask { url, depth }));
    }

    /// Takes the next task to process
    pub fn pop(&mut self) -> Option<PageTask> {
        self.stack.pop()
    }

    /// Number of tasks waiting
    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}
